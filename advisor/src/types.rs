use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article from `/stock-advise/news`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub source: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub ticker: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<Sentiment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Negative => "Negative",
            Sentiment::Neutral => "Neutral",
        }
    }
}

/// Body of `POST /stock-advise/query`.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceRequest<'a> {
    pub query: &'a str,
    pub ticker: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdviceResponse {
    pub response: String,
}

/// Body of `POST /rag/query`.
#[derive(Debug, Clone, Serialize)]
pub struct RagQuery {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<RagContext>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_tolerance: Option<RiskTolerance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTolerance {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagResponse {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<RagSource>,
    pub sentiment: Sentiment,
    /// 0.0..=1.0
    pub confidence: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RagSource {
    pub title: String,
    pub url: String,
    pub relevance: f64,
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    #[serde(rename = "access_token")]
    pub token: String,
}

/// Body of `POST /register`. The backend expects snake_case keys here.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub image: &'a str,
}

/// Media categories accepted by `POST /embed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Voice,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Voice => "voice",
            MediaKind::Video => "video",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rag_query_serializes_with_camel_case_context() {
        let query = RagQuery {
            query: "outlook for the next quarter".to_owned(),
            context: Some(RagContext {
                ticker: Some("NVDA".to_owned()),
                timeframe: None,
                risk_tolerance: Some(RiskTolerance::High),
            }),
        };
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["context"]["ticker"], "NVDA");
        assert_eq!(json["context"]["riskTolerance"], "high");
        assert!(json["context"].get("timeframe").is_none());
    }

    #[test]
    fn rag_query_omits_missing_context() {
        let query = RagQuery {
            query: "general market mood".to_owned(),
            context: None,
        };
        let json = serde_json::to_value(&query).unwrap();
        assert!(json.get("context").is_none());
    }

    #[test]
    fn news_article_accepts_camel_case_wire_fields() {
        let article: NewsArticle = serde_json::from_str(
            r#"{
                "id": "1",
                "title": "NVIDIA Announces New AI Chips",
                "summary": "Next-generation processors announced",
                "source": "TechNews",
                "url": "https://example.com/news/1",
                "publishedAt": "2024-01-01T11:00:00Z",
                "ticker": "NVDA",
                "sentiment": "positive"
            }"#,
        )
        .unwrap();
        assert_eq!(article.ticker, "NVDA");
        assert_eq!(article.sentiment, Some(Sentiment::Positive));
        assert!(article.author.is_none());
    }

    #[test]
    fn session_reads_access_token_field() {
        let session: Session =
            serde_json::from_str(r#"{"access_token": "abc", "token_type": "bearer"}"#).unwrap();
        assert_eq!(session.token, "abc");
    }
}
