use std::sync::RwLock;

use reqwest::{Client, RequestBuilder, Response};
use tracing::debug;

use crate::error::{AdvisorError, error_detail};
use crate::types::{
    AdviceRequest, AdviceResponse, MediaKind, NewsArticle, RagQuery, RagResponse, RegisterRequest,
    Session,
};

/// Client for the remote advice backend.
///
/// Holds the session token obtained by [`login`](Self::login); requests made
/// before a login go out unauthenticated, which the mock-friendly backend
/// accepts.
pub struct AdvisorClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl AdvisorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
            token: RwLock::new(None),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token.read().unwrap().as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    pub fn has_session(&self) -> bool {
        self.token.read().unwrap().is_some()
    }

    /// Exchange credentials for a session token. The token is kept on the
    /// client and attached to every later request.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AdvisorError> {
        let form = [("username", username), ("password", password)];
        let response = self
            .http
            .post(self.endpoint("/login"))
            .form(&form)
            .send()
            .await?;
        let session: Session = decode(check_status(response).await?).await?;
        *self.token.write().unwrap() = Some(session.token);
        debug!("logged in as {username}");
        Ok(())
    }

    pub async fn register(&self, request: &RegisterRequest<'_>) -> Result<(), AdvisorError> {
        let response = self
            .http
            .post(self.endpoint("/register"))
            .json(request)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    pub async fn stock_news(&self, ticker: &str) -> Result<Vec<NewsArticle>, AdvisorError> {
        let request = self
            .http
            .get(self.endpoint("/stock-advise/news"))
            .query(&[("ticker", ticker)]);
        let response = self.authorize(request).send().await?;
        decode(check_status(response).await?).await
    }

    pub async fn query_advice(&self, query: &str, ticker: &str) -> Result<String, AdvisorError> {
        let request = self
            .http
            .post(self.endpoint("/stock-advise/query"))
            .json(&AdviceRequest { query, ticker });
        let response = self.authorize(request).send().await?;
        let advice: AdviceResponse = decode(check_status(response).await?).await?;
        Ok(advice.response)
    }

    pub async fn rag_query(&self, query: RagQuery) -> Result<RagResponse, AdvisorError> {
        let request = self.http.post(self.endpoint("/rag/query")).json(&query);
        let response = self.authorize(request).send().await?;
        decode(check_status(response).await?).await
    }

    /// Submit a captured recording for embedding. The backend's receipt
    /// carries nothing the dashboard consumes.
    pub async fn create_embedding(
        &self,
        filename: String,
        bytes: Vec<u8>,
        kind: MediaKind,
    ) -> Result<(), AdvisorError> {
        let size = bytes.len();
        let file = reqwest::multipart::Part::bytes(bytes).file_name(filename);
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("type", kind.as_str());
        let request = self.http.post(self.endpoint("/embed")).multipart(form);
        let response = self.authorize(request).send().await?;
        check_status(response).await?;
        debug!("submitted {size}-byte {} recording for embedding", kind.as_str());
        Ok(())
    }
}

async fn check_status(response: Response) -> Result<Response, AdvisorError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(AdvisorError::Backend {
        status,
        detail: error_detail(status, &body),
    })
}

async fn decode<T: serde::de::DeserializeOwned>(response: Response) -> Result<T, AdvisorError> {
    response.json().await.map_err(AdvisorError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_doubled_slash() {
        let client = AdvisorClient::new("http://127.0.0.1:8000/");
        assert_eq!(
            client.endpoint("/stock-advise/news"),
            "http://127.0.0.1:8000/stock-advise/news"
        );
    }

    #[test]
    fn session_state_starts_empty() {
        let client = AdvisorClient::new("http://127.0.0.1:8000");
        assert!(!client.has_session());
    }
}
