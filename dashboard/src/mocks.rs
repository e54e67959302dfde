//! Bundled data used when no backend is reachable, and the seed listings
//! for the quote board. Mirrors what a live feed would return, so every
//! surface renders without external services.

use advisor::{NewsArticle, RagResponse, RagSource, Sentiment};
use chrono::{DateTime, Duration, Utc};

use crate::quotes::{Insights, Recommendation, RiskLevel, StockQuote};

pub fn seed_quotes(now: DateTime<Utc>) -> Vec<StockQuote> {
    vec![
        StockQuote {
            ticker: "NVDA".to_owned(),
            company_name: "NVIDIA Corporation".to_owned(),
            price: 875.28,
            change: 12.43,
            change_percent: 1.44,
            open: 869.96,
            prev_close: 862.85,
            volume: 42_000_000.0,
            market_cap: 2.16e12,
            pe_ratio: 73.5,
            eps: 11.93,
            dividend_yield: 0.0003,
            high_52w: 974.00,
            low_52w: 373.56,
            last_refreshed: now,
            insights: Insights {
                summary: "Data-center demand keeps outpacing supply, and the \
                          accelerated-computing install base continues to widen. \
                          Valuation already prices in flawless execution."
                    .to_owned(),
                pros: vec![
                    "Dominant position in AI training hardware".to_owned(),
                    "Software moat around CUDA deepens switching costs".to_owned(),
                    "Data-center revenue growing faster than the segment average".to_owned(),
                ],
                cons: vec![
                    "Valuation leaves little room for execution slips".to_owned(),
                    "Export controls cap sales into several large markets".to_owned(),
                    "Hyperscalers are building in-house accelerators".to_owned(),
                ],
                recommendation: Recommendation::Buy,
                risk_level: RiskLevel::Medium,
            },
            history: Default::default(),
        },
        StockQuote {
            ticker: "TSLA".to_owned(),
            company_name: "Tesla, Inc.".to_owned(),
            price: 237.49,
            change: -3.21,
            change_percent: -1.33,
            open: 241.30,
            prev_close: 240.70,
            volume: 98_000_000.0,
            market_cap: 7.56e11,
            pe_ratio: 68.2,
            eps: 3.48,
            dividend_yield: 0.0,
            high_52w: 299.29,
            low_52w: 152.37,
            last_refreshed: now,
            insights: Insights {
                summary: "Delivery growth is holding up but margins keep \
                          compressing as price cuts work through the fleet. \
                          Energy storage is the quiet bright spot."
                    .to_owned(),
                pros: vec![
                    "Best-in-class manufacturing cost per vehicle".to_owned(),
                    "Energy storage deployments doubling year over year".to_owned(),
                    "Charging network is becoming an industry standard".to_owned(),
                ],
                cons: vec![
                    "Automotive gross margin trending down".to_owned(),
                    "Competition intensifying in every major EV market".to_owned(),
                    "Robotaxi timeline remains speculative".to_owned(),
                ],
                recommendation: Recommendation::Hold,
                risk_level: RiskLevel::High,
            },
            history: Default::default(),
        },
        StockQuote {
            ticker: "GOOG".to_owned(),
            company_name: "Alphabet Inc.".to_owned(),
            price: 155.72,
            change: 1.28,
            change_percent: 0.83,
            open: 154.80,
            prev_close: 154.44,
            volume: 23_000_000.0,
            market_cap: 1.94e12,
            pe_ratio: 26.4,
            eps: 5.90,
            dividend_yield: 0.005,
            high_52w: 160.22,
            low_52w: 102.21,
            last_refreshed: now,
            insights: Insights {
                summary: "Search monetization is stable, cloud has reached \
                          sustained profitability, and the valuation sits \
                          below the megacap peer group."
                    .to_owned(),
                pros: vec![
                    "Cloud division now contributing operating profit".to_owned(),
                    "YouTube ad revenue reaccelerating".to_owned(),
                    "Cheapest multiple among the large platforms".to_owned(),
                ],
                cons: vec![
                    "Regulatory pressure on search distribution deals".to_owned(),
                    "Generative answers could cannibalize query volume".to_owned(),
                ],
                recommendation: Recommendation::Buy,
                risk_level: RiskLevel::Low,
            },
            history: Default::default(),
        },
    ]
}

/// Bundled articles for a ticker, stamped relative to `now`. Unknown
/// tickers get an empty feed.
pub fn sample_news(ticker: &str, now: DateTime<Utc>) -> Vec<NewsArticle> {
    let articles = match ticker {
        "NVDA" => vec![
            (
                "1",
                "NVIDIA Announces New AI Chips",
                "NVIDIA unveils next-generation AI processors with 50% performance improvement",
                "TechNews",
                "https://example.com/news/1",
                1,
                Some(Sentiment::Positive),
                Some("R. Alvarez"),
            ),
            (
                "4",
                "Supply Constraints Ease for AI Accelerators",
                "Packaging capacity additions shorten lead times for flagship data-center parts",
                "ChipWire",
                "https://example.com/news/4",
                9,
                Some(Sentiment::Neutral),
                None,
            ),
        ],
        "TSLA" => vec![
            (
                "2",
                "Tesla Exceeds Delivery Expectations",
                "Tesla delivered 250,000 vehicles in Q1, exceeding analyst expectations by 15%",
                "AutoInsider",
                "https://example.com/news/2",
                2,
                Some(Sentiment::Positive),
                None,
            ),
            (
                "5",
                "Margin Pressure Persists After Price Cuts",
                "Average selling prices fall again as discounts work through the order book",
                "MarketWatch",
                "https://example.com/news/5",
                11,
                Some(Sentiment::Negative),
                Some("P. Okafor"),
            ),
        ],
        "GOOG" => vec![
            (
                "3",
                "Google Cloud Revenue Grows 30%",
                "Alphabet reports strong growth in cloud division, driving stock up 5% in after-hours trading",
                "MarketWatch",
                "https://example.com/news/3",
                3,
                Some(Sentiment::Positive),
                None,
            ),
            (
                "6",
                "Search Antitrust Remedies Hearing Scheduled",
                "Court sets a date to consider remedies in the search distribution case",
                "LawDesk",
                "https://example.com/news/6",
                14,
                Some(Sentiment::Negative),
                None,
            ),
        ],
        _ => Vec::new(),
    };

    articles
        .into_iter()
        .map(
            |(id, title, summary, source, url, hours_ago, sentiment, author)| NewsArticle {
                id: id.to_owned(),
                title: title.to_owned(),
                summary: summary.to_owned(),
                source: source.to_owned(),
                url: url.to_owned(),
                published_at: now - Duration::hours(hours_ago),
                ticker: ticker.to_owned(),
                author: author.map(str::to_owned),
                sentiment,
                image_url: None,
            },
        )
        .collect()
}

/// Canned advice shown when the backend can't be reached.
pub fn canned_advice(company_name: &str, prompt: &str) -> String {
    format!(
        "Based on the latest market analysis, {company_name} shows promising \
         indicators. Your query about \"{prompt}\" reveals that market sentiment \
         remains positive, with technical indicators suggesting potential \
         short-term growth. However, consider macroeconomic factors that could \
         impact the broader market before making investment decisions."
    )
}

/// Canned RAG answer used as the offline fallback.
pub fn canned_rag_response(company_name: &str) -> RagResponse {
    RagResponse {
        answer: format!(
            "Based on the latest market analysis, {company_name} shows promising \
             indicators. Recent news suggests positive market sentiment, but \
             always consider your investment goals before making decisions."
        ),
        sources: vec![RagSource {
            title: format!("{company_name} quarterly results summary"),
            url: "https://example.com/sources/quarterly".to_owned(),
            relevance: 0.82,
        }],
        sentiment: Sentiment::Positive,
        confidence: 0.75,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sample_news_is_stamped_relative_to_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let articles = sample_news("NVDA", now);
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].published_at, now - Duration::hours(1));
        assert!(articles.iter().all(|a| a.ticker == "NVDA"));
    }

    #[test]
    fn unknown_ticker_has_no_bundled_news() {
        let now = Utc::now();
        assert!(sample_news("AAPL", now).is_empty());
    }
}
