//! Typed client for the stock-advice backend REST API.

mod client;
mod error;
mod types;

pub use client::AdvisorClient;
pub use error::AdvisorError;
pub use types::{
    AdviceRequest, AdviceResponse, MediaKind, NewsArticle, RagContext, RagQuery, RagResponse,
    RagSource, RegisterRequest, RiskTolerance, Sentiment, Session,
};
