use std::sync::Arc;

use advisor::{RagContext, RagQuery, RagResponse, RiskTolerance};
use axum::Form;
use axum::extract::{Query, State};
use chrono::{DateTime, Utc};
use maud::{Markup, html};
use serde::Deserialize;
use tracing::warn;

use crate::state::AppState;
use crate::styles::Global as GlobalClass;
use crate::styles::Panels as PanelClass;

use super::TickerQuery;
use super::freshness::freshness_badge;
use super::news_feed::sentiment_badge;

/// Queries shorter than this are rejected before they reach the backend.
const MIN_PROMPT_LEN: usize = 5;

pub async fn fragment_query_panel(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Markup {
    let selected = super::selected_ticker(&state, query.ticker.as_deref());
    query_panel(&state, &selected, Utc::now())
}

/// The "Ask Financial Questions" panel: stock selector, prompt box, and the
/// freshness line for the selected quote.
pub fn query_panel(state: &AppState, selected: &str, now: DateTime<Utc>) -> Markup {
    let watchlist = state.watchlist.read().unwrap();
    let quotes = state.quotes.read().unwrap();
    let last_refreshed = quotes.get(selected).map(|q| q.last_refreshed);

    html! {
        form.(PanelClass::QUERY_FORM) hx-post="/query" hx-target="#analysis" hx-swap="innerHTML" {
            div.(PanelClass::FIELD) {
                label.(PanelClass::FIELD_LABEL) for="query-ticker" { "Select Stock" }
                select #query-ticker name="ticker" {
                    @for ticker in &watchlist.tickers {
                        @let name = quotes.get(ticker).map(|q| q.company_name.clone()).unwrap_or_else(|| ticker.clone());
                        @if ticker.as_str() == selected {
                            option value=(ticker) selected { (name) " (" (ticker) ")" }
                        } @else {
                            option value=(ticker) { (name) " (" (ticker) ")" }
                        }
                    }
                }
            }
            div.(PanelClass::FIELD) {
                label.(PanelClass::FIELD_LABEL) for="query-prompt" { "Your Financial Question" }
                textarea #query-prompt name="prompt" rows="4"
                    placeholder="Example: What is the growth potential of this stock based on recent earnings?" {}
            }
            button.(PanelClass::SUBMIT_BTN) type="submit" { "Get Financial Insights" }
        }
        div #analysis {}
        @if let Some(at) = last_refreshed {
            div style="margin-top: 12px" {
                (freshness_badge(at, now))
            }
        }
    }
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub ticker: String,
    pub prompt: String,
}

pub async fn submit_query(
    State(state): State<Arc<AppState>>,
    Form(request): Form<QueryRequest>,
) -> Markup {
    let prompt = request.prompt.trim();
    if prompt.len() < MIN_PROMPT_LEN {
        return html! {
            p.(GlobalClass::ERROR_NOTE) { "Query must be at least 5 characters" }
        };
    }

    let response = match state.advisor.query_advice(prompt, &request.ticker).await {
        Ok(response) => response,
        Err(e) => {
            warn!("advice query for {} failed, answering locally: {e}", request.ticker);
            let company = company_name(&state, &request.ticker);
            crate::mocks::canned_advice(&company, prompt)
        }
    };

    html! {
        div.(PanelClass::ANALYSIS) {
            h3.(PanelClass::ANALYSIS_TITLE) { "Financial Analysis:" }
            p { (response) }
        }
    }
}

#[derive(Deserialize)]
pub struct RagRequest {
    pub ticker: String,
    pub query: String,
    pub timeframe: String,
    pub risk_tolerance: RiskTolerance,
}

pub async fn submit_rag_query(
    State(state): State<Arc<AppState>>,
    Form(request): Form<RagRequest>,
) -> Markup {
    let prompt = request.query.trim();
    if prompt.len() < MIN_PROMPT_LEN {
        return html! {
            p.(GlobalClass::ERROR_NOTE) { "Query must be at least 5 characters" }
        };
    }

    let rag_query = RagQuery {
        query: prompt.to_owned(),
        context: Some(RagContext {
            ticker: Some(request.ticker.clone()),
            timeframe: Some(request.timeframe.clone()),
            risk_tolerance: Some(request.risk_tolerance),
        }),
    };

    let response = match state.advisor.rag_query(rag_query).await {
        Ok(response) => response,
        Err(e) => {
            warn!("rag query for {} failed, answering locally: {e}", request.ticker);
            let company = company_name(&state, &request.ticker);
            crate::mocks::canned_rag_response(&company)
        }
    };

    rag_analysis(&response)
}

pub fn rag_analysis(response: &RagResponse) -> Markup {
    html! {
        div.(PanelClass::ANALYSIS) {
            h3.(PanelClass::ANALYSIS_TITLE) { "Financial Analysis:" }
            p { (response.answer) }
            (sentiment_badge(response.sentiment))
            @if !response.sources.is_empty() {
                ul.(PanelClass::SOURCE_LIST) {
                    @for source in &response.sources {
                        li {
                            a href=(source.url) target="_blank" rel="noopener noreferrer" { (source.title) }
                            " (" (format!("{:.0}% relevant", source.relevance * 100.0)) ")"
                        }
                    }
                }
            }
            p.(PanelClass::CONFIDENCE_NOTE) {
                (format!("Confidence: {:.0}%", response.confidence * 100.0))
            }
        }
    }
}

fn company_name(state: &AppState, ticker: &str) -> String {
    state
        .quotes
        .read()
        .unwrap()
        .get(ticker)
        .map(|q| q.company_name.clone())
        .unwrap_or_else(|| ticker.to_owned())
}
