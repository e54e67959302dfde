pub mod breadcrumbs;
pub mod freshness;
pub mod news_feed;
pub mod query;
pub mod stock_detail;
pub mod stock_list;
pub mod voice;
pub mod watchlist_actions;

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::IntoResponse;
use chrono::Utc;
use maud::{DOCTYPE, Markup, html};
use serde::Deserialize;

use crate::state::AppState;
use crate::styles;
use crate::styles::Global as GlobalClass;

#[derive(Deserialize)]
pub struct WindowQuery {
    pub window: Option<String>,
}

#[derive(Deserialize)]
pub struct TickerQuery {
    pub ticker: Option<String>,
}

/// Resolve the selected ticker: the query param when it's on the watchlist,
/// else the first watched ticker.
fn selected_ticker(state: &AppState, requested: Option<&str>) -> String {
    let watchlist = state.watchlist.read().unwrap();
    requested
        .filter(|t| watchlist.contains(t))
        .map(str::to_owned)
        .or_else(|| watchlist.tickers.first().cloned())
        .unwrap_or_else(|| "NVDA".to_owned())
}

pub fn page_shell(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                link rel="stylesheet" href="/styles.css";
                script src="https://unpkg.com/htmx.org@2.0.3" {}
            }
            body {
                main { (content) }
            }
        }
    }
}

pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Markup {
    let selected = selected_ticker(&state, query.ticker.as_deref());
    let now = Utc::now();

    let query_panel = query::query_panel(&state, &selected, now);
    let cards = stock_list::stock_cards(&state, Some(&selected), now);

    let content = html! {
        div.(GlobalClass::PAGE_HEADER) {
            div {
                h1.(GlobalClass::PAGE_TITLE) { "Finquiry" }
                p.(GlobalClass::PAGE_SUBTITLE) { "Financial insights powered by RAG technology" }
            }
            a href="/voice" { "Ask with Voice" }
        }

        div.(GlobalClass::LAYOUT) {
            div.(GlobalClass::MAIN_COL) {
                div.(GlobalClass::TAB_BAR) {
                    button.(GlobalClass::TAB_BTN).(GlobalClass::TAB_ACTIVE)
                        hx-get=(format!("/fragments/query-panel?ticker={selected}"))
                        hx-target="#main-panel"
                        hx-swap="innerHTML"
                    { "Ask Financial Questions" }
                    button.(GlobalClass::TAB_BTN)
                        hx-get=(format!("/fragments/news?ticker={selected}"))
                        hx-target="#main-panel"
                        hx-swap="innerHTML"
                    { "News" }
                }
                div #main-panel {
                    (query_panel)
                }
            }

            div.(GlobalClass::SIDE_COL) {
                div #stock-cards
                    hx-get=(format!("/fragments/stock-cards?ticker={selected}"))
                    hx-trigger="every 60s"
                    hx-swap="innerHTML"
                {
                    (cards)
                }
            }
        }
    };
    page_shell("Finquiry", content)
}

pub async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], styles::ALL.clone())
}
