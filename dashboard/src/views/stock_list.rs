use std::sync::Arc;

use axum::extract::{Query, State};
use chrono::{DateTime, Duration, Utc};
use maud::{Markup, html};

use crate::charts::{self, svg};
use crate::state::AppState;
use crate::styles::Cards as CardClass;
use crate::styles::Charts as ChartClass;

use super::TickerQuery;
use super::freshness::freshness_badge;

/// Sparklines on cards cover the last hour of history.
const SPARKLINE_WINDOW: Duration = Duration::hours(1);
const SPARKLINE_BUCKETS: usize = 30;

pub async fn fragment_stock_cards(
    State(state): State<Arc<AppState>>,
    Query(query): Query<TickerQuery>,
) -> Markup {
    stock_cards(&state, query.ticker.as_deref(), Utc::now())
}

/// The watchlist card column: one card per watched ticker plus add buttons
/// for listed-but-unwatched tickers.
pub fn stock_cards(state: &AppState, selected: Option<&str>, now: DateTime<Utc>) -> Markup {
    let watchlist = state.watchlist.read().unwrap();
    let quotes = state.quotes.read().unwrap();

    let unwatched: Vec<String> = quotes
        .listed_tickers()
        .iter()
        .filter(|t| !watchlist.contains(t))
        .map(|t| (*t).to_owned())
        .collect();

    html! {
        @for ticker in &watchlist.tickers {
            @if let Some(quote) = quotes.get(ticker) {
                @let selected_class = if selected == Some(ticker.as_str()) { CardClass::CARD_SELECTED } else { "" };
                div.(CardClass::STOCK_CARD).(selected_class) {
                    span.(CardClass::TICKER_BADGE) { "$" (quote.ticker) }
                    div.(CardClass::COMPANY_NAME) {
                        a href=(format!("/?ticker={ticker}")) { (quote.company_name) }
                    }
                    div.(CardClass::CARD_PRICE) { (format!("${:.2}", quote.price)) }
                    @let change_class = if quote.is_positive() { CardClass::CHANGE_POSITIVE } else { CardClass::CHANGE_NEGATIVE };
                    div.(CardClass::CARD_CHANGE).(change_class) {
                        @if quote.is_positive() { "▲ +" } @else { "▼ " }
                        (format!("{:.2} ({:+.2}%)", quote.change, quote.change_percent))
                    }
                    div.(ChartClass::SPARKLINE) {
                        (sparkline(quote, now))
                    }
                    div.(CardClass::CARD_FOOTER) {
                        (freshness_badge(quote.last_refreshed, now))
                        a.(CardClass::CARD_LINK) href=(format!("/stock/{ticker}")) { "details" }
                        button.(CardClass::REMOVE_BTN)
                            hx-delete=(format!("/watchlist/{ticker}"))
                            hx-target="#stock-cards"
                            hx-swap="innerHTML"
                            hx-confirm=(format!("Remove {ticker} from the watchlist?"))
                        { "[x]" }
                    }
                }
            } @else {
                div.(CardClass::STOCK_CARD) {
                    span.(CardClass::TICKER_BADGE) { "$" (ticker) }
                    div.(CardClass::COMPANY_NAME) { (ticker) }
                    p.(CardClass::CARD_CHANGE) { "No quote data" }
                    div.(CardClass::CARD_FOOTER) {
                        button.(CardClass::REMOVE_BTN)
                            hx-delete=(format!("/watchlist/{ticker}"))
                            hx-target="#stock-cards"
                            hx-swap="innerHTML"
                        { "[x]" }
                    }
                }
            }
        }

        @if !unwatched.is_empty() {
            div.(CardClass::CARD_ACTIONS) {
                @for ticker in &unwatched {
                    button.(CardClass::ADD_TICKER_BTN)
                        hx-post="/watchlist"
                        hx-target="#stock-cards"
                        hx-swap="innerHTML"
                        hx-vals=(serde_json::json!({ "ticker": ticker }).to_string())
                    { "[+ " (ticker) "]" }
                }
            }
        }
    }
}

fn sparkline(quote: &crate::quotes::StockQuote, now: DateTime<Utc>) -> Markup {
    let start = now - SPARKLINE_WINDOW;
    let buckets = charts::bucket_points(&quote.history, start, now, SPARKLINE_BUCKETS, 1);
    let closes = charts::aggregate_close(&buckets);
    svg::render_sparkline(&closes)
}
