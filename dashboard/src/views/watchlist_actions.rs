use std::path::Path;
use std::sync::Arc;

use axum::Form;
use axum::extract::{Path as UrlPath, State};
use chrono::Utc;
use maud::Markup;
use serde::Deserialize;
use tracing::warn;

use crate::state::AppState;
use crate::watchlist::{self, WATCHLIST_PATH};

use super::stock_list::stock_cards;

#[derive(Deserialize)]
pub struct AddTickerRequest {
    ticker: String,
}

pub async fn add_ticker(
    State(state): State<Arc<AppState>>,
    Form(request): Form<AddTickerRequest>,
) -> Markup {
    {
        let mut watchlist = state.watchlist.write().unwrap();
        if watchlist.add(&request.ticker) {
            persist(&watchlist);
        }
    }
    stock_cards(&state, None, Utc::now())
}

pub async fn remove_ticker(
    UrlPath(ticker): UrlPath<String>,
    State(state): State<Arc<AppState>>,
) -> Markup {
    {
        let mut watchlist = state.watchlist.write().unwrap();
        if watchlist.remove(&ticker) {
            persist(&watchlist);
        }
    }
    stock_cards(&state, None, Utc::now())
}

fn persist(watchlist: &watchlist::Watchlist) {
    if let Err(e) = watchlist::save(Path::new(WATCHLIST_PATH), watchlist) {
        warn!("failed to persist watchlist: {e}");
    }
}
