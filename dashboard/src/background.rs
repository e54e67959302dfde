use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use crate::config::{QUOTE_HISTORY_RETENTION, REFRESH_INTERVAL};
use crate::mocks;
use crate::state::AppState;

pub fn spawn_background_workers(state: Arc<AppState>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(REFRESH_INTERVAL);
        loop {
            interval.tick().await;
            refresh_tick(&state).await;
        }
    });
}

/// One pass of the refresh loop: advance the simulated quote feed, refetch
/// stale news, prune everything past retention.
///
/// Locks are never held across an await.
async fn refresh_tick(state: &Arc<AppState>) {
    let now = Utc::now();
    let tickers = { state.watchlist.read().unwrap().tickers.clone() };

    {
        let mut quotes = state.quotes.write().unwrap();
        for ticker in &tickers {
            quotes.touch(ticker, now);
        }
        quotes.prune_history(QUOTE_HISTORY_RETENTION, now);
    }

    for ticker in &tickers {
        let stale = { state.news.read().unwrap().is_stale(ticker, now) };
        if !stale {
            continue;
        }
        let articles = match state.advisor.stock_news(ticker).await {
            Ok(articles) => {
                debug!("fetched {} articles for {ticker}", articles.len());
                articles
            }
            Err(e) => {
                warn!("news fetch for {ticker} failed, using bundled samples: {e}");
                mocks::sample_news(ticker, now)
            }
        };
        state.news.write().unwrap().replace(ticker, articles, now);
    }

    state.news.write().unwrap().prune(now);
}
