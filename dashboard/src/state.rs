use std::path::Path;
use std::sync::RwLock;

use advisor::AdvisorClient;
use chrono::{Duration, Utc};
use shared::config::AppConfig;
use tracing::warn;

use crate::mocks;
use crate::news::NewsCache;
use crate::quotes::QuoteBoard;
use crate::watchlist::{self, Watchlist};

pub struct AppState {
    pub quotes: RwLock<QuoteBoard>,
    pub news: RwLock<NewsCache>,
    pub watchlist: RwLock<Watchlist>,
    pub advisor: AdvisorClient,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let now = Utc::now();
        let mut quotes = QuoteBoard::new(mocks::seed_quotes(now));
        // One hour of synthetic history so charts render from the first view.
        quotes.backfill_history(now, Duration::hours(1));

        let watchlist = watchlist::load(Path::new(watchlist::WATCHLIST_PATH)).unwrap_or_else(|e| {
            warn!("failed to load watchlist, using defaults: {e}");
            Watchlist::default()
        });

        AppState {
            quotes: RwLock::new(quotes),
            news: RwLock::new(NewsCache::new()),
            watchlist: RwLock::new(watchlist),
            advisor: AdvisorClient::new(&config.backend_url),
        }
    }
}
