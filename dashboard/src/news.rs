use std::collections::{HashMap, VecDeque};

use advisor::NewsArticle;
use chrono::{DateTime, Utc};
use shared::timefmt::EXPIRY_WINDOW;

use crate::config::NEWS_STALE_AFTER;

/// Per-ticker cache of fetched articles.
///
/// Entries turn stale after [`NEWS_STALE_AFTER`] and are then refetched by
/// the background loop; individual articles are dropped once they pass the
/// expiry window. In-memory only.
#[derive(Default)]
pub struct NewsCache {
    articles: HashMap<String, VecDeque<NewsArticle>>,
    fetched_at: HashMap<String, DateTime<Utc>>,
}

impl NewsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a ticker's feed, newest first, and stamp the fetch time.
    pub fn replace(&mut self, ticker: &str, mut articles: Vec<NewsArticle>, now: DateTime<Utc>) {
        articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        self.articles
            .insert(ticker.to_owned(), VecDeque::from(articles));
        self.fetched_at.insert(ticker.to_owned(), now);
    }

    pub fn articles(&self, ticker: &str) -> Vec<&NewsArticle> {
        match self.articles.get(ticker) {
            Some(articles) => articles.iter().collect(),
            None => Vec::new(),
        }
    }

    pub fn fetched_at(&self, ticker: &str) -> Option<DateTime<Utc>> {
        self.fetched_at.get(ticker).copied()
    }

    /// A ticker with no fetch stamp counts as stale.
    pub fn is_stale(&self, ticker: &str, now: DateTime<Utc>) -> bool {
        match self.fetched_at.get(ticker) {
            Some(at) => now - *at >= NEWS_STALE_AFTER,
            None => true,
        }
    }

    /// Drop articles past the expiry window; tickers whose feed empties out
    /// are removed entirely (their fetch stamp stays, staleness governs the
    /// refetch).
    pub fn prune(&mut self, now: DateTime<Utc>) {
        let cutoff = now - EXPIRY_WINDOW;
        for articles in self.articles.values_mut() {
            while articles
                .back()
                .is_some_and(|article| article.published_at < cutoff)
            {
                articles.pop_back();
            }
        }
        self.articles.retain(|_, articles| !articles.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn article(id: &str, published_at: DateTime<Utc>) -> NewsArticle {
        NewsArticle {
            id: id.to_owned(),
            title: format!("headline {id}"),
            summary: String::new(),
            source: "TechNews".to_owned(),
            url: format!("https://example.com/news/{id}"),
            published_at,
            ticker: "NVDA".to_owned(),
            author: None,
            sentiment: None,
            image_url: None,
        }
    }

    #[test]
    fn replace_orders_newest_first() {
        let mut cache = NewsCache::new();
        let now = noon();
        cache.replace(
            "NVDA",
            vec![
                article("old", now - Duration::hours(3)),
                article("new", now - Duration::hours(1)),
            ],
            now,
        );
        let ids: Vec<&str> = cache
            .articles("NVDA")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["new", "old"]);
        assert_eq!(cache.fetched_at("NVDA"), Some(now));
    }

    #[test]
    fn staleness_boundary_is_fifteen_minutes() {
        let mut cache = NewsCache::new();
        let now = noon();
        assert!(cache.is_stale("NVDA", now));

        cache.replace("NVDA", Vec::new(), now);
        assert!(!cache.is_stale("NVDA", now + NEWS_STALE_AFTER - Duration::seconds(1)));
        assert!(cache.is_stale("NVDA", now + NEWS_STALE_AFTER));
    }

    #[test]
    fn prune_drops_expired_articles_and_empty_feeds() {
        let mut cache = NewsCache::new();
        let now = noon();
        cache.replace(
            "NVDA",
            vec![
                article("fresh", now - Duration::hours(2)),
                article("expired", now - EXPIRY_WINDOW - Duration::minutes(1)),
            ],
            now,
        );
        cache.replace(
            "TSLA",
            vec![article("gone", now - EXPIRY_WINDOW - Duration::hours(1))],
            now,
        );

        cache.prune(now);

        assert_eq!(cache.articles("NVDA").len(), 1);
        assert!(cache.articles("TSLA").is_empty());
        // The fetch stamp survives so the refetch cadence is unchanged.
        assert_eq!(cache.fetched_at("TSLA"), Some(now));
    }
}
