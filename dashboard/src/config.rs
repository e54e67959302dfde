//! Behavioral constants for refresh cadence, retention, and chart rendering.

use chrono::Duration;

/// Cached news is refetched once it is older than this.
pub const NEWS_STALE_AFTER: Duration = Duration::minutes(15);
/// Price history kept per quote, enough to fill the widest chart window.
pub const QUOTE_HISTORY_RETENTION: Duration = Duration::hours(24);
/// Cadence of the background refresh loop.
pub const REFRESH_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

pub const CHART_BUCKET_COUNT: usize = 100;
pub const MIN_BUCKET_SECONDS: i64 = 1;
