//! Relative-time rendering and data-freshness classification.
//!
//! Everything here is a pure function of the input instant and an explicit
//! `now`, so callers inject the clock and tests pin it.

use chrono::{DateTime, Duration, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;
const WEEK: i64 = 7 * DAY;
// Calendar-free approximations, same as the display layer has always used.
const MONTH: i64 = 30 * DAY;
const YEAR: i64 = 365 * DAY;

/// Data younger than this renders with the "recent" badge.
pub const RECENT_WINDOW: Duration = Duration::hours(6);
/// Data is considered expired this long after its timestamp.
pub const EXPIRY_WINDOW: Duration = Duration::hours(24);

/// Format an instant as a relative offset from `now`, e.g. "2 hours ago" or
/// "in 3 days".
///
/// The coarsest whole unit that fits is used, pluralized with a trailing "s"
/// whenever the value isn't exactly 1. A zero offset counts as past:
/// "0 seconds ago".
pub fn format_relative(target: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = (target - now).num_seconds();
    let is_future = diff > 0;
    let magnitude = diff.abs();

    let (value, unit) = if magnitude < MINUTE {
        (magnitude, "second")
    } else if magnitude < HOUR {
        (magnitude / MINUTE, "minute")
    } else if magnitude < DAY {
        (magnitude / HOUR, "hour")
    } else if magnitude < WEEK {
        (magnitude / DAY, "day")
    } else if magnitude < MONTH {
        (magnitude / WEEK, "week")
    } else if magnitude < YEAR {
        (magnitude / MONTH, "month")
    } else {
        (magnitude / YEAR, "year")
    };

    let plural = if value == 1 { "" } else { "s" };
    if is_future {
        format!("in {value} {unit}{plural}")
    } else {
        format!("{value} {unit}{plural} ago")
    }
}

/// Recency classification for UI badges. Presentation only; nothing gates
/// data fetching on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    Recent,
    Stale,
}

/// Classify a last-update instant: `Recent` while the age is strictly under
/// [`RECENT_WINDOW`], `Stale` from the boundary on.
pub fn classify(last_update: DateTime<Utc>, now: DateTime<Utc>) -> Freshness {
    if now - last_update < RECENT_WINDOW {
        Freshness::Recent
    } else {
        Freshness::Stale
    }
}

/// The instant at which data stamped `last_update` expires.
pub fn expires_at(last_update: DateTime<Utc>) -> DateTime<Utc> {
    last_update + EXPIRY_WINDOW
}

/// Relative rendering of the expiry instant, e.g. "in 21 hours".
pub fn expires_in(last_update: DateTime<Utc>, now: DateTime<Utc>) -> String {
    format_relative(expires_at(last_update), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn seconds_bucket_below_one_minute() {
        let now = noon();
        assert_eq!(format_relative(now - Duration::seconds(1), now), "1 second ago");
        assert_eq!(format_relative(now - Duration::seconds(59), now), "59 seconds ago");
    }

    #[test]
    fn zero_offset_counts_as_past() {
        let now = noon();
        assert_eq!(format_relative(now, now), "0 seconds ago");
    }

    #[test]
    fn minute_bucket_boundaries() {
        let now = noon();
        assert_eq!(format_relative(now - Duration::seconds(60), now), "1 minute ago");
        assert_eq!(format_relative(now - Duration::seconds(3599), now), "59 minutes ago");
    }

    #[test]
    fn hour_and_day_boundaries() {
        let now = noon();
        assert_eq!(format_relative(now - Duration::seconds(3600), now), "1 hour ago");
        assert_eq!(format_relative(now - Duration::seconds(86400), now), "1 day ago");
    }

    #[test]
    fn week_month_year_buckets() {
        let now = noon();
        assert_eq!(format_relative(now - Duration::days(13), now), "1 week ago");
        assert_eq!(format_relative(now - Duration::days(45), now), "1 month ago");
        assert_eq!(format_relative(now - Duration::days(800), now), "2 years ago");
    }

    #[test]
    fn future_offsets_use_in_prefix() {
        let now = noon();
        assert_eq!(format_relative(now + Duration::seconds(30), now), "in 30 seconds");
        assert_eq!(format_relative(now + Duration::days(2), now), "in 2 days");
    }

    #[test]
    fn fixed_instants_render_one_hour_ago() {
        let now = noon();
        let target = Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap();
        assert_eq!(format_relative(target, now), "1 hour ago");
    }

    #[test]
    fn classify_boundary_at_six_hours() {
        let now = noon();
        let just_inside = now - (RECENT_WINDOW - Duration::seconds(1));
        let exactly = now - RECENT_WINDOW;
        let just_outside = now - (RECENT_WINDOW + Duration::seconds(1));
        assert_eq!(classify(just_inside, now), Freshness::Recent);
        assert_eq!(classify(exactly, now), Freshness::Stale);
        assert_eq!(classify(just_outside, now), Freshness::Stale);
    }

    #[test]
    fn expiry_is_exactly_24_hours_out() {
        let last_update = noon();
        assert_eq!(
            expires_at(last_update) - last_update,
            Duration::seconds(86400)
        );
    }

    #[test]
    fn expires_in_renders_remaining_window() {
        let now = noon();
        let last_update = now - Duration::hours(3);
        assert_eq!(classify(last_update, now), Freshness::Recent);
        assert_eq!(expires_in(last_update, now), "in 21 hours");
    }
}
