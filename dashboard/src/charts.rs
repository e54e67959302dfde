pub mod svg;

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

use crate::quotes::PricePoint;

/// Distribute price points into at most `num_buckets` equal time buckets
/// spanning `start..end`. Points before the window are skipped; points past
/// the last bucket land in it.
pub fn bucket_points<'a>(
    points: &'a VecDeque<PricePoint>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    num_buckets: usize,
    min_bucket_secs: i64,
) -> Vec<(DateTime<Utc>, Vec<&'a PricePoint>)> {
    let total_secs = (end - start).num_seconds();
    let bucket_secs = (total_secs / num_buckets as i64).max(min_bucket_secs);
    let actual_buckets = (total_secs / bucket_secs).max(1) as usize;

    let mut buckets: Vec<(DateTime<Utc>, Vec<&PricePoint>)> = (0..actual_buckets)
        .map(|i| {
            let bucket_start = start + chrono::Duration::seconds(bucket_secs * i as i64);
            (bucket_start, Vec::new())
        })
        .collect();

    for point in points {
        let offset = (point.timestamp - start).num_seconds();
        if offset < 0 {
            continue;
        }
        let idx = (offset / bucket_secs) as usize;
        let idx = idx.min(actual_buckets - 1);
        buckets[idx].1.push(point);
    }

    buckets
}

/// Last observed price per bucket. Empty buckets are dropped so feed gaps
/// don't render as zero.
pub fn aggregate_close(
    buckets: &[(DateTime<Utc>, Vec<&PricePoint>)],
) -> Vec<(DateTime<Utc>, f64)> {
    buckets
        .iter()
        .filter_map(|(ts, points)| points.last().map(|point| (*ts, point.price)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn points(count: i64, spacing: Duration, end: DateTime<Utc>) -> VecDeque<PricePoint> {
        (1..=count)
            .map(|i| PricePoint {
                timestamp: end - spacing * (count - i) as i32,
                price: 100.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn buckets_cover_the_window_evenly() {
        let end = noon();
        let start = end - Duration::hours(1);
        let history = points(60, Duration::minutes(1), end);

        let buckets = bucket_points(&history, start, end, 6, 1);
        assert_eq!(buckets.len(), 6);
        assert_eq!(buckets[0].0, start);
        // 60 points over 6 buckets; the last bucket also absorbs the point
        // landing exactly on `end`.
        let total: usize = buckets.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(total, 60);
    }

    #[test]
    fn points_before_the_window_are_skipped() {
        let end = noon();
        let start = end - Duration::minutes(10);
        let history = points(30, Duration::minutes(1), end);

        let buckets = bucket_points(&history, start, end, 10, 1);
        let total: usize = buckets.iter().map(|(_, p)| p.len()).sum();
        assert_eq!(total, 11);
    }

    #[test]
    fn aggregate_close_keeps_last_price_and_skips_empty_buckets() {
        let end = noon();
        let start = end - Duration::minutes(4);
        // Two points in the first minute, nothing after.
        let history: VecDeque<PricePoint> = [
            PricePoint {
                timestamp: start + Duration::seconds(10),
                price: 101.0,
            },
            PricePoint {
                timestamp: start + Duration::seconds(50),
                price: 102.0,
            },
        ]
        .into();

        let buckets = bucket_points(&history, start, end, 4, 1);
        let closes = aggregate_close(&buckets);
        assert_eq!(closes.len(), 1);
        assert_eq!(closes[0].1, 102.0);
    }

    #[test]
    fn tiny_windows_respect_the_minimum_bucket_size() {
        let end = noon();
        let start = end - Duration::seconds(10);
        let history = points(5, Duration::seconds(2), end);

        let buckets = bucket_points(&history, start, end, 100, 1);
        assert_eq!(buckets.len(), 10);
    }
}
