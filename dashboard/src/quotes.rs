use std::collections::{HashMap, VecDeque};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// A single observed price, kept for chart rendering.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

impl Recommendation {
    pub fn display_name(&self) -> &'static str {
        match self {
            Recommendation::Buy => "Buy",
            Recommendation::Sell => "Sell",
            Recommendation::Hold => "Hold",
        }
    }

    /// Confidence shown next to the recommendation. The model behind the
    /// insights reports sell calls with the most conviction.
    pub fn confidence_percent(&self) -> u8 {
        match self {
            Recommendation::Buy => 75,
            Recommendation::Hold => 60,
            Recommendation::Sell => 80,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn display_name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

/// AI-generated investment insights attached to a quote.
#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub summary: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub recommendation: Recommendation,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, Serialize)]
pub struct StockQuote {
    pub ticker: String,
    pub company_name: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub prev_close: f64,
    pub volume: f64,
    pub market_cap: f64,
    pub pe_ratio: f64,
    pub eps: f64,
    pub dividend_yield: f64,
    pub high_52w: f64,
    pub low_52w: f64,
    pub last_refreshed: DateTime<Utc>,
    pub insights: Insights,
    #[serde(skip)]
    pub history: VecDeque<PricePoint>,
}

impl StockQuote {
    pub fn is_positive(&self) -> bool {
        self.change >= 0.0
    }

    /// Where the current price sits in the 52-week range, as a percentage.
    pub fn position_in_52w_range(&self) -> f64 {
        let range = self.high_52w - self.low_52w;
        if range <= 0.0 {
            return 50.0;
        }
        ((self.price - self.low_52w) / range * 100.0).clamp(0.0, 100.0)
    }

    /// Intraday range derived from open and previous close.
    pub fn day_range(&self) -> (f64, f64) {
        (
            self.open.min(self.prev_close),
            self.open.max(self.prev_close),
        )
    }

    /// Advance the simulated feed by one step: drift the price, restate the
    /// day change, stamp the refresh time, and record a history point.
    fn advance(&mut self, at: DateTime<Utc>) {
        let step = self.history.len();
        self.price = (self.price * drift_factor(step) * 100.0).round() / 100.0;
        self.change = self.price - self.prev_close;
        self.change_percent = if self.prev_close > 0.0 {
            self.change / self.prev_close * 100.0
        } else {
            0.0
        };
        self.last_refreshed = at;
        self.history.push_back(PricePoint {
            timestamp: at,
            price: self.price,
        });
    }
}

/// Deterministic oscillation standing in for a live feed. Phases sum to
/// zero over a cycle, so the price wanders without trending.
fn drift_factor(step: usize) -> f64 {
    let phase = (step % 7) as f64 - 3.0;
    1.0 + phase * 0.0004
}

/// Formats dollar amounts in trillions/billions/millions, e.g. "$2.16T".
pub fn format_market_value(value: f64) -> String {
    if value >= 1e12 {
        format!("${:.2}T", value / 1e12)
    } else if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else {
        format!("${value:.2}")
    }
}

/// In-memory board of listed quotes, keyed by ticker.
pub struct QuoteBoard {
    quotes: HashMap<String, StockQuote>,
}

impl QuoteBoard {
    pub fn new(listings: Vec<StockQuote>) -> Self {
        let quotes = listings
            .into_iter()
            .map(|quote| (quote.ticker.clone(), quote))
            .collect();
        QuoteBoard { quotes }
    }

    pub fn get(&self, ticker: &str) -> Option<&StockQuote> {
        self.quotes.get(ticker)
    }

    /// Tickers known to the board, sorted for stable rendering.
    pub fn listed_tickers(&self) -> Vec<&str> {
        let mut tickers: Vec<&str> = self.quotes.keys().map(String::as_str).collect();
        tickers.sort_unstable();
        tickers
    }

    /// One simulated feed step for a ticker. Returns false for unknown
    /// tickers.
    pub fn touch(&mut self, ticker: &str, now: DateTime<Utc>) -> bool {
        match self.quotes.get_mut(ticker) {
            Some(quote) => {
                quote.advance(now);
                true
            }
            None => false,
        }
    }

    /// Synthesize one history point per minute over `span`, so charts have
    /// data before the live loop has run.
    pub fn backfill_history(&mut self, now: DateTime<Utc>, span: Duration) {
        let minutes = span.num_minutes().max(0);
        for quote in self.quotes.values_mut() {
            for m in (1..=minutes).rev() {
                quote.advance(now - Duration::minutes(m));
            }
        }
    }

    /// Drops history points older than `retention`.
    pub fn prune_history(&mut self, retention: Duration, now: DateTime<Utc>) {
        let cutoff = now - retention;
        for quote in self.quotes.values_mut() {
            while quote
                .history
                .front()
                .is_some_and(|point| point.timestamp < cutoff)
            {
                quote.history.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    fn board() -> QuoteBoard {
        QuoteBoard::new(mocks::seed_quotes(noon()))
    }

    #[test]
    fn seeded_board_lists_default_tickers() {
        let board = board();
        assert_eq!(board.listed_tickers(), vec!["GOOG", "NVDA", "TSLA"]);
        let nvda = board.get("NVDA").unwrap();
        assert_eq!(nvda.company_name, "NVIDIA Corporation");
        assert!(nvda.history.is_empty());
    }

    #[test]
    fn touch_stamps_and_records_history() {
        let mut board = board();
        let later = noon() + Duration::minutes(1);
        assert!(board.touch("NVDA", later));
        let nvda = board.get("NVDA").unwrap();
        assert_eq!(nvda.last_refreshed, later);
        assert_eq!(nvda.history.len(), 1);
        assert_eq!(nvda.history.back().unwrap().price, nvda.price);
        // Change stays consistent with the restated price.
        assert!((nvda.change - (nvda.price - nvda.prev_close)).abs() < 1e-9);
    }

    #[test]
    fn touch_unknown_ticker_is_a_no_op() {
        let mut board = board();
        assert!(!board.touch("AAPL", noon()));
    }

    #[test]
    fn backfill_produces_one_point_per_minute() {
        let mut board = board();
        board.backfill_history(noon(), Duration::minutes(30));
        let nvda = board.get("NVDA").unwrap();
        assert_eq!(nvda.history.len(), 30);
        assert_eq!(
            nvda.history.front().unwrap().timestamp,
            noon() - Duration::minutes(30)
        );
        assert_eq!(
            nvda.history.back().unwrap().timestamp,
            noon() - Duration::minutes(1)
        );
    }

    #[test]
    fn prune_drops_only_points_past_retention() {
        let mut board = board();
        board.backfill_history(noon(), Duration::minutes(90));
        board.prune_history(Duration::minutes(60), noon());
        let nvda = board.get("NVDA").unwrap();
        assert_eq!(nvda.history.len(), 60);
        assert!(
            nvda.history
                .front()
                .unwrap()
                .timestamp
                >= noon() - Duration::minutes(60)
        );
    }

    #[test]
    fn drift_is_flat_over_a_full_cycle() {
        let product: f64 = (0..7).map(drift_factor).product();
        assert!((product - 1.0).abs() < 1e-4);
    }

    #[test]
    fn range_position_is_clamped() {
        let mut board = board();
        let quote = board.quotes.get_mut("NVDA").unwrap();
        quote.price = quote.high_52w + 50.0;
        assert_eq!(quote.position_in_52w_range(), 100.0);
        quote.price = quote.low_52w - 50.0;
        assert_eq!(quote.position_in_52w_range(), 0.0);
    }

    #[test]
    fn market_value_formatting_picks_the_right_scale() {
        assert_eq!(format_market_value(2.16e12), "$2.16T");
        assert_eq!(format_market_value(7.5e11), "$750.00B");
        assert_eq!(format_market_value(42_000_000.0), "$42.00M");
        assert_eq!(format_market_value(875.28), "$875.28");
    }
}
