use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const WATCHLIST_PATH: &str = "data/watchlist.toml";

const DEFAULT_TICKERS: [&str; 3] = ["NVDA", "TSLA", "GOOG"];

/// Tickers shown on the dashboard, in display order.
#[derive(Serialize, Deserialize, Clone)]
pub struct Watchlist {
    #[serde(default)]
    pub tickers: Vec<String>,
}

impl Default for Watchlist {
    fn default() -> Self {
        Watchlist {
            tickers: DEFAULT_TICKERS.iter().map(|t| (*t).to_owned()).collect(),
        }
    }
}

impl Watchlist {
    pub fn contains(&self, ticker: &str) -> bool {
        self.tickers.iter().any(|t| t == ticker)
    }

    /// Add a ticker (normalized to uppercase). Returns false for empty
    /// input or duplicates.
    pub fn add(&mut self, ticker: &str) -> bool {
        let ticker = ticker.trim().to_ascii_uppercase();
        if ticker.is_empty() || self.contains(&ticker) {
            return false;
        }
        self.tickers.push(ticker);
        true
    }

    /// Returns false if the ticker wasn't on the list.
    pub fn remove(&mut self, ticker: &str) -> bool {
        let before = self.tickers.len();
        self.tickers.retain(|t| t != ticker);
        self.tickers.len() != before
    }
}

/// Loads the watchlist. Returns `Watchlist::default()` if the file doesn't
/// exist; propagates other I/O and parse errors.
pub fn load(path: &Path) -> io::Result<Watchlist> {
    match fs::read_to_string(path) {
        Ok(content) => {
            toml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Watchlist::default()),
        Err(e) => Err(e),
    }
}

/// Persists the watchlist to disk.
pub fn save(path: &Path, watchlist: &Watchlist) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let content = toml::to_string_pretty(watchlist)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    fs::write(path, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_the_three_seed_tickers() {
        let watchlist = Watchlist::default();
        assert_eq!(watchlist.tickers, vec!["NVDA", "TSLA", "GOOG"]);
    }

    #[test]
    fn add_normalizes_and_rejects_duplicates() {
        let mut watchlist = Watchlist::default();
        assert!(watchlist.add("  msft "));
        assert!(watchlist.contains("MSFT"));
        assert!(!watchlist.add("MSFT"));
        assert!(!watchlist.add("   "));
    }

    #[test]
    fn remove_reports_whether_anything_changed() {
        let mut watchlist = Watchlist::default();
        assert!(watchlist.remove("TSLA"));
        assert!(!watchlist.remove("TSLA"));
        assert_eq!(watchlist.tickers, vec!["NVDA", "GOOG"]);
    }

    #[test]
    fn parses_the_on_disk_format() {
        let watchlist: Watchlist = toml::from_str("tickers = [\"NVDA\", \"MSFT\"]").unwrap();
        assert_eq!(watchlist.tickers, vec!["NVDA", "MSFT"]);

        let empty: Watchlist = toml::from_str("").unwrap();
        assert!(empty.tickers.is_empty());
    }

    #[test]
    fn missing_file_loads_defaults() {
        let watchlist = load(Path::new("data/does-not-exist/watchlist.toml")).unwrap();
        assert_eq!(watchlist.tickers, Watchlist::default().tickers);
    }
}
