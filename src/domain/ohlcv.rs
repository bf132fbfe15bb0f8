//! OHLCV bar representation.

use chrono::{NaiveDate, NaiveDateTime};

/// One intraday observation for a single asset.
#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub symbol: String,
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcvBar {
    /// Calendar day the bar belongs to.
    pub fn day(&self) -> NaiveDate {
        self.timestamp.date()
    }

    /// Prices must be positive and finite, volume non-negative and finite.
    pub fn check_values(&self) -> Result<(), String> {
        let prices = [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ];
        for (name, value) in prices {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{} must be positive, got {}", name, value));
            }
        }
        if !self.volume.is_finite() || self.volume < 0.0 {
            return Err(format!("volume must be non-negative, got {}", self.volume));
        }
        Ok(())
    }
}

/// Sorts bars by timestamp and rejects duplicate timestamps.
pub fn normalize_series(mut bars: Vec<OhlcvBar>) -> Result<Vec<OhlcvBar>, String> {
    bars.sort_by_key(|b| b.timestamp);
    if let Some(pair) = bars.windows(2).find(|w| w[0].timestamp == w[1].timestamp) {
        return Err(format!("duplicate timestamp {}", pair[1].timestamp));
    }
    Ok(bars)
}
