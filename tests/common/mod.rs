#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use sentrank::domain::error::SentrankError;
pub use sentrank::domain::ohlcv::OhlcvBar;
use sentrank::domain::sentiment::SentimentObservation;
use sentrank::ports::data_port::{PriceDataPort, SentimentPort};
use std::collections::HashMap;

pub struct MockPriceDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
    pub order: Vec<String>,
}

impl MockPriceDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self.order.push(symbol.to_string());
        self
    }

    /// Makes `fetch_bars` fail with a malformed-record error for `symbol`.
    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self.order.push(symbol.to_string());
        self
    }
}

impl PriceDataPort for MockPriceDataPort {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, SentrankError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SentrankError::MalformedRecord {
                source_name: format!("{}_price.csv", symbol.replace('-', "_")),
                reason: reason.clone(),
            });
        }
        Ok(self.data.get(symbol).cloned().unwrap_or_default())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SentrankError> {
        Ok(self.order.clone())
    }
}

pub struct MockSentimentPort {
    pub observations: Vec<SentimentObservation>,
    pub error: Option<SentrankError>,
}

impl MockSentimentPort {
    pub fn new(observations: Vec<SentimentObservation>) -> Self {
        Self {
            observations,
            error: None,
        }
    }

    pub fn missing_file() -> Self {
        Self {
            observations: Vec::new(),
            error: Some(SentrankError::DataRead {
                path: "news_sentiment.csv".to_string(),
                reason: "No such file or directory".to_string(),
            }),
        }
    }

    pub fn malformed() -> Self {
        Self {
            observations: Vec::new(),
            error: Some(SentrankError::MalformedRecord {
                source_name: "news_sentiment.csv".to_string(),
                reason: "row 2: sentiment_score 3 outside [-1, 1]".to_string(),
            }),
        }
    }
}

impl SentimentPort for MockSentimentPort {
    fn fetch_sentiment(&self) -> Result<Vec<SentimentObservation>, SentrankError> {
        match &self.error {
            Some(SentrankError::DataRead { path, reason }) => Err(SentrankError::DataRead {
                path: path.clone(),
                reason: reason.clone(),
            }),
            Some(SentrankError::MalformedRecord {
                source_name,
                reason,
            }) => Err(SentrankError::MalformedRecord {
                source_name: source_name.clone(),
                reason: reason.clone(),
            }),
            Some(_) => Err(SentrankError::NoData {
                symbol: "sentiment".to_string(),
            }),
            None => Ok(self.observations.clone()),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn ts(date: &str, hour: u32) -> NaiveDateTime {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn make_bar(symbol: &str, timestamp: NaiveDateTime, close: f64, volume: f64) -> OhlcvBar {
    OhlcvBar {
        symbol: symbol.to_string(),
        timestamp,
        open: close,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume,
    }
}

/// Hourly bars starting at midnight of `start_date` with a linear close.
pub fn generate_bars(
    symbol: &str,
    start_date: &str,
    count: usize,
    start_price: f64,
    step: f64,
) -> Vec<OhlcvBar> {
    let start = ts(start_date, 0);
    (0..count)
        .map(|i| {
            make_bar(
                symbol,
                start + chrono::Duration::hours(i as i64),
                start_price + step * i as f64,
                1000.0,
            )
        })
        .collect()
}

/// One bar per day at noon.
pub fn daily_bars(symbol: &str, start_date: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = ts(start_date, 12);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(symbol, start + chrono::Duration::days(i as i64), close, 1000.0))
        .collect()
}

pub fn observation(date: NaiveDate, score: f64) -> SentimentObservation {
    SentimentObservation {
        date,
        headline: "headline".to_string(),
        score,
    }
}

/// Renders bars in the on-disk price file layout.
pub fn price_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("timestamp,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.timestamp.format("%Y-%m-%d %H:%M:%S"),
            b.open,
            b.high,
            b.low,
            b.close,
            b.volume
        ));
    }
    out
}
