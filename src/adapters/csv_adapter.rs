//! CSV file price data adapter.
//!
//! One file per asset, `<STEM>_price.csv`, where the stem is the symbol with
//! `-` written as `_` (`BTC-USDT` <-> `BTC_USDT_price.csv`).

use crate::domain::error::SentrankError;
use crate::domain::ohlcv::{normalize_series, OhlcvBar};
use crate::ports::data_port::PriceDataPort;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use csv::StringRecord;
use std::fs;
use std::path::PathBuf;

const FILE_SUFFIX: &str = "_price.csv";

const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path
            .join(format!("{}{}", symbol.replace('-', "_"), FILE_SUFFIX))
    }
}

/// Accepts datetime strings, bare dates (midnight) and epoch milliseconds.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    for format in TIMESTAMP_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Some(ts);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    value
        .parse::<i64>()
        .ok()
        .and_then(DateTime::from_timestamp_millis)
        .map(|dt| dt.naive_utc())
}

fn parse_number(record: &StringRecord, index: usize, name: &str) -> Result<f64, String> {
    let raw = record
        .get(index)
        .ok_or_else(|| format!("missing {} column", name))?;
    raw.trim()
        .parse()
        .map_err(|e| format!("invalid {} value {:?}: {}", name, raw, e))
}

fn parse_bar(symbol: &str, record: &StringRecord) -> Result<OhlcvBar, String> {
    let ts_str = record.get(0).ok_or("missing timestamp column")?;
    let timestamp =
        parse_timestamp(ts_str).ok_or_else(|| format!("invalid timestamp {:?}", ts_str))?;

    let bar = OhlcvBar {
        symbol: symbol.to_string(),
        timestamp,
        open: parse_number(record, 1, "open")?,
        high: parse_number(record, 2, "high")?,
        low: parse_number(record, 3, "low")?,
        close: parse_number(record, 4, "close")?,
        volume: parse_number(record, 5, "volume")?,
    };
    bar.check_values()?;
    Ok(bar)
}

impl PriceDataPort for CsvAdapter {
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, SentrankError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SentrankError::DataRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let source = path.display().to_string();

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SentrankError::malformed(&source, e.to_string()))?;
            let bar = parse_bar(symbol, &record)
                .map_err(|reason| SentrankError::malformed(&source, format!("row {}: {}", row + 1, reason)))?;
            bars.push(bar);
        }

        normalize_series(bars).map_err(|reason| SentrankError::malformed(&source, reason))
    }

    fn list_symbols(&self) -> Result<Vec<String>, SentrankError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SentrankError::DataRead {
            path: self.base_path.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(stem) = name_str.strip_suffix(FILE_SUFFIX) {
                if !stem.is_empty() {
                    symbols.push(stem.replace('_', "-"));
                }
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const HEADER: &str = "timestamp,open,high,low,close,volume\n";

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let csv_content = format!(
            "{}\
            2024-01-15 02:00:00,101.0,111.0,91.0,106.0,1.5\n\
            2024-01-15 00:00:00,100.0,110.0,90.0,105.0,50000\n\
            2024-01-15 01:00:00,105.0,115.0,100.0,110.0,60000.25\n",
            HEADER
        );

        fs::write(path.join("BTC_USDT_price.csv"), csv_content).unwrap();
        fs::write(path.join("ETH_USD_price.csv"), HEADER).unwrap();
        fs::write(path.join("notes.txt"), "ignored").unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_bars_sorted_and_parsed() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let bars = adapter.fetch_bars("BTC-USDT").unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].symbol, "BTC-USDT");
        assert_eq!(bars[0].timestamp, parse_timestamp("2024-01-15 00:00:00").unwrap());
        assert_eq!(bars[0].open, 100.0);
        assert_eq!(bars[0].high, 110.0);
        assert_eq!(bars[0].low, 90.0);
        assert_eq!(bars[0].close, 105.0);
        assert_eq!(bars[0].volume, 50000.0);
        assert_eq!(bars[2].volume, 1.5);
    }

    #[test]
    fn fetch_bars_empty_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        assert!(adapter.fetch_bars("ETH-USD").unwrap().is_empty());
    }

    #[test]
    fn fetch_bars_missing_file_is_read_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let result = adapter.fetch_bars("XYZ-USD");
        assert!(matches!(result, Err(SentrankError::DataRead { .. })));
    }

    #[test]
    fn fetch_bars_bad_value_is_malformed() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("BAD_USD_price.csv"),
            format!("{}2024-01-15 00:00:00,100.0,110.0,90.0,abc,10\n", HEADER),
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);

        let err = adapter.fetch_bars("BAD-USD").unwrap_err();
        match err {
            SentrankError::MalformedRecord { reason, .. } => {
                assert!(reason.contains("row 1"));
                assert!(reason.contains("close"));
            }
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn fetch_bars_duplicate_timestamp_is_malformed() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("DUP_USD_price.csv"),
            format!(
                "{}2024-01-15 00:00:00,1,1,1,1,1\n2024-01-15 00:00:00,1,1,1,1,1\n",
                HEADER
            ),
        )
        .unwrap();
        let adapter = CsvAdapter::new(path);
        assert!(matches!(
            adapter.fetch_bars("DUP-USD"),
            Err(SentrankError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn list_symbols_maps_underscores() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let symbols = adapter.list_symbols().unwrap();
        assert_eq!(symbols, vec!["BTC-USDT", "ETH-USD"]);
    }

    #[test]
    fn list_symbols_missing_dir() {
        let adapter = CsvAdapter::new(PathBuf::from("/nonexistent/price_history"));
        assert!(matches!(
            adapter.list_symbols(),
            Err(SentrankError::DataRead { .. })
        ));
    }

    #[test]
    fn parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap();
        assert_eq!(parse_timestamp("2024-01-15 13:00:00"), Some(expected));
        assert_eq!(parse_timestamp("2024-01-15T13:00:00"), Some(expected));
        assert_eq!(parse_timestamp("1705323600000"), Some(expected));
        assert_eq!(
            parse_timestamp("2024-01-15"),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap().and_hms_opt(0, 0, 0)
        );
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
