//! CSV writer for the backtest table consumed by chart renderers.

use crate::domain::backtest::{BacktestRecord, BacktestSeries};
use crate::domain::error::SentrankError;
use crate::ports::report_port::ReportPort;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const COLUMNS: [&str; 9] = [
    "day",
    "close",
    "sentiment_score",
    "market_return",
    "signal",
    "strategy_return",
    "cumulative_market",
    "cumulative_strategy",
    "is_synthetic",
];

#[derive(Debug, Serialize)]
struct BacktestRow {
    day: String,
    close: f64,
    sentiment_score: f64,
    market_return: Option<f64>,
    signal: u8,
    strategy_return: Option<f64>,
    cumulative_market: f64,
    cumulative_strategy: f64,
    is_synthetic: bool,
}

impl From<&BacktestRecord> for BacktestRow {
    fn from(r: &BacktestRecord) -> Self {
        BacktestRow {
            day: r.date.format("%Y-%m-%d").to_string(),
            close: r.close,
            sentiment_score: r.sentiment,
            market_return: r.market_return,
            signal: r.signal,
            strategy_return: r.strategy_return,
            cumulative_market: r.cumulative_market,
            cumulative_strategy: r.cumulative_strategy,
            is_synthetic: r.is_synthetic,
        }
    }
}

pub struct CsvReportAdapter;

impl CsvReportAdapter {
    /// Writes the table to any sink; undefined returns become empty cells.
    pub fn write_to<W: Write>(series: &BacktestSeries, sink: W) -> Result<(), SentrankError> {
        let mut wtr = csv::Writer::from_writer(sink);
        // serde only emits the header alongside the first row
        if series.records.is_empty() {
            wtr.write_record(COLUMNS)
                .map_err(|e| SentrankError::Io(std::io::Error::other(e)))?;
        }
        for record in &series.records {
            wtr.serialize(BacktestRow::from(record))
                .map_err(|e| SentrankError::Io(std::io::Error::other(e)))?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl ReportPort for CsvReportAdapter {
    fn write_backtest(
        &self,
        series: &BacktestSeries,
        output_path: &Path,
    ) -> Result<(), SentrankError> {
        let file = std::fs::File::create(output_path)?;
        Self::write_to(series, file)
    }
}
