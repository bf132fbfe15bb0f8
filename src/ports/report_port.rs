//! Report generation port trait.

use crate::domain::backtest::BacktestSeries;
use crate::domain::error::SentrankError;
use std::path::Path;

/// Port for persisting a backtest series for external rendering.
pub trait ReportPort {
    fn write_backtest(&self, series: &BacktestSeries, output_path: &Path)
    -> Result<(), SentrankError>;
}
