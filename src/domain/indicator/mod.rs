//! Technical indicator implementations.
//!
//! Every indicator is derived from scratch from a full price series:
//! - `IndicatorPoint`: a single point in an indicator time series
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorSeries`: a time series of indicator values
//!
//! Points that lack enough history are marked invalid rather than zeroed.

pub mod change;
pub mod returns;
pub mod rsi;
pub mod volatility;
pub mod volume_strength;

use chrono::NaiveDateTime;

/// Lookback of the momentum oscillator.
pub const RSI_PERIOD: usize = 14;
/// Intraday bars conventionally treated as one trading day.
pub const BARS_PER_DAY: usize = 24;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub timestamp: NaiveDateTime,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Returns,
    Rsi(usize),
    VolumeStrength(usize),
    Change(usize),
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    /// Value of the last point, if that point is valid.
    pub fn latest(&self) -> Option<f64> {
        self.values
            .last()
            .filter(|p| p.valid)
            .map(|p| p.value)
    }

    /// Values of all valid points, in order.
    pub fn valid_values(&self) -> Vec<f64> {
        self.values
            .iter()
            .filter(|p| p.valid)
            .map(|p| p.value)
            .collect()
    }
}
