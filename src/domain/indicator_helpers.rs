//! Shared helpers turning a price series into indicator values.
//!
//! Both the ranker and the market scanner build their per-asset rows through
//! [`compute_indicator_record`], so the numeric conventions live in one place.

use crate::domain::indicator::change::calculate_change;
use crate::domain::indicator::returns::calculate_returns;
use crate::domain::indicator::rsi::calculate_rsi;
use crate::domain::indicator::volatility::annualized_volatility;
use crate::domain::indicator::volume_strength::calculate_volume_strength;
use crate::domain::indicator::{IndicatorSeries, IndicatorType, BARS_PER_DAY, RSI_PERIOD};
use crate::domain::ohlcv::OhlcvBar;
use std::collections::HashMap;

/// Bars needed before the 24-bar change is defined.
pub const MIN_CHANGE_BARS: usize = BARS_PER_DAY + 1;

/// Latest indicator values for one asset.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorRecord {
    pub symbol: String,
    pub price: f64,
    pub change_24h: f64,
    pub volatility: f64,
    pub rsi: f64,
    pub volume_strength: f64,
}

pub fn compute_indicators(
    bars: &[OhlcvBar],
    types: &[IndicatorType],
) -> HashMap<IndicatorType, IndicatorSeries> {
    types
        .iter()
        .map(|t| {
            let series = match t {
                IndicatorType::Returns => calculate_returns(bars),
                IndicatorType::Rsi(period) => calculate_rsi(bars, *period),
                IndicatorType::VolumeStrength(period) => calculate_volume_strength(bars, *period),
                IndicatorType::Change(period) => calculate_change(bars, *period),
            };
            (t.clone(), series)
        })
        .collect()
}

/// Builds the latest-value record, or None when any indicator is still
/// undefined for this series (insufficient history).
pub fn compute_indicator_record(symbol: &str, bars: &[OhlcvBar]) -> Option<IndicatorRecord> {
    let last = bars.last()?;

    let types = [
        IndicatorType::Returns,
        IndicatorType::Change(BARS_PER_DAY),
        IndicatorType::Rsi(RSI_PERIOD),
        IndicatorType::VolumeStrength(BARS_PER_DAY),
    ];
    let indicators = compute_indicators(bars, &types);
    let latest = |t: &IndicatorType| indicators.get(t).and_then(IndicatorSeries::latest);

    Some(IndicatorRecord {
        symbol: symbol.to_string(),
        price: last.close,
        change_24h: latest(&types[1])?,
        volatility: annualized_volatility(indicators.get(&types[0])?)?,
        rsi: latest(&types[2])?,
        volume_strength: latest(&types[3])?,
    })
}
