//! Market scanner: per-asset indicator table for heatmap-style views.
//!
//! Rows are sorted by 24-bar change (winners first). Volatility, RSI and
//! volume strength are also min-max normalized across the table to [0, 1];
//! a column with no spread normalizes to 0.

use crate::domain::indicator_helpers::{compute_indicator_record, IndicatorRecord};
use crate::domain::universe::LoadedSeries;

#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    pub indicators: IndicatorRecord,
    pub norm_volatility: f64,
    pub norm_rsi: f64,
    pub norm_volume: f64,
}

fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

fn normalize(value: f64, bounds: Option<(f64, f64)>) -> f64 {
    match bounds {
        Some((lo, hi)) if hi > lo => (value - lo) / (hi - lo),
        _ => 0.0,
    }
}

pub fn build_scan(records: Vec<IndicatorRecord>) -> Vec<ScanRow> {
    let vol_bounds = min_max(&records.iter().map(|r| r.volatility).collect::<Vec<_>>());
    let rsi_bounds = min_max(&records.iter().map(|r| r.rsi).collect::<Vec<_>>());
    let volume_bounds = min_max(&records.iter().map(|r| r.volume_strength).collect::<Vec<_>>());

    let mut rows: Vec<ScanRow> = records
        .into_iter()
        .map(|r| ScanRow {
            norm_volatility: normalize(r.volatility, vol_bounds),
            norm_rsi: normalize(r.rsi, rsi_bounds),
            norm_volume: normalize(r.volume_strength, volume_bounds),
            indicators: r,
        })
        .collect();

    rows.sort_by(|a, b| b.indicators.change_24h.total_cmp(&a.indicators.change_24h));
    rows
}

/// Scans loaded series, silently leaving out those without defined indicators.
pub fn scan_series(series: &[LoadedSeries]) -> Vec<ScanRow> {
    let records = series
        .iter()
        .filter_map(|s| compute_indicator_record(&s.symbol, &s.bars))
        .collect();
    build_scan(records)
}
