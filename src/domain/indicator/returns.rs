//! Per-bar simple returns.
//!
//! RET[i] = (C[i] - C[i-1]) / C[i-1]
//! Warmup: the first bar is invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_returns(bars: &[OhlcvBar]) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let point = if i == 0 {
            IndicatorPoint {
                timestamp: bar.timestamp,
                valid: false,
                value: 0.0,
            }
        } else {
            IndicatorPoint {
                timestamp: bar.timestamp,
                valid: true,
                value: pct_change(bars[i - 1].close, bar.close),
            }
        };
        values.push(point);
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Returns,
        values,
    }
}

/// Fractional change from `prev` to `curr`; 0 when `prev` is zero.
pub fn pct_change(prev: f64, curr: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (curr - prev) / prev
    }
}
