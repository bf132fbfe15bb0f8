//! Period-over-period percentage change.
//!
//! CHANGE(n)[i] = ((C[i] - C[i-n]) / C[i-n]) * 100
//! If C[i-n] == 0: CHANGE = 0
//! Warmup: first n bars invalid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_change(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for i in 0..bars.len() {
        let timestamp = bars[i].timestamp;
        let valid = period > 0 && i >= period;

        let value = if valid {
            let prev_close = bars[i - period].close;
            let curr_close = bars[i].close;

            if prev_close == 0.0 {
                0.0
            } else {
                ((curr_close - prev_close) / prev_close) * 100.0
            }
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            timestamp,
            valid,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Change(period),
        values,
    }
}
