//! Volume-strength ratio.
//!
//! VS(n)[i] = V[i] / mean(V[i-n+1..=i])
//! The trailing mean includes the current bar. When fewer than n bars are
//! available, or the trailing mean is zero, VS = 0. Every point is valid.

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_volume_strength(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    for (i, bar) in bars.iter().enumerate() {
        let value = if period > 0 && i + 1 >= period {
            let window = &bars[i + 1 - period..=i];
            let avg_volume = window.iter().map(|b| b.volume).sum::<f64>() / period as f64;
            volume_ratio(bar.volume, avg_volume)
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid: true,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::VolumeStrength(period),
        values,
    }
}

pub fn volume_ratio(current: f64, avg_volume: f64) -> f64 {
    if avg_volume > 0.0 {
        current / avg_volume
    } else {
        0.0
    }
}
