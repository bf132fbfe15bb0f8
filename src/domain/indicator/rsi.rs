//! RSI-style momentum oscillator.
//!
//! Gains and losses are the positive and negative parts of each close-to-close
//! change; both are averaged with a simple moving average over the trailing n
//! changes (no Wilder smoothing).
//!
//! Formula: RSI = 100 - (100 / (1 + avg_gain / avg_loss))
//! If avg_loss == 0: RSI = 100
//!
//! Warmup: first n bars are invalid (need n price changes).

use crate::domain::indicator::{IndicatorPoint, IndicatorSeries, IndicatorType};
use crate::domain::ohlcv::OhlcvBar;

pub fn calculate_rsi(bars: &[OhlcvBar], period: usize) -> IndicatorSeries {
    let mut values = Vec::with_capacity(bars.len());

    let mut gains: Vec<f64> = Vec::with_capacity(bars.len());
    let mut losses: Vec<f64> = Vec::with_capacity(bars.len());
    gains.push(0.0);
    losses.push(0.0);
    for w in bars.windows(2) {
        let change = w[1].close - w[0].close;
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    for (i, bar) in bars.iter().enumerate() {
        let valid = period > 0 && i >= period;

        let value = if valid {
            let window = i + 1 - period..=i;
            let avg_gain = gains[window.clone()].iter().sum::<f64>() / period as f64;
            let avg_loss = losses[window].iter().sum::<f64>() / period as f64;
            oscillator(avg_gain, avg_loss)
        } else {
            0.0
        };

        values.push(IndicatorPoint {
            timestamp: bar.timestamp,
            valid,
            value,
        });
    }

    IndicatorSeries {
        indicator_type: IndicatorType::Rsi(period),
        values,
    }
}

/// Saturates to 100 when there were no losses in the window.
pub fn oscillator(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - (100.0 / (1.0 + avg_gain / avg_loss))
    }
}
