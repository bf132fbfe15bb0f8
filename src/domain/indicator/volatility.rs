//! Annualized volatility estimate.
//!
//! Sample standard deviation (n - 1) of every per-bar return in the series,
//! scaled by sqrt(BARS_PER_DAY) and expressed as a percentage.
//! Requires at least 2 bars; a single return has zero dispersion.

use crate::domain::indicator::{IndicatorSeries, BARS_PER_DAY};

/// Volatility of a returns series; warmup points are ignored.
pub fn annualized_volatility(returns: &IndicatorSeries) -> Option<f64> {
    sample_stddev(&returns.valid_values()).map(|sd| sd * (BARS_PER_DAY as f64).sqrt() * 100.0)
}

/// None for an empty sample, 0 for a single observation.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    match values.len() {
        0 => None,
        1 => Some(0.0),
        n => {
            let mean = values.iter().sum::<f64>() / n as f64;
            let variance = values
                .iter()
                .map(|v| {
                    let diff = v - mean;
                    diff * diff
                })
                .sum::<f64>()
                / (n - 1) as f64;
            Some(variance.sqrt())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::indicator::returns::calculate_returns;
    use crate::domain::ohlcv::OhlcvBar;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn calculate_volatility(bars: &[OhlcvBar]) -> Option<f64> {
        annualized_volatility(&calculate_returns(bars))
    }

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                symbol: "TEST".into(),
                timestamp: start + chrono::Duration::hours(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    #[test]
    fn volatility_needs_two_bars() {
        assert_eq!(calculate_volatility(&[]), None);
        assert_eq!(calculate_volatility(&make_bars(&[100.0])), None);
        assert_eq!(calculate_volatility(&make_bars(&[100.0, 101.0])), Some(0.0));
    }

    #[test]
    fn volatility_constant_growth_is_zero() {
        let vol = calculate_volatility(&make_bars(&[100.0, 110.0, 121.0, 133.1])).unwrap();
        assert!(vol.abs() < 1e-9);
    }

    #[test]
    fn volatility_known_values() {
        // returns: +0.1, -0.1 => mean 0, sample variance 0.02
        let vol = calculate_volatility(&make_bars(&[100.0, 110.0, 99.0])).unwrap();
        let expected = 0.02_f64.sqrt() * 24.0_f64.sqrt() * 100.0;
        assert_relative_eq!(vol, expected, epsilon = 1e-9);
    }

    #[test]
    fn sample_stddev_known_values() {
        let sd = sample_stddev(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_relative_eq!(sd, (32.0_f64 / 7.0).sqrt(), epsilon = 1e-12);
    }
}
