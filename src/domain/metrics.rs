//! Summary statistics for a backtest series.

use super::backtest::BacktestSeries;

/// Crypto markets trade every calendar day.
const PERIODS_PER_YEAR: f64 = 365.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSummary {
    pub days: usize,
    pub market_growth: f64,
    pub strategy_growth: f64,
    pub market_total_return: f64,
    pub strategy_total_return: f64,
    pub market_max_drawdown: f64,
    pub strategy_max_drawdown: f64,
    pub exposure: f64,
    pub sharpe_ratio: f64,
    pub is_synthetic: bool,
}

impl BacktestSummary {
    pub fn compute(series: &BacktestSeries, risk_free_rate: f64) -> Self {
        let market_curve: Vec<f64> = series.records.iter().map(|r| r.cumulative_market).collect();
        let strategy_curve: Vec<f64> = series
            .records
            .iter()
            .map(|r| r.cumulative_strategy)
            .collect();

        let market_growth = market_curve.last().copied().unwrap_or(1.0);
        let strategy_growth = strategy_curve.last().copied().unwrap_or(1.0);

        let lagged_positions: Vec<u8> = series
            .records
            .windows(2)
            .map(|w| w[0].signal)
            .collect();
        let exposure = if lagged_positions.is_empty() {
            0.0
        } else {
            lagged_positions.iter().filter(|&&s| s == 1).count() as f64
                / lagged_positions.len() as f64
        };

        let strategy_returns: Vec<f64> = series
            .records
            .iter()
            .filter_map(|r| r.strategy_return)
            .collect();
        let daily_rf = risk_free_rate / PERIODS_PER_YEAR;

        BacktestSummary {
            days: series.records.len(),
            market_growth,
            strategy_growth,
            market_total_return: market_growth - 1.0,
            strategy_total_return: strategy_growth - 1.0,
            market_max_drawdown: compute_drawdown(&market_curve),
            strategy_max_drawdown: compute_drawdown(&strategy_curve),
            exposure,
            sharpe_ratio: compute_sharpe(&strategy_returns, daily_rf),
            is_synthetic: series.is_synthetic,
        }
    }

    /// Strategy return minus buy-and-hold return.
    pub fn excess_return(&self) -> f64 {
        self.strategy_total_return - self.market_total_return
    }
}

fn compute_drawdown(curve: &[f64]) -> f64 {
    let Some(&first) = curve.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;

    for &value in curve {
        if value > peak {
            peak = value;
        } else if peak > 0.0 {
            let dd = (peak - value) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

fn compute_sharpe(returns: &[f64], daily_rf: f64) -> f64 {
    if returns.len() < 2 {
        return 0.0;
    }

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev > 0.0 {
        ((mean - daily_rf) / stddev) * PERIODS_PER_YEAR.sqrt()
    } else {
        0.0
    }
}
