//! Lagged sentiment-signal backtest over the joined daily series.
//!
//! signal[t] = 1 if sentiment[t] > 0 else 0
//! strategy_return[t] = market_return[t] * signal[t-1]
//! Both cumulative curves compound multiplicatively from 1.0; day 0 has no
//! returns and identity growth.

use crate::domain::daily::{DailyJoin, DailyPoint};
use crate::domain::indicator::returns::pct_change;
use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestRecord {
    pub date: NaiveDate,
    pub close: f64,
    pub sentiment: f64,
    pub market_return: Option<f64>,
    pub signal: u8,
    pub strategy_return: Option<f64>,
    pub cumulative_market: f64,
    pub cumulative_strategy: f64,
    pub is_synthetic: bool,
}

#[derive(Debug, Clone, Default)]
pub struct BacktestSeries {
    pub records: Vec<BacktestRecord>,
    pub is_synthetic: bool,
}

impl BacktestSeries {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&BacktestRecord> {
        self.records.last()
    }
}

pub fn signal_for(sentiment: f64) -> u8 {
    if sentiment > 0.0 { 1 } else { 0 }
}

pub fn run_backtest(join: &DailyJoin) -> BacktestSeries {
    run_backtest_points(&join.points, join.is_synthetic)
}

pub fn run_backtest_points(points: &[DailyPoint], is_synthetic: bool) -> BacktestSeries {
    let mut records: Vec<BacktestRecord> = Vec::with_capacity(points.len());

    for (i, point) in points.iter().enumerate() {
        let signal = signal_for(point.sentiment);

        let record = match records.last() {
            None => BacktestRecord {
                date: point.date,
                close: point.close,
                sentiment: point.sentiment,
                market_return: None,
                signal,
                strategy_return: None,
                cumulative_market: 1.0,
                cumulative_strategy: 1.0,
                is_synthetic,
            },
            Some(prev) => {
                let market_return = pct_change(points[i - 1].close, point.close);
                let strategy_return = market_return * f64::from(prev.signal);
                BacktestRecord {
                    date: point.date,
                    close: point.close,
                    sentiment: point.sentiment,
                    market_return: Some(market_return),
                    signal,
                    strategy_return: Some(strategy_return),
                    cumulative_market: prev.cumulative_market * (1.0 + market_return),
                    cumulative_strategy: prev.cumulative_strategy * (1.0 + strategy_return),
                    is_synthetic,
                }
            }
        };
        records.push(record);
    }

    BacktestSeries {
        records,
        is_synthetic,
    }
}
