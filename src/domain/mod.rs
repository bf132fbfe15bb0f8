//! Core domain types and logic.

pub mod ohlcv;
pub mod sentiment;
pub mod indicator;
pub mod indicator_helpers;
pub mod universe;
pub mod ranking;
pub mod scanner;
pub mod daily;
pub mod backtest;
pub mod metrics;
pub mod config_validation;
pub mod error;
