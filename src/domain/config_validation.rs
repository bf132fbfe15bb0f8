//! Configuration validation.
//!
//! Validates config fields before a ranking or backtest run.

use crate::domain::error::SentrankError;
use crate::domain::indicator_helpers::MIN_CHANGE_BARS;
use crate::domain::universe::{parse_symbols, MIN_RANKING_BARS};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TOP_N: i64 = 5;

pub fn validate_ranking_config(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    validate_top_n(config)?;
    validate_min_bars(config)?;
    validate_universe(config)?;
    Ok(())
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    validate_risk_free_rate(config)?;
    validate_seed(config)?;
    validate_symbol(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> SentrankError {
    SentrankError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_top_n(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    let value = config.get_int("ranking", "top_n", DEFAULT_TOP_N);
    if value < 1 {
        return Err(invalid("ranking", "top_n", "top_n must be at least 1"));
    }
    Ok(())
}

fn validate_min_bars(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    let value = config.get_int("ranking", "min_bars", MIN_RANKING_BARS as i64);
    if value < MIN_CHANGE_BARS as i64 {
        return Err(invalid(
            "ranking",
            "min_bars",
            format!("min_bars must be at least {}", MIN_CHANGE_BARS),
        ));
    }
    Ok(())
}

fn validate_universe(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    if let Some(list) = config.get_string("ranking", "universe") {
        parse_symbols(&list).map_err(|e| invalid("ranking", "universe", e.to_string()))?;
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    let value = config.get_double("backtest", "risk_free_rate", 0.0);
    if !(0.0..1.0).contains(&value) {
        return Err(invalid(
            "backtest",
            "risk_free_rate",
            "risk_free_rate must be between 0 and 1",
        ));
    }
    Ok(())
}

fn validate_seed(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    if let Some(seed) = config.get_string("backtest", "seed") {
        seed.trim()
            .parse::<u64>()
            .map_err(|_| invalid("backtest", "seed", "seed must be a non-negative integer"))?;
    }
    Ok(())
}

fn validate_symbol(config: &dyn ConfigPort) -> Result<(), SentrankError> {
    if let Some(symbol) = config.get_string("backtest", "symbol") {
        if symbol.trim().is_empty() {
            return Err(invalid("backtest", "symbol", "symbol must not be empty"));
        }
    }
    Ok(())
}
