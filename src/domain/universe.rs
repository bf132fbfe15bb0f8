//! Universe module for cross-sectional ranking.
//!
//! Parses symbol lists from configuration and loads each symbol's price
//! series, classifying the ones that cannot take part in ranking.

use crate::domain::error::SentrankError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::PriceDataPort;
use std::collections::HashSet;
use tracing::{debug, warn};

pub const MIN_RANKING_BARS: usize = 50;

/// The standard 20-asset liquid crypto universe.
pub const DEFAULT_UNIVERSE: [&str; 20] = [
    "BTC-USD",
    "ETH-USD",
    "BNB-USD",
    "SOL-USD",
    "XRP-USD",
    "ADA-USD",
    "DOGE-USD",
    "AVAX-USD",
    "TRX-USD",
    "DOT-USD",
    "LINK-USD",
    "MATIC-USD",
    "LTC-USD",
    "BCH-USD",
    "UNI7083-USD",
    "ATOM-USD",
    "XLM-USD",
    "ETC-USD",
    "FIL-USD",
    "HBAR-USD",
];

#[derive(Debug, Clone, thiserror::Error)]
pub enum UniverseError {
    #[error("empty token in symbol list")]
    EmptyToken,

    #[error("duplicate symbol: {0}")]
    DuplicateSymbol(String),
}

pub fn parse_symbols(input: &str) -> Result<Vec<String>, UniverseError> {
    let mut symbols = Vec::new();
    let mut seen = HashSet::new();

    for token in input.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return Err(UniverseError::EmptyToken);
        }
        let symbol = trimmed.to_uppercase();
        if !seen.insert(symbol.clone()) {
            return Err(UniverseError::DuplicateSymbol(symbol));
        }
        symbols.push(symbol);
    }

    Ok(symbols)
}

pub fn default_universe() -> Vec<String> {
    DEFAULT_UNIVERSE.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedSymbol {
    pub symbol: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    NoData,
    InsufficientHistory { bars: usize, minimum: usize },
    MalformedRecord { reason: String },
}

/// A symbol whose full price series was loaded and passed the history filter.
#[derive(Debug, Clone)]
pub struct LoadedSeries {
    pub symbol: String,
    pub bars: Vec<OhlcvBar>,
}

pub struct UniverseLoad {
    pub series: Vec<LoadedSeries>,
    pub skipped: Vec<SkippedSymbol>,
}

/// Loads every symbol in enumeration order. Failures never abort the batch:
/// each failing symbol is classified and recorded in `skipped`.
pub fn load_universe(
    data_port: &dyn PriceDataPort,
    symbols: &[String],
    min_bars: usize,
) -> UniverseLoad {
    let mut series = Vec::new();
    let mut skipped = Vec::new();

    for symbol in symbols {
        let reason = match data_port.fetch_bars(symbol) {
            Ok(bars) if bars.is_empty() => {
                debug!("skipping {} (no data found)", symbol);
                SkipReason::NoData
            }
            Ok(bars) if bars.len() < min_bars => {
                debug!(
                    "skipping {} (only {} bars, minimum {} required)",
                    symbol,
                    bars.len(),
                    min_bars
                );
                SkipReason::InsufficientHistory {
                    bars: bars.len(),
                    minimum: min_bars,
                }
            }
            Ok(bars) => {
                debug!("{}: {} bars [OK]", symbol, bars.len());
                series.push(LoadedSeries {
                    symbol: symbol.clone(),
                    bars,
                });
                continue;
            }
            Err(SentrankError::MalformedRecord { reason, .. }) => {
                warn!("error analyzing {}: {}", symbol, reason);
                SkipReason::MalformedRecord { reason }
            }
            Err(e) => {
                warn!("skipping {} ({})", symbol, e);
                SkipReason::NoData
            }
        };

        skipped.push(SkippedSymbol {
            symbol: symbol.clone(),
            reason,
        });
    }

    UniverseLoad { series, skipped }
}
