//! Cross-sectional asset ranking.
//!
//! Safety score favours steady low-risk growth:
//!   0.4 * change_24h - 0.4 * volatility - 0.2 * |rsi - 50|
//! Trade score favours volatile, high-volume opportunities:
//!   0.5 * volatility + 3.0 * volume_strength + 0.1 * |rsi - 50|
//!
//! Both leaderboards are stable sorts, so ties keep enumeration order.

use crate::domain::indicator_helpers::{compute_indicator_record, IndicatorRecord, MIN_CHANGE_BARS};
use crate::domain::universe::{load_universe, LoadedSeries, SkipReason, SkippedSymbol};
use crate::ports::data_port::PriceDataPort;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct RankingRecord {
    pub indicators: IndicatorRecord,
    pub safety_score: f64,
    pub trade_score: f64,
}

impl RankingRecord {
    pub fn from_indicators(indicators: IndicatorRecord) -> Self {
        let safety_score = safety_score(&indicators);
        let trade_score = trade_score(&indicators);
        RankingRecord {
            indicators,
            safety_score,
            trade_score,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.indicators.symbol
    }
}

pub fn safety_score(r: &IndicatorRecord) -> f64 {
    0.4 * r.change_24h - 0.4 * r.volatility - 0.2 * (r.rsi - 50.0).abs()
}

pub fn trade_score(r: &IndicatorRecord) -> f64 {
    0.5 * r.volatility + 3.0 * r.volume_strength + 0.1 * (r.rsi - 50.0).abs()
}

#[derive(Debug, Clone, Default)]
pub struct Rankings {
    pub by_safety: Vec<RankingRecord>,
    pub by_trade: Vec<RankingRecord>,
    pub skipped: Vec<SkippedSymbol>,
}

impl Rankings {
    pub fn is_empty(&self) -> bool {
        self.by_safety.is_empty()
    }

    pub fn top_safety(&self, n: usize) -> &[RankingRecord] {
        &self.by_safety[..n.min(self.by_safety.len())]
    }

    pub fn top_trade(&self, n: usize) -> &[RankingRecord] {
        &self.by_trade[..n.min(self.by_trade.len())]
    }
}

/// Sorts records into both leaderboards, descending by score.
pub fn rank_records(records: Vec<RankingRecord>) -> (Vec<RankingRecord>, Vec<RankingRecord>) {
    let mut by_safety = records.clone();
    by_safety.sort_by(|a, b| b.safety_score.total_cmp(&a.safety_score));

    let mut by_trade = records;
    by_trade.sort_by(|a, b| b.trade_score.total_cmp(&a.trade_score));

    (by_safety, by_trade)
}

/// Scores already-loaded series. Series below `min_bars` or whose indicators
/// are still undefined are skipped as insufficient history.
pub fn rank_series(series: &[LoadedSeries], min_bars: usize) -> Rankings {
    let mut records = Vec::with_capacity(series.len());
    let mut skipped = Vec::new();

    for s in series {
        let record = if s.bars.len() < min_bars {
            None
        } else {
            compute_indicator_record(&s.symbol, &s.bars)
        };

        match record {
            Some(indicators) => records.push(RankingRecord::from_indicators(indicators)),
            None => skipped.push(SkippedSymbol {
                symbol: s.symbol.clone(),
                reason: SkipReason::InsufficientHistory {
                    bars: s.bars.len(),
                    minimum: min_bars.max(MIN_CHANGE_BARS),
                },
            }),
        }
    }

    let (by_safety, by_trade) = rank_records(records);
    Rankings {
        by_safety,
        by_trade,
        skipped,
    }
}

/// Loads and ranks a whole universe through a data port.
pub fn rank_universe(data_port: &dyn PriceDataPort, symbols: &[String], min_bars: usize) -> Rankings {
    info!("Analyzing market data for ranking ({} symbols)", symbols.len());

    let load = load_universe(data_port, symbols, min_bars);
    let mut rankings = rank_series(&load.series, min_bars);

    let mut skipped = load.skipped;
    skipped.append(&mut rankings.skipped);
    rankings.skipped = skipped;

    info!(
        "Ranked {} of {} symbols",
        rankings.by_safety.len(),
        symbols.len()
    );
    rankings
}
