//! Plain-text tables for terminal output.
//!
//! Renderers return `String` so callers decide where the text goes.

use crate::domain::metrics::BacktestSummary;
use crate::domain::ranking::RankingRecord;
use crate::domain::scanner::ScanRow;
use crate::domain::universe::{SkipReason, SkippedSymbol};

/// Which extra column a leaderboard shows next to score and volatility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leaderboard {
    Safety,
    Trade,
}

impl Leaderboard {
    fn title(self) -> &'static str {
        match self {
            Leaderboard::Safety => "Top Safe Assets (Long-Term)",
            Leaderboard::Trade => "Top Trade Opportunities (Short-Term)",
        }
    }

    fn extra_header(self) -> &'static str {
        match self {
            Leaderboard::Safety => "Change_24h",
            Leaderboard::Trade => "Volume_Strength",
        }
    }
}

pub fn render_leaderboard(kind: Leaderboard, records: &[RankingRecord]) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== {} ===\n", kind.title()));

    if records.is_empty() {
        out.push_str("(no eligible assets)\n");
        return out;
    }

    out.push_str(&format!(
        "{:<12} {:>10} {:>12} {:>16}\n",
        "Symbol",
        "Score",
        "Volatility",
        kind.extra_header()
    ));
    for r in records {
        let (score, extra) = match kind {
            Leaderboard::Safety => (r.safety_score, r.indicators.change_24h),
            Leaderboard::Trade => (r.trade_score, r.indicators.volume_strength),
        };
        out.push_str(&format!(
            "{:<12} {:>10.2} {:>12.2} {:>16.2}\n",
            r.symbol(),
            score,
            r.indicators.volatility,
            extra
        ));
    }
    out
}

pub fn render_scan(rows: &[ScanRow]) -> String {
    let mut out = String::new();
    out.push_str("=== Market Scanner ===\n");
    if rows.is_empty() {
        out.push_str("(no assets with enough history)\n");
        return out;
    }

    out.push_str(&format!(
        "{:<12} {:>14} {:>10} {:>11} {:>8} {:>9} {:>9} {:>9} {:>9}\n",
        "Symbol", "Price", "Change%", "Volatility", "RSI", "VolStr", "N_Vol", "N_RSI", "N_VolStr"
    ));
    for row in rows {
        let r = &row.indicators;
        out.push_str(&format!(
            "{:<12} {:>14.4} {:>10.2} {:>11.2} {:>8.2} {:>9.2} {:>9.2} {:>9.2} {:>9.2}\n",
            r.symbol,
            r.price,
            r.change_24h,
            r.volatility,
            r.rsi,
            r.volume_strength,
            row.norm_volatility,
            row.norm_rsi,
            row.norm_volume
        ));
    }
    out
}

pub fn render_summary(symbol: &str, summary: &BacktestSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Sentiment Backtest: {} ===\n", symbol));
    if summary.is_synthetic {
        out.push_str(
            "NOTE: sentiment is synthetic (insufficient real data); results are illustrative only\n",
        );
    }
    out.push_str(&format!("Days:               {}\n", summary.days));
    out.push_str(&format!(
        "Market Return:      {:.2}%\n",
        summary.market_total_return * 100.0
    ));
    out.push_str(&format!(
        "Strategy Return:    {:.2}%\n",
        summary.strategy_total_return * 100.0
    ));
    out.push_str(&format!(
        "Excess Return:      {:.2}%\n",
        summary.excess_return() * 100.0
    ));
    out.push_str(&format!(
        "Market Drawdown:    -{:.1}%\n",
        summary.market_max_drawdown * 100.0
    ));
    out.push_str(&format!(
        "Strategy Drawdown:  -{:.1}%\n",
        summary.strategy_max_drawdown * 100.0
    ));
    out.push_str(&format!("Exposure:           {:.1}%\n", summary.exposure * 100.0));
    out.push_str(&format!("Sharpe Ratio:       {:.2}\n", summary.sharpe_ratio));
    out
}

fn describe(reason: &SkipReason) -> String {
    match reason {
        SkipReason::NoData => "no data found".to_string(),
        SkipReason::InsufficientHistory { bars, minimum } => {
            format!("only {} bars, minimum {} required", bars, minimum)
        }
        SkipReason::MalformedRecord { reason } => format!("malformed data: {}", reason),
    }
}

pub fn render_skipped(skipped: &[SkippedSymbol]) -> String {
    let mut out = String::new();
    if skipped.is_empty() {
        return out;
    }
    out.push_str(&format!("Skipped {} symbol(s):\n", skipped.len()));
    for s in skipped {
        out.push_str(&format!("  {}: {}\n", s.symbol, describe(&s.reason)));
    }
    out
}
