//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::console_report::{
    render_leaderboard, render_scan, render_skipped, render_summary, Leaderboard,
};
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sentiment_csv_adapter::SentimentCsvAdapter;
use crate::domain::backtest::{run_backtest, BacktestSeries};
use crate::domain::config_validation::{
    validate_backtest_config, validate_ranking_config, DEFAULT_TOP_N,
};
use crate::domain::daily::{join_daily, price_dates};
use crate::domain::error::SentrankError;
use crate::domain::metrics::BacktestSummary;
use crate::domain::ranking::{rank_universe, Rankings};
use crate::domain::scanner::{scan_series, ScanRow};
use crate::domain::sentiment::resolve_sentiment;
use crate::domain::universe::{default_universe, load_universe, parse_symbols, MIN_RANKING_BARS};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::{PriceDataPort, SentimentPort};
use crate::ports::report_port::ReportPort;

pub const DEFAULT_PRICE_DIR: &str = "data/price_history";
pub const DEFAULT_SENTIMENT_FILE: &str = "data/raw_tweets/news_sentiment.csv";
pub const DEFAULT_BACKTEST_SYMBOL: &str = "BTC-USDT";

#[derive(Parser, Debug)]
#[command(
    name = "sentrank",
    about = "Crypto asset ranker and sentiment-signal backtester"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Rank assets into safety and trade leaderboards
    Rank {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        /// Rows per leaderboard
        #[arg(short = 'n', long)]
        top: Option<usize>,
        /// Comma-separated symbol list, or `default` (default: every price file)
        #[arg(short, long)]
        universe: Option<String>,
    },
    /// Print the market scanner table
    Scan {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        universe: Option<String>,
    },
    /// Backtest the lagged sentiment signal on one symbol
    Backtest {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
        #[arg(short, long)]
        symbol: Option<String>,
        /// Headline sentiment CSV
        #[arg(long)]
        sentiment: Option<PathBuf>,
        /// Write the backtest table as CSV
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Seed for the synthetic sentiment fallback
        #[arg(long)]
        seed: Option<u64>,
    },
    /// List symbols with price files
    Symbols {
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        data_dir: Option<PathBuf>,
    },
}

/// Ranking run parameters after config and flag overrides are merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RankSettings {
    pub data_dir: PathBuf,
    pub top_n: usize,
    pub min_bars: usize,
    /// Explicit universe; `None` means every symbol the data source lists.
    pub symbols: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestSettings {
    pub data_dir: PathBuf,
    pub sentiment_file: PathBuf,
    pub symbol: String,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
    pub risk_free_rate: f64,
}

pub fn run(cli: Cli) -> ExitCode {
    let result = match cli.command {
        Command::Rank {
            config,
            data_dir,
            top,
            universe,
        } => run_rank(config.as_deref(), data_dir, top, universe.as_deref()),
        Command::Scan {
            config,
            data_dir,
            universe,
        } => run_scan(config.as_deref(), data_dir, universe.as_deref()),
        Command::Backtest {
            config,
            data_dir,
            symbol,
            sentiment,
            output,
            seed,
        } => {
            let overrides = BacktestOverrides {
                data_dir,
                symbol,
                sentiment,
                output,
                seed,
            };
            run_backtest_command(config.as_deref(), overrides)
        }
        Command::Symbols { config, data_dir } => run_symbols(config.as_deref(), data_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_config(path: Option<&Path>) -> Result<FileConfigAdapter, SentrankError> {
    if let Some(p) = path {
        info!("Loading config from {}", p.display());
    }
    FileConfigAdapter::load_optional(path)
}

fn data_dir(config: &dyn ConfigPort, data_dir_override: Option<PathBuf>) -> PathBuf {
    data_dir_override.unwrap_or_else(|| {
        PathBuf::from(config.get_string_or("data", "price_dir", DEFAULT_PRICE_DIR))
    })
}

/// `default` selects the built-in 20-asset universe.
fn parse_universe(list: &str) -> Result<Vec<String>, SentrankError> {
    if list.trim().eq_ignore_ascii_case("default") {
        return Ok(default_universe());
    }
    parse_symbols(list).map_err(|e| SentrankError::ConfigInvalid {
        section: "ranking".to_string(),
        key: "universe".to_string(),
        reason: e.to_string(),
    })
}

/// Flag universe first, then the config list; `None` when neither is set.
fn configured_universe(
    config: &dyn ConfigPort,
    universe_override: Option<&str>,
) -> Result<Option<Vec<String>>, SentrankError> {
    match universe_override {
        Some(list) => parse_universe(list).map(Some),
        None => config
            .get_string("ranking", "universe")
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_universe(&s))
            .transpose(),
    }
}

pub fn build_rank_settings(
    config: &dyn ConfigPort,
    data_dir_override: Option<PathBuf>,
    top_override: Option<usize>,
    universe_override: Option<&str>,
) -> Result<RankSettings, SentrankError> {
    validate_ranking_config(config)?;

    let top_n = match top_override {
        Some(0) => {
            return Err(SentrankError::ConfigInvalid {
                section: "ranking".to_string(),
                key: "top_n".to_string(),
                reason: "top_n must be at least 1".to_string(),
            })
        }
        Some(n) => n,
        None => config.get_int("ranking", "top_n", DEFAULT_TOP_N) as usize,
    };
    let min_bars = config.get_int("ranking", "min_bars", MIN_RANKING_BARS as i64) as usize;

    Ok(RankSettings {
        data_dir: data_dir(config, data_dir_override),
        top_n,
        min_bars,
        symbols: configured_universe(config, universe_override)?,
    })
}

#[derive(Debug, Default)]
pub struct BacktestOverrides {
    pub data_dir: Option<PathBuf>,
    pub symbol: Option<String>,
    pub sentiment: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub fn build_backtest_settings(
    config: &dyn ConfigPort,
    overrides: BacktestOverrides,
) -> Result<BacktestSettings, SentrankError> {
    validate_backtest_config(config)?;

    let seed = match overrides.seed {
        Some(s) => Some(s),
        None => config
            .get_string("backtest", "seed")
            .and_then(|s| s.trim().parse::<u64>().ok()),
    };
    let output = overrides.output.or_else(|| {
        config
            .get_string("backtest", "output")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    });
    let symbol = match overrides.symbol {
        Some(s) => s.trim().to_uppercase(),
        None => config
            .get_string_or("backtest", "symbol", DEFAULT_BACKTEST_SYMBOL)
            .to_uppercase(),
    };
    if symbol.is_empty() {
        return Err(SentrankError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "symbol".to_string(),
            reason: "symbol must not be empty".to_string(),
        });
    }

    Ok(BacktestSettings {
        data_dir: data_dir(config, overrides.data_dir),
        sentiment_file: overrides.sentiment.unwrap_or_else(|| {
            PathBuf::from(config.get_string_or("data", "sentiment_file", DEFAULT_SENTIMENT_FILE))
        }),
        symbol,
        output,
        seed,
        risk_free_rate: config.get_double("backtest", "risk_free_rate", 0.0),
    })
}

/// Explicit universe when given, otherwise everything the data source lists.
pub fn resolve_symbols(
    symbols: Option<&[String]>,
    data_port: &dyn PriceDataPort,
) -> Result<Vec<String>, SentrankError> {
    match symbols {
        Some(list) => Ok(list.to_vec()),
        None => data_port.list_symbols(),
    }
}

pub fn build_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

pub fn run_rank_pipeline(
    data_port: &dyn PriceDataPort,
    settings: &RankSettings,
) -> Result<Rankings, SentrankError> {
    let symbols = resolve_symbols(settings.symbols.as_deref(), data_port)?;
    Ok(rank_universe(data_port, &symbols, settings.min_bars))
}

fn run_rank(
    config_path: Option<&Path>,
    data_dir_override: Option<PathBuf>,
    top: Option<usize>,
    universe: Option<&str>,
) -> Result<(), SentrankError> {
    let config = load_config(config_path)?;
    let settings = build_rank_settings(&config, data_dir_override, top, universe)?;
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    let rankings = run_rank_pipeline(&data_port, &settings)?;
    if rankings.is_empty() {
        warn!("no assets passed the history filter");
    }

    print!(
        "{}",
        render_leaderboard(Leaderboard::Safety, rankings.top_safety(settings.top_n))
    );
    println!();
    print!(
        "{}",
        render_leaderboard(Leaderboard::Trade, rankings.top_trade(settings.top_n))
    );
    eprint!("{}", render_skipped(&rankings.skipped));
    Ok(())
}

/// Scans the assets that pass the same history filter as the ranker.
pub fn run_scan_pipeline(
    data_port: &dyn PriceDataPort,
    symbols: &[String],
    min_bars: usize,
) -> Vec<ScanRow> {
    let load = load_universe(data_port, symbols, min_bars);
    scan_series(&load.series)
}

fn run_scan(
    config_path: Option<&Path>,
    data_dir_override: Option<PathBuf>,
    universe: Option<&str>,
) -> Result<(), SentrankError> {
    let config = load_config(config_path)?;
    let settings = build_rank_settings(&config, data_dir_override, None, universe)?;
    let data_port = CsvAdapter::new(settings.data_dir.clone());

    let symbols = resolve_symbols(settings.symbols.as_deref(), &data_port)?;
    info!("Scanning {} symbols...", symbols.len());

    let rows = run_scan_pipeline(&data_port, &symbols, settings.min_bars);
    print!("{}", render_scan(&rows));
    Ok(())
}

/// Loads one symbol's prices and the sentiment feed, substitutes synthetic
/// sentiment when real coverage is thin, and runs the lagged backtest.
pub fn run_backtest_pipeline(
    price_port: &dyn PriceDataPort,
    sentiment_port: &dyn SentimentPort,
    symbol: &str,
    rng: &mut StdRng,
) -> Result<BacktestSeries, SentrankError> {
    let bars = price_port.fetch_bars(symbol)?;
    if bars.is_empty() {
        return Err(SentrankError::NoData {
            symbol: symbol.to_string(),
        });
    }
    info!("{}: {} price bars", symbol, bars.len());

    let real = match sentiment_port.fetch_sentiment() {
        Ok(obs) => obs,
        Err(SentrankError::DataRead { path, reason }) => {
            warn!("sentiment unavailable ({}: {})", path, reason);
            Vec::new()
        }
        Err(e) => return Err(e),
    };

    let sentiment = resolve_sentiment(real, &price_dates(&bars), rng);
    let join = join_daily(&bars, &sentiment);
    if join.points.is_empty() {
        warn!("{}: no days with both price and sentiment", symbol);
    }
    Ok(run_backtest(&join))
}

fn run_backtest_command(
    config_path: Option<&Path>,
    overrides: BacktestOverrides,
) -> Result<(), SentrankError> {
    let config = load_config(config_path)?;
    let settings = build_backtest_settings(&config, overrides)?;

    let price_port = CsvAdapter::new(settings.data_dir.clone());
    let sentiment_port = SentimentCsvAdapter::new(settings.sentiment_file.clone());
    let mut rng = build_rng(settings.seed);

    let series = run_backtest_pipeline(&price_port, &sentiment_port, &settings.symbol, &mut rng)?;
    let summary = BacktestSummary::compute(&series, settings.risk_free_rate);
    print!("{}", render_summary(&settings.symbol, &summary));

    if let Some(output) = &settings.output {
        CsvReportAdapter.write_backtest(&series, output)?;
        info!("Backtest table written to {}", output.display());
    }
    Ok(())
}

fn run_symbols(
    config_path: Option<&Path>,
    data_dir_override: Option<PathBuf>,
) -> Result<(), SentrankError> {
    let config = load_config(config_path)?;
    let data_port = CsvAdapter::new(data_dir(&config, data_dir_override));

    let symbols = data_port.list_symbols()?;
    if symbols.is_empty() {
        warn!("no price files found");
    } else {
        for symbol in &symbols {
            println!("{}", symbol);
        }
        info!("{} symbols found", symbols.len());
    }
    Ok(())
}
