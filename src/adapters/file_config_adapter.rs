//! INI file configuration adapter.

use crate::domain::error::SentrankError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SentrankError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| SentrankError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, SentrankError> {
        let mut config = Ini::new();
        config
            .read(content.to_string())
            .map_err(|reason| SentrankError::ConfigParse {
                file: "<string>".to_string(),
                reason,
            })?;
        Ok(Self { config })
    }

    /// Empty configuration: every lookup falls back to its default.
    pub fn empty() -> Self {
        Self { config: Ini::new() }
    }

    /// Loads `path` when given, otherwise an empty configuration.
    pub fn load_optional(path: Option<&Path>) -> Result<Self, SentrankError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::empty()),
        }
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
[data]
price_dir = data/price_history
sentiment_file = data/raw_tweets/news_sentiment.csv

[ranking]
top_n = 3
min_bars = 60
universe = BTC-USD, ETH-USD

[backtest]
symbol = BTC-USDT
risk_free_rate = 0.04
seed = 7
"#;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(SAMPLE).unwrap();
        assert_eq!(
            adapter.get_string("data", "price_dir"),
            Some("data/price_history".to_string())
        );
        assert_eq!(adapter.get_int("ranking", "top_n", 5), 3);
        assert_eq!(adapter.get_int("ranking", "min_bars", 50), 60);
        assert_eq!(adapter.get_double("backtest", "risk_free_rate", 0.0), 0.04);
        assert_eq!(
            adapter.get_string("backtest", "symbol"),
            Some("BTC-USDT".to_string())
        );
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let adapter = FileConfigAdapter::from_string("[ranking]\n").unwrap();
        assert_eq!(adapter.get_string("ranking", "universe"), None);
        assert_eq!(adapter.get_int("ranking", "top_n", 5), 5);
        assert_eq!(adapter.get_double("backtest", "risk_free_rate", 0.01), 0.01);
    }

    #[test]
    fn non_numeric_values_fall_back_to_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[ranking]\ntop_n = five\nmin_bars = lots\n").unwrap();
        assert_eq!(adapter.get_int("ranking", "top_n", 5), 5);
        assert_eq!(adapter.get_double("ranking", "min_bars", 50.0), 50.0);
    }

    #[test]
    fn get_string_or_trims_and_defaults() {
        let adapter =
            FileConfigAdapter::from_string("[backtest]\nsymbol =   \noutput = out.csv \n").unwrap();
        assert_eq!(adapter.get_string_or("backtest", "symbol", "BTC-USDT"), "BTC-USDT");
        assert_eq!(adapter.get_string_or("backtest", "output", "x.csv"), "out.csv");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let adapter = FileConfigAdapter::empty();
        assert_eq!(adapter.get_int("ranking", "top_n", 5), 5);
        assert_eq!(adapter.get_string("data", "price_dir"), None);
    }

    #[test]
    fn from_file_reads_config() {
        let file = create_temp_config(SAMPLE);
        let adapter = FileConfigAdapter::load_optional(Some(file.path())).unwrap();
        assert_eq!(
            adapter.get_string("ranking", "universe"),
            Some("BTC-USD, ETH-USD".to_string())
        );
    }

    #[test]
    fn from_file_missing_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/sentrank.ini");
        assert!(matches!(result, Err(SentrankError::ConfigParse { .. })));
    }
}
