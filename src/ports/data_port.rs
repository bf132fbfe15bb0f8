//! Data access port traits for price and sentiment history.

use crate::domain::error::SentrankError;
use crate::domain::ohlcv::OhlcvBar;
use crate::domain::sentiment::SentimentObservation;

pub trait PriceDataPort {
    /// Full price series for one symbol, ascending by timestamp.
    fn fetch_bars(&self, symbol: &str) -> Result<Vec<OhlcvBar>, SentrankError>;

    fn list_symbols(&self) -> Result<Vec<String>, SentrankError>;
}

pub trait SentimentPort {
    fn fetch_sentiment(&self) -> Result<Vec<SentimentObservation>, SentrankError>;
}
