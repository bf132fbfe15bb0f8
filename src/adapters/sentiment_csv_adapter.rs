//! CSV headline-sentiment adapter.
//!
//! Columns: `date,headline,sentiment_score`. The date may carry a time part;
//! only the calendar date is kept.

use crate::adapters::csv_adapter::parse_timestamp;
use crate::domain::error::SentrankError;
use crate::domain::sentiment::SentimentObservation;
use crate::ports::data_port::SentimentPort;
use std::fs;
use std::path::PathBuf;

pub struct SentimentCsvAdapter {
    path: PathBuf,
}

impl SentimentCsvAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

fn parse_observation(record: &csv::StringRecord) -> Result<SentimentObservation, String> {
    let date_str = record.get(0).ok_or("missing date column")?;
    let date = parse_timestamp(date_str)
        .map(|ts| ts.date())
        .ok_or_else(|| format!("invalid date {:?}", date_str))?;

    let headline = record.get(1).unwrap_or_default().to_string();

    let score_str = record.get(2).ok_or("missing sentiment_score column")?;
    let score: f64 = score_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid sentiment_score {:?}: {}", score_str, e))?;
    if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
        return Err(format!("sentiment_score {} outside [-1, 1]", score));
    }

    Ok(SentimentObservation {
        date,
        headline,
        score,
    })
}

impl SentimentPort for SentimentCsvAdapter {
    fn fetch_sentiment(&self) -> Result<Vec<SentimentObservation>, SentrankError> {
        let source = self.path.display().to_string();
        let content = fs::read_to_string(&self.path).map_err(|e| SentrankError::DataRead {
            path: source.clone(),
            reason: e.to_string(),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| SentrankError::malformed(&source, e.to_string()))?;
            let obs = parse_observation(&record).map_err(|reason| {
                SentrankError::malformed(&source, format!("row {}: {}", row + 1, reason))
            })?;
            observations.push(obs);
        }

        Ok(observations)
    }
}
