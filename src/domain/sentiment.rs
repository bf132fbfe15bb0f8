//! Headline sentiment observations and the synthetic fallback series.

use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeSet;

/// Minimum distinct days of real sentiment before it is used as-is.
pub const MIN_SENTIMENT_DAYS: usize = 5;
/// Synthetic scores are drawn uniformly from [-SYNTHETIC_AMPLITUDE, SYNTHETIC_AMPLITUDE].
pub const SYNTHETIC_AMPLITUDE: f64 = 0.5;
pub const SYNTHETIC_HEADLINE: &str = "Mock Data";

#[derive(Debug, Clone, PartialEq)]
pub struct SentimentObservation {
    pub date: NaiveDate,
    pub headline: String,
    pub score: f64,
}

/// Sentiment handed to the daily aggregator, tagged with its provenance.
#[derive(Debug, Clone)]
pub struct SentimentInput {
    pub observations: Vec<SentimentObservation>,
    pub is_synthetic: bool,
}

pub fn distinct_days(observations: &[SentimentObservation]) -> usize {
    observations
        .iter()
        .map(|o| o.date)
        .collect::<BTreeSet<_>>()
        .len()
}

/// One independent uniform score per date.
pub fn synthetic_sentiment<R: Rng + ?Sized>(
    dates: &[NaiveDate],
    rng: &mut R,
) -> Vec<SentimentObservation> {
    dates
        .iter()
        .map(|&date| SentimentObservation {
            date,
            headline: SYNTHETIC_HEADLINE.to_string(),
            score: rng.gen_range(-SYNTHETIC_AMPLITUDE..=SYNTHETIC_AMPLITUDE),
        })
        .collect()
}

/// Keeps real sentiment when it spans at least [`MIN_SENTIMENT_DAYS`] days,
/// otherwise substitutes a synthetic series covering every price date.
pub fn resolve_sentiment<R: Rng + ?Sized>(
    real: Vec<SentimentObservation>,
    price_dates: &[NaiveDate],
    rng: &mut R,
) -> SentimentInput {
    let days = distinct_days(&real);
    if days >= MIN_SENTIMENT_DAYS {
        return SentimentInput {
            observations: real,
            is_synthetic: false,
        };
    }

    tracing::warn!(
        "only {} day(s) of sentiment found, generating synthetic sentiment for {} dates",
        days,
        price_dates.len()
    );
    SentimentInput {
        observations: synthetic_sentiment(price_dates, rng),
        is_synthetic: true,
    }
}
