//! Daily resampling of price and sentiment, joined on calendar date.
//!
//! Both inputs are bucketed by day and averaged; the join keeps only dates
//! present in both (intersection). Dropped dates are counted, not errors.

use crate::domain::ohlcv::OhlcvBar;
use crate::domain::sentiment::{SentimentInput, SentimentObservation};
use chrono::NaiveDate;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub close: f64,
    pub sentiment: f64,
}

#[derive(Debug, Clone)]
pub struct DailyJoin {
    pub points: Vec<DailyPoint>,
    pub is_synthetic: bool,
    pub price_only_days: usize,
    pub sentiment_only_days: usize,
}

fn daily_mean<I>(items: I) -> BTreeMap<NaiveDate, f64>
where
    I: IntoIterator<Item = (NaiveDate, f64)>,
{
    let mut buckets: BTreeMap<NaiveDate, (f64, usize)> = BTreeMap::new();
    for (date, value) in items {
        let entry = buckets.entry(date).or_insert((0.0, 0));
        entry.0 += value;
        entry.1 += 1;
    }
    buckets
        .into_iter()
        .map(|(date, (sum, count))| (date, sum / count as f64))
        .collect()
}

pub fn daily_close(bars: &[OhlcvBar]) -> BTreeMap<NaiveDate, f64> {
    daily_mean(bars.iter().map(|b| (b.day(), b.close)))
}

pub fn daily_sentiment(observations: &[SentimentObservation]) -> BTreeMap<NaiveDate, f64> {
    daily_mean(observations.iter().map(|o| (o.date, o.score)))
}

/// Distinct calendar dates of a price series, ascending.
pub fn price_dates(bars: &[OhlcvBar]) -> Vec<NaiveDate> {
    daily_close(bars).into_keys().collect()
}

pub fn join_daily(bars: &[OhlcvBar], sentiment: &SentimentInput) -> DailyJoin {
    let prices = daily_close(bars);
    let scores = daily_sentiment(&sentiment.observations);

    let points: Vec<DailyPoint> = prices
        .iter()
        .filter_map(|(date, &close)| {
            scores.get(date).map(|&score| DailyPoint {
                date: *date,
                close,
                sentiment: score,
            })
        })
        .collect();

    let price_only_days = prices.len() - points.len();
    let sentiment_only_days = scores.len() - points.len();
    if price_only_days > 0 || sentiment_only_days > 0 {
        tracing::debug!(
            "daily join dropped {} price-only and {} sentiment-only days",
            price_only_days,
            sentiment_only_days
        );
    }

    DailyJoin {
        points,
        is_synthetic: sentiment.is_synthetic,
        price_only_days,
        sentiment_only_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    fn bar(day: u32, hour: u32, close: f64) -> OhlcvBar {
        OhlcvBar {
            symbol: "BTC-USDT".into(),
            timestamp: NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0)
                .unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 10.0,
        }
    }

    fn obs(day: u32, score: f64) -> SentimentObservation {
        SentimentObservation {
            date: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            headline: "h".into(),
            score,
        }
    }

    fn real(observations: Vec<SentimentObservation>) -> SentimentInput {
        SentimentInput {
            observations,
            is_synthetic: false,
        }
    }

    #[test]
    fn daily_close_averages_intraday_bars() {
        let closes = daily_close(&[bar(1, 0, 100.0), bar(1, 12, 110.0), bar(2, 3, 90.0)]);
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[&NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()], 105.0);
        assert_eq!(closes[&NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()], 90.0);
    }

    #[test]
    fn daily_sentiment_averages_headlines() {
        let scores = daily_sentiment(&[obs(3, 0.5), obs(3, -0.1), obs(3, 0.2)]);
        assert!((scores[&NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn join_drops_one_sided_days() {
        let bars = vec![bar(1, 0, 100.0), bar(2, 0, 101.0), bar(3, 0, 102.0)];
        let sentiment = real(vec![obs(2, 0.1), obs(3, -0.2), obs(4, 0.3)]);

        let joined = join_daily(&bars, &sentiment);

        let days: Vec<_> = joined.points.iter().map(|p| p.date).collect();
        assert_eq!(
            days,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            ]
        );
        assert_eq!(joined.price_only_days, 1);
        assert_eq!(joined.sentiment_only_days, 1);
        assert!(!joined.is_synthetic);
    }

    #[test]
    fn join_carries_synthetic_flag() {
        let sentiment = SentimentInput {
            observations: vec![obs(1, 0.1)],
            is_synthetic: true,
        };
        let joined = join_daily(&[bar(1, 0, 100.0)], &sentiment);
        assert!(joined.is_synthetic);
        assert_eq!(joined.points.len(), 1);
    }

    #[test]
    fn join_with_no_overlap_is_empty() {
        let joined = join_daily(&[bar(1, 0, 100.0)], &real(vec![obs(9, 0.1)]));
        assert!(joined.points.is_empty());
    }

    #[test]
    fn price_dates_are_distinct_and_sorted() {
        let dates = price_dates(&[bar(2, 5, 1.0), bar(1, 1, 1.0), bar(2, 6, 1.0)]);
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            ]
        );
    }

    proptest! {
        #[test]
        fn join_is_intersection(
            price_days in prop::collection::btree_set(1u32..=28, 0..20),
            sentiment_days in prop::collection::btree_set(1u32..=28, 0..20),
        ) {
            let bars: Vec<_> = price_days.iter().map(|&d| bar(d, 0, 100.0)).collect();
            let sentiment = real(sentiment_days.iter().map(|&d| obs(d, 0.1)).collect());

            let joined = join_daily(&bars, &sentiment);
            let got: BTreeSet<u32> = joined
                .points
                .iter()
                .map(|p| chrono::Datelike::day(&p.date))
                .collect();
            let expected: BTreeSet<u32> = price_days.intersection(&sentiment_days).copied().collect();
            prop_assert_eq!(got, expected);
        }
    }
}
