use crate::indicators::types::{ColumnSummary, SchoolScores, ScoreSummary};
use crate::indicators::utility::{mean, stddev};
use chrono::Utc;

/// Computes count, mean, population standard deviation and range of every
/// score column. An empty input yields zeros.
pub fn summarize(prefix: &str, schools: &[SchoolScores]) -> ScoreSummary {
    let columns = SchoolScores::column_names()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let series: Vec<f64> = schools.iter().map(|s| s.scores()[i].1).collect();
            let avg = mean(&series);

            let (min, max) = if series.is_empty() {
                (0.0, 0.0)
            } else {
                series
                    .iter()
                    .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                        (lo.min(v), hi.max(v))
                    })
            };

            ColumnSummary {
                column: name.to_string(),
                mean: avg,
                stddev: stddev(&series, avg),
                min,
                max,
            }
        })
        .collect();

    ScoreSummary {
        generated_at: Utc::now(),
        prefix: prefix.to_string(),
        schools: schools.len(),
        columns,
    }
}
