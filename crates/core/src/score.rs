//! Overall rating aggregation.
//!
//! Category ratings map onto a 1..=4 ordinal scale, the arithmetic mean is
//! taken over however many ratings are present, and the mean is bucketed with
//! deliberately asymmetric thresholds (>=3.5 Excellent, >=2.5 Good, >=1.5
//! Fair, else Poor). The thresholds are part of the observable contract; this
//! is not round-to-nearest.

use std::fmt;

use serde::Serialize;

use crate::analysis::{DocumentationAnalysis, Rating};

/// Aggregated rating across all categories, or `Unknown` when no category
/// score was available to average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OverallRating {
    Excellent,
    Good,
    Fair,
    Poor,
    Unknown,
}

impl OverallRating {
    pub fn as_str(self) -> &'static str {
        match self {
            OverallRating::Excellent => "Excellent",
            OverallRating::Good => "Good",
            OverallRating::Fair => "Fair",
            OverallRating::Poor => "Poor",
            OverallRating::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for OverallRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Averages the given ratings and buckets the mean.
///
/// An empty input yields [`OverallRating::Unknown`].
pub fn aggregate_points(scores: impl IntoIterator<Item = Rating>) -> OverallRating {
    let points: Vec<u8> = scores.into_iter().map(Rating::points).collect();
    if points.is_empty() {
        return OverallRating::Unknown;
    }

    let mean = points.iter().map(|&p| p as f64).sum::<f64>() / points.len() as f64;
    bucket_mean(mean)
}

/// Overall rating for a complete four-category analysis.
pub fn overall_rating(analysis: &DocumentationAnalysis) -> OverallRating {
    aggregate_points(analysis.scores())
}

fn bucket_mean(mean: f64) -> OverallRating {
    if mean >= 3.5 {
        OverallRating::Excellent
    } else if mean >= 2.5 {
        OverallRating::Good
    } else if mean >= 1.5 {
        OverallRating::Fair
    } else {
        OverallRating::Poor
    }
}
