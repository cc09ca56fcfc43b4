//! Aggregation of matched keypoints into a single displacement scalar.

use nalgebra::{convert, Vector2};

use crate::algorithms::stats;
use crate::error::PipelineError;
use crate::pipeline::features::SizedFeature;
use crate::pipeline::matcher::Match;

/// Mean Euclidean pixel displacement across the matched keypoints.
///
/// Every match resolves to one coordinate pair and every pair to one scalar
/// distance. The distance sample is trimmed with the `sigma` deviation
/// multiplier before averaging, which suppresses mismatched correspondences
/// (cloud edges, specular water) that would otherwise drag the mean. When
/// the trim removes every value the unfiltered mean is used instead, so a
/// degenerate sample can never leave this stage without a number.
///
/// Fails with [`PipelineError::NoMatches`] when `matches` is empty: with no
/// correspondence there is no displacement evidence at all and the caller is
/// expected to skip the pair.
pub fn mean_displacement(
    matches: &[Match],
    query: &[SizedFeature],
    train: &[SizedFeature],
    sigma: f64,
) -> Result<f64, PipelineError> {
    if matches.is_empty() {
        return Err(PipelineError::NoMatches);
    }

    let distances: Vec<f64> = matches
        .iter()
        .map(|m| {
            let from: Vector2<f64> = convert(query[m.query].keypoint);
            let to: Vector2<f64> = convert(train[m.train].keypoint);
            (to - from).norm()
        })
        .collect();

    let kept = stats::reject_outliers(&distances, sigma);
    let sample = if kept.is_empty() { &distances } else { &kept };

    stats::mean(sample).ok_or(PipelineError::DegenerateAggregate)
}
