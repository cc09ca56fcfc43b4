//! The per-pair estimation pipeline.
//!
//! One invocation of [`estimate_pair`] owns an ordered image pair start to
//! finish: capture timestamps from metadata, features from both frames,
//! cross-checked descriptor matches, a robust displacement statistic and
//! finally a speed sample. Every stage failure surfaces as a recoverable
//! [`PipelineError`](crate::PipelineError), leaving skip-or-abort up to the
//! caller.

pub mod accumulator;
pub mod displacement;
pub mod features;
pub mod matcher;
pub mod speed;

use std::path::Path;

use image::GrayImage;

use crate::config::PipelineParams;
use crate::error::Result;
use crate::metadata;

/// Ground speed derived from one image pair, in km/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedSample {
    pub kmps: f64,
}

/// Runs the full comparison pipeline over one ordered image pair.
///
/// `older` must have been captured before `newer`; elapsed time between them
/// comes from embedded capture timestamps, not file modification times, so
/// slow flushes on the capture device cannot skew the estimate.
pub fn estimate_pair(older: &Path, newer: &Path, params: &PipelineParams) -> Result<SpeedSample> {
    let elapsed = metadata::elapsed_seconds(older, newer)?;

    let older_image = load_grayscale(older)?;
    let newer_image = load_grayscale(newer)?;

    let older_features = features::extract_features(&older_image, params.max_features);
    let newer_features = features::extract_features(&newer_image, params.max_features);
    log::debug!(
        "extracted {} / {} features from the pair",
        older_features.len(),
        newer_features.len()
    );

    let matches = matcher::match_descriptors(&older_features, &newer_features);
    log::debug!("{} cross-checked matches", matches.len());

    let displacement_px = displacement::mean_displacement(
        &matches,
        &older_features,
        &newer_features,
        params.pair_sigma,
    )?;

    let kmps = speed::speed_kmps(displacement_px, params.gsd_cm_per_px, elapsed)?;
    Ok(SpeedSample { kmps })
}

/// Loads an image from disk as an 8-bit grayscale buffer.
fn load_grayscale(path: &Path) -> Result<GrayImage> {
    Ok(image::open(path)?.into_luma8())
}
