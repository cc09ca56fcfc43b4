//! Pixel displacement to ground-speed conversion.

use crate::error::PipelineError;

/// Centimeters per kilometer; the ground-sample distance is in cm/pixel.
const CM_PER_KM: f64 = 100_000.0;

/// Converts a mean pixel displacement into a ground speed in km/s.
///
/// `gsd_cm_per_px` is the ground distance one pixel covers at the deployed
/// altitude and sensor geometry. Fails with [`PipelineError::InvalidTiming`]
/// when `elapsed_secs` is not positive, which happens when two captures
/// carry identical or inverted second-resolution timestamps.
pub fn speed_kmps(
    displacement_px: f64,
    gsd_cm_per_px: f64,
    elapsed_secs: f64,
) -> Result<f64, PipelineError> {
    if elapsed_secs <= 0.0 {
        return Err(PipelineError::InvalidTiming(elapsed_secs));
    }

    let distance_km = displacement_px * gsd_cm_per_px / CM_PER_KM;
    Ok(distance_km / elapsed_secs)
}
