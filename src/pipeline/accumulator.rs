//! Running collection of per-pair speed estimates.

use crate::algorithms::stats;
use crate::pipeline::SpeedSample;

/// Append-only list of per-pair speed samples with robust averaging.
///
/// The running mean backs the estimate persisted after every successful
/// pair; the final mean is computed once at shutdown, after a cross-pair
/// outlier trim that discards pairs skewed by scene pathologies the per-pair
/// trim could not see (a frame full of moving cloud, for instance).
#[derive(Debug, Default)]
pub struct SpeedAccumulator {
    samples: Vec<f64>,
}

impl SpeedAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one per-pair estimate. Samples are never revised afterwards.
    pub fn push(&mut self, sample: SpeedSample) {
        self.samples.push(sample.kmps);
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Plain mean of every sample so far; `None` before the first one.
    pub fn current_mean(&self) -> Option<f64> {
        stats::mean(&self.samples)
    }

    /// Robust mean across the whole run.
    ///
    /// The sample list is trimmed with the `sigma` deviation multiplier
    /// first. When the trim leaves nothing, the unfiltered mean stands in,
    /// so a session that produced any estimate at all always reports one.
    pub fn final_mean(&self, sigma: f64) -> Option<f64> {
        let kept = stats::reject_outliers(&self.samples, sigma);
        if kept.is_empty() {
            self.current_mean()
        } else {
            stats::mean(&kept)
        }
    }
}
