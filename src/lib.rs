//! Orbital ground-speed estimation from sequential nadir photographs.
//!
//! The crate measures how fast an imaging platform travels over the ground
//! by comparing pairs of consecutive stills: FAST keypoints with oriented
//! BRIEF descriptors are extracted from both frames, matched under a mutual
//! nearest-neighbour cross check, reduced to a robust mean pixel
//! displacement, and converted to km/s through the deployment's
//! ground-sample distance and the capture interval embedded in the image
//! metadata.
//!
//! [`Session`] wraps that pipeline in an unattended, wall-clock-bounded
//! capture loop which keeps a rolling two-image window on disk and persists
//! its best running estimate to a one-line result file after every pair.
//!
//! ## Example
//!
//! Comparing two already-captured frames:
//!
//! ```no_run
//! use std::path::Path;
//!
//! use groundspeed::config::PipelineParams;
//! use groundspeed::pipeline::{self, accumulator::SpeedAccumulator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let params = PipelineParams::default();
//! let mut speeds = SpeedAccumulator::new();
//!
//! let sample = pipeline::estimate_pair(
//!     Path::new("image0.jpg"),
//!     Path::new("image1.jpg"),
//!     &params,
//! )?;
//! speeds.push(sample);
//!
//! if let Some(kmps) = speeds.current_mean() {
//!     println!("{kmps:.4} km/s");
//! }
//! # Ok(())
//! # }
//! ```

pub mod algorithms;
pub mod capture;
pub mod config;
pub mod metadata;
pub mod pipeline;
pub mod report;
pub mod session;

pub use capture::{Camera, CommandCamera};
pub use config::{PipelineParams, RunConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{accumulator::SpeedAccumulator, estimate_pair, SpeedSample};
pub use session::{Session, SessionSummary};

mod error {
    use thiserror::Error;

    /// Failure modes of a single image pair's pipeline.
    ///
    /// Every variant is recoverable at the iteration boundary: the session
    /// logs it, skips the pair and keeps the loop alive with the newer
    /// image as the next comparison base.
    #[derive(Error, Debug)]
    pub enum PipelineError {
        /// The embedded capture timestamp is missing or unreadable.
        #[error("capture timestamp unavailable: {0}")]
        Metadata(String),

        /// The matcher produced no correspondences for the pair.
        #[error("no descriptor matches between the image pair")]
        NoMatches,

        /// The pair's elapsed capture time is zero or negative.
        #[error("non-positive elapsed time between captures: {0} s")]
        InvalidTiming(f64),

        /// No displacement statistic could be formed from the matches.
        ///
        /// The unfiltered-mean fallback normally guards this path; the
        /// variant stays so the aggregation step can never divide by zero
        /// even if that guard moves.
        #[error("displacement sample is empty")]
        DegenerateAggregate,

        /// An image failed to open or decode.
        #[error("image error: {0}")]
        Image(#[from] image::ImageError),

        /// Filesystem trouble underneath one of the collaborators.
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),
    }

    /// Result type for pipeline operations.
    pub type Result<T> = std::result::Result<T, PipelineError>;
}
