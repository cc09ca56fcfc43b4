//! Collection of general algorithms shared by the estimation pipeline:
//! descriptor sampling, keypoint orientation and sample statistics.

pub mod brief;
pub mod orientation;
pub mod stats;
