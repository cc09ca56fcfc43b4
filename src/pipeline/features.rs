//! Keypoint detection and descriptor extraction for a single frame.

use image::GrayImage;
use imageproc::corners::{corners_fast9, Corner};
use nalgebra::Vector2;

use crate::algorithms::brief::{self, BinaryDescriptor};
use crate::algorithms::orientation;

/// Descriptor width used throughout the pipeline: 512 bits.
pub const DESCRIPTOR_SIZE: usize = 512 / u8::BITS as usize;

/// Feature object which holds a coordinate/pixel on a frame
/// together with a generic descriptor computed around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature<Descriptor> {
    pub keypoint: Vector2<u32>,
    pub descriptor: Descriptor,
}

/// Feature with the descriptor width the rest of the pipeline expects.
pub type SizedFeature = Feature<BinaryDescriptor<DESCRIPTOR_SIZE>>;

impl<A> Feature<A> {
    /// Uses FAST (Features from Accelerated Segment Test) as the keypoint
    /// detector, keeping at most `max_features` of the strongest responses.
    fn ranked_keypoints(image: &GrayImage, max_features: usize) -> Vec<Vector2<u32>> {
        const FAST_CORNERS_THRESHOLD: u8 = 35;

        let mut corners = corners_fast9(image, FAST_CORNERS_THRESHOLD);
        // strongest corners first; the sort is stable, so ties keep detector
        // order and extraction stays deterministic for identical input
        corners.sort_by(|a, b| b.score.total_cmp(&a.score));
        corners.truncate(max_features);

        corners
            .into_iter()
            .map(|Corner { x, y, .. }| Vector2::new(x, y))
            .collect()
    }
}

impl<const N: usize> Feature<BinaryDescriptor<N>> {
    /// Detects FAST keypoints and computes an oriented BRIEF (Binary Robust
    /// Independent Elementary Features) descriptor for each.
    ///
    /// Orientation comes from the intensity centroid of the unsmoothed patch;
    /// descriptors are sampled from a blurred copy of the image so they are
    /// not overly sensitive to high frequency noise.
    pub fn from_fast_and_brief(image: &GrayImage, max_features: usize) -> Vec<Self> {
        const GAUSSIAN_KERNEL_SIGMA: f32 = 2.0;

        let smoothed_image = imageproc::filter::gaussian_blur_f32(image, GAUSSIAN_KERNEL_SIGMA);

        Self::ranked_keypoints(image, max_features)
            .into_iter()
            .map(|keypoint| {
                let angle = orientation::intensity_centroid_angle(image, keypoint.x, keypoint.y);
                Feature {
                    descriptor: brief::compute_descriptor(
                        keypoint.x,
                        keypoint.y,
                        angle,
                        &smoothed_image,
                    ),
                    keypoint,
                }
            })
            .collect()
    }
}

/// Extracts the pipeline-sized feature set of one frame.
pub fn extract_features(image: &GrayImage, max_features: usize) -> Vec<SizedFeature> {
    Feature::from_fast_and_brief(image, max_features)
}
