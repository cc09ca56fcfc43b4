//! Keypoint orientation from the intensity centroid of the surrounding patch.

use image::GrayImage;

/// Radius of the circular patch used for the centroid moments.
const PATCH_RADIUS: i32 = 7;

/// Orientation of the patch around `(x, y)`, in radians.
///
/// Computes the first-order image moments over a circular patch and returns
/// the angle of the vector from the patch center to its intensity centroid.
/// Pixels outside the image are skipped, so keypoints near the border still
/// receive a usable (if less stable) angle.
pub fn intensity_centroid_angle(image: &GrayImage, x: u32, y: u32) -> f32 {
    let (width, height) = image.dimensions();
    let mut m10 = 0.0f32;
    let mut m01 = 0.0f32;

    for dy in -PATCH_RADIUS..=PATCH_RADIUS {
        for dx in -PATCH_RADIUS..=PATCH_RADIUS {
            if dx * dx + dy * dy > PATCH_RADIUS * PATCH_RADIUS {
                continue;
            }
            let px = x as i32 + dx;
            let py = y as i32 + dy;
            if px < 0 || py < 0 || px >= width as i32 || py >= height as i32 {
                continue;
            }
            let intensity = image.get_pixel(px as u32, py as u32).0[0] as f32;
            m10 += dx as f32 * intensity;
            m01 += dy as f32 * intensity;
        }
    }

    m01.atan2(m10)
}
