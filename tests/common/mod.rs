//! Shared test fixtures: synthetic ground scenes, JPEG files with embedded
//! capture times and an in-process camera that never touches hardware.
#![allow(dead_code)]

use std::fs;
use std::io::Cursor;
use std::path::Path;

use anyhow::Result;
use chrono::{Duration, NaiveDate};
use image::{GrayImage, ImageOutputFormat, Luma};
use rand::{rngs::StdRng, Rng, SeedableRng};

use groundspeed::capture::Camera;

/// Canvas size of the synthetic scenes.
pub const SCENE_WIDTH: u32 = 320;
pub const SCENE_HEIGHT: u32 = 240;

/// Paints a field of distinct bright rectangles on a dark background.
///
/// Rectangle sizes, positions and intensities vary cell by cell, so local
/// patches stay distinguishable and descriptor matching between two views
/// of the scene is unambiguous. Every rectangle corner is a strong FAST
/// response.
pub fn blob_scene(seed: u64) -> GrayImage {
    const CELL: u32 = 48;

    let mut rng = StdRng::seed_from_u64(seed);
    let mut image = GrayImage::from_pixel(SCENE_WIDTH, SCENE_HEIGHT, Luma([15u8]));

    for cell_y in 0..SCENE_HEIGHT / CELL {
        for cell_x in 0..SCENE_WIDTH / CELL {
            let width = rng.gen_range(10..24);
            let height = rng.gen_range(10..24);
            let x0 = cell_x * CELL + rng.gen_range(4..20);
            let y0 = cell_y * CELL + rng.gen_range(4..20);
            let level: u8 = rng.gen_range(90..=255);

            for y in y0..y0 + height {
                for x in x0..x0 + width {
                    image.put_pixel(x, y, Luma([level]));
                }
            }
        }
    }

    image
}

/// Returns `scene` cyclically shifted by `(dx, dy)`.
///
/// The toroidal roll keeps every ground patch present in both views, which
/// makes the true displacement exactly `hypot(dx, dy)` for all matched
/// features away from the wrap seam.
pub fn rolled(scene: &GrayImage, dx: u32, dy: u32) -> GrayImage {
    let (width, height) = scene.dimensions();
    let mut out = GrayImage::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let src_x = (x + width - dx % width) % width;
            let src_y = (y + height - dy % height) % height;
            out.put_pixel(x, y, *scene.get_pixel(src_x, src_y));
        }
    }

    out
}

/// Encodes `image` as a plain JPEG with no metadata segment.
pub fn write_plain_jpeg(path: &Path, image: &GrayImage) -> Result<()> {
    fs::write(path, encode_jpeg(image)?)?;
    Ok(())
}

/// Encodes `image` as a JPEG carrying `datetime` as its `DateTimeOriginal`.
///
/// `datetime` must be at least five characters long so the value lands in
/// the offset area of its metadata entry.
pub fn write_jpeg_with_datetime(path: &Path, image: &GrayImage, datetime: &str) -> Result<()> {
    let jpeg = encode_jpeg(image)?;

    // splice the APP1 segment in right after the SOI marker
    let app1 = exif_app1_segment(datetime.as_bytes());
    let mut bytes = Vec::with_capacity(jpeg.len() + app1.len());
    bytes.extend_from_slice(&jpeg[..2]);
    bytes.extend_from_slice(&app1);
    bytes.extend_from_slice(&jpeg[2..]);

    fs::write(path, bytes)?;
    Ok(())
}

fn encode_jpeg(image: &GrayImage) -> Result<Vec<u8>> {
    let mut cursor = Cursor::new(Vec::new());
    image.write_to(&mut cursor, ImageOutputFormat::Jpeg(100))?;
    Ok(cursor.into_inner())
}

/// Minimal EXIF APP1 segment: IFD0 pointing at an Exif IFD holding a single
/// ASCII `DateTimeOriginal` entry.
fn exif_app1_segment(datetime: &[u8]) -> Vec<u8> {
    const IFD_SIZE: u32 = 2 + 12 + 4; // entry count, one entry, next-IFD link

    let mut value = datetime.to_vec();
    value.push(0); // ASCII values are NUL terminated

    // TIFF body, little endian, IFD0 straight after the header
    let ifd0_offset: u32 = 8;
    let exif_ifd_offset = ifd0_offset + IFD_SIZE;
    let value_offset = exif_ifd_offset + IFD_SIZE;

    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&ifd0_offset.to_le_bytes());

    // IFD0: a single pointer to the Exif IFD
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x8769u16.to_le_bytes()); // ExifIFDPointer
    tiff.extend_from_slice(&4u16.to_le_bytes()); // LONG
    tiff.extend_from_slice(&1u32.to_le_bytes());
    tiff.extend_from_slice(&exif_ifd_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: DateTimeOriginal, value stored past the IFD
    tiff.extend_from_slice(&1u16.to_le_bytes());
    tiff.extend_from_slice(&0x9003u16.to_le_bytes()); // DateTimeOriginal
    tiff.extend_from_slice(&2u16.to_le_bytes()); // ASCII
    tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
    tiff.extend_from_slice(&value_offset.to_le_bytes());
    tiff.extend_from_slice(&0u32.to_le_bytes());

    tiff.extend_from_slice(&value);

    let mut segment = vec![0xFF, 0xE1];
    let payload_len = 2 + 6 + tiff.len(); // length field, Exif header, body
    segment.extend_from_slice(&(payload_len as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

/// EXIF-format timestamp `offset_secs` after a fixed epoch.
pub fn fake_datetime(offset_secs: i64) -> String {
    let base = NaiveDate::from_ymd_opt(2023, 1, 17)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap();
    (base + Duration::seconds(offset_secs))
        .format("%Y:%m:%d %H:%M:%S")
        .to_string()
}

/// Camera that renders frame `i` as the base scene rolled by `i * (dx, dy)`,
/// with capture times `interval_secs` apart.
///
/// Mimics a nadir view of ground sliding under the platform at a constant
/// rate: consecutive frames are displaced by exactly `hypot(dx, dy)` pixels.
pub struct RollingSceneCamera {
    scene: GrayImage,
    dx: u32,
    dy: u32,
    interval_secs: i64,
    frame: u32,
}

impl RollingSceneCamera {
    pub fn new(seed: u64, dx: u32, dy: u32, interval_secs: i64) -> Self {
        Self {
            scene: blob_scene(seed),
            dx,
            dy,
            interval_secs,
            frame: 0,
        }
    }
}

impl Camera for RollingSceneCamera {
    fn capture(&mut self, dest: &Path) -> Result<()> {
        let shifted = rolled(&self.scene, self.frame * self.dx, self.frame * self.dy);
        let datetime = fake_datetime(self.frame as i64 * self.interval_secs);
        write_jpeg_with_datetime(dest, &shifted, &datetime)?;
        self.frame += 1;
        Ok(())
    }
}
