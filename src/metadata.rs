//! Capture-time extraction from embedded image metadata.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use chrono::NaiveDateTime;
use exif::{In, Tag, Value};

use crate::error::{PipelineError, Result};

/// Timestamp layout of the EXIF `DateTimeOriginal` field: second resolution,
/// no timezone.
const EXIF_DATETIME_FORMAT: &str = "%Y:%m:%d %H:%M:%S";

/// Reads the capture time embedded in the image at `path`.
///
/// Only the metadata segment is parsed; pixel data stays untouched. Any way
/// the timestamp can be absent (no metadata segment, no `DateTimeOriginal`
/// field, a non-ASCII field, an unparseable value) is reported as
/// [`PipelineError::Metadata`] naming the offending file.
pub fn capture_time(path: &Path) -> Result<NaiveDateTime> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let exif = exif::Reader::new()
        .read_from_container(&mut reader)
        .map_err(|e| PipelineError::Metadata(format!("{}: {e}", path.display())))?;

    let field = exif
        .get_field(Tag::DateTimeOriginal, In::PRIMARY)
        .ok_or_else(|| {
            PipelineError::Metadata(format!("{}: no DateTimeOriginal field", path.display()))
        })?;

    let raw = match &field.value {
        Value::Ascii(lines) if !lines.is_empty() => String::from_utf8_lossy(&lines[0]),
        _ => {
            return Err(PipelineError::Metadata(format!(
                "{}: DateTimeOriginal is not an ASCII value",
                path.display()
            )))
        }
    };

    // ASCII values carry a trailing NUL; some writers pad further
    let trimmed = raw.trim_end_matches('\0').trim();
    NaiveDateTime::parse_from_str(trimmed, EXIF_DATETIME_FORMAT)
        .map_err(|e| PipelineError::Metadata(format!("{}: bad timestamp {trimmed:?}: {e}", path.display())))
}

/// Signed elapsed time between the capture instants of two images, in whole
/// seconds.
///
/// Negative or zero when the pair is mis-ordered or captured too close
/// together for second-resolution timestamps to separate; the speed stage
/// rejects such values rather than hiding them here.
pub fn elapsed_seconds(older: &Path, newer: &Path) -> Result<f64> {
    let first = capture_time(older)?;
    let second = capture_time(newer)?;
    Ok((second - first).num_seconds() as f64)
}
