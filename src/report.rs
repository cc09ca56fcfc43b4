//! Result-file persistence.

use std::fs;
use std::io;
use std::path::Path;

/// Writes the estimate as the result file's entire content, e.g. `7.6612 km/s`.
///
/// The file is replaced wholesale on every call, so only the latest estimate
/// is ever on disk and a longer previous value can never leave stale bytes
/// behind.
pub fn write_estimate(path: &Path, kmps: f64) -> io::Result<()> {
    fs::write(path, format_estimate(kmps))
}

/// Fixed output layout: four fractional digits and the unit suffix.
pub fn format_estimate(kmps: f64) -> String {
    format!("{kmps:.4} km/s")
}
