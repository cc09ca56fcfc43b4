//! Run-control configuration.
//!
//! Every knob has a deployment default baked in, so the binary runs with no
//! configuration at all. A TOML file can override any subset, and the
//! command line applies a few narrow overrides on top of that.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::capture::OUTPUT_PLACEHOLDER;

const DEFAULT_DURATION_MINS: f64 = 9.25;
const DEFAULT_IMAGE_DIR: &str = ".";
const DEFAULT_RESULT_PATH: &str = "result.txt";
const DEFAULT_FINAL_SIGMA: f64 = 1.0;

const DEFAULT_MAX_FEATURES: usize = 1000;
const DEFAULT_GSD_CM_PER_PX: f64 = 12648.0;
const DEFAULT_PAIR_SIGMA: f64 = 2.0;

/// Parameters of the per-pair estimation pipeline.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PipelineParams {
    /// Upper bound on keypoints kept per image.
    pub max_features: usize,
    /// Ground-sample distance of the deployment, in centimeters per pixel.
    pub gsd_cm_per_px: f64,
    /// Deviation multiplier for the per-pair displacement trim.
    pub pair_sigma: f64,
}

impl Default for PipelineParams {
    fn default() -> Self {
        Self {
            max_features: DEFAULT_MAX_FEATURES,
            gsd_cm_per_px: DEFAULT_GSD_CM_PER_PX,
            pair_sigma: DEFAULT_PAIR_SIGMA,
        }
    }
}

/// Full configuration of one measurement session.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RunConfig {
    /// Wall-clock budget for the whole session, in minutes.
    pub duration_mins: f64,
    /// Directory receiving the numbered captures.
    pub image_dir: PathBuf,
    /// Result file overwritten with the current best estimate.
    pub result_path: PathBuf,
    /// argv of the external capture command; `{output}` receives the
    /// destination path.
    pub capture_command: Vec<String>,
    /// Deviation multiplier for the final cross-pair trim.
    pub final_sigma: f64,
    pub pipeline: PipelineParams,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            duration_mins: DEFAULT_DURATION_MINS,
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            result_path: PathBuf::from(DEFAULT_RESULT_PATH),
            capture_command: default_capture_command(),
            final_sigma: DEFAULT_FINAL_SIGMA,
            pipeline: PipelineParams::default(),
        }
    }
}

impl RunConfig {
    /// Loads the configuration, merging an optional TOML file over the
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            None => Ok(Self::default()),
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                Self::parse(&raw)
                    .with_context(|| format!("parsing config file {}", path.display()))
            }
        }
    }

    /// Parses a TOML document; keys left out keep their defaults.
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }
}

/// Capture command matching the reference deployment: a full-resolution
/// still, no preview window, capture metadata written by the tool itself.
fn default_capture_command() -> Vec<String> {
    [
        "rpicam-still",
        "--nopreview",
        "--immediate",
        "--width",
        "4056",
        "--height",
        "3040",
        "--output",
        OUTPUT_PLACEHOLDER,
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
