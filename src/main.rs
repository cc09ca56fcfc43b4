//! Unattended ground-speed measurement binary.
//!
//! Captures numbered stills with the configured camera command for the
//! whole wall-clock budget, estimates the ground speed from every
//! consecutive pair and leaves the best estimate in a one-line result file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use groundspeed::capture::CommandCamera;
use groundspeed::config::RunConfig;
use groundspeed::session::Session;

/// Estimates orbital ground speed from sequential still captures.
#[derive(Debug, Parser)]
#[command(name = "groundspeed", version, about)]
struct Args {
    /// TOML configuration file; built-in defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory receiving the numbered captures.
    #[arg(long)]
    image_dir: Option<PathBuf>,

    /// Result file receiving the estimate.
    #[arg(long)]
    result: Option<PathBuf>,

    /// Wall-clock budget in minutes.
    #[arg(long)]
    duration_mins: Option<f64>,

    /// Ground-sample distance in centimeters per pixel.
    #[arg(long)]
    gsd_cm_per_px: Option<f64>,

    /// Upper bound on keypoints kept per image.
    #[arg(long)]
    max_features: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let mut config = RunConfig::load(args.config.as_deref())?;
    if let Some(dir) = args.image_dir {
        config.image_dir = dir;
    }
    if let Some(path) = args.result {
        config.result_path = path;
    }
    if let Some(mins) = args.duration_mins {
        config.duration_mins = mins;
    }
    if let Some(gsd) = args.gsd_cm_per_px {
        config.pipeline.gsd_cm_per_px = gsd;
    }
    if let Some(max) = args.max_features {
        config.pipeline.max_features = max;
    }

    log::info!(
        "starting session: {} min budget, GSD {} cm/px, frames in {}",
        config.duration_mins,
        config.pipeline.gsd_cm_per_px,
        config.image_dir.display()
    );

    let camera = CommandCamera::new(&config.capture_command)?;
    let summary = Session::new(config, camera).run()?;

    log::info!(
        "session complete: {} of {} iterations produced estimates",
        summary.pairs_estimated,
        summary.pairs_attempted
    );
    if let Some(kmps) = summary.estimate_kmps {
        log::info!("best estimate {kmps:.4} km/s");
    }

    Ok(())
}
