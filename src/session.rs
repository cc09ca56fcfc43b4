//! The time-bounded measurement loop.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::capture::Camera;
use crate::config::RunConfig;
use crate::pipeline::{self, accumulator::SpeedAccumulator};
use crate::report;

/// Outcome of a finished session.
#[derive(Clone, Copy, Debug)]
pub struct SessionSummary {
    /// Loop iterations started before the deadline.
    pub pairs_attempted: u64,
    /// Iterations that produced a speed sample.
    pub pairs_estimated: u64,
    /// The final persisted estimate; absent when no pair ever succeeded.
    pub estimate_kmps: Option<f64>,
}

/// One unattended measurement run: capture, compare, accumulate, persist.
///
/// Strictly single-threaded. The camera, the accumulator and the image
/// window all belong to the loop; nothing here is shared or locked. The
/// wall-clock deadline is consulted once per iteration and never interrupts
/// an iteration already in flight, so the configured budget must leave
/// headroom for one full capture-and-compare cycle.
pub struct Session<C> {
    config: RunConfig,
    camera: C,
    speeds: SpeedAccumulator,
}

impl<C: Camera> Session<C> {
    pub fn new(config: RunConfig, camera: C) -> Self {
        Self {
            config,
            camera,
            speeds: SpeedAccumulator::new(),
        }
    }

    /// Runs until the configured deadline, then persists the final estimate.
    ///
    /// Per-pair pipeline failures are logged and skipped; the loop stays
    /// alive for the next frame. Only environment failures that no later
    /// iteration could repair (the image directory cannot be created, the
    /// very first capture fails, the result file cannot be written) abort
    /// the session.
    pub fn run(mut self) -> Result<SessionSummary> {
        // a negative budget behaves like zero rather than panicking
        let budget = Duration::from_secs_f64((self.config.duration_mins * 60.0).max(0.0));
        let deadline = Instant::now() + budget;

        fs::create_dir_all(&self.config.image_dir).with_context(|| {
            format!("creating image directory {}", self.config.image_dir.display())
        })?;

        // Without the seed frame no pair can ever form, so this one capture
        // is allowed to abort; every later failure is recoverable.
        let seed = self.image_path(0);
        self.camera
            .capture(&seed)
            .context("initial capture failed")?;

        let mut next: u64 = 1;
        let mut attempted: u64 = 0;

        while Instant::now() < deadline {
            attempted += 1;

            let newer = self.image_path(next);
            if let Err(err) = self.camera.capture(&newer) {
                // frame `next` stays the target, so the pair is retried
                // rather than built around a hole in the sequence
                log::warn!("capture of frame {next} failed, retrying: {err:#}");
                continue;
            }

            let older = self.image_path(next - 1);

            match pipeline::estimate_pair(&older, &newer, &self.config.pipeline) {
                Ok(sample) => {
                    self.speeds.push(sample);
                    if let Some(running) = self.speeds.current_mean() {
                        log::info!(
                            "pair {next}: {:.4} km/s, running mean {running:.4} km/s",
                            sample.kmps
                        );
                        if let Err(err) = report::write_estimate(&self.config.result_path, running)
                        {
                            // keep measuring; the final write gets another chance
                            log::warn!("persisting the running estimate failed: {err}");
                        }
                    }
                }
                Err(err) => log::warn!("pair {next} skipped: {err}"),
            }

            // the older frame can no longer serve a future pair
            self.remove_stale(&older);
            next += 1;
        }

        let estimate = self.speeds.final_mean(self.config.final_sigma);
        match estimate {
            Some(kmps) => {
                report::write_estimate(&self.config.result_path, kmps).with_context(|| {
                    format!(
                        "writing the final estimate to {}",
                        self.config.result_path.display()
                    )
                })?;
                log::info!(
                    "final estimate {kmps:.4} km/s from {} of {attempted} pairs",
                    self.speeds.len()
                );
            }
            None => log::warn!("no pair produced an estimate; result file left untouched"),
        }

        Ok(SessionSummary {
            pairs_attempted: attempted,
            pairs_estimated: self.speeds.len() as u64,
            estimate_kmps: estimate,
        })
    }

    fn image_path(&self, index: u64) -> PathBuf {
        self.config.image_dir.join(format!("image{index}.jpg"))
    }

    /// Best-effort removal of a consumed frame. A frame that was never
    /// written (its capture failed) is not an error here.
    fn remove_stale(&self, path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => log::warn!("could not remove stale frame {}: {err}", path.display()),
        }
    }
}
