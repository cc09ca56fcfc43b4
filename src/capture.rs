//! Still-capture collaborators.
//!
//! The measurement loop needs exactly one thing from a camera: write the
//! next still to a path the loop names. [`CommandCamera`] fulfils that by
//! invoking the platform's capture utility; tests plug in their own
//! [`Camera`] implementations and never touch hardware.

use std::path::Path;
use std::process::Command;

use anyhow::{bail, Context, Result};

/// Placeholder in a capture command that receives the destination path.
pub const OUTPUT_PLACEHOLDER: &str = "{output}";

/// A device that can produce one still image on demand.
pub trait Camera {
    /// Captures a single image into `dest`. On success the file exists and
    /// carries capture-time metadata.
    fn capture(&mut self, dest: &Path) -> Result<()>;
}

/// Camera backed by an external capture command such as `rpicam-still`.
#[derive(Clone, Debug)]
pub struct CommandCamera {
    program: String,
    args: Vec<String>,
}

impl CommandCamera {
    /// Builds a camera from an argv-style command line. Every `{output}`
    /// occurrence is substituted with the destination path at capture time;
    /// a command without the placeholder gets the path appended instead.
    pub fn new(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .context("capture command is empty")?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    fn argv(&self, dest: &Path) -> Vec<String> {
        let dest = dest.to_string_lossy();
        let mut argv = Vec::with_capacity(self.args.len() + 1);
        let mut substituted = false;

        for arg in &self.args {
            if arg.contains(OUTPUT_PLACEHOLDER) {
                argv.push(arg.replace(OUTPUT_PLACEHOLDER, &dest));
                substituted = true;
            } else {
                argv.push(arg.clone());
            }
        }
        if !substituted {
            argv.push(dest.into_owned());
        }

        argv
    }
}

impl Camera for CommandCamera {
    fn capture(&mut self, dest: &Path) -> Result<()> {
        let argv = self.argv(dest);
        log::debug!("capturing into {} via `{}`", dest.display(), self.program);

        let output = Command::new(&self.program)
            .args(&argv)
            .output()
            .with_context(|| format!("failed to run capture command `{}`", self.program))?;

        if !output.status.success() {
            bail!(
                "capture command `{}` exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        Ok(())
    }
}
