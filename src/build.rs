//! Runs the external build that produces each example's manifest.

use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tracing::{error, info};

/// Run `command` in `workdir`.
///
/// In verbose mode the command's output goes straight to the terminal;
/// otherwise a spinner is shown and the captured stderr is logged on failure.
pub fn run_build(command: &[String], workdir: &Path, verbose: bool) -> Result<()> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| Error::config_validation("build.command must not be empty"))?;
    let command_line = command.join(" ");

    info!("Building examples: {}", command_line);

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(workdir);

    let status = if verbose {
        cmd.status()?
    } else {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(format!("Running {}", command_line));
        spinner.enable_steady_tick(Duration::from_millis(100));

        let output = cmd.stdin(Stdio::null()).output();
        spinner.finish_and_clear();
        let output = output?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            for line in stderr.lines().rev().take(20).collect::<Vec<_>>().into_iter().rev() {
                error!("{}", line);
            }
        }
        output.status
    };

    if !status.success() {
        return Err(Error::Build {
            command: command_line,
            status,
        });
    }

    Ok(())
}
