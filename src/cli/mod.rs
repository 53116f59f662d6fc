//! CLI module for examples-meta

mod args;

pub use args::{Args, Command};

use crate::aggregate::{Aggregator, RunSummary};
use crate::build::run_build;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the global tracing subscriber. `RUST_LOG` overrides the level.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .compact()
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    let verbose = args.verbose;

    match args.command() {
        Command::Generate {
            examples,
            output,
            config,
            skip_build,
        } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(examples, output, skip_build);
            log_config(&cfg);

            if cfg.build.enabled {
                run_build(&cfg.build.command, &build_dir(&cfg.paths.examples_dir), verbose)?;
            }

            let summary = Aggregator::new(cfg.clone())?.run()?;
            summary.document.write(&cfg.paths.output)?;

            println!("{}", summary_line(&summary));
            println!(
                "Generated metadata for {} examples -> {}",
                summary.document.examples.len(),
                cfg.paths.output.display()
            );
            Ok(())
        }

        Command::Check { examples, config } => {
            let mut cfg = load_config(config.as_deref())?;
            cfg.merge_cli(examples, None, true);
            log_config(&cfg);

            let summary = Aggregator::new(cfg)?.run()?;
            println!("{}", summary_line(&summary));
            Ok(())
        }

        Command::Version => {
            println!("examples-meta {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Explicit config path must load; the default file is optional
fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    }
}

fn log_config(cfg: &Config) {
    debug!("Examples: {}", cfg.paths.examples_dir.display());
    debug!("Output: {}", cfg.paths.output.display());
    debug!("Build: {}", if cfg.build.enabled { cfg.build.command.join(" ") } else { "skipped".to_string() });
    debug!("API roots: {:?}", cfg.apis.roots);
    debug!("Ignored packages: {:?} (prefixes {:?})", cfg.packages.ignore, cfg.packages.ignore_prefixes);
}

/// The build runs from the directory that holds the examples directory
fn build_dir(examples_dir: &Path) -> PathBuf {
    examples_dir
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

fn summary_line(summary: &RunSummary) -> String {
    let doc = &summary.document;
    format!(
        "Processed {} examples ({} skipped): {} packages, {} permissions, {} APIs",
        doc.examples.len(),
        summary.skipped.len(),
        doc.all_packages.len(),
        doc.all_permissions.len(),
        doc.all_apis.len()
    )
}
