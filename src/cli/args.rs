//! CLI argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Aggregate searchable metadata from browser-extension examples
#[derive(Parser, Debug)]
#[command(name = "examples-meta")]
#[command(about = "Aggregate searchable metadata from browser-extension examples")]
#[command(version)]
pub struct Args {
    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// The subcommand to run; `generate` with defaults when none is given
    pub fn command(self) -> Command {
        self.command.unwrap_or(Command::Generate {
            examples: None,
            output: None,
            config: None,
            skip_build: false,
        })
    }
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Build every example and write the metadata document
    Generate {
        /// Directory containing one subdirectory per example
        #[arg(short, long)]
        examples: Option<PathBuf>,

        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Use existing build output instead of running the build
        #[arg(long)]
        skip_build: bool,
    },

    /// Extract metadata from existing build output without writing anything
    Check {
        /// Directory containing one subdirectory per example
        #[arg(short, long)]
        examples: Option<PathBuf>,

        /// Config file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show version information
    Version,
}
