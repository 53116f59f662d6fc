//! examples-meta - Aggregate searchable metadata from extension examples
//!
//! Builds every example under an examples directory, then reads each one's
//! package.json, README frontmatter and built manifest, scans its sources for
//! `browser.*` / `chrome.*` API usage, and writes a single JSON document with
//! one record per example plus sorted global indexes of packages,
//! permissions and APIs.

pub mod aggregate;
pub mod build;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod output;

// Re-export main types
pub use aggregate::{Accumulator, Aggregator, ExampleMetadata, ExampleOutcome, RunSummary};
pub use config::Config;
pub use error::{Error, FrontmatterError, Result};
pub use extract::{ApiScanner, ArtifactKind, ArtifactLoader, Frontmatter, MissingArtifact};
pub use output::{ExampleRecord, MetadataDocument};
