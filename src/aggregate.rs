// Aggregation pipeline
//
// Examples are processed one at a time in discovery order. Each produces an
// ExampleMetadata (or a skip), and those are folded into an Accumulator that
// owns the record list and the three global sets.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::extract::{
    permissions, ApiScanner, ArtifactLoader, Frontmatter, LoadOutcome, MissingArtifact,
    PackageFilter,
};
use crate::output::{ExampleRecord, MetadataDocument};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use walkdir::WalkDir;

/// Everything extracted from one example
#[derive(Debug, Clone)]
pub struct ExampleMetadata {
    /// Directory name, used for the record URL
    pub slug: String,
    pub frontmatter: Frontmatter,
    pub packages: Vec<String>,
    pub permissions: Vec<String>,
    pub apis: BTreeSet<String>,
}

/// Result of processing one example directory
#[derive(Debug, Clone)]
pub enum ExampleOutcome {
    Processed(ExampleMetadata),
    Skipped(MissingArtifact),
}

/// Running state of a metadata run
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    document: MetadataDocument,
    skipped: Vec<MissingArtifact>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one example into the accumulator. Global sets only ever grow.
    pub fn absorb(mut self, outcome: ExampleOutcome, repository_url: &str) -> Self {
        match outcome {
            ExampleOutcome::Processed(meta) => {
                let doc = &mut self.document;
                doc.all_packages.extend(meta.packages.iter().cloned());
                doc.all_permissions.extend(meta.permissions.iter().cloned());
                doc.all_apis.extend(meta.apis.iter().cloned());

                let apis: Vec<String> = meta.apis.into_iter().collect();
                let url = example_url(repository_url, &meta.slug);
                doc.examples.push(ExampleRecord::new(
                    meta.frontmatter,
                    url,
                    &meta.packages,
                    &meta.permissions,
                    &apis,
                ));
            }
            ExampleOutcome::Skipped(missing) => self.skipped.push(missing),
        }
        self
    }

    pub fn finish(self) -> RunSummary {
        RunSummary {
            document: self.document,
            skipped: self.skipped,
        }
    }
}

/// Final output of a run
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub document: MetadataDocument,
    pub skipped: Vec<MissingArtifact>,
}

/// Link to an example's source
pub fn example_url(repository_url: &str, slug: &str) -> String {
    format!("{}/{}", repository_url.trim_end_matches('/'), slug)
}

/// Orchestrates loading and extraction over every example directory
pub struct Aggregator {
    config: Config,
    loader: ArtifactLoader,
    packages: PackageFilter,
    scanner: ApiScanner,
}

impl Aggregator {
    /// Create a new aggregator with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let loader = ArtifactLoader::new(&config.paths);
        let packages = PackageFilter::new(&config.packages);
        let scanner = ApiScanner::new(&config.apis, config.paths.descriptor.clone())?;

        Ok(Self {
            config,
            loader,
            packages,
            scanner,
        })
    }

    /// Immediate subdirectories of the examples dir, sorted by name
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        let root = &self.config.paths.examples_dir;
        if !root.is_dir() {
            return Err(Error::PathNotFound(root.clone()));
        }

        let mut dirs = Vec::new();
        for entry in WalkDir::new(root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_dir() {
                dirs.push(entry.into_path());
            }
        }

        Ok(dirs)
    }

    /// Load and extract a single example
    pub fn process_example(&self, example_dir: &Path) -> Result<ExampleOutcome> {
        let artifacts = match self.loader.load(example_dir)? {
            LoadOutcome::Loaded(artifacts) => artifacts,
            LoadOutcome::Missing(missing) => return Ok(ExampleOutcome::Skipped(missing)),
        };

        let slug = example_dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(ExampleOutcome::Processed(ExampleMetadata {
            slug,
            packages: self.packages.filter(&artifacts.descriptor),
            permissions: permissions(&artifacts.manifest),
            apis: self.scanner.scan_example(example_dir)?,
            frontmatter: artifacts.frontmatter,
        }))
    }

    /// Process every discovered example in order and build the document
    pub fn run(&self) -> Result<RunSummary> {
        let dirs = self.discover()?;
        let repository_url = self.config.site.repository_url.as_str();

        let mut acc = Accumulator::new();
        for dir in &dirs {
            info!("Processing {}", dir.display());
            let outcome = self.process_example(dir)?;
            if let ExampleOutcome::Skipped(missing) = &outcome {
                warn!(
                    "Skipping {}: {} not found at {}",
                    dir.display(),
                    missing.kind,
                    missing.path.display()
                );
            }
            acc = acc.absorb(outcome, repository_url);
        }

        Ok(acc.finish())
    }
}
