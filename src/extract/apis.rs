//! Lexical detection of extension API usage.
//!
//! This is a best-effort text scan, not a parser. A reference is one of the
//! configured root identifiers (`browser`, `chrome`) followed by one or more
//! `.segment`s and terminated by whitespace or `(`. There is no awareness of
//! strings, comments or scoping, so text like `mychrome.tabs.get(` or a
//! commented-out call still counts, and `chrome.tabs.get;` does not.
//!
//! A trailing listener suffix (`.addListener`) is stripped so that event
//! subscriptions are reported as the event itself.

use crate::config::ApisConfig;
use crate::error::{Error, Result};
use glob::Pattern;
use rayon::prelude::*;
use regex::Regex;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// An exclude glob, plus a directory pattern for pruning when it ends in `/**`
#[derive(Debug, Clone)]
struct Exclude {
    pattern: Pattern,
    dir: Option<Pattern>,
}

/// Scans example source trees for API references
#[derive(Debug, Clone)]
pub struct ApiScanner {
    reference: Regex,
    listener_suffix: String,
    excludes: Vec<Exclude>,
    descriptor: PathBuf,
}

impl ApiScanner {
    /// Build a scanner from config. `descriptor` is the package.json path
    /// relative to an example root; that file is never scanned.
    pub fn new(config: &ApisConfig, descriptor: impl Into<PathBuf>) -> Result<Self> {
        let roots: Vec<String> = config.roots.iter().map(|r| regex::escape(r)).collect();
        let source = format!(r"((?:{})(?:\.[A-Za-z0-9_$]+)+)[\s(]", roots.join("|"));
        let reference = Regex::new(&source)
            .map_err(|e| Error::config_validation(format!("invalid API roots: {}", e)))?;

        let mut excludes = Vec::new();
        for glob in &config.exclude {
            let dir = match glob.strip_suffix("/**") {
                Some(prefix) => Some(Pattern::new(prefix)?),
                None => None,
            };
            excludes.push(Exclude {
                pattern: Pattern::new(glob)?,
                dir,
            });
        }

        Ok(Self {
            reference,
            listener_suffix: config.listener_suffix.clone(),
            excludes,
            descriptor: descriptor.into(),
        })
    }

    /// Distinct API references in one chunk of source text
    pub fn scan_source(&self, source: &str) -> BTreeSet<String> {
        self.reference
            .captures_iter(source)
            .filter_map(|caps| caps.get(1))
            .map(|m| self.normalize(m.as_str()))
            .collect()
    }

    fn normalize(&self, chain: &str) -> String {
        if self.listener_suffix.is_empty() {
            return chain.to_string();
        }
        chain
            .strip_suffix(self.listener_suffix.as_str())
            .unwrap_or(chain)
            .to_string()
    }

    /// Files under `example_dir` that take part in the scan, sorted by path.
    /// Symlinks are followed; a dangling link or a link cycle is an error.
    pub fn source_files(&self, example_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        let walker = WalkDir::new(example_dir)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !self.prune(entry, example_dir));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(example_dir).unwrap_or(entry.path());
            if relative == self.descriptor.as_path() {
                continue;
            }
            if self.excludes.iter().any(|e| e.pattern.matches_path(relative)) {
                continue;
            }

            files.push(entry.into_path());
        }

        Ok(files)
    }

    /// Hidden entries (which covers the build output) and excluded directories
    fn prune(&self, entry: &DirEntry, root: &Path) -> bool {
        if entry.depth() == 0 {
            return false;
        }

        if entry.file_name().to_string_lossy().starts_with('.') {
            return true;
        }

        if entry.file_type().is_dir() {
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            return self
                .excludes
                .iter()
                .filter_map(|e| e.dir.as_ref())
                .any(|dir| dir.matches_path(relative));
        }

        false
    }

    /// Read one file and scan it. Non-UTF-8 bytes are replaced, not rejected.
    pub fn scan_file(&self, path: &Path) -> Result<BTreeSet<String>> {
        let bytes = std::fs::read(path).map_err(|source| Error::ReadSource {
            path: path.to_path_buf(),
            source,
        })?;
        let found = self.scan_source(&String::from_utf8_lossy(&bytes));
        debug!("Scanned {} ({} APIs)", path.display(), found.len());
        Ok(found)
    }

    /// Union of API references across every scanned file of an example
    pub fn scan_example(&self, example_dir: &Path) -> Result<BTreeSet<String>> {
        let files = self.source_files(example_dir)?;

        files
            .par_iter()
            .map(|path| self.scan_file(path))
            .try_reduce(BTreeSet::new, |mut all, found| {
                all.extend(found);
                Ok(all)
            })
    }
}
