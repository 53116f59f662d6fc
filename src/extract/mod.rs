// Per-example artifact loading and metadata extraction

pub mod apis;
pub mod dependencies;
pub mod frontmatter;
pub mod permissions;

pub use apis::ApiScanner;
pub use dependencies::{PackageDescriptor, PackageFilter};
pub use frontmatter::{parse_frontmatter, Frontmatter};
pub use permissions::{permissions, Manifest};

use crate::config::PathsConfig;
use crate::error::{Error, Result};
use std::fmt;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// The three files every example must provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Descriptor,
    Readme,
    Manifest,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Descriptor => "package descriptor",
            ArtifactKind::Readme => "README",
            ArtifactKind::Manifest => "built manifest",
        };
        f.write_str(name)
    }
}

/// A required file that isn't on disk. Recoverable: the example is skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingArtifact {
    pub kind: ArtifactKind,
    pub path: PathBuf,
}

/// Parsed inputs of one example
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub descriptor: PackageDescriptor,
    pub frontmatter: Frontmatter,
    pub manifest: Manifest,
}

/// What loading an example produced
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded(Artifacts),
    Missing(MissingArtifact),
}

/// Reads and parses the descriptor, README and manifest of an example
#[derive(Debug, Clone)]
pub struct ArtifactLoader {
    descriptor: PathBuf,
    readme: PathBuf,
    manifest: PathBuf,
}

impl ArtifactLoader {
    pub fn new(paths: &PathsConfig) -> Self {
        Self {
            descriptor: paths.descriptor.clone(),
            readme: paths.readme.clone(),
            manifest: paths.manifest.clone(),
        }
    }

    /// Load all three artifacts of `example_dir`.
    ///
    /// Presence is checked for every file before anything is parsed, so an
    /// example missing one file is skipped even if another is malformed.
    /// Malformed content is an error.
    pub fn load(&self, example_dir: &Path) -> Result<LoadOutcome> {
        let descriptor_path = example_dir.join(&self.descriptor);
        let readme_path = example_dir.join(&self.readme);
        let manifest_path = example_dir.join(&self.manifest);

        let descriptor = read_optional(&descriptor_path)?;
        let readme = read_optional(&readme_path)?;
        let manifest = read_optional(&manifest_path)?;

        let (descriptor, readme, manifest) = match (descriptor, readme, manifest) {
            (Some(d), Some(r), Some(m)) => (d, r, m),
            (d, r, _) => {
                let (kind, path) = if d.is_none() {
                    (ArtifactKind::Descriptor, descriptor_path)
                } else if r.is_none() {
                    (ArtifactKind::Readme, readme_path)
                } else {
                    (ArtifactKind::Manifest, manifest_path)
                };
                return Ok(LoadOutcome::Missing(MissingArtifact { kind, path }));
            }
        };

        let descriptor: PackageDescriptor = serde_json::from_str(&descriptor)
            .map_err(|e| Error::malformed(&descriptor_path, e.to_string()))?;
        let frontmatter =
            parse_frontmatter(&readme).map_err(|kind| Error::frontmatter(&readme_path, kind))?;
        let manifest: Manifest = serde_json::from_str(&manifest)
            .map_err(|e| Error::malformed(&manifest_path, e.to_string()))?;

        Ok(LoadOutcome::Loaded(Artifacts {
            descriptor,
            frontmatter,
            manifest,
        }))
    }
}

/// Read a UTF-8 file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => {
            Err(Error::malformed(path, "file is not valid UTF-8"))
        }
        Err(e) => Err(Error::Io(e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrontmatterError;
    use std::fs;
    use tempfile::TempDir;

    fn write_example(root: &Path, package: Option<&str>, readme: Option<&str>, manifest: Option<&str>) {
        if let Some(package) = package {
            fs::write(root.join("package.json"), package).unwrap();
        }
        if let Some(readme) = readme {
            fs::write(root.join("README.md"), readme).unwrap();
        }
        if let Some(manifest) = manifest {
            let out = root.join(".output/chrome-mv3");
            fs::create_dir_all(&out).unwrap();
            fs::write(out.join("manifest.json"), manifest).unwrap();
        }
    }

    fn loader() -> ArtifactLoader {
        ArtifactLoader::new(&PathsConfig::default())
    }

    #[test]
    fn test_load_complete_example() {
        let dir = TempDir::new().unwrap();
        write_example(
            dir.path(),
            Some(r#"{"dependencies": {"react": "18"}}"#),
            Some("---\nname: React\ndescription: A popup\n---\n"),
            Some(r#"{"permissions": ["storage"]}"#),
        );

        match loader().load(dir.path()).unwrap() {
            LoadOutcome::Loaded(artifacts) => {
                assert_eq!(artifacts.frontmatter.name, "React");
                assert_eq!(artifacts.manifest.permissions, vec!["storage"]);
                assert!(artifacts.descriptor.dependencies.contains_key("react"));
            }
            LoadOutcome::Missing(m) => panic!("unexpected missing artifact: {:?}", m),
        }
    }

    #[test]
    fn test_missing_readme() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{}"), None, Some("{}"));

        match loader().load(dir.path()).unwrap() {
            LoadOutcome::Missing(missing) => {
                assert_eq!(missing.kind, ArtifactKind::Readme);
                assert_eq!(missing.path, dir.path().join("README.md"));
            }
            LoadOutcome::Loaded(_) => panic!("expected missing README"),
        }
    }

    #[test]
    fn test_missing_manifest_when_not_built() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{}"), Some("---\nname: x\n---\n"), None);

        match loader().load(dir.path()).unwrap() {
            LoadOutcome::Missing(missing) => assert_eq!(missing.kind, ArtifactKind::Manifest),
            LoadOutcome::Loaded(_) => panic!("expected missing manifest"),
        }
    }

    #[test]
    fn test_missing_wins_over_malformed() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{not json"), None, Some("{}"));

        assert!(matches!(
            loader().load(dir.path()).unwrap(),
            LoadOutcome::Missing(MissingArtifact { kind: ArtifactKind::Readme, .. })
        ));
    }

    #[test]
    fn test_malformed_descriptor_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{not json"), Some("---\nname: x\n---\n"), Some("{}"));

        let err = loader().load(dir.path()).unwrap_err();
        match err {
            Error::MalformedArtifact { path, .. } => assert!(path.ends_with("package.json")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_utf8_descriptor_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), None, Some("---\nname: x\n---\n"), Some("{}"));
        fs::write(dir.path().join("package.json"), [b'{', 0xff, 0xfe, b'}']).unwrap();

        match loader().load(dir.path()).unwrap_err() {
            Error::MalformedArtifact { path, message } => {
                assert_eq!(path, dir.path().join("package.json"));
                assert!(message.contains("UTF-8"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_malformed_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{}"), Some("---\nname: x\n---\n"), Some(r#"{"permissions": "tabs"}"#));

        let err = loader().load(dir.path()).unwrap_err();
        assert!(matches!(err, Error::MalformedArtifact { .. }));
    }

    #[test]
    fn test_bad_frontmatter_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_example(dir.path(), Some("{}"), Some("# No header\n"), Some("{}"));

        let err = loader().load(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            Error::Frontmatter { kind: FrontmatterError::MissingDelimiter, .. }
        ));
    }

    #[test]
    fn test_artifact_kind_display() {
        assert_eq!(ArtifactKind::Readme.to_string(), "README");
        assert_eq!(ArtifactKind::Manifest.to_string(), "built manifest");
    }
}
