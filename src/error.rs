use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that abort a metadata run
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Malformed artifact {path}: {message}")]
    MalformedArtifact { path: PathBuf, message: String },

    #[error("Invalid frontmatter in {path}: {kind}")]
    Frontmatter { path: PathBuf, kind: FrontmatterError },

    #[error("Build command `{command}` failed with {status}")]
    Build { command: String, status: ExitStatus },

    #[error("Failed to read {path}: {source}")]
    ReadSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

/// Ways a README header block can be unusable
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterError {
    #[error("missing leading `---` delimiter")]
    MissingDelimiter,

    #[error("header block is never closed by a `---` line")]
    Unterminated,

    #[error("header is not valid YAML: {0}")]
    Yaml(String),

    #[error("required field `name` is absent")]
    MissingName,
}

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a malformed artifact error
    pub fn malformed(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::MalformedArtifact {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a frontmatter error for the README at `path`
    pub fn frontmatter(path: impl Into<PathBuf>, kind: FrontmatterError) -> Self {
        Error::Frontmatter {
            path: path.into(),
            kind,
        }
    }
}
