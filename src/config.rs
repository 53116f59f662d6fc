use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "examples-meta.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paths: PathsConfig,
    pub build: BuildConfig,
    pub packages: PackagesConfig,
    pub apis: ApisConfig,
    pub site: SiteConfig,
}

/// Where inputs live and where the document is written
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub examples_dir: PathBuf,
    pub output: PathBuf,
    /// Relative to each example directory
    pub descriptor: PathBuf,
    pub readme: PathBuf,
    pub manifest: PathBuf,
}

/// The build run before any example is read
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    pub enabled: bool,
    pub command: Vec<String>,
}

/// Dependency filtering
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesConfig {
    pub ignore: Vec<String>,
    pub ignore_prefixes: Vec<String>,
}

/// API usage scanning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApisConfig {
    pub roots: Vec<String>,
    pub listener_suffix: String,
    pub exclude: Vec<String>,
}

/// Values used to build record links
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub repository_url: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            examples_dir: PathBuf::from("examples"),
            output: PathBuf::from("metadata.json"),
            descriptor: PathBuf::from("package.json"),
            readme: PathBuf::from("README.md"),
            manifest: PathBuf::from(".output/chrome-mv3/manifest.json"),
        }
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: vec!["pnpm".to_string(), "-r".to_string(), "build".to_string()],
        }
    }
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            ignore: vec!["wxt".to_string(), "typescript".to_string()],
            ignore_prefixes: vec!["@types/".to_string(), "@wxt-dev/".to_string()],
        }
    }
}

impl Default for ApisConfig {
    fn default() -> Self {
        Self {
            roots: vec!["browser".to_string(), "chrome".to_string()],
            listener_suffix: ".addListener".to_string(),
            exclude: vec!["node_modules/**".to_string()],
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            repository_url: "https://github.com/wxt-dev/examples/tree/main/examples".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file, or return defaults when the file doesn't exist.
    ///
    /// A file that exists but fails to parse or validate is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        examples_dir: Option<PathBuf>,
        output: Option<PathBuf>,
        skip_build: bool,
    ) {
        if let Some(dir) = examples_dir {
            self.paths.examples_dir = dir;
        }

        if let Some(out) = output {
            self.paths.output = out;
        }

        if skip_build {
            self.build.enabled = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.apis.roots.is_empty() {
            return Err(Error::config_validation("apis.roots must not be empty"));
        }

        for root in &self.apis.roots {
            if !is_identifier(root) {
                return Err(Error::config_validation(format!(
                    "apis.roots entry `{}` is not an identifier",
                    root
                )));
            }
        }

        if self.build.enabled && self.build.command.is_empty() {
            return Err(Error::config_validation(
                "build.command must not be empty when the build is enabled",
            ));
        }

        if self.site.repository_url.trim().is_empty() {
            return Err(Error::config_validation("site.repository_url must not be empty"));
        }

        for pattern in &self.apis.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
