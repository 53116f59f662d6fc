// Metadata document model and writer

use crate::error::Result;
use crate::extract::Frontmatter;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

/// Separator between fields of `search_text`
pub const SEARCH_SEPARATOR: &str = "|";

/// One example as shown in the documentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExampleRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub url: String,
    pub search_text: String,
}

impl ExampleRecord {
    /// Build a record; `search_text` is name, description (or empty),
    /// packages, permissions and APIs joined by `|`, in that order.
    pub fn new(
        frontmatter: Frontmatter,
        url: String,
        packages: &[String],
        permissions: &[String],
        apis: &[String],
    ) -> Self {
        let mut fields: Vec<&str> = vec![
            frontmatter.name.as_str(),
            frontmatter.description.as_deref().unwrap_or(""),
        ];
        fields.extend(packages.iter().map(String::as_str));
        fields.extend(permissions.iter().map(String::as_str));
        fields.extend(apis.iter().map(String::as_str));
        let search_text = fields.join(SEARCH_SEPARATOR);

        Self {
            name: frontmatter.name,
            description: frontmatter.description,
            url,
            search_text,
        }
    }
}

/// The aggregated document consumed by the docs site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    pub examples: Vec<ExampleRecord>,
    pub all_packages: BTreeSet<String>,
    pub all_permissions: BTreeSet<String>,
    pub all_apis: BTreeSet<String>,
}

impl MetadataDocument {
    /// Pretty JSON (2-space indent) with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Overwrite `path` with the document, creating parent directories
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        Ok(())
    }
}
