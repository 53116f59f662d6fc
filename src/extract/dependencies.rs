// Third-party package extraction from an example's package.json

use crate::config::PackagesConfig;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

/// The parts of a package.json this tool reads. Version values are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(default)]
    pub dependencies: Map<String, Value>,
    #[serde(default)]
    pub dev_dependencies: Map<String, Value>,
}

/// Drops tooling packages every example shares
#[derive(Debug, Clone)]
pub struct PackageFilter {
    ignore: HashSet<String>,
    ignore_prefixes: Vec<String>,
}

impl PackageFilter {
    pub fn new(config: &PackagesConfig) -> Self {
        Self {
            ignore: config.ignore.iter().cloned().collect(),
            ignore_prefixes: config.ignore_prefixes.clone(),
        }
    }

    /// Check if a package name is filtered out
    pub fn is_ignored(&self, name: &str) -> bool {
        self.ignore.contains(name) || self.ignore_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Kept package names, dependencies first then devDependencies, each once
    pub fn filter(&self, descriptor: &PackageDescriptor) -> Vec<String> {
        let mut seen = HashSet::new();
        descriptor
            .dependencies
            .keys()
            .chain(descriptor.dev_dependencies.keys())
            .filter(|name| !self.is_ignored(name))
            .filter(|name| seen.insert(name.as_str()))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(json: &str) -> PackageDescriptor {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_filter_drops_ignored_name() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        let desc = descriptor(
            r#"{"dependencies": {"wxt": "x", "foo": "1"}, "devDependencies": {"bar": "2"}}"#,
        );
        assert_eq!(filter.filter(&desc), vec!["foo", "bar"]);
    }

    #[test]
    fn test_filter_drops_prefixes() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        let desc = descriptor(
            r#"{"devDependencies": {"@types/chrome": "1", "@wxt-dev/module-react": "1", "react": "18"}}"#,
        );
        assert_eq!(filter.filter(&desc), vec!["react"]);
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        let desc = descriptor(r#"{"dependencies": {"zod": "3", "alpha": "1", "mid": "2"}}"#);
        assert_eq!(filter.filter(&desc), vec!["zod", "alpha", "mid"]);
    }

    #[test]
    fn test_package_in_both_maps_once() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        let desc = descriptor(
            r#"{"dependencies": {"vue": "3"}, "devDependencies": {"sass": "1", "vue": "3"}}"#,
        );
        assert_eq!(filter.filter(&desc), vec!["vue", "sass"]);
    }

    #[test]
    fn test_missing_maps() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        let desc = descriptor(r#"{"name": "example", "private": true}"#);
        assert!(filter.filter(&desc).is_empty());
    }

    #[test]
    fn test_prefix_is_not_a_substring_match() {
        let filter = PackageFilter::new(&PackagesConfig::default());
        assert!(filter.is_ignored("@types/node"));
        assert!(!filter.is_ignored("my-@types/thing"));
        assert!(!filter.is_ignored("wxt-helper"));
    }
}
