// Permission extraction from the built extension manifest

use serde::Deserialize;

/// The parts of a built manifest.json this tool reads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Requested permissions in manifest order, duplicates included
pub fn permissions(manifest: &Manifest) -> Vec<String> {
    manifest.permissions.clone()
}
