//! Icon section of a browser extension `manifest.json`
//!
//! This module defines the slice of the WebExtension manifest that references
//! icon files: the top level `icons` map and the toolbar `action.default_icon`
//! map. Both map an edge length in pixels to a path relative to the extension
//! root. The fragment is written next to the icons so it can be pasted into
//! the real manifest.

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const MANIFEST_FRAGMENT_FILE: &str = "manifest_icons.json";

/// Root of the manifest fragment
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestIcons {
    /// Icons used on the extensions page, the install prompt and the favicon
    pub icons: BTreeMap<u32, String>,

    /// Toolbar button settings
    pub action: Action,
}

/// Toolbar action entry
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Action {
    /// Icons shown on the toolbar button, keyed the same way as `icons`
    pub default_icon: BTreeMap<u32, String>,
}

impl ManifestIcons {
    /// Creates an empty fragment
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the icon of the given size in both maps
    ///
    /// Paths always use forward slashes, as the manifest format requires.
    pub fn add_icon(&mut self, size: u32, path: &Path) {
        let path = path.to_string_lossy().replace('\\', "/");
        self.icons.insert(size, path.clone());
        self.action.default_icon.insert(size, path);
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize manifest icons")
    }
}

/// Write `manifest_icons.json` into `out_dir` for the written icons
///
/// # Returns
/// The path of the written file
pub fn write_manifest_fragment(out_dir: &Path, icons: &[(u32, PathBuf)]) -> Result<PathBuf> {
    let mut manifest = ManifestIcons::new();
    for (size, path) in icons {
        manifest.add_icon(*size, path);
    }

    let manifest_path = out_dir.join(MANIFEST_FRAGMENT_FILE);
    std::fs::write(&manifest_path, manifest.to_json_pretty()?)
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    Ok(manifest_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_empty_fragment() {
        let manifest = ManifestIcons::new();
        assert!(manifest.icons.is_empty());
        assert!(manifest.action.default_icon.is_empty());
    }

    #[test]
    fn test_add_icon_fills_both_maps() {
        let mut manifest = ManifestIcons::new();
        manifest.add_icon(48, Path::new("icons/icon48.png"));

        assert_eq!(manifest.icons[&48], "icons/icon48.png");
        assert_eq!(manifest.action.default_icon[&48], "icons/icon48.png");
    }

    #[test]
    fn test_windows_separators_are_normalised() {
        let mut manifest = ManifestIcons::new();
        manifest.add_icon(16, Path::new(r"icons\icon16.png"));
        assert_eq!(manifest.icons[&16], "icons/icon16.png");
    }

    #[test]
    fn test_sizes_serialize_in_numeric_order() {
        let mut manifest = ManifestIcons::new();
        for size in [128, 16, 48] {
            manifest.add_icon(size, &PathBuf::from(format!("icons/icon{size}.png")));
        }

        let json = manifest.to_json_pretty().unwrap();
        let pos = |key: &str| json.find(key).unwrap();
        assert!(pos("\"16\"") < pos("\"48\""));
        assert!(pos("\"48\"") < pos("\"128\""));

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["icons"]["128"], "icons/icon128.png");
        assert_eq!(parsed["action"]["default_icon"]["16"], "icons/icon16.png");
    }

    #[test]
    fn test_write_manifest_fragment() {
        let temp_dir = TempDir::new().unwrap();
        let icons = vec![
            (16, PathBuf::from("icons/icon16.png")),
            (48, PathBuf::from("icons/icon48.png")),
        ];

        let path = write_manifest_fragment(temp_dir.path(), &icons).unwrap();
        assert_eq!(path, temp_dir.path().join(MANIFEST_FRAGMENT_FILE));

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["icons"].as_object().unwrap().len(), 2);
        assert_eq!(parsed["icons"]["48"], "icons/icon48.png");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope");
        assert!(write_manifest_fragment(&missing, &[]).is_err());
    }
}
