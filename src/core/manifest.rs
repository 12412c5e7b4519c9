//! Artifact manifest: already-resolved artifacts handed to the fetch tool.
//!
//! The manifest tells the external fetch process which artifacts are already
//! present locally so it does not download them again. Entries are advisory:
//! a missing or stale manifest only costs a re-download, never correctness.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use indexmap::IndexMap;

use crate::util::fs;

/// One resolved artifact: maven coordinate plus its local path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactManifestEntry {
    pub group: String,
    pub artifact: String,
    pub version: String,
    pub classifier: Option<String>,
    pub extension: Option<String>,
    pub path: PathBuf,
}

impl ArtifactManifestEntry {
    /// Coordinate key: `group:artifact:version[:classifier][@extension]`.
    pub fn coordinate(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArtifactManifestEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.artifact, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        if let Some(extension) = &self.extension {
            write!(f, "@{extension}")?;
        }
        Ok(())
    }
}

/// Flat key-value store of coordinate -> local path, persisted as a
/// properties file. Insertion order is preserved; writes are sorted so the
/// file is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct ArtifactManifest {
    entries: IndexMap<String, PathBuf>,
}

impl ArtifactManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Record one resolved artifact.
    pub fn insert(&mut self, entry: ArtifactManifestEntry) {
        self.entries.insert(entry.coordinate(), entry.path);
    }

    /// Record an already-formatted coordinate, as accepted on the command
    /// line.
    pub fn insert_raw(&mut self, coordinate: impl Into<String>, path: PathBuf) {
        self.entries.insert(coordinate.into(), path);
    }

    pub fn get(&self, coordinate: &str) -> Option<&Path> {
        self.entries.get(coordinate).map(PathBuf::as_path)
    }

    /// Load a manifest, treating a missing file as empty.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let mut entries = IndexMap::new();
        for (lineno, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    entries.insert(key.trim().to_string(), PathBuf::from(value.trim()));
                }
                None => bail!(
                    "malformed manifest line {} in {}: `{}`",
                    lineno + 1,
                    path.display(),
                    line
                ),
            }
        }
        Ok(ArtifactManifest { entries })
    }

    /// Write the manifest as a sorted properties file.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut keys: Vec<_> = self.entries.keys().collect();
        keys.sort();

        let mut out = String::new();
        for key in keys {
            out.push_str(key);
            out.push('=');
            out.push_str(&self.entries[key].display().to_string());
            out.push('\n');
        }
        fs::write_string(path, &out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn entry(artifact: &str, classifier: Option<&str>) -> ArtifactManifestEntry {
        ArtifactManifestEntry {
            group: "net.neoforged".into(),
            artifact: artifact.into(),
            version: "1.0.5".into(),
            classifier: classifier.map(Into::into),
            extension: None,
            path: PathBuf::from(format!("/cache/{artifact}.jar")),
        }
    }

    #[test]
    fn test_coordinate_forms() {
        assert_eq!(
            entry("neoform", None).coordinate(),
            "net.neoforged:neoform:1.0.5"
        );
        assert_eq!(
            entry("neoform", Some("fatjar")).coordinate(),
            "net.neoforged:neoform:1.0.5:fatjar"
        );

        let mut with_ext = entry("neoform", None);
        with_ext.extension = Some("zip".into());
        assert_eq!(with_ext.coordinate(), "net.neoforged:neoform:1.0.5@zip");
    }

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("manifest.properties");

        let mut manifest = ArtifactManifest::new();
        manifest.insert(entry("neoform", None));
        manifest.insert(entry("auto-renaming-tool", Some("all")));
        manifest.write(&path).unwrap();

        let loaded = ArtifactManifest::load(&path).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get("net.neoforged:neoform:1.0.5"),
            Some(Path::new("/cache/neoform.jar"))
        );
    }

    #[test]
    fn test_missing_file_is_empty() {
        let manifest = ArtifactManifest::load(Path::new("/does/not/exist.properties")).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_malformed_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.properties");
        std::fs::write(&path, "not a key value pair\n").unwrap();
        assert!(ArtifactManifest::load(&path).is_err());
    }
}
