//! Jar (zip) reading and writing.
//!
//! Pipeline steps exchange source sets as jar archives. Reads preserve entry
//! order; writes are deterministic (fixed timestamps, caller-controlled
//! order) so re-running a step on identical input produces byte-identical
//! output. Directory entries are never written; jar tools recreate
//! directories implicitly.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// A single non-directory archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JarEntry {
    /// Relative path inside the archive, forward slashes.
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Read all non-directory entries of a jar, in archive order.
pub fn read_jar(path: &Path) -> Result<Vec<JarEntry>> {
    let file =
        File::open(path).with_context(|| format!("failed to open jar: {}", path.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(file))
        .with_context(|| format!("failed to read jar: {}", path.display()))?;

    let mut entries = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .with_context(|| format!("failed to read entry {} of {}", i, path.display()))?;
        if entry.is_dir() {
            continue;
        }
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .with_context(|| format!("failed to read `{}` from {}", entry.name(), path.display()))?;
        entries.push(JarEntry {
            name: entry.name().to_string(),
            bytes,
        });
    }

    Ok(entries)
}

/// Streaming jar writer with deterministic entry metadata.
pub struct JarWriter {
    inner: ZipWriter<BufWriter<File>>,
    path: std::path::PathBuf,
}

impl JarWriter {
    /// Create a jar at `path`, truncating any existing file.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            super::fs::ensure_dir(parent)?;
        }
        let file = File::create(path)
            .with_context(|| format!("failed to create jar: {}", path.display()))?;
        Ok(JarWriter {
            inner: ZipWriter::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    fn options() -> SimpleFileOptions {
        // Epoch timestamp (1980-01-01) for reproducible output.
        SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(zip::DateTime::default())
    }

    /// Append one entry.
    pub fn add(&mut self, name: &str, bytes: &[u8]) -> Result<()> {
        self.inner
            .start_file(name, Self::options())
            .with_context(|| format!("failed to start entry `{}` in {}", name, self.path.display()))?;
        self.inner
            .write_all(bytes)
            .with_context(|| format!("failed to write entry `{}` in {}", name, self.path.display()))?;
        Ok(())
    }

    /// Finish the archive, flushing the central directory.
    pub fn finish(self) -> Result<()> {
        self.inner
            .finish()
            .with_context(|| format!("failed to finish jar: {}", self.path.display()))?;
        Ok(())
    }
}

/// Write a complete jar from the given entries, in order.
pub fn write_jar<'a>(
    path: &Path,
    entries: impl IntoIterator<Item = (&'a str, &'a [u8])>,
) -> Result<()> {
    let mut writer = JarWriter::create(path)?;
    for (name, bytes) in entries {
        writer.add(name, bytes)?;
    }
    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("test.jar");

        write_jar(
            &path,
            [
                ("a/Foo.java", b"class Foo {}".as_slice()),
                ("a/Bar.java", b"class Bar {}".as_slice()),
            ],
        )
        .unwrap();

        let entries = read_jar(&path).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a/Foo.java");
        assert_eq!(entries[0].bytes, b"class Foo {}");
        assert_eq!(entries[1].name, "a/Bar.java");
    }

    #[test]
    fn test_deterministic_output() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.jar");
        let b = tmp.path().join("b.jar");

        for path in [&a, &b] {
            write_jar(path, [("x.txt", b"data".as_slice())]).unwrap();
        }

        assert_eq!(std::fs::read(&a).unwrap(), std::fs::read(&b).unwrap());
    }
}
