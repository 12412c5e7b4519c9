//! Source splitting: partition a merged source jar into common and
//! client-only jars.
//!
//! Classification is a raw byte-substring scan for the client-only marker,
//! not a parse. Binary entries containing the marker bytes are classified
//! as client; a marker split across nothing (it is matched against the
//! whole entry) or varying in case or whitespace is not recognized. Both
//! are accepted limitations of the scheme.

use std::path::Path;

use anyhow::Result;

use crate::util::archive::{read_jar, JarWriter};

/// Marker sequence identifying a client-only source file. The leading
/// newline keeps annotated-import false positives out.
pub const CLIENT_MARKER: &[u8] = b"\n@OnlyIn(Dist.CLIENT)";

fn is_client_only(bytes: &[u8]) -> bool {
    bytes
        .windows(CLIENT_MARKER.len())
        .any(|window| window == CLIENT_MARKER)
}

/// Counts of entries written to each output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitCounts {
    pub common: usize,
    pub client: usize,
}

/// Split `merged_jar` into `common_jar` and `client_jar`.
///
/// Every non-directory entry lands in exactly one output; directory entries
/// are dropped. Entry order follows the input, so identical inputs produce
/// byte-identical outputs.
pub fn split_merged_sources(
    merged_jar: &Path,
    common_jar: &Path,
    client_jar: &Path,
) -> Result<SplitCounts> {
    let mut common = JarWriter::create(common_jar)?;
    let mut client = JarWriter::create(client_jar)?;
    let mut counts = SplitCounts { common: 0, client: 0 };

    for entry in read_jar(merged_jar)? {
        if is_client_only(&entry.bytes) {
            client.add(&entry.name, &entry.bytes)?;
            counts.client += 1;
        } else {
            common.add(&entry.name, &entry.bytes)?;
            counts.common += 1;
        }
    }

    common.finish()?;
    client.finish()?;

    tracing::info!(
        "split {} common / {} client entries",
        counts.common,
        counts.client
    );
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::archive::write_jar;
    use tempfile::TempDir;

    #[test]
    fn test_marker_detection() {
        assert!(is_client_only(b"import x;\n@OnlyIn(Dist.CLIENT)\nclass A {}"));
        assert!(!is_client_only(b"class A {}"));
        // Marker must follow a newline.
        assert!(!is_client_only(b"@OnlyIn(Dist.CLIENT)\nclass A {}"));
        // Byte-level match, no semantic parse: binary data counts too.
        let mut binary = vec![0u8, 0xff, 0x1b];
        binary.extend_from_slice(CLIENT_MARKER);
        binary.push(0x00);
        assert!(is_client_only(&binary));
    }

    #[test]
    fn test_split_example_scenario() {
        let tmp = TempDir::new().unwrap();
        let merged = tmp.path().join("merged.jar");
        let common = tmp.path().join("common.jar");
        let client = tmp.path().join("client.jar");

        write_jar(
            &merged,
            [
                ("a/Foo.java", b"class Foo {}".as_slice()),
                (
                    "a/Bar.java",
                    b"import net.neoforged.api.distmarker.Dist;\n@OnlyIn(Dist.CLIENT)\nclass Bar {}".as_slice(),
                ),
            ],
        )
        .unwrap();

        let counts = split_merged_sources(&merged, &common, &client).unwrap();
        assert_eq!(counts, SplitCounts { common: 1, client: 1 });

        let common_entries = read_jar(&common).unwrap();
        let client_entries = read_jar(&client).unwrap();
        assert_eq!(common_entries.len(), 1);
        assert_eq!(common_entries[0].name, "a/Foo.java");
        assert_eq!(client_entries.len(), 1);
        assert_eq!(client_entries[0].name, "a/Bar.java");
    }

    #[test]
    fn test_split_is_deterministic_and_complete() {
        let tmp = TempDir::new().unwrap();
        let merged = tmp.path().join("merged.jar");

        let entries: Vec<(String, Vec<u8>)> = (0..20)
            .map(|i| {
                let marker = if i % 3 == 0 { "\n@OnlyIn(Dist.CLIENT)" } else { "" };
                (
                    format!("pkg/Class{i}.java"),
                    format!("class Class{i} {{}}{marker}\n").into_bytes(),
                )
            })
            .collect();
        write_jar(
            &merged,
            entries.iter().map(|(n, b)| (n.as_str(), b.as_slice())),
        )
        .unwrap();

        let common_a = tmp.path().join("common-a.jar");
        let client_a = tmp.path().join("client-a.jar");
        let common_b = tmp.path().join("common-b.jar");
        let client_b = tmp.path().join("client-b.jar");

        split_merged_sources(&merged, &common_a, &client_a).unwrap();
        split_merged_sources(&merged, &common_b, &client_b).unwrap();

        // Determinism: byte-identical re-runs.
        assert_eq!(std::fs::read(&common_a).unwrap(), std::fs::read(&common_b).unwrap());
        assert_eq!(std::fs::read(&client_a).unwrap(), std::fs::read(&client_b).unwrap());

        // Completeness: the union of output names equals the input names.
        let mut names: Vec<String> = read_jar(&common_a)
            .unwrap()
            .into_iter()
            .chain(read_jar(&client_a).unwrap())
            .map(|e| e.name)
            .collect();
        names.sort();
        let mut expected: Vec<String> = entries.iter().map(|(n, _)| n.clone()).collect();
        expected.sort();
        assert_eq!(names, expected);
    }
}
