//! CLI integration tests for Forgeflow.
//!
//! These tests exercise the steps that run without external tooling: patch
//! application and generation, source splitting, mapping inversion and the
//! descriptor/manifest writers.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

use forgeflow::util::archive::{read_jar, write_jar};

/// Get the forgeflow binary command.
fn forgeflow() -> Command {
    Command::cargo_bin("forgeflow").unwrap()
}

/// Create a project directory with a minimal `forgeflow.toml`.
fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(
        tmp.path().join("forgeflow.toml"),
        r#"
[versions]
minecraft = "1.20.1"
neoform = "20230612.114412"
fml = "47.1.0"
neoforge = "20.1.100"

[userdev]
ignore = ["securejarhandler-2.1.10.jar", "client-extra"]
"#,
    )
    .unwrap();
    tmp
}

fn artifacts_dir(root: &Path) -> std::path::PathBuf {
    root.join("build/forgeflow/artifacts")
}

// ============================================================================
// context discovery
// ============================================================================

#[test]
fn test_fails_without_manifest() {
    let tmp = TempDir::new().unwrap();

    forgeflow()
        .args(["split"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("forgeflow.toml"));
}

#[test]
fn test_discovers_manifest_from_subdirectory() {
    let tmp = project();
    let nested = tmp.path().join("src/main/java");
    fs::create_dir_all(&nested).unwrap();

    // No input jars exist yet, so the step fails, but discovery succeeded:
    // the error talks about the missing jar, not the missing manifest.
    forgeflow()
        .args(["split"])
        .current_dir(&nested)
        .assert()
        .failure()
        .stderr(predicate::str::contains("clean-artifacts"));
}

// ============================================================================
// forgeflow write-manifest
// ============================================================================

#[test]
fn test_write_manifest_sorted_properties() {
    let tmp = project();

    forgeflow()
        .args([
            "write-manifest",
            "--entry",
            "net.neoforged:neoform:1.20.1-20230612.114412@zip=/cache/neoform.zip",
            "--entry",
            "net.minecraft:client:1.20.1=/cache/client.jar",
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    let text = fs::read_to_string(
        tmp.path()
            .join("build/forgeflow/neoform_artifact_manifest.properties"),
    )
    .unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(
        lines,
        [
            "net.minecraft:client:1.20.1=/cache/client.jar",
            "net.neoforged:neoform:1.20.1-20230612.114412@zip=/cache/neoform.zip",
        ]
    );
}

#[test]
fn test_write_manifest_rejects_malformed_entry() {
    let tmp = project();

    forgeflow()
        .args(["write-manifest", "--entry", "no-equals-sign"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("coordinate=path"));
}

// ============================================================================
// forgeflow split
// ============================================================================

#[test]
fn test_split_classifies_by_marker() {
    let tmp = project();
    let merged = tmp.path().join("merged.jar");
    write_jar(
        &merged,
        [
            (
                "net/minecraft/Common.java",
                b"package net.minecraft;\nclass Common {}\n".as_slice(),
            ),
            (
                "net/minecraft/Screen.java",
                b"package net.minecraft;\n@OnlyIn(Dist.CLIENT)\nclass Screen {}\n".as_slice(),
            ),
        ],
    )
    .unwrap();

    forgeflow()
        .args(["split", "--input", merged.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("1 common / 1 client"));

    let artifacts = artifacts_dir(tmp.path());
    let common = read_jar(&artifacts.join("common-sources.jar")).unwrap();
    let client = read_jar(&artifacts.join("client-sources.jar")).unwrap();
    assert_eq!(common.len(), 1);
    assert_eq!(common[0].name, "net/minecraft/Common.java");
    assert_eq!(client.len(), 1);
    assert_eq!(client[0].name, "net/minecraft/Screen.java");
}

#[test]
fn test_split_outputs_are_reproducible() {
    let tmp = project();
    let merged = tmp.path().join("merged.jar");
    let entries: Vec<(String, Vec<u8>)> = (0..20)
        .map(|i| {
            (
                format!("net/minecraft/C{i:02}.java"),
                format!("class C{i:02} {{}}\n").into_bytes(),
            )
        })
        .collect();
    write_jar(
        &merged,
        entries.iter().map(|(n, b)| (n.as_str(), b.as_slice())),
    )
    .unwrap();

    let common = artifacts_dir(tmp.path()).join("common-sources.jar");
    forgeflow()
        .args(["split", "--input", merged.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success();
    let first = fs::read(&common).unwrap();

    forgeflow()
        .args(["split", "--input", merged.to_str().unwrap()])
        .current_dir(tmp.path())
        .assert()
        .success();
    assert_eq!(fs::read(&common).unwrap(), first);
}

// ============================================================================
// forgeflow gen-patches / apply-patches round trip
// ============================================================================

const ORIGINAL: &str = "class Foo {\n    int a;\n    int b;\n    int c;\n}\n";
const MODIFIED: &str = "class Foo {\n    int a;\n    long b;\n    int c;\n}\n";

/// Seed the common split jar and the maintained source tree.
fn seed_common_sources(root: &Path, source: &str) {
    let split_jar = artifacts_dir(root).join("common-sources.jar");
    write_jar(&split_jar, [("net/minecraft/Foo.java", ORIGINAL.as_bytes())]).unwrap();

    let tree_file = root.join("src/main/java/net/minecraft/Foo.java");
    fs::create_dir_all(tree_file.parent().unwrap()).unwrap();
    fs::write(&tree_file, source).unwrap();
}

#[test]
fn test_generate_then_apply_round_trips() {
    let tmp = project();
    seed_common_sources(tmp.path(), MODIFIED);

    forgeflow()
        .args(["gen-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Generated 1 common patch(es)"));

    let patch_file = tmp.path().join("patches/net/minecraft/Foo.java.patch");
    assert!(patch_file.is_file());
    let patch_text = fs::read_to_string(&patch_file).unwrap();
    assert!(patch_text.starts_with("--- a/net/minecraft/Foo.java\n"));

    forgeflow()
        .args(["apply-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let patched = read_jar(&artifacts_dir(tmp.path()).join("patched-common-sources.jar")).unwrap();
    let foo = patched
        .iter()
        .find(|e| e.name == "net/minecraft/Foo.java")
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&foo.bytes), MODIFIED);
}

#[test]
fn test_apply_tolerates_shifted_context() {
    let tmp = project();
    seed_common_sources(tmp.path(), MODIFIED);

    forgeflow()
        .args(["gen-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .success();

    // A new upstream line ahead of the hunk shifts every stated position.
    let split_jar = artifacts_dir(tmp.path()).join("common-sources.jar");
    let shifted = format!("// header\n{ORIGINAL}");
    write_jar(
        &split_jar,
        [("net/minecraft/Foo.java", shifted.as_bytes())],
    )
    .unwrap();

    forgeflow()
        .args(["apply-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let patched = read_jar(&artifacts_dir(tmp.path()).join("patched-common-sources.jar")).unwrap();
    let text = String::from_utf8_lossy(&patched[0].bytes).to_string();
    assert!(text.starts_with("// header\n"));
    assert!(text.contains("    long b;\n"));
}

#[test]
fn test_rejected_patch_fails_and_writes_reject() {
    let tmp = project();

    let split_jar = artifacts_dir(tmp.path()).join("common-sources.jar");
    write_jar(&split_jar, [("net/minecraft/Foo.java", ORIGINAL.as_bytes())]).unwrap();

    let patch_file = tmp.path().join("patches/net/minecraft/Foo.java.patch");
    fs::create_dir_all(patch_file.parent().unwrap()).unwrap();
    fs::write(
        &patch_file,
        "--- a/net/minecraft/Foo.java\n\
         +++ b/net/minecraft/Foo.java\n\
         @@ -1,3 +1,3 @@\n \
         class Bar {\n\
         -    int x;\n\
         +    long x;\n \
         int y;\n",
    )
    .unwrap();

    forgeflow()
        .args(["apply-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));

    let reject = tmp
        .path()
        .join("rejects/common/net/minecraft/Foo.java.rej");
    assert!(reject.is_file());
    let text = fs::read_to_string(&reject).unwrap();
    assert!(text.contains("failed to apply"));

    // The jar is still produced so the failure can be inspected in place.
    assert!(artifacts_dir(tmp.path())
        .join("patched-common-sources.jar")
        .is_file());
}

#[test]
fn test_zero_fuzz_rejects_shifted_patch() {
    let tmp = project();
    seed_common_sources(tmp.path(), MODIFIED);

    forgeflow()
        .args(["gen-patches", "--side", "common"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let split_jar = artifacts_dir(tmp.path()).join("common-sources.jar");
    let shifted = format!("// header\n{ORIGINAL}");
    write_jar(
        &split_jar,
        [("net/minecraft/Foo.java", shifted.as_bytes())],
    )
    .unwrap();

    forgeflow()
        .args(["apply-patches", "--side", "common", "--fuzz", "0"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("rejected"));
}

// ============================================================================
// forgeflow invert-mappings
// ============================================================================

#[test]
fn test_invert_mappings_swaps_namespaces() {
    let tmp = project();
    let input = tmp.path().join("merged.txt");
    fs::write(
        &input,
        "tsrg2 obf named\n\
         a net/minecraft/Foo\n\
         \tb level\n\
         \tc (La;)V tick\n",
    )
    .unwrap();
    let output = tmp.path().join("inverted.txt");

    forgeflow()
        .args([
            "invert-mappings",
            "--input",
            input.to_str().unwrap(),
            "--output",
            output.to_str().unwrap(),
        ])
        .current_dir(tmp.path())
        .assert()
        .success();

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.starts_with("tsrg2 named obf\n"));
    assert!(text.contains("net/minecraft/Foo a\n"));
    // Method descriptors are rewritten through the class map.
    assert!(text.contains("\ttick (Lnet/minecraft/Foo;)V c\n"));
}

// ============================================================================
// forgeflow write-config
// ============================================================================

#[test]
fn test_write_config_produces_both_flavors() {
    let tmp = project();

    forgeflow()
        .args(["write-config"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let build_dir = tmp.path().join("build/forgeflow");
    assert!(build_dir.join("neodev-config.json").is_file());

    let text = fs::read_to_string(build_dir.join("userdev-config.json")).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed["spec"], 2);
    assert_eq!(parsed["mcp"], "net.neoforged:neoform:1.20.1-20230612.114412@zip");
    assert_eq!(
        parsed["binpatcher"]["version"],
        "net.minecraftforge:binarypatcher:1.1.1:fatjar"
    );
    assert_eq!(
        parsed["runs"]["client"]["props"]["ignoreList"],
        "securejarhandler-2.1.10.jar,client-extra"
    );
    assert_eq!(parsed["runs"]["client"]["jvmArgs"][0], "-p");
    // Only the client run launches with an asset index.
    let client_args = parsed["runs"]["client"]["args"].as_array().unwrap();
    assert!(client_args.iter().any(|a| a == "--assetIndex"));
    let server_args = parsed["runs"]["server"]["args"].as_array().unwrap();
    assert!(!server_args.iter().any(|a| a == "--assetIndex"));
}

#[test]
fn test_write_config_neodev_only() {
    let tmp = project();

    forgeflow()
        .args(["write-config", "--neodev"])
        .current_dir(tmp.path())
        .assert()
        .success();

    let build_dir = tmp.path().join("build/forgeflow");
    assert!(build_dir.join("neodev-config.json").is_file());
    assert!(!build_dir.join("userdev-config.json").exists());
}
