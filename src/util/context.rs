//! Pipeline context: resolved paths and configuration for one invocation.
//!
//! Constructed once from the project root and `forgeflow.toml`, then passed
//! by reference to every step. All cross-step communication happens through
//! files at the paths agreed here; no step mutates another's inputs.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::core::version::VersionDescriptor;
use crate::core::Side;
use crate::util::config::{PipelineConfig, ToolConfig, MANIFEST_NAME};

/// Immutable per-invocation context.
#[derive(Debug, Clone)]
pub struct PipelineContext {
    /// Project root (directory containing `forgeflow.toml`).
    root: PathBuf,
    config: PipelineConfig,
}

impl PipelineContext {
    /// Create a context from an explicit root and configuration.
    pub fn new(root: PathBuf, config: PipelineConfig) -> Self {
        PipelineContext { root, config }
    }

    /// Locate `forgeflow.toml` starting from `cwd` and searching upward.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let mut current = cwd.to_path_buf();
        loop {
            let candidate = current.join(MANIFEST_NAME);
            if candidate.is_file() {
                let config = PipelineConfig::load(&candidate)?;
                return Ok(PipelineContext::new(current, config));
            }
            if !current.pop() {
                bail!(
                    "no `{}` found in `{}` or any parent directory",
                    MANIFEST_NAME,
                    cwd.display()
                );
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn versions(&self) -> &VersionDescriptor {
        &self.config.versions
    }

    /// Ensure a directory exists, creating it if necessary.
    pub fn ensure_dir(&self, path: &Path) -> Result<()> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("failed to create directory: {}", path.display()))
    }

    // ------------------------------------------------------------------
    // Directory layout
    // ------------------------------------------------------------------

    /// Scratch directory for intermediate artifacts.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(&self.config.paths.build_dir)
    }

    fn artifacts_dir(&self) -> PathBuf {
        self.build_dir().join("artifacts")
    }

    fn clean_dir(&self) -> PathBuf {
        self.artifacts_dir().join("clean")
    }

    // Clean artifact set (fetch step outputs).

    pub fn clean_client_jar(&self) -> PathBuf {
        self.clean_dir().join("client.jar")
    }

    pub fn clean_server_jar(&self) -> PathBuf {
        self.clean_dir().join("server.jar")
    }

    pub fn clean_joined_jar(&self) -> PathBuf {
        self.clean_dir().join("joined.jar")
    }

    pub fn merged_mappings(&self) -> PathBuf {
        self.clean_dir().join("merged-mappings.txt")
    }

    /// Fingerprint of the version descriptor the clean set was fetched for.
    pub fn clean_fingerprint_file(&self) -> PathBuf {
        self.clean_dir().join(".fingerprint")
    }

    pub fn artifact_manifest_file(&self) -> PathBuf {
        self.build_dir().join("neoform_artifact_manifest.properties")
    }

    pub fn asset_properties_file(&self) -> PathBuf {
        self.build_dir().join("minecraft_assets.properties")
    }

    // Access transform.

    pub fn at_libraries_file(&self) -> PathBuf {
        self.build_dir().join("minecraft-libraries-for-jst.txt")
    }

    pub fn access_transformed_jar(&self) -> PathBuf {
        self.artifacts_dir().join("access-transformed-sources.jar")
    }

    pub fn access_transformer_file(&self) -> PathBuf {
        self.root.join(&self.config.paths.access_transformer)
    }

    // Split / patch / setup, per side.

    pub fn split_sources_jar(&self, side: Side) -> PathBuf {
        self.artifacts_dir().join(format!("{}-sources.jar", side))
    }

    pub fn patched_sources_jar(&self, side: Side) -> PathBuf {
        self.artifacts_dir()
            .join(format!("patched-{}-sources.jar", side))
    }

    pub fn patches_dir(&self, side: Side) -> PathBuf {
        match side {
            Side::Common => self.root.join(&self.config.paths.patches),
            Side::Client => self.root.join(&self.config.paths.patches_client),
        }
    }

    pub fn rejects_dir(&self, side: Side) -> PathBuf {
        self.root.join(&self.config.paths.rejects).join(side.to_string())
    }

    pub fn sources_dir(&self, side: Side) -> PathBuf {
        match side {
            Side::Common => self.root.join(&self.config.paths.common_sources),
            Side::Client => self.root.join(&self.config.paths.client_sources),
        }
    }

    /// Archive of freshly generated patches for one side.
    pub fn generated_patches_jar(&self, side: Side) -> PathBuf {
        self.build_dir().join(format!("{}-source-patches.zip", side))
    }

    // Remap / binary patches.

    pub fn inverted_mappings(&self) -> PathBuf {
        self.build_dir().join("inverted-mappings.txt")
    }

    pub fn remapped_client_jar(&self) -> PathBuf {
        self.build_dir().join("remapped-client.jar")
    }

    pub fn remapped_server_jar(&self) -> PathBuf {
        self.build_dir().join("remapped-server.jar")
    }

    pub fn binpatches_file(&self, name: &str) -> PathBuf {
        self.build_dir().join(format!("{name}-binpatches.lzma"))
    }

    pub fn userdev_config_file(&self, for_neodev: bool) -> PathBuf {
        self.build_dir().join(if for_neodev {
            "neodev-config.json"
        } else {
            "userdev-config.json"
        })
    }

    // ------------------------------------------------------------------
    // Tools
    // ------------------------------------------------------------------

    pub fn nfrt_tool(&self) -> &ToolConfig {
        &self.config.tools.nfrt
    }

    pub fn jst_tool(&self) -> &ToolConfig {
        &self.config.tools.jst
    }

    pub fn renamer_tool(&self) -> &ToolConfig {
        &self.config.tools.renamer
    }

    pub fn binpatcher_tool(&self) -> &ToolConfig {
        &self.config.tools.binpatcher
    }

    /// Patch fuzz window (maximum searched line offset).
    pub fn fuzz_window(&self) -> usize {
        self.config.patching.fuzz_window
    }
}
