//! Pipeline configuration loaded from `forgeflow.toml`.
//!
//! The manifest is read once per invocation and carried through the run as
//! part of the immutable [`crate::PipelineContext`]; no step mutates it.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::version::VersionDescriptor;
use crate::util::process::ProcessBuilder;

/// Manifest file name searched for in the project root.
pub const MANIFEST_NAME: &str = "forgeflow.toml";

/// Top-level pipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub versions: VersionDescriptor,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub patching: PatchingConfig,

    #[serde(default)]
    pub tools: ToolsConfig,

    #[serde(default)]
    pub userdev: UserDevLists,
}

/// Project-relative directory layout. Every field has a conventional default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Scratch directory for intermediate pipeline artifacts.
    pub build_dir: PathBuf,
    /// Maintained patch set for common sources.
    pub patches: PathBuf,
    /// Maintained patch set for client-only sources.
    pub patches_client: PathBuf,
    /// Root for `.rej` artifacts written by failed applies.
    pub rejects: PathBuf,
    /// Expanded common sources, target of `setup`.
    pub common_sources: PathBuf,
    /// Expanded client-only sources, target of `setup`.
    pub client_sources: PathBuf,
    /// Access transformer rule file.
    pub access_transformer: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            build_dir: PathBuf::from("build/forgeflow"),
            patches: PathBuf::from("patches"),
            patches_client: PathBuf::from("patches_client"),
            rejects: PathBuf::from("rejects"),
            common_sources: PathBuf::from("src/main/java"),
            client_sources: PathBuf::from("src/client/java"),
            access_transformer: PathBuf::from("src/main/resources/META-INF/accesstransformer.cfg"),
        }
    }
}

/// Tunables for the textual patch engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchingConfig {
    /// Maximum line-offset searched around a hunk's stated position before
    /// rejecting it. The default absorbs typical drift between upstream
    /// releases without letting a hunk land in unrelated code.
    pub fuzz_window: usize,
}

impl Default for PatchingConfig {
    fn default() -> Self {
        PatchingConfig { fuzz_window: 50 }
    }
}

/// Command lines for the wrapped external tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// NeoForm runtime: produces clean artifacts and downloads assets.
    pub nfrt: ToolConfig,
    /// Java source transformer: applies access transformers.
    pub jst: ToolConfig,
    /// Renaming tool: obfuscated -> readable jar remapping.
    pub renamer: ToolConfig,
    /// Binary patch generator.
    pub binpatcher: ToolConfig,
}

/// One external tool invocation prefix: a program plus leading arguments
/// (typically `java -jar <tool>.jar`). Step-specific arguments are appended
/// by the owning pipeline step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        ToolConfig {
            program: "java".to_string(),
            args: Vec::new(),
        }
    }
}

impl ToolConfig {
    /// Start building the tool's command line.
    ///
    /// The default `java` program is resolved through `JAVA_HOME` and PATH;
    /// anything else is taken verbatim.
    pub fn command(&self) -> ProcessBuilder {
        let program = if self.program == "java" {
            crate::util::process::find_java().unwrap_or_else(|| PathBuf::from("java"))
        } else {
            PathBuf::from(&self.program)
        };
        ProcessBuilder::new(program).args(&self.args)
    }
}

/// Library/module coordinate lists flowing into the userdev descriptor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDevLists {
    /// Maven coordinates of dev-time libraries.
    pub libraries: Vec<String>,
    /// Maven coordinates of boot module-path entries.
    pub modules: Vec<String>,
    /// Maven coordinates of test-only libraries.
    pub test_libraries: Vec<String>,
    /// Jar file names excluded from the runtime module path; these are
    /// already supplied by the bootstrap launcher and listing them twice
    /// crashes the module system at launch.
    pub ignore: Vec<String>,
}

impl PipelineConfig {
    /// Load the configuration from a `forgeflow.toml` file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = crate::util::fs::read_to_string(path)?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }
}
