//! Version descriptor identifying the upstream artifact set.

use serde::{Deserialize, Serialize};

use crate::util::hash::Fingerprint;

/// Identifies which upstream artifact set the pipeline works against.
/// Immutable once resolved from the project manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionDescriptor {
    /// Minecraft version, e.g. `1.20.1`.
    pub minecraft: String,
    /// Raw NeoForm timestamp version, e.g. `20230612.114412`.
    pub neoform: String,
    /// FancyModLoader version.
    pub fml: String,
    /// Target NeoForge version being built.
    pub neoforge: String,
}

impl VersionDescriptor {
    /// Combined `<mc>-<neoform>` version used in the neoform coordinate.
    pub fn neoform_version(&self) -> String {
        format!("{}-{}", self.minecraft, self.neoform)
    }

    /// Maven coordinate of the neoform data artifact.
    pub fn neoform_artifact(&self) -> String {
        format!("net.neoforged:neoform:{}", self.neoform_version())
    }

    /// Coordinate form with the zip extension, as passed to the fetch tool.
    pub fn neoform_artifact_zip(&self) -> String {
        format!("{}@zip", self.neoform_artifact())
    }

    /// Sources artifact coordinate for the userdev descriptor.
    pub fn sources_artifact(&self) -> String {
        format!("net.neoforged:neoforge:{}:sources", self.neoforge)
    }

    /// Universal jar coordinate for the userdev descriptor.
    pub fn universal_artifact(&self) -> String {
        format!("net.neoforged:neoforge:{}:universal", self.neoforge)
    }

    /// Stable fingerprint of the full descriptor, used by the fetch step to
    /// detect that the clean artifact set on disk is already current.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(&self.minecraft)
            .update_str(&self.neoform)
            .update_str(&self.fml)
            .update_str(&self.neoforge);
        fp.finish()
    }
}
