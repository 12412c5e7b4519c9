//! Forgeflow - a build-time artifact pipeline for patched Minecraft sources
//!
//! This crate reconstructs a buildable, patchable source tree from upstream
//! obfuscated binaries and re-derives redistributable outputs from it:
//! clean jars, split client/common sources, applied textual patches,
//! remapped jars and binary patch sets.

pub mod core;
pub mod ops;
pub mod patch;
pub mod util;

pub use crate::core::manifest::ArtifactManifest;
pub use crate::core::mappings::MappingFile;
pub use crate::core::userdev::UserDevConfig;
pub use crate::core::version::VersionDescriptor;

pub use crate::patch::{PatchOutcome, PatchSetReport};
pub use crate::util::context::PipelineContext;
