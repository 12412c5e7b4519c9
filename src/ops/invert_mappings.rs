//! Mapping inversion step.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::mappings::MappingFile;

/// Load a mapping file and write its inverted form.
pub fn invert_mapping_file(input: &Path, output: &Path) -> Result<()> {
    let mapping = MappingFile::load(input)?;
    mapping
        .invert()
        .write(output)
        .with_context(|| format!("failed to write inverted mappings: {}", output.display()))?;
    tracing::info!(
        "inverted {} classes ({} -> {})",
        mapping.classes.len(),
        mapping.from_namespace,
        mapping.to_namespace
    );
    Ok(())
}
