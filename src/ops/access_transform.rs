//! Access transform step: widen member visibility via the external source
//! transformer.
//!
//! The library classpath is passed through a list file rather than inline
//! arguments; large modded classpaths overflow command-line length limits
//! otherwise. Writing that file is this step's responsibility, making it
//! the authority for the classpath the tool resolves against.

use std::path::Path;

use anyhow::{Context, Result};

use crate::util::fs;
use crate::util::process::ProcessBuilder;
use crate::PipelineContext;

const STEP: &str = "access-transform";

/// Build the transformer command line. `libraries_file` must already list
/// the classpath, one absolute path per line.
pub fn access_transform_command(
    ctx: &PipelineContext,
    input_jar: &Path,
    at_file: &Path,
    libraries_file: &Path,
    output_jar: &Path,
) -> ProcessBuilder {
    ctx.jst_tool()
        .command()
        .arg_path("--in-jar", input_jar)
        .arg_path("--access-transformer", at_file)
        .arg_path("--out-jar", output_jar)
        .arg_path("--lib", libraries_file)
}

/// Write the classpath list file consumed via `--lib`.
pub fn write_libraries_file(path: &Path, libraries: &[impl AsRef<Path>]) -> Result<()> {
    let mut out = String::new();
    for library in libraries {
        let library = library.as_ref();
        let absolute = std::path::absolute(library).unwrap_or_else(|_| library.to_path_buf());
        out.push_str(&absolute.display().to_string());
        out.push('\n');
    }
    fs::write_string(path, &out)
}

/// Run the access transform step.
pub fn apply_access_transformer(
    ctx: &PipelineContext,
    input_jar: &Path,
    at_file: &Path,
    libraries: &[impl AsRef<Path>],
    output_jar: &Path,
) -> Result<()> {
    let libraries_file = ctx.at_libraries_file();
    write_libraries_file(&libraries_file, libraries)?;

    access_transform_command(ctx, input_jar, at_file, &libraries_file, output_jar)
        .exec_and_check()
        .with_context(|| format!("step `{STEP}` failed"))?;
    Ok(())
}
