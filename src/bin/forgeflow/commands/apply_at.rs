//! `forgeflow apply-at` command

use anyhow::{bail, Result};

use crate::cli::ApplyAtArgs;
use crate::commands::{discover_context, require_file};
use forgeflow::ops::access_transform::apply_access_transformer;

pub fn execute(args: ApplyAtArgs) -> Result<()> {
    let ctx = discover_context()?;

    let input = ctx.clean_joined_jar();
    require_file(&input, "clean-artifacts")?;

    let at_file = ctx.access_transformer_file();
    if !at_file.is_file() {
        bail!("no access transformer at {}", at_file.display());
    }

    let output = ctx.access_transformed_jar();
    apply_access_transformer(&ctx, &input, &at_file, &args.libraries, &output)?;
    eprintln!("    Wrote transformed sources -> {}", output.display());
    Ok(())
}
