//! `forgeflow setup` command

use anyhow::Result;

use crate::cli::SetupArgs;
use crate::commands::discover_context;
use forgeflow::core::Side;
use forgeflow::ops::setup::setup;

pub fn execute(args: SetupArgs) -> Result<()> {
    let ctx = discover_context()?;
    setup(&ctx, &args.libraries)?;

    for side in Side::ALL {
        eprintln!(
            "    Finished {} sources -> {}",
            side,
            ctx.sources_dir(side).display()
        );
    }
    Ok(())
}
