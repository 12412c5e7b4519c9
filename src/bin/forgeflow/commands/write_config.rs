//! `forgeflow write-config` command

use anyhow::Result;

use crate::cli::WriteConfigArgs;
use crate::commands::discover_context;
use forgeflow::ops::write_userdev::write_userdev_config;

pub fn execute(args: WriteConfigArgs) -> Result<()> {
    let ctx = discover_context()?;

    // With no flavor flag, write both.
    let both = args.neodev == args.userdev;
    if args.userdev || both {
        let path = write_userdev_config(&ctx, false)?;
        eprintln!("    Wrote userdev config -> {}", path.display());
    }
    if args.neodev || both {
        let path = write_userdev_config(&ctx, true)?;
        eprintln!("    Wrote neodev config -> {}", path.display());
    }
    Ok(())
}
