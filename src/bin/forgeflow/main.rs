//! Forgeflow CLI - reconstructs and maintains patchable Minecraft sources

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("forgeflow=debug")
    } else {
        EnvFilter::new("forgeflow=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    // Execute command
    match cli.command {
        Commands::CleanArtifacts(args) => commands::clean_artifacts::execute(args),
        Commands::DownloadAssets(args) => commands::download_assets::execute(args),
        Commands::WriteManifest(args) => commands::write_manifest::execute(args),
        Commands::InvertMappings(args) => commands::invert_mappings::execute(args),
        Commands::ApplyAt(args) => commands::apply_at::execute(args),
        Commands::Split(args) => commands::split::execute(args),
        Commands::ApplyPatches(args) => commands::apply_patches::execute(args),
        Commands::GenPatches(args) => commands::gen_patches::execute(args),
        Commands::Remap(args) => commands::remap::execute(args),
        Commands::GenBinpatches(args) => commands::gen_binpatches::execute(args),
        Commands::WriteConfig(args) => commands::write_config::execute(args),
        Commands::Setup(args) => commands::setup::execute(args),
    }
}
