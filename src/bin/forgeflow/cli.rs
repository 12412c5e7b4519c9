//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use forgeflow::core::Side;

/// Forgeflow - reconstruct, patch and package patchable Minecraft sources
#[derive(Parser)]
#[command(name = "forgeflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the clean artifact set (jars and merged mappings)
    CleanArtifacts(CleanArtifactsArgs),

    /// Download asset metadata and write the asset properties file
    DownloadAssets(DownloadAssetsArgs),

    /// Write the artifact manifest consumed by the fetch tool
    WriteManifest(WriteManifestArgs),

    /// Invert the merged mapping file (named -> obfuscated)
    InvertMappings(InvertMappingsArgs),

    /// Apply the project access transformer to the joined sources jar
    ApplyAt(ApplyAtArgs),

    /// Split the merged sources jar into common and client-only jars
    Split(SplitArgs),

    /// Apply the source patch sets to the split jars
    ApplyPatches(ApplyPatchesArgs),

    /// Regenerate the source patch sets from the maintained source trees
    GenPatches(GenPatchesArgs),

    /// Remap the obfuscated distribution jars to readable names
    Remap(RemapArgs),

    /// Generate binary patch files against a freshly built dirty jar
    GenBinpatches(GenBinpatchesArgs),

    /// Write the userdev/neodev descriptor json
    WriteConfig(WriteConfigArgs),

    /// Run the full source setup pipeline
    Setup(SetupArgs),
}

/// Which source side a per-side command operates on.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SideArg {
    Common,
    Client,
    Both,
}

impl SideArg {
    pub fn sides(self) -> &'static [Side] {
        match self {
            SideArg::Common => &[Side::Common],
            SideArg::Client => &[Side::Client],
            SideArg::Both => &Side::ALL,
        }
    }
}

/// Which obfuscated distribution jar to remap.
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DistArg {
    Client,
    Server,
    Both,
}

#[derive(Args)]
pub struct CleanArtifactsArgs {
    /// Re-run the fetch even if the clean set is up to date
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct DownloadAssetsArgs {}

#[derive(Args)]
pub struct WriteManifestArgs {
    /// Resolved artifact as `group:artifact:version[:classifier][@ext]=path`
    #[arg(long = "entry", value_name = "COORD=PATH")]
    pub entries: Vec<String>,
}

#[derive(Args)]
pub struct InvertMappingsArgs {
    /// Mapping file to invert (defaults to the fetched merged mappings)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Where to write the inverted file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyAtArgs {
    /// Library jar for the transformer classpath (repeatable)
    #[arg(long = "lib", value_name = "JAR")]
    pub libraries: Vec<PathBuf>,
}

#[derive(Args)]
pub struct SplitArgs {
    /// Merged sources jar to split (defaults to the access-transformed jar
    /// when present, otherwise the joined jar)
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct ApplyPatchesArgs {
    /// Side to patch
    #[arg(long, value_enum, default_value = "both")]
    pub side: SideArg,

    /// Maximum line offset searched when context does not match exactly
    #[arg(long)]
    pub fuzz: Option<usize>,
}

#[derive(Args)]
pub struct GenPatchesArgs {
    /// Side to regenerate patches for
    #[arg(long, value_enum, default_value = "both")]
    pub side: SideArg,

    /// Only write the patch archives, do not sync the patch directories
    #[arg(long)]
    pub no_sync: bool,
}

#[derive(Args)]
pub struct RemapArgs {
    /// Distribution to remap
    #[arg(long, value_enum, default_value = "both")]
    pub dist: DistArg,
}

#[derive(Args)]
pub struct GenBinpatchesArgs {
    /// Freshly built (patched and compiled) jar to diff against
    #[arg(long)]
    pub dirty: PathBuf,
}

#[derive(Args)]
pub struct WriteConfigArgs {
    /// Only write the neodev flavor
    #[arg(long)]
    pub neodev: bool,

    /// Only write the userdev flavor
    #[arg(long)]
    pub userdev: bool,
}

#[derive(Args)]
pub struct SetupArgs {
    /// Library jar for the transformer classpath (repeatable)
    #[arg(long = "lib", value_name = "JAR")]
    pub libraries: Vec<PathBuf>,
}
