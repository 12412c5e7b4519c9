//! Shared utilities

pub mod archive;
pub mod config;
pub mod context;
pub mod fs;
pub mod hash;
pub mod process;

pub use config::PipelineConfig;
pub use context::PipelineContext;
pub use process::ProcessBuilder;
