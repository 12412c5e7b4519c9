//! Core data model for the pipeline.

pub mod manifest;
pub mod mappings;
pub mod userdev;
pub mod version;

use std::fmt;

/// Distribution side of a split source set.
///
/// Closed enumeration: the splitter always classifies every entry into
/// exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Common,
    Client,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Common, Side::Client];
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::Common => "common",
            Side::Client => "client",
        })
    }
}
