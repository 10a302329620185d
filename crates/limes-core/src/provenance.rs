//! Schema descriptors shared across limes reports.

use serde::{Deserialize, Serialize};

/// Semantic version describing the schema of serialized reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SchemaVersion {
    /// Major version incremented for breaking changes.
    pub major: u32,
    /// Minor version incremented for additive changes.
    pub minor: u32,
    /// Patch version incremented for bug fixes and documentation updates.
    pub patch: u32,
}

impl SchemaVersion {
    /// Creates a new schema version descriptor.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Schema version emitted by the current reports.
    pub const fn current() -> Self {
        Self::new(1, 0, 0)
    }
}

impl Default for SchemaVersion {
    fn default() -> Self {
        Self::current()
    }
}
