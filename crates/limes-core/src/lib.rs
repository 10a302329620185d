#![deny(missing_docs)]
#![doc = "Core error taxonomy, schema descriptors and canonical serialisation shared by the limes crates."]

pub mod errors;
/// Stable report hashing.
pub mod hash;
pub mod provenance;
/// Canonical JSON serde helpers.
pub mod serde;

pub use errors::{ErrorInfo, LimesError};
pub use hash::stable_hash_string;
pub use provenance::SchemaVersion;
pub use self::serde::{from_json_slice, to_canonical_json_bytes, to_canonical_json_pretty};

