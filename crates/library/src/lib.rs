//! Media catalog management — descriptor records, card layout, tier scans.
//!
//! # Modules
//!
//! - [`record`] — fixed-layout `.sdb` descriptor codec (13 record kinds)
//! - [`layout`] — media roots, naming schemes and path builders
//! - [`catalog`] — `Catalog<N>` fixed-capacity sorted entry list
//! - [`scanner`] — directory listing filtered per tier
//! - [`loader`] — read + decode a descriptor through [`platform::Storage`]

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]
#![warn(missing_docs)]

pub mod catalog;
pub mod layout;
pub mod loader;
pub mod record;
pub mod scanner;

// Top-level re-exports for convenience
pub use catalog::{Catalog, EntryName, MAX_ENTRIES, NAME_LEN};
pub use layout::{CardPath, MediaType, NamingScheme, PATH_LEN, SETTINGS_FILE};
pub use loader::{load_path, load_record, LoadError};
pub use record::{decode, DecodeError, Record, Tier, TierRecord, FORMAT_VERSION, MAX_RECORD_SIZE};
pub use scanner::Scanner;
