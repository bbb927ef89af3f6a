//! Read and decode one descriptor through the storage capability.

use platform::Storage;

use crate::layout::record_path;
use crate::record::{decode, DecodeError, Record, Tier, MAX_RECORD_SIZE};

/// Why a descriptor could not be loaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError<E: core::fmt::Debug> {
    /// The file could not be opened or read.
    #[error("storage error: {0:?}")]
    Storage(E),
    /// The bytes did not form a valid record.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Load the descriptor for entry `name` of `tier` under `parent`.
///
/// Reads at most [`MAX_RECORD_SIZE`] bytes; a short file surfaces as
/// [`DecodeError::Truncated`].
pub fn load_record<S: Storage>(
    storage: &mut S,
    parent: &str,
    name: &str,
    tier: Tier,
) -> Result<Record, LoadError<S::Error>> {
    load_path(storage, &record_path(parent, name, tier), tier)
}

/// Load a descriptor from an explicit card path.
pub fn load_path<S: Storage>(
    storage: &mut S,
    path: &str,
    tier: Tier,
) -> Result<Record, LoadError<S::Error>> {
    let mut buf = [0u8; MAX_RECORD_SIZE];
    let n = storage.read_prefix(path, &mut buf).map_err(LoadError::Storage)?;
    let bytes = buf.get(..n).unwrap_or(&[]);
    Ok(decode(bytes, tier)?)
}
