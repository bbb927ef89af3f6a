//! Catalog — fixed-capacity, sorted list of entry names for one tier.
//!
//! A catalog holds the directory or file names a scan accepted, kept in
//! ascending byte order. When more entries exist than the tier allows, the
//! lexicographically smallest names are kept, so the outcome never depends
//! on the order the filesystem listed them in.

use heapless::{String, Vec};

/// Largest tier capacity (two-digit numbering).
pub const MAX_ENTRIES: usize = 99;

/// Longest entry name stored, in bytes.
pub const NAME_LEN: usize = 32;

/// One entry name (`Seinfeld`, `S01`, `E03.sdb`).
pub type EntryName = String<NAME_LEN>;

/// Fixed-capacity sorted catalog.
///
/// `N` bounds storage; `limit` (at most `N`) is the tier's own capacity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<const N: usize = MAX_ENTRIES> {
    names: Vec<EntryName, N>,
    limit: usize,
    truncated: bool,
}

impl<const N: usize> Catalog<N> {
    /// Empty catalog holding up to `N` names.
    pub const fn new() -> Self {
        Self { names: Vec::new(), limit: N, truncated: false }
    }

    /// Empty catalog holding up to `min(limit, N)` names.
    pub fn with_limit(limit: usize) -> Self {
        Self { names: Vec::new(), limit: limit.min(N), truncated: false }
    }

    /// Insert `name` in sorted position.
    ///
    /// Returns `false` if the name was not kept: too long, a duplicate, or
    /// larger than every name in a full catalog. Inserting into a full
    /// catalog evicts the largest name.
    pub fn insert(&mut self, name: &str) -> bool {
        let Ok(name) = EntryName::try_from(name) else {
            return false;
        };
        let pos = match self.names.binary_search(&name) {
            Ok(_) => return false,
            Err(pos) => pos,
        };
        if self.names.len() >= self.limit {
            self.truncated = true;
            if pos >= self.limit {
                return false;
            }
            self.names.pop();
        }
        self.names.insert(pos, name).is_ok()
    }

    /// Name at `index`.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Position of `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n.as_str() == name)
    }

    /// Number of names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` when the catalog holds no names.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Capacity in effect for this catalog.
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Whether any name was dropped for capacity.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Remove all names, keeping the limit.
    pub fn clear(&mut self) {
        self.names.clear();
        self.truncated = false;
    }

    /// Names in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl<const N: usize> Default for Catalog<N> {
    fn default() -> Self {
        Self::new()
    }
}
