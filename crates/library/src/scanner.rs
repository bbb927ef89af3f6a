//! Scanner — lists one directory and keeps the entries a tier accepts.

use platform::Storage;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::record::Tier;

/// Stateless helper for per-tier directory scans.
pub struct Scanner;

impl Scanner {
    /// Returns `true` when a listing entry names an entry of `tier`.
    ///
    /// Named tiers take any non-hidden directory; numbered tiers take
    /// `<P>##` directories or `<P>##.sdb` files. Prefix and extension match
    /// case-insensitively.
    pub fn matches(name: &str, is_dir: bool, tier: Tier) -> bool {
        tier.naming().accepts(name, is_dir)
    }

    /// Scan `parent` for entries of `tier`.
    ///
    /// The catalog is capped at the tier's capacity and sorted ascending.
    /// A listing failure (missing directory, I/O error) yields an empty
    /// catalog.
    pub fn scan<S: Storage>(storage: &mut S, parent: &str, tier: Tier) -> Catalog {
        let mut catalog = Catalog::with_limit(tier.capacity());
        let mut skipped: usize = 0;
        let listed = storage.list_dir(parent, &mut |entry| {
            if Self::matches(entry.name, entry.is_dir, tier) && !catalog.insert(entry.name) {
                skipped = skipped.saturating_add(1);
            }
        });
        if let Err(e) = listed {
            warn!(parent, tier = tier.name(), error = ?e, "directory listing failed");
            catalog.clear();
            return catalog;
        }
        if catalog.truncated() || skipped > 0 {
            debug!(
                parent,
                tier = tier.name(),
                kept = catalog.len(),
                skipped,
                "catalog truncated"
            );
        }
        catalog
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use platform::mocks::MockStorage;

    #[test]
    fn scan_filters_by_scheme() {
        let mut card = MockStorage::new();
        card.add_file("/TV/Seinfeld/S01/E01.sdb", [0u8; 1])
            .add_file("/TV/Seinfeld/S01/E01.avi", [0u8; 1])
            .add_file("/TV/Seinfeld/S01/E01.raw", [0u8; 1])
            .add_file("/TV/Seinfeld/S01/e02.SDB", [0u8; 1])
            .add_file("/TV/Seinfeld/S01/season.sdb", [0u8; 1])
            .add_dir("/TV/Seinfeld/S01/E03");
        let cat = Scanner::scan(&mut card, "/TV/Seinfeld/S01", Tier::Episode);
        assert_eq!(cat.iter().collect::<Vec<_>>(), ["E01.sdb", "e02.SDB"]);
    }

    #[test]
    fn scan_named_dirs_skips_hidden_and_files() {
        let mut card = MockStorage::new();
        card.add_file("/Movies/Heat/movie.sdb", [0u8; 1])
            .add_dir("/Movies/.Spotlight-V100")
            .add_file("/Movies/readme.txt", [0u8; 1]);
        let cat = Scanner::scan(&mut card, "/Movies", Tier::Movie);
        assert_eq!(cat.iter().collect::<Vec<_>>(), ["Heat"]);
    }

    #[test]
    fn missing_directory_yields_empty_catalog() {
        let mut card = MockStorage::new();
        let cat = Scanner::scan(&mut card, "/YouTube", Tier::Playlist);
        assert!(cat.is_empty());
    }

    #[test]
    fn show_capacity_is_ten() {
        let mut card = MockStorage::new();
        for i in 0..15 {
            card.add_dir(&format!("/TV/Show{i:02}"));
        }
        let cat = Scanner::scan(&mut card, "/TV", Tier::Show);
        assert_eq!(cat.len(), 10);
        assert!(cat.truncated());
        assert_eq!(cat.get(9), Some("Show09"));
    }

    #[test]
    fn listing_order_does_not_change_result() {
        let mut forward = MockStorage::new();
        let mut reverse = MockStorage::new();
        for i in 1..=40 {
            forward.add_dir(&format!("/TV/Show/S{i:02}"));
            reverse.add_dir(&format!("/TV/Show/S{i:02}"));
        }
        reverse.reverse_listing(true);
        let a = Scanner::scan(&mut forward, "/TV/Show", Tier::Season);
        let b = Scanner::scan(&mut reverse, "/TV/Show", Tier::Season);
        assert_eq!(a, b);
        assert_eq!(a.len(), 30);
        assert_eq!(a.get(29), Some("S30"));
    }
}
