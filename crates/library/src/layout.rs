//! Card file layout: media roots, per-tier naming and path builders.
//!
//! The packager writes one root directory per media type:
//!
//! ```text
//! /TV/{show}/show.sdb
//!           /S01/season.sdb
//!               /E01.sdb  E01.avi  E01.raw
//! /Movies/{movie}/movie.sdb  movie.avi  movie.raw
//! /MusicVideos/{collection}/collection.sdb  V01.sdb  V01.avi  V01.raw
//! /Music/{artist}/artist.sdb  artist.raw
//!               /A01/album.sdb  album.raw  T01.sdb  T01.avi
//! /Photos/{album}/album.sdb  album.raw  P01.sdb  P01.raw
//! /YouTube/{playlist}/playlist.sdb  Y01.sdb  Y01.avi
//! /settings.txt
//! ```
//!
//! Every thumbnail sits next to its descriptor with `.raw` in place of
//! `.sdb`. A photo's `P##.raw` is the full-screen image rather than a
//! thumbnail.

use heapless::String;

use crate::record::Tier;

/// Capacity of a card path buffer.
pub const PATH_LEN: usize = 96;

/// Card-absolute path (`/TV/Seinfeld/S01/E01.sdb`).
pub type CardPath = String<PATH_LEN>;

/// Settings file in the card root.
pub const SETTINGS_FILE: &str = "/settings.txt";

/// Season thumbnail, inside the `S##` directory.
pub const SEASON_THUMBNAIL: &str = "thumb.raw";

const RECORD_EXT: &str = ".sdb";

/// Top-level media taxonomies, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediaType {
    /// TV shows → seasons → episodes
    Tv,
    /// Movies (single tier)
    Movies,
    /// Music video collections → videos
    MusicVideos,
    /// Artists → albums → tracks
    Music,
    /// Photo albums → slideshow
    Photos,
    /// Video playlists → videos
    YouTube,
}

impl MediaType {
    /// All media types in menu order.
    pub const ALL: [Self; 6] = [
        Self::Tv,
        Self::Movies,
        Self::MusicVideos,
        Self::Music,
        Self::Photos,
        Self::YouTube,
    ];

    /// Root directory on the card.
    pub const fn root_dir(self) -> &'static str {
        match self {
            Self::Tv => "/TV",
            Self::Movies => "/Movies",
            Self::MusicVideos => "/MusicVideos",
            Self::Music => "/Music",
            Self::Photos => "/Photos",
            Self::YouTube => "/YouTube",
        }
    }

    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tv => "TV Shows",
            Self::Movies => "Movies",
            Self::MusicVideos => "Music Videos",
            Self::Music => "Music",
            Self::Photos => "Photos",
            Self::YouTube => "YouTube",
        }
    }

    /// Tier listed directly under the root directory.
    pub const fn top_tier(self) -> Tier {
        match self {
            Self::Tv => Tier::Show,
            Self::Movies => Tier::Movie,
            Self::MusicVideos => Tier::Collection,
            Self::Music => Tier::Artist,
            Self::Photos => Tier::PhotoAlbum,
            Self::YouTube => Tier::Playlist,
        }
    }
}

/// How entries of one tier are named inside their parent directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingScheme {
    /// Any non-hidden directory holding `descriptor`.
    NamedDir {
        /// Descriptor file name inside the directory.
        descriptor: &'static str,
    },
    /// `<prefix>##` directory holding `descriptor`.
    NumberedDir {
        /// Upper-case prefix letter.
        prefix: u8,
        /// Descriptor file name inside the directory.
        descriptor: &'static str,
    },
    /// `<prefix>##.sdb` file.
    NumberedFile {
        /// Upper-case prefix letter.
        prefix: u8,
    },
}

impl NamingScheme {
    /// Whether a listing entry belongs to this scheme.
    ///
    /// Prefix letter and `.sdb` extension match case-insensitively.
    pub fn accepts(self, name: &str, is_dir: bool) -> bool {
        match self {
            Self::NamedDir { .. } => is_dir && !name.is_empty() && !name.starts_with('.'),
            Self::NumberedDir { prefix, .. } => is_dir && entry_number(name, prefix).is_some(),
            Self::NumberedFile { prefix } => {
                !is_dir
                    && strip_record_ext(name)
                        .is_some_and(|stem| entry_number(stem, prefix).is_some())
            }
        }
    }
}

impl Tier {
    /// Naming scheme for entries of this tier.
    pub const fn naming(self) -> NamingScheme {
        use NamingScheme::{NamedDir, NumberedDir, NumberedFile};
        match self {
            Self::Show => NamedDir { descriptor: "show.sdb" },
            Self::Season => NumberedDir { prefix: b'S', descriptor: "season.sdb" },
            Self::Episode => NumberedFile { prefix: b'E' },
            Self::Movie => NamedDir { descriptor: "movie.sdb" },
            Self::Collection => NamedDir { descriptor: "collection.sdb" },
            Self::Video => NumberedFile { prefix: b'V' },
            Self::Artist => NamedDir { descriptor: "artist.sdb" },
            Self::MusicAlbum => NumberedDir { prefix: b'A', descriptor: "album.sdb" },
            Self::Track => NumberedFile { prefix: b'T' },
            Self::PhotoAlbum => NamedDir { descriptor: "album.sdb" },
            Self::Photo => NumberedFile { prefix: b'P' },
            Self::Playlist => NamedDir { descriptor: "playlist.sdb" },
            Self::PlaylistVideo => NumberedFile { prefix: b'Y' },
        }
    }

    /// Maximum entries kept when scanning this tier.
    pub const fn capacity(self) -> usize {
        match self {
            Self::Show => 10,
            Self::Movie | Self::Collection | Self::Artist | Self::PhotoAlbum | Self::Playlist => 20,
            Self::Season => 30,
            _ => 99,
        }
    }

    /// Tier one level below this one, if any.
    pub const fn child(self) -> Option<Self> {
        match self {
            Self::Show => Some(Self::Season),
            Self::Season => Some(Self::Episode),
            Self::Collection => Some(Self::Video),
            Self::Artist => Some(Self::MusicAlbum),
            Self::MusicAlbum => Some(Self::Track),
            Self::PhotoAlbum => Some(Self::Photo),
            Self::Playlist => Some(Self::PlaylistVideo),
            _ => None,
        }
    }

    /// Extension of the playable file next to the descriptor, for leaf tiers.
    pub const fn media_ext(self) -> Option<&'static str> {
        match self {
            Self::Episode | Self::Movie | Self::Video | Self::Track | Self::PlaylistVideo => {
                Some(".avi")
            }
            Self::Photo => Some(".raw"),
            _ => None,
        }
    }
}

/// Two-digit number after `prefix` (`S03` → 3). Exactly three characters.
pub fn entry_number(name: &str, prefix: u8) -> Option<u8> {
    match name.as_bytes() {
        [p, tens, ones] if p.eq_ignore_ascii_case(&prefix) => {
            let tens = digit(*tens)?;
            let ones = digit(*ones)?;
            Some(tens.saturating_mul(10).saturating_add(ones))
        }
        _ => None,
    }
}

fn digit(b: u8) -> Option<u8> {
    b.is_ascii_digit().then(|| b.wrapping_sub(b'0'))
}

fn strip_record_ext(name: &str) -> Option<&str> {
    let split = name.len().checked_sub(RECORD_EXT.len())?;
    let (stem, ext) = (name.get(..split)?, name.get(split..)?);
    ext.eq_ignore_ascii_case(RECORD_EXT).then_some(stem)
}

/// `{parent}/{name}` with no doubled separator at the card root.
///
/// Overlong input is cut at the buffer capacity; the result then fails to
/// open rather than aliasing another entry.
#[must_use]
pub fn join(parent: &str, name: &str) -> CardPath {
    let mut s = CardPath::new();
    let _ = s.push_str(parent.trim_end_matches('/'));
    let _ = s.push('/');
    for c in name.chars() {
        if s.push(c).is_err() {
            break;
        }
    }
    s
}

/// Path of the descriptor for entry `name` of `tier` under `parent`.
///
/// ```
/// use library::layout::record_path;
/// use library::Tier;
/// assert_eq!(record_path("/TV", "Seinfeld", Tier::Show).as_str(), "/TV/Seinfeld/show.sdb");
/// assert_eq!(record_path("/TV/Seinfeld/S01", "E02.sdb", Tier::Episode).as_str(), "/TV/Seinfeld/S01/E02.sdb");
/// ```
#[must_use]
pub fn record_path(parent: &str, name: &str, tier: Tier) -> CardPath {
    match tier.naming() {
        NamingScheme::NamedDir { descriptor } | NamingScheme::NumberedDir { descriptor, .. } => {
            join(&join(parent, name), descriptor)
        }
        NamingScheme::NumberedFile { .. } => join(parent, name),
    }
}

/// Directory whose children form the next tier (`/TV/Seinfeld`).
#[must_use]
pub fn child_dir(parent: &str, name: &str) -> CardPath {
    join(parent, name)
}

/// Playable file for a leaf entry (`E01.avi`, `movie.avi`, `P01.raw`).
///
/// `None` for tiers that only hold other entries.
#[must_use]
pub fn media_path(parent: &str, name: &str, tier: Tier) -> Option<CardPath> {
    let ext = tier.media_ext()?;
    Some(with_ext(&record_path(parent, name, tier), ext))
}

/// Thumbnail image for an entry (`show.raw`, `S01/thumb.raw`, `E01.raw`).
///
/// Seasons keep theirs as [`SEASON_THUMBNAIL`] inside the season directory.
/// Tracks have none of their own; the album's thumbnail stands in.
#[must_use]
pub fn thumbnail_path(parent: &str, name: &str, tier: Tier) -> Option<CardPath> {
    match tier {
        Tier::Season => Some(join(&child_dir(parent, name), SEASON_THUMBNAIL)),
        Tier::Track => None,
        _ => Some(with_ext(&record_path(parent, name, tier), ".raw")),
    }
}

fn with_ext(record: &str, ext: &str) -> CardPath {
    let stem = strip_record_ext(record).unwrap_or(record);
    let mut s = CardPath::new();
    let _ = s.push_str(stem);
    let _ = s.push_str(ext);
    s
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn roots_are_absolute_and_distinct() {
        for (i, a) in MediaType::ALL.iter().enumerate() {
            assert!(a.root_dir().starts_with('/'));
            for b in MediaType::ALL.iter().skip(i + 1) {
                assert_ne!(a.root_dir(), b.root_dir());
            }
        }
    }

    #[test]
    fn entry_number_parses_two_digits() {
        assert_eq!(entry_number("S01", b'S'), Some(1));
        assert_eq!(entry_number("s12", b'S'), Some(12));
        assert_eq!(entry_number("S1", b'S'), None);
        assert_eq!(entry_number("S001", b'S'), None);
        assert_eq!(entry_number("E01", b'S'), None);
        assert_eq!(entry_number("Sx1", b'S'), None);
    }

    #[test]
    fn named_dir_rejects_hidden_and_files() {
        let scheme = Tier::Show.naming();
        assert!(scheme.accepts("Seinfeld", true));
        assert!(!scheme.accepts(".Trashes", true));
        assert!(!scheme.accepts("notes.txt", false));
    }

    #[test]
    fn numbered_file_matches_case_insensitively() {
        let scheme = Tier::Episode.naming();
        assert!(scheme.accepts("E01.sdb", false));
        assert!(scheme.accepts("e07.SDB", false));
        assert!(!scheme.accepts("E01.avi", false));
        assert!(!scheme.accepts("E01.raw", false));
        assert!(!scheme.accepts("E01.sdb", true));
        assert!(!scheme.accepts(".sdb", false));
    }

    #[test]
    fn numbered_dir_needs_directory() {
        let scheme = Tier::Season.naming();
        assert!(scheme.accepts("S02", true));
        assert!(!scheme.accepts("S02", false));
        assert!(!scheme.accepts("Specials", true));
    }

    #[test]
    fn capacities() {
        assert_eq!(Tier::Show.capacity(), 10);
        assert_eq!(Tier::Movie.capacity(), 20);
        assert_eq!(Tier::Season.capacity(), 30);
        assert_eq!(Tier::Episode.capacity(), 99);
        assert_eq!(Tier::Photo.capacity(), 99);
    }

    #[test]
    fn record_paths_per_scheme() {
        assert_eq!(
            record_path("/TV/Seinfeld", "S01", Tier::Season).as_str(),
            "/TV/Seinfeld/S01/season.sdb"
        );
        assert_eq!(
            record_path("/Music/Queen", "A02", Tier::MusicAlbum).as_str(),
            "/Music/Queen/A02/album.sdb"
        );
        assert_eq!(
            record_path("/Photos/Trip", "P03.sdb", Tier::Photo).as_str(),
            "/Photos/Trip/P03.sdb"
        );
    }

    #[test]
    fn join_at_root_has_single_separator() {
        assert_eq!(join("/", "settings.txt").as_str(), SETTINGS_FILE);
        assert_eq!(join("/TV/", "Frasier").as_str(), "/TV/Frasier");
    }

    #[test]
    fn media_paths_for_leaves() {
        assert_eq!(
            media_path("/TV/Seinfeld/S01", "E01.sdb", Tier::Episode).unwrap().as_str(),
            "/TV/Seinfeld/S01/E01.avi"
        );
        assert_eq!(
            media_path("/Movies", "Heat", Tier::Movie).unwrap().as_str(),
            "/Movies/Heat/movie.avi"
        );
        assert_eq!(
            media_path("/Photos/Trip", "P01.sdb", Tier::Photo).unwrap().as_str(),
            "/Photos/Trip/P01.raw"
        );
        assert!(media_path("/TV", "Seinfeld", Tier::Show).is_none());
    }

    #[test]
    fn thumbnails_sit_next_to_descriptors() {
        assert_eq!(
            thumbnail_path("/Music", "Queen", Tier::Artist).unwrap().as_str(),
            "/Music/Queen/artist.raw"
        );
        assert_eq!(
            thumbnail_path("/MusicVideos/Hits", "V04.sdb", Tier::Video).unwrap().as_str(),
            "/MusicVideos/Hits/V04.raw"
        );
    }

    #[test]
    fn season_thumbnail_is_thumb_raw() {
        assert_eq!(
            thumbnail_path("/TV/Seinfeld", "S01", Tier::Season).unwrap().as_str(),
            "/TV/Seinfeld/S01/thumb.raw"
        );
        assert!(thumbnail_path("/Music/Queen/A01", "T01.sdb", Tier::Track).is_none());
    }

    #[test]
    fn child_tiers_end_at_leaves() {
        assert_eq!(Tier::Show.child(), Some(Tier::Season));
        assert_eq!(Tier::Season.child(), Some(Tier::Episode));
        assert_eq!(Tier::Episode.child(), None);
        assert_eq!(Tier::Movie.child(), None);
        for media in MediaType::ALL {
            let mut tier = media.top_tier();
            while let Some(next) = tier.child() {
                tier = next;
            }
            assert!(tier.media_ext().is_some());
        }
    }

    #[test]
    fn overlong_join_is_bounded() {
        let long = "x".repeat(200);
        assert_eq!(join("/TV", &long).len(), PATH_LEN);
    }
}
