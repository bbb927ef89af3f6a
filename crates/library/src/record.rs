//! Descriptor record codec for the `.sdb` card format.
//!
//! Every catalog entry carries one fixed-length binary descriptor written by
//! the desktop packager. The device only ever reads them.
//!
//! Common layout (all multi-byte integers little-endian):
//! ```text
//! [0..4]   magic      4-byte ASCII tag, unique per tier
//! [4]      version    u8 = 1 (only on tiers that carry one, see Tier::has_version)
//!          or a tier number field
//! [5..8]   tier-specific counts / numbers / runtime
//! [8..]    fixed-width text fields, null-terminated within their width
//! [..SIZE] reserved tail
//! ```
//!
//! Text fields are read up to the first NUL inside the field (or the whole
//! width). Bytes after the terminator are padding and never inspected. The
//! packager truncates UTF-8 by bytes, so a split code point at the end of a
//! field is dropped rather than rejected.
//!
//! Fields are extracted by explicit offset; nothing here depends on host
//! struct layout or byte order.

use core::fmt::Write as _;
use core::ops::Range;

use heapless::String;

/// The only descriptor format version this codec understands.
pub const FORMAT_VERSION: u8 = 1;

/// Largest declared record length across all tiers.
pub const MAX_RECORD_SIZE: usize = 128;

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Error variants for descriptor decode operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// Input is shorter than the tier's declared length.
    #[error("record truncated")]
    Truncated,
    /// Bytes `[0..4]` are not the tier's magic tag.
    #[error("bad magic tag")]
    BadMagic,
    /// Version byte is not [`FORMAT_VERSION`].
    #[error("unsupported record version")]
    UnsupportedVersion,
}

// ---------------------------------------------------------------------------
// Tier
// ---------------------------------------------------------------------------

/// Every descriptor kind on the card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tier {
    /// TV show (`show.sdb`)
    Show,
    /// TV season (`S##/season.sdb`)
    Season,
    /// TV episode (`E##.sdb`)
    Episode,
    /// Movie (`movie.sdb`)
    Movie,
    /// Music video collection (`collection.sdb`)
    Collection,
    /// Music video (`V##.sdb`)
    Video,
    /// Music artist (`artist.sdb`)
    Artist,
    /// Music album (`A##/album.sdb`)
    MusicAlbum,
    /// Music track (`T##.sdb`)
    Track,
    /// Photo album (`album.sdb`)
    PhotoAlbum,
    /// Photo (`P##.sdb`)
    Photo,
    /// Video playlist (`playlist.sdb`)
    Playlist,
    /// Playlist video (`Y##.sdb`)
    PlaylistVideo,
}

impl Tier {
    /// All tiers in declaration order.
    pub const ALL: [Self; 13] = [
        Self::Show,
        Self::Season,
        Self::Episode,
        Self::Movie,
        Self::Collection,
        Self::Video,
        Self::Artist,
        Self::MusicAlbum,
        Self::Track,
        Self::PhotoAlbum,
        Self::Photo,
        Self::Playlist,
        Self::PlaylistVideo,
    ];

    /// The 4-byte magic tag at offset 0.
    pub const fn magic(self) -> &'static [u8; 4] {
        match self {
            Self::Show => b"SFTV",
            Self::Season => b"SFSN",
            Self::Episode => b"SFEP",
            Self::Movie => b"TJMV",
            Self::Collection => b"TJVC",
            Self::Video => b"TJVD",
            Self::Artist => b"TJMA",
            Self::MusicAlbum => b"TJAL",
            Self::Track => b"TJTK",
            Self::PhotoAlbum => b"TJPA",
            Self::Photo => b"TJPH",
            Self::Playlist => b"TJYP",
            Self::PlaylistVideo => b"TJYV",
        }
    }

    /// Exact declared record length in bytes.
    pub const fn size(self) -> usize {
        match self {
            Self::Season | Self::MusicAlbum | Self::Track | Self::PhotoAlbum | Self::Photo => 64,
            _ => 128,
        }
    }

    /// Whether byte 4 is a format version (otherwise it is a number field).
    pub const fn has_version(self) -> bool {
        matches!(
            self,
            Self::Show
                | Self::Movie
                | Self::Collection
                | Self::Artist
                | Self::PhotoAlbum
                | Self::Playlist
        )
    }

    /// Lower-case identifier used by tooling.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Show => "show",
            Self::Season => "season",
            Self::Episode => "episode",
            Self::Movie => "movie",
            Self::Collection => "collection",
            Self::Video => "video",
            Self::Artist => "artist",
            Self::MusicAlbum => "album",
            Self::Track => "track",
            Self::PhotoAlbum => "photo-album",
            Self::Photo => "photo",
            Self::Playlist => "playlist",
            Self::PlaylistVideo => "playlist-video",
        }
    }

    /// Inverse of [`Tier::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }
}

// ---------------------------------------------------------------------------
// Offset-based field extraction
// ---------------------------------------------------------------------------

/// A validated record buffer, exactly `tier.size()` bytes long.
struct Fields<'a> {
    buf: &'a [u8],
}

impl<'a> Fields<'a> {
    /// Check length, magic and (where present) version, in that order.
    fn validate(bytes: &'a [u8], tier: Tier) -> Result<Self, DecodeError> {
        let buf = bytes.get(..tier.size()).ok_or(DecodeError::Truncated)?;
        if buf.get(0..4) != Some(tier.magic().as_slice()) {
            return Err(DecodeError::BadMagic);
        }
        if tier.has_version() && buf.get(4).copied() != Some(FORMAT_VERSION) {
            return Err(DecodeError::UnsupportedVersion);
        }
        Ok(Self { buf })
    }

    fn u8_at(&self, offset: usize) -> u8 {
        self.buf.get(offset).copied().unwrap_or(0)
    }

    fn u16_le_at(&self, offset: usize) -> u16 {
        u16::from_le_bytes([self.u8_at(offset), self.u8_at(offset.saturating_add(1))])
    }

    /// Null-terminated text within `range`; `N` must be at least the width.
    fn text<const N: usize>(&self, range: Range<usize>) -> String<N> {
        let field = self.buf.get(range).unwrap_or(&[]);
        let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
        let raw = field.get(..end).unwrap_or(&[]);
        let text = match core::str::from_utf8(raw) {
            Ok(s) => s,
            Err(e) => raw
                .get(..e.valid_up_to())
                .and_then(|b| core::str::from_utf8(b).ok())
                .unwrap_or(""),
        };
        String::try_from(text).unwrap_or_default()
    }
}

/// A typed descriptor for one tier.
pub trait TierRecord: Sized {
    /// Tier this record decodes.
    const TIER: Tier;

    /// Build from a validated buffer.
    #[doc(hidden)]
    fn from_fields(f: &FieldsRef<'_>) -> Self;

    /// Decode from raw bytes.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Truncated`] if `bytes` is shorter than the tier's size,
    /// [`DecodeError::BadMagic`] on a tag mismatch,
    /// [`DecodeError::UnsupportedVersion`] on a version mismatch.
    fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        let fields = Fields::validate(bytes, Self::TIER)?;
        Ok(Self::from_fields(&FieldsRef(fields)))
    }
}

/// Opaque handle over a validated record buffer.
pub struct FieldsRef<'a>(Fields<'a>);

// ---------------------------------------------------------------------------
// TV
// ---------------------------------------------------------------------------

/// `show.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowRecord {
    /// Seasons on the card (byte 5).
    pub season_count: u8,
    /// Episodes across all seasons (bytes 6..8, LE).
    pub total_episodes: u16,
    /// Display name (bytes 8..56).
    pub name: String<48>,
    /// Release year as text (bytes 56..64).
    pub year: String<8>,
}

impl TierRecord for ShowRecord {
    const TIER: Tier = Tier::Show;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            season_count: f.u8_at(5),
            total_episodes: f.u16_le_at(6),
            name: f.text(8..56),
            year: f.text(56..64),
        }
    }
}

/// `season.sdb` — 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonRecord {
    /// Season number (byte 4).
    pub season_number: u8,
    /// Episodes in the season (byte 5).
    pub episode_count: u8,
    /// Release year as text (bytes 8..16).
    pub year: String<8>,
    /// Display title (bytes 16..40).
    pub title: String<24>,
}

impl TierRecord for SeasonRecord {
    const TIER: Tier = Tier::Season;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            season_number: f.u8_at(4),
            episode_count: f.u8_at(5),
            year: f.text(8..16),
            title: f.text(16..40),
        }
    }
}

/// `E##.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// Season number (byte 4).
    pub season_number: u8,
    /// Episode number within the season (byte 5).
    pub episode_number: u8,
    /// Runtime in minutes (bytes 6..8, LE).
    pub runtime_minutes: u16,
    /// Display title (bytes 8..56).
    pub title: String<48>,
    /// Original air date (bytes 56..68).
    pub air_date: String<12>,
    /// Synopsis (bytes 68..124).
    pub description: String<56>,
}

impl TierRecord for EpisodeRecord {
    const TIER: Tier = Tier::Episode;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            season_number: f.u8_at(4),
            episode_number: f.u8_at(5),
            runtime_minutes: f.u16_le_at(6),
            title: f.text(8..56),
            air_date: f.text(56..68),
            description: f.text(68..124),
        }
    }
}

// ---------------------------------------------------------------------------
// Movies and music videos
// ---------------------------------------------------------------------------

/// `movie.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieRecord {
    /// Runtime in minutes (bytes 6..8, LE).
    pub runtime_minutes: u16,
    /// Display title (bytes 8..56).
    pub title: String<48>,
    /// Release year as text (bytes 56..64).
    pub year: String<8>,
    /// Synopsis (bytes 64..120).
    pub description: String<56>,
}

impl TierRecord for MovieRecord {
    const TIER: Tier = Tier::Movie;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            runtime_minutes: f.u16_le_at(6),
            title: f.text(8..56),
            year: f.text(56..64),
            description: f.text(64..120),
        }
    }
}

/// `collection.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionRecord {
    /// Videos listed (byte 5).
    pub video_count: u8,
    /// Display name (bytes 8..56).
    pub name: String<48>,
    /// Release year as text (bytes 56..64).
    pub year: String<8>,
}

impl TierRecord for CollectionRecord {
    const TIER: Tier = Tier::Collection;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            video_count: f.u8_at(5),
            name: f.text(8..56),
            year: f.text(56..64),
        }
    }
}

/// `V##.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoRecord {
    /// Position in the list (byte 4).
    pub video_number: u8,
    /// Runtime in minutes (bytes 6..8, LE).
    pub runtime_minutes: u16,
    /// Display title (bytes 8..56).
    pub title: String<48>,
    /// Performing artist (bytes 56..68).
    pub artist: String<12>,
    /// Synopsis (bytes 68..124).
    pub description: String<56>,
}

impl TierRecord for VideoRecord {
    const TIER: Tier = Tier::Video;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            video_number: f.u8_at(4),
            runtime_minutes: f.u16_le_at(6),
            title: f.text(8..56),
            artist: f.text(56..68),
            description: f.text(68..124),
        }
    }
}

// ---------------------------------------------------------------------------
// Music
// ---------------------------------------------------------------------------

/// `artist.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistRecord {
    /// Albums by the artist (byte 5).
    pub album_count: u8,
    /// Tracks across all albums (bytes 6..8, LE).
    pub total_tracks: u16,
    /// Display name (bytes 8..56).
    pub name: String<48>,
    /// Genre (bytes 56..64).
    pub genre: String<8>,
}

impl TierRecord for ArtistRecord {
    const TIER: Tier = Tier::Artist;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            album_count: f.u8_at(5),
            total_tracks: f.u16_le_at(6),
            name: f.text(8..56),
            genre: f.text(56..64),
        }
    }
}

/// `A##/album.sdb` — 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicAlbumRecord {
    /// Album number (byte 4).
    pub album_number: u8,
    /// Tracks on the album (byte 5).
    pub track_count: u8,
    /// Release year as text (bytes 8..16).
    pub year: String<8>,
    /// Display title (bytes 16..40).
    pub title: String<24>,
}

impl TierRecord for MusicAlbumRecord {
    const TIER: Tier = Tier::MusicAlbum;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            album_number: f.u8_at(4),
            track_count: f.u8_at(5),
            year: f.text(8..16),
            title: f.text(16..40),
        }
    }
}

/// `T##.sdb` — 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Track number (byte 4).
    pub track_number: u8,
    /// Runtime in seconds (bytes 6..8, LE).
    pub runtime_seconds: u16,
    /// Display title (bytes 8..56).
    pub title: String<48>,
}

impl TierRecord for TrackRecord {
    const TIER: Tier = Tier::Track;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            track_number: f.u8_at(4),
            runtime_seconds: f.u16_le_at(6),
            title: f.text(8..56),
        }
    }
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// Photo `album.sdb` — 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoAlbumRecord {
    /// Photos in the album (byte 5).
    pub photo_count: u8,
    /// Display title (bytes 8..56).
    pub title: String<48>,
}

impl TierRecord for PhotoAlbumRecord {
    const TIER: Tier = Tier::PhotoAlbum;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            photo_count: f.u8_at(5),
            title: f.text(8..56),
        }
    }
}

/// `P##.sdb` — 64 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    /// Photo number (byte 4).
    pub photo_number: u8,
    /// Caption (bytes 8..56).
    pub caption: String<48>,
    /// Capture date (bytes 56..64).
    pub date_taken: String<8>,
}

impl TierRecord for PhotoRecord {
    const TIER: Tier = Tier::Photo;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            photo_number: f.u8_at(4),
            caption: f.text(8..56),
            date_taken: f.text(56..64),
        }
    }
}

// ---------------------------------------------------------------------------
// Playlists
// ---------------------------------------------------------------------------

/// `playlist.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistRecord {
    /// Videos listed (byte 5).
    pub video_count: u8,
    /// Display name (bytes 8..56).
    pub name: String<48>,
    /// Release year as text (bytes 56..64).
    pub year: String<8>,
    /// Channel or uploader (bytes 64..88).
    pub uploader: String<24>,
}

impl TierRecord for PlaylistRecord {
    const TIER: Tier = Tier::Playlist;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            video_count: f.u8_at(5),
            name: f.text(8..56),
            year: f.text(56..64),
            uploader: f.text(64..88),
        }
    }
}

/// `Y##.sdb` — 128 bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistVideoRecord {
    /// Position in the list (byte 4).
    pub video_number: u8,
    /// Runtime in minutes (bytes 6..8, LE).
    pub runtime_minutes: u16,
    /// Display title (bytes 8..56).
    pub title: String<48>,
    /// Channel or uploader (bytes 56..68).
    pub uploader: String<12>,
    /// Upload date (bytes 68..80).
    pub upload_date: String<12>,
    /// Synopsis (bytes 80..124).
    pub description: String<44>,
}

impl TierRecord for PlaylistVideoRecord {
    const TIER: Tier = Tier::PlaylistVideo;

    fn from_fields(FieldsRef(f): &FieldsRef<'_>) -> Self {
        Self {
            video_number: f.u8_at(4),
            runtime_minutes: f.u16_le_at(6),
            title: f.text(8..56),
            uploader: f.text(56..68),
            upload_date: f.text(68..80),
            description: f.text(80..124),
        }
    }
}

// ---------------------------------------------------------------------------
// Record — any tier
// ---------------------------------------------------------------------------

/// A decoded descriptor of any tier.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)] // one variant per record struct
pub enum Record {
    Show(ShowRecord),
    Season(SeasonRecord),
    Episode(EpisodeRecord),
    Movie(MovieRecord),
    Collection(CollectionRecord),
    Video(VideoRecord),
    Artist(ArtistRecord),
    MusicAlbum(MusicAlbumRecord),
    Track(TrackRecord),
    PhotoAlbum(PhotoAlbumRecord),
    Photo(PhotoRecord),
    Playlist(PlaylistRecord),
    PlaylistVideo(PlaylistVideoRecord),
}

impl Record {
    /// Tier of the contained record.
    pub fn tier(&self) -> Tier {
        match self {
            Self::Show(_) => Tier::Show,
            Self::Season(_) => Tier::Season,
            Self::Episode(_) => Tier::Episode,
            Self::Movie(_) => Tier::Movie,
            Self::Collection(_) => Tier::Collection,
            Self::Video(_) => Tier::Video,
            Self::Artist(_) => Tier::Artist,
            Self::MusicAlbum(_) => Tier::MusicAlbum,
            Self::Track(_) => Tier::Track,
            Self::PhotoAlbum(_) => Tier::PhotoAlbum,
            Self::Photo(_) => Tier::Photo,
            Self::Playlist(_) => Tier::Playlist,
            Self::PlaylistVideo(_) => Tier::PlaylistVideo,
        }
    }

    /// Primary display label (name, title or caption).
    pub fn label(&self) -> &str {
        match self {
            Self::Show(r) => &r.name,
            Self::Season(r) => &r.title,
            Self::Episode(r) => &r.title,
            Self::Movie(r) => &r.title,
            Self::Collection(r) => &r.name,
            Self::Video(r) => &r.title,
            Self::Artist(r) => &r.name,
            Self::MusicAlbum(r) => &r.title,
            Self::Track(r) => &r.title,
            Self::PhotoAlbum(r) => &r.title,
            Self::Photo(r) => &r.caption,
            Self::Playlist(r) => &r.name,
            Self::PlaylistVideo(r) => &r.title,
        }
    }
}

/// Decode `bytes` as a descriptor of `tier`.
///
/// # Errors
///
/// See [`TierRecord::decode`].
pub fn decode(bytes: &[u8], tier: Tier) -> Result<Record, DecodeError> {
    Ok(match tier {
        Tier::Show => Record::Show(ShowRecord::decode(bytes)?),
        Tier::Season => Record::Season(SeasonRecord::decode(bytes)?),
        Tier::Episode => Record::Episode(EpisodeRecord::decode(bytes)?),
        Tier::Movie => Record::Movie(MovieRecord::decode(bytes)?),
        Tier::Collection => Record::Collection(CollectionRecord::decode(bytes)?),
        Tier::Video => Record::Video(VideoRecord::decode(bytes)?),
        Tier::Artist => Record::Artist(ArtistRecord::decode(bytes)?),
        Tier::MusicAlbum => Record::MusicAlbum(MusicAlbumRecord::decode(bytes)?),
        Tier::Track => Record::Track(TrackRecord::decode(bytes)?),
        Tier::PhotoAlbum => Record::PhotoAlbum(PhotoAlbumRecord::decode(bytes)?),
        Tier::Photo => Record::Photo(PhotoRecord::decode(bytes)?),
        Tier::Playlist => Record::Playlist(PlaylistRecord::decode(bytes)?),
        Tier::PlaylistVideo => Record::PlaylistVideo(PlaylistVideoRecord::decode(bytes)?),
    })
}

// ---------------------------------------------------------------------------
// Display helpers
// ---------------------------------------------------------------------------

/// `H:MM` for a runtime in minutes (`0:22`, `2:05`).
#[must_use]
pub fn format_runtime_minutes(minutes: u16) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}", minutes / 60, minutes % 60);
    s
}

/// `M:SS` for a runtime in seconds (`3:07`).
#[must_use]
pub fn format_runtime_seconds(seconds: u16) -> String<8> {
    let mut s = String::new();
    let _ = write!(s, "{}:{:02}", seconds / 60, seconds % 60);
    s
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
mod tests {
    use super::*;

    fn blank(tier: Tier) -> Vec<u8> {
        let mut buf = vec![0u8; tier.size()];
        buf[0..4].copy_from_slice(tier.magic());
        if tier.has_version() {
            buf[4] = FORMAT_VERSION;
        }
        buf
    }

    fn put_text(buf: &mut [u8], range: Range<usize>, text: &str) {
        let bytes = text.as_bytes();
        let n = bytes.len().min(range.len());
        buf[range.start..range.start + n].copy_from_slice(&bytes[..n]);
    }

    #[test]
    fn decodes_seinfeld_show() {
        let mut buf = blank(Tier::Show);
        buf[5] = 3;
        buf[6] = 0x18;
        buf[7] = 0x00;
        put_text(&mut buf, 8..56, "Seinfeld");
        let show = ShowRecord::decode(&buf).unwrap();
        assert_eq!(show.season_count, 3);
        assert_eq!(show.total_episodes, 24);
        assert_eq!(show.name.as_str(), "Seinfeld");
        assert_eq!(show.year.as_str(), "");
    }

    #[test]
    fn record_sizes_match_layout() {
        for tier in Tier::ALL {
            assert!(tier.size() == 64 || tier.size() == 128);
            assert!(tier.size() <= MAX_RECORD_SIZE);
        }
        assert_eq!(Tier::Show.size(), 128);
        assert_eq!(Tier::Season.size(), 64);
        assert_eq!(Tier::Track.size(), 64);
        assert_eq!(Tier::PlaylistVideo.size(), 128);
    }

    #[test]
    fn magic_tags_are_unique() {
        for (i, a) in Tier::ALL.iter().enumerate() {
            for b in &Tier::ALL[i + 1..] {
                assert_ne!(a.magic(), b.magic());
            }
        }
    }

    #[test]
    fn short_buffer_is_truncated() {
        let buf = blank(Tier::Episode);
        assert_eq!(decode(&buf[..127], Tier::Episode), Err(DecodeError::Truncated));
        assert_eq!(decode(&[], Tier::Photo), Err(DecodeError::Truncated));
    }

    #[test]
    fn truncation_checked_before_magic() {
        assert_eq!(decode(b"NOPE", Tier::Show), Err(DecodeError::Truncated));
    }

    #[test]
    fn wrong_tier_is_bad_magic() {
        let buf = blank(Tier::Movie);
        assert_eq!(decode(&buf, Tier::Video), Err(DecodeError::BadMagic));
    }

    #[test]
    fn wrong_version_rejected_on_versioned_tiers() {
        let mut buf = blank(Tier::Artist);
        buf[4] = 2;
        assert_eq!(decode(&buf, Tier::Artist), Err(DecodeError::UnsupportedVersion));
    }

    #[test]
    fn byte_four_is_a_number_on_unversioned_tiers() {
        let mut buf = blank(Tier::Episode);
        buf[4] = 7;
        buf[5] = 12;
        buf[6] = 0x2C;
        buf[7] = 0x01;
        put_text(&mut buf, 8..56, "The Contest");
        put_text(&mut buf, 56..68, "1992-11-18");
        put_text(&mut buf, 68..124, "Jerry and friends make a bet.");
        let Record::Episode(ep) = decode(&buf, Tier::Episode).unwrap() else {
            panic!("wrong variant");
        };
        assert_eq!(ep.season_number, 7);
        assert_eq!(ep.episode_number, 12);
        assert_eq!(ep.runtime_minutes, 300);
        assert_eq!(ep.air_date.as_str(), "1992-11-18");
        assert_eq!(ep.description.as_str(), "Jerry and friends make a bet.");
    }

    #[test]
    fn padding_after_terminator_is_ignored() {
        let mut buf = blank(Tier::Track);
        put_text(&mut buf, 8..56, "Intro");
        buf[13] = 0;
        buf[14..56].fill(0xAA);
        let track = TrackRecord::decode(&buf).unwrap();
        assert_eq!(track.title.as_str(), "Intro");
    }

    #[test]
    fn unterminated_field_uses_full_width() {
        let mut buf = blank(Tier::Photo);
        put_text(&mut buf, 56..64, "20240101");
        let photo = PhotoRecord::decode(&buf).unwrap();
        assert_eq!(photo.date_taken.as_str(), "20240101");
    }

    #[test]
    fn empty_field_when_first_byte_is_terminator() {
        let mut buf = blank(Tier::Playlist);
        buf[8] = 0;
        buf[9..56].fill(b'x');
        let pl = PlaylistRecord::decode(&buf).unwrap();
        assert_eq!(pl.name.as_str(), "");
    }

    #[test]
    fn split_utf8_tail_is_dropped() {
        let mut buf = blank(Tier::MusicAlbum);
        // 23 ASCII bytes then the first byte of "é" fills the 24-byte title.
        put_text(&mut buf, 16..40, "abcdefghijklmnopqrstuvw");
        buf[39] = 0xC3;
        let album = MusicAlbumRecord::decode(&buf).unwrap();
        assert_eq!(album.title.as_str(), "abcdefghijklmnopqrstuvw");
    }

    #[test]
    fn longer_buffer_decodes_declared_prefix() {
        let mut buf = blank(Tier::Season);
        buf[4] = 2;
        buf[5] = 22;
        put_text(&mut buf, 16..40, "Season 2");
        buf.extend_from_slice(&[0xFF; 64]);
        let season = SeasonRecord::decode(&buf).unwrap();
        assert_eq!(season.season_number, 2);
        assert_eq!(season.episode_count, 22);
        assert_eq!(season.title.as_str(), "Season 2");
    }

    #[test]
    fn little_endian_regardless_of_host() {
        let mut buf = blank(Tier::Movie);
        buf[6] = 0x34;
        buf[7] = 0x12;
        let movie = MovieRecord::decode(&buf).unwrap();
        assert_eq!(movie.runtime_minutes, 0x1234);
    }

    #[test]
    fn playlist_video_fields() {
        let mut buf = blank(Tier::PlaylistVideo);
        buf[4] = 3;
        buf[6] = 12;
        put_text(&mut buf, 8..56, "Cooking Pasta");
        put_text(&mut buf, 56..68, "ChefJoe");
        put_text(&mut buf, 68..80, "2023-05-01");
        put_text(&mut buf, 80..124, "How to boil water");
        let v = PlaylistVideoRecord::decode(&buf).unwrap();
        assert_eq!(v.video_number, 3);
        assert_eq!(v.runtime_minutes, 12);
        assert_eq!(v.uploader.as_str(), "ChefJoe");
        assert_eq!(v.upload_date.as_str(), "2023-05-01");
        assert_eq!(v.description.as_str(), "How to boil water");
    }

    #[test]
    fn record_label_and_tier() {
        let mut buf = blank(Tier::Artist);
        put_text(&mut buf, 8..56, "Björk");
        put_text(&mut buf, 56..64, "Pop");
        let rec = decode(&buf, Tier::Artist).unwrap();
        assert_eq!(rec.tier(), Tier::Artist);
        assert_eq!(rec.label(), "Björk");
    }

    #[test]
    fn tier_names_roundtrip() {
        for tier in Tier::ALL {
            assert_eq!(Tier::from_name(tier.name()), Some(tier));
        }
        assert_eq!(Tier::from_name("bogus"), None);
    }

    #[test]
    fn runtime_formatting() {
        assert_eq!(format_runtime_minutes(22).as_str(), "0:22");
        assert_eq!(format_runtime_minutes(125).as_str(), "2:05");
        assert_eq!(format_runtime_seconds(187).as_str(), "3:07");
    }
}
