//! Application context — the single state object the navigator owns.
//!
//! Holds the current state, the media menu, one [`TierNav`] per hierarchy
//! level, the resident record for each level, transition bookkeeping and
//! the live settings. The renderer reads it through
//! [`Navigator::context`](crate::navigation::Navigator::context); only the
//! navigator mutates it.

use heapless::Vec;
use library::layout::{media_path, thumbnail_path, CardPath};
use library::record::{
    ArtistRecord, CollectionRecord, EpisodeRecord, MovieRecord, MusicAlbumRecord,
    PhotoAlbumRecord, PhotoRecord, PlaylistRecord, PlaylistVideoRecord, SeasonRecord, ShowRecord,
    TrackRecord, VideoRecord,
};
use library::{Catalog, MediaType, Record, Tier};
use platform::Settings;

use crate::screen::{AppState, Level};

/// Media menu capacity: every media type plus Settings.
pub const MENU_LEN: usize = 7;

/// One row of the media selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEntry {
    /// A media root present on the card.
    Media(MediaType),
    /// The settings screen.
    Settings,
}

impl MenuEntry {
    /// Menu label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Media(m) => m.label(),
            Self::Settings => "Settings",
        }
    }
}

/// Rows of the settings screen, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsRow {
    /// Playback volume.
    #[default]
    Volume,
    /// Seconds per slideshow photo.
    SlideshowInterval,
    /// Return to the media selector.
    Exit,
}

impl SettingsRow {
    /// Row below, if any.
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Volume => Some(Self::SlideshowInterval),
            Self::SlideshowInterval => Some(Self::Exit),
            Self::Exit => None,
        }
    }

    /// Row above, if any.
    pub const fn previous(self) -> Option<Self> {
        match self {
            Self::Volume => None,
            Self::SlideshowInterval => Some(Self::Volume),
            Self::Exit => Some(Self::SlideshowInterval),
        }
    }
}

/// Record resident in the top slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)] // variants mirror `library::Record`
pub enum TopRecord {
    Show(ShowRecord),
    Movie(MovieRecord),
    Collection(CollectionRecord),
    Artist(ArtistRecord),
    PhotoAlbum(PhotoAlbumRecord),
    Playlist(PlaylistRecord),
}

/// Record resident in the middle slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)] // variants mirror `library::Record`
pub enum MiddleRecord {
    Season(SeasonRecord),
    MusicAlbum(MusicAlbumRecord),
}

/// Record resident in the leaf slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)] // variants mirror `library::Record`
pub enum LeafRecord {
    Episode(EpisodeRecord),
    Video(VideoRecord),
    Track(TrackRecord),
    Photo(PhotoRecord),
    PlaylistVideo(PlaylistVideoRecord),
}

/// At most one record per level; `None` means not loaded or failed to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierRecords {
    /// Show, movie, collection, artist, photo album or playlist.
    pub top: Option<TopRecord>,
    /// Season or music album.
    pub middle: Option<MiddleRecord>,
    /// Episode, video, track, photo or playlist video.
    pub leaf: Option<LeafRecord>,
}

impl TierRecords {
    /// Store `record` in its level's slot, replacing what was there.
    pub fn place(&mut self, record: Record) {
        match record {
            Record::Show(r) => self.top = Some(TopRecord::Show(r)),
            Record::Movie(r) => self.top = Some(TopRecord::Movie(r)),
            Record::Collection(r) => self.top = Some(TopRecord::Collection(r)),
            Record::Artist(r) => self.top = Some(TopRecord::Artist(r)),
            Record::PhotoAlbum(r) => self.top = Some(TopRecord::PhotoAlbum(r)),
            Record::Playlist(r) => self.top = Some(TopRecord::Playlist(r)),
            Record::Season(r) => self.middle = Some(MiddleRecord::Season(r)),
            Record::MusicAlbum(r) => self.middle = Some(MiddleRecord::MusicAlbum(r)),
            Record::Episode(r) => self.leaf = Some(LeafRecord::Episode(r)),
            Record::Video(r) => self.leaf = Some(LeafRecord::Video(r)),
            Record::Track(r) => self.leaf = Some(LeafRecord::Track(r)),
            Record::Photo(r) => self.leaf = Some(LeafRecord::Photo(r)),
            Record::PlaylistVideo(r) => self.leaf = Some(LeafRecord::PlaylistVideo(r)),
        }
    }

    /// Drop the record at `level`.
    pub fn clear(&mut self, level: Level) {
        match level {
            Level::Top => self.top = None,
            Level::Middle => self.middle = None,
            Level::Leaf => self.leaf = None,
        }
    }

    /// Whether `level` holds a successfully decoded record.
    pub fn is_loaded(&self, level: Level) -> bool {
        match level {
            Level::Top => self.top.is_some(),
            Level::Middle => self.middle.is_some(),
            Level::Leaf => self.leaf.is_some(),
        }
    }

    /// Primary label of the record at `level`.
    pub fn label(&self, level: Level) -> Option<&str> {
        match level {
            Level::Top => self.top.as_ref().map(|r| match r {
                TopRecord::Show(r) => r.name.as_str(),
                TopRecord::Movie(r) => r.title.as_str(),
                TopRecord::Collection(r) => r.name.as_str(),
                TopRecord::Artist(r) => r.name.as_str(),
                TopRecord::PhotoAlbum(r) => r.title.as_str(),
                TopRecord::Playlist(r) => r.name.as_str(),
            }),
            Level::Middle => self.middle.as_ref().map(|r| match r {
                MiddleRecord::Season(r) => r.title.as_str(),
                MiddleRecord::MusicAlbum(r) => r.title.as_str(),
            }),
            Level::Leaf => self.leaf.as_ref().map(|r| match r {
                LeafRecord::Episode(r) => r.title.as_str(),
                LeafRecord::Video(r) => r.title.as_str(),
                LeafRecord::Track(r) => r.title.as_str(),
                LeafRecord::Photo(r) => r.caption.as_str(),
                LeafRecord::PlaylistVideo(r) => r.title.as_str(),
            }),
        }
    }
}

/// Cursor over one level's catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierNav {
    /// Tier currently listed at this level.
    pub tier: Option<Tier>,
    /// Directory the catalog was scanned from.
    pub dir: CardPath,
    /// Entry names, sorted.
    pub catalog: Catalog,
    /// Highlighted entry, `0` when the catalog is empty.
    pub index: usize,
    /// Entry last entered with Select.
    pub selected: library::EntryName,
}

impl TierNav {
    /// Replace the listing and put the cursor on entry 0.
    pub fn reset(&mut self, tier: Tier, dir: &str, catalog: Catalog) {
        self.tier = Some(tier);
        self.dir.clear();
        let _ = self.dir.push_str(dir);
        self.catalog = catalog;
        self.index = 0;
        self.selected.clear();
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.catalog.len()
    }

    /// Highlighted entry name.
    pub fn current(&self) -> Option<&str> {
        self.catalog.get(self.index)
    }

    /// Move toward the end, clamped. Returns whether the cursor moved.
    pub fn next(&mut self) -> bool {
        let last = self.count().saturating_sub(1);
        if self.index < last {
            self.index = self.index.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Move toward the start, clamped. Returns whether the cursor moved.
    pub fn previous(&mut self) -> bool {
        if self.index > 0 && !self.catalog.is_empty() {
            self.index = self.index.saturating_sub(1);
            true
        } else {
            false
        }
    }

    /// Move toward the end, wrapping to 0 after the last entry.
    pub fn next_wrapping(&mut self) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        if !self.next() {
            self.index = 0;
        }
        self.count() > 1
    }

    /// Move toward the start, wrapping to the last entry.
    pub fn previous_wrapping(&mut self) -> bool {
        if self.catalog.is_empty() {
            return false;
        }
        if !self.previous() {
            self.index = self.count().saturating_sub(1);
        }
        self.count() > 1
    }

    /// Path of the playable file for the highlighted entry.
    pub fn media_path(&self) -> Option<CardPath> {
        media_path(&self.dir, self.current()?, self.tier?)
    }

    /// Thumbnail of the highlighted entry.
    pub fn thumbnail_path(&self) -> Option<CardPath> {
        thumbnail_path(&self.dir, self.current()?, self.tier?)
    }

    /// Put the cursor on `name` if the catalog holds it.
    pub fn seek(&mut self, name: &str) -> bool {
        match self.catalog.position(name) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

/// A timed pass-through to `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PendingTransition {
    /// Clock reading when the transition began.
    pub started_ms: u32,
    /// How long the transition lasts.
    pub duration_ms: u32,
    /// State entered once the duration has elapsed.
    pub target: AppState,
}

/// Everything the navigator knows.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Current state.
    pub state: AppState,
    /// Media type being browsed.
    pub media: Option<MediaType>,
    /// Media selector rows.
    pub menu: Vec<MenuEntry, MENU_LEN>,
    /// Highlighted media selector row.
    pub menu_index: usize,
    /// Top-level cursor (shows, movies, artists, ...).
    pub top: TierNav,
    /// Middle cursor (seasons, albums).
    pub middle: TierNav,
    /// Leaf cursor (episodes, tracks, photos, ...).
    pub leaf: TierNav,
    /// Resident records, one per level.
    pub records: TierRecords,
    /// Active transition, if any.
    pub transition: Option<PendingTransition>,
    /// Browser that Playback returns to.
    pub playback_return: Option<AppState>,
    /// Clock reading when the splash appeared.
    pub splash_started_ms: u32,
    /// Clock reading of the last slideshow advance.
    pub slideshow_last_ms: u32,
    /// Live settings (persisted through the debouncer).
    pub settings: Settings,
    /// Highlighted settings row.
    pub settings_row: SettingsRow,
}

impl AppContext {
    /// Context at power-on.
    pub fn new() -> Self {
        Self {
            state: AppState::Boot,
            media: None,
            menu: Vec::new(),
            menu_index: 0,
            top: TierNav::default(),
            middle: TierNav::default(),
            leaf: TierNav::default(),
            records: TierRecords::default(),
            transition: None,
            playback_return: None,
            splash_started_ms: 0,
            slideshow_last_ms: 0,
            settings: Settings::default(),
            settings_row: SettingsRow::Volume,
        }
    }

    /// Cursor for `level`.
    pub fn nav(&self, level: Level) -> &TierNav {
        match level {
            Level::Top => &self.top,
            Level::Middle => &self.middle,
            Level::Leaf => &self.leaf,
        }
    }

    /// Mutable cursor for `level`.
    pub fn nav_mut(&mut self, level: Level) -> &mut TierNav {
        match level {
            Level::Top => &mut self.top,
            Level::Middle => &mut self.middle,
            Level::Leaf => &mut self.leaf,
        }
    }

    /// Highlighted media selector row.
    pub fn menu_entry(&self) -> Option<MenuEntry> {
        self.menu.get(self.menu_index).copied()
    }

    /// Media file of the item being played (or about to be).
    pub fn playback_path(&self) -> Option<CardPath> {
        let tier = self.playback_return?.tier()?;
        self.nav(Level::of(tier)).media_path()
    }

    /// Thumbnail for the browser's highlighted entry. Track lists show
    /// their album's.
    pub fn thumbnail_path(&self) -> Option<CardPath> {
        match self.state.tier()? {
            Tier::Track => self.middle.thumbnail_path(),
            tier => self.nav(Level::of(tier)).thumbnail_path(),
        }
    }

    /// Full-screen image of the current slideshow photo.
    pub fn photo_path(&self) -> Option<CardPath> {
        match self.leaf.tier {
            Some(Tier::Photo) => self.leaf.media_path(),
            _ => None,
        }
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}
