//! Application states — every screen the navigator can be in.

use library::Tier;

/// Every navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AppState {
    /// Power-on initialisation.
    Boot,
    /// Logo screen.
    Splash,
    /// Media type menu (plus Settings).
    MediaSelector,
    /// TV shows.
    ShowBrowser,
    /// Seasons of one show.
    SeasonBrowser,
    /// Episodes of one season.
    EpisodeBrowser,
    /// Movies.
    MovieBrowser,
    /// Music video collections.
    CollectionBrowser,
    /// Videos of one collection.
    VideoBrowser,
    /// Music artists.
    ArtistBrowser,
    /// Albums of one artist.
    AlbumBrowser,
    /// Tracks of one album.
    TrackBrowser,
    /// Photo albums.
    PhotoAlbumBrowser,
    /// Full-screen photos of one album.
    PhotoSlideshow,
    /// Video playlists.
    PlaylistBrowser,
    /// Videos of one playlist.
    PlaylistVideoBrowser,
    /// Volume and slideshow interval.
    Settings,
    /// A leaf item is playing.
    Playback,
    /// Timed static burst between major screens.
    Transition,
    /// Terminal until an external power-on.
    PowerOff,
}

/// Depth of a tier inside its media hierarchy.
///
/// Only one record per level is resident at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Entries directly under a media root (show, movie, artist, ...).
    Top,
    /// Intermediate grouping (season, music album).
    Middle,
    /// Playable or viewable entries (episode, track, photo, ...).
    Leaf,
}

impl Level {
    /// Level of `tier`.
    pub const fn of(tier: Tier) -> Self {
        match tier {
            Tier::Show
            | Tier::Movie
            | Tier::Collection
            | Tier::Artist
            | Tier::PhotoAlbum
            | Tier::Playlist => Self::Top,
            Tier::Season | Tier::MusicAlbum => Self::Middle,
            Tier::Episode | Tier::Video | Tier::Track | Tier::Photo | Tier::PlaylistVideo => {
                Self::Leaf
            }
        }
    }
}

impl AppState {
    /// Tier listed by a browser state.
    ///
    /// The slideshow walks the photo tier, so it reports [`Tier::Photo`].
    pub const fn tier(self) -> Option<Tier> {
        match self {
            Self::ShowBrowser => Some(Tier::Show),
            Self::SeasonBrowser => Some(Tier::Season),
            Self::EpisodeBrowser => Some(Tier::Episode),
            Self::MovieBrowser => Some(Tier::Movie),
            Self::CollectionBrowser => Some(Tier::Collection),
            Self::VideoBrowser => Some(Tier::Video),
            Self::ArtistBrowser => Some(Tier::Artist),
            Self::AlbumBrowser => Some(Tier::MusicAlbum),
            Self::TrackBrowser => Some(Tier::Track),
            Self::PhotoAlbumBrowser => Some(Tier::PhotoAlbum),
            Self::PhotoSlideshow => Some(Tier::Photo),
            Self::PlaylistBrowser => Some(Tier::Playlist),
            Self::PlaylistVideoBrowser => Some(Tier::PlaylistVideo),
            _ => None,
        }
    }

    /// State that lists or shows `tier`.
    pub const fn for_tier(tier: Tier) -> Self {
        match tier {
            Tier::Show => Self::ShowBrowser,
            Tier::Season => Self::SeasonBrowser,
            Tier::Episode => Self::EpisodeBrowser,
            Tier::Movie => Self::MovieBrowser,
            Tier::Collection => Self::CollectionBrowser,
            Tier::Video => Self::VideoBrowser,
            Tier::Artist => Self::ArtistBrowser,
            Tier::MusicAlbum => Self::AlbumBrowser,
            Tier::Track => Self::TrackBrowser,
            Tier::PhotoAlbum => Self::PhotoAlbumBrowser,
            Tier::Photo => Self::PhotoSlideshow,
            Tier::Playlist => Self::PlaylistBrowser,
            Tier::PlaylistVideo => Self::PlaylistVideoBrowser,
        }
    }

    /// Whether this is a list screen with a movable cursor.
    pub const fn is_browser(self) -> bool {
        matches!(self.tier(), Some(_)) && !matches!(self, Self::PhotoSlideshow)
    }

    /// State that Back returns to from a browser.
    pub const fn parent(self) -> Option<Self> {
        match self {
            Self::ShowBrowser
            | Self::MovieBrowser
            | Self::CollectionBrowser
            | Self::ArtistBrowser
            | Self::PhotoAlbumBrowser
            | Self::PlaylistBrowser
            | Self::Settings => Some(Self::MediaSelector),
            Self::SeasonBrowser => Some(Self::ShowBrowser),
            Self::EpisodeBrowser => Some(Self::SeasonBrowser),
            Self::VideoBrowser => Some(Self::CollectionBrowser),
            Self::AlbumBrowser => Some(Self::ArtistBrowser),
            Self::TrackBrowser => Some(Self::AlbumBrowser),
            Self::PhotoSlideshow => Some(Self::PhotoAlbumBrowser),
            Self::PlaylistVideoBrowser => Some(Self::PlaylistBrowser),
            _ => None,
        }
    }

    /// Short identifier for logs.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Boot => "boot",
            Self::Splash => "splash",
            Self::MediaSelector => "media-selector",
            Self::ShowBrowser => "show-browser",
            Self::SeasonBrowser => "season-browser",
            Self::EpisodeBrowser => "episode-browser",
            Self::MovieBrowser => "movie-browser",
            Self::CollectionBrowser => "collection-browser",
            Self::VideoBrowser => "video-browser",
            Self::ArtistBrowser => "artist-browser",
            Self::AlbumBrowser => "album-browser",
            Self::TrackBrowser => "track-browser",
            Self::PhotoAlbumBrowser => "photo-album-browser",
            Self::PhotoSlideshow => "photo-slideshow",
            Self::PlaylistBrowser => "playlist-browser",
            Self::PlaylistVideoBrowser => "playlist-video-browser",
            Self::Settings => "settings",
            Self::Playback => "playback",
            Self::Transition => "transition",
            Self::PowerOff => "power-off",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use library::MediaType;

    #[test]
    fn every_tier_maps_back_to_itself() {
        for tier in Tier::ALL {
            assert_eq!(AppState::for_tier(tier).tier(), Some(tier));
        }
    }

    #[test]
    fn slideshow_is_not_a_browser() {
        assert!(AppState::EpisodeBrowser.is_browser());
        assert!(!AppState::PhotoSlideshow.is_browser());
        assert!(!AppState::Playback.is_browser());
    }

    #[test]
    fn top_browsers_return_to_media_selector() {
        for media in MediaType::ALL {
            let top = AppState::for_tier(media.top_tier());
            assert_eq!(top.parent(), Some(AppState::MediaSelector));
        }
    }

    #[test]
    fn child_browsers_return_to_parent_tier() {
        for tier in Tier::ALL {
            if let Some(child) = tier.child() {
                assert_eq!(AppState::for_tier(child).parent(), Some(AppState::for_tier(tier)));
            }
        }
    }

    #[test]
    fn levels_follow_hierarchy_depth() {
        assert_eq!(Level::of(Tier::Show), Level::Top);
        assert_eq!(Level::of(Tier::Season), Level::Middle);
        assert_eq!(Level::of(Tier::Episode), Level::Leaf);
        assert_eq!(Level::of(Tier::Photo), Level::Leaf);
        assert_eq!(Level::of(Tier::Movie), Level::Top);
    }
}
