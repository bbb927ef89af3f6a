//! Persisted user settings and the `settings.txt` text format.
//!
//! The card packager seeds `settings.txt` at the card root; the device reads
//! it at boot and rewrites it after settings changes settle:
//!
//! ```text
//! # TinyJukebox Settings
//! last_show=Seinfeld
//! last_season=1
//! last_episode=1
//! volume=5
//! slideshow_sec=5
//! ```
//!
//! Parsing is forgiving: unknown keys are skipped and malformed or
//! out-of-range values keep their defaults.

use core::fmt::Write as _;

use heapless::String;

use crate::config::{
    DEFAULT_VOLUME, MAX_VOLUME, SLIDESHOW_SEC_MAX, SLIDESHOW_SEC_MIN, TimingConfig,
};

/// Maximum bytes of a directory name kept in settings.
pub const DIR_NAME_LEN: usize = 32;

/// Upper bound on the serialised settings text.
pub const SETTINGS_TEXT_LEN: usize = 192;

/// User settings that survive power cycles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Directory name of the last show played.
    pub last_show: String<DIR_NAME_LEN>,
    /// Season number of the last episode played.
    pub last_season: u8,
    /// Episode number of the last episode played.
    pub last_episode: u8,
    /// Volume step, `0..=MAX_VOLUME`.
    pub volume: u8,
    /// Photo slideshow interval in seconds.
    pub slideshow_sec: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_show: String::new(),
            last_season: 1,
            last_episode: 1,
            volume: DEFAULT_VOLUME,
            slideshow_sec: TimingConfig::DEFAULT.slideshow_default_sec,
        }
    }
}

impl Settings {
    /// Defaults with the slideshow interval taken from `timing`.
    #[must_use]
    pub fn defaults_for(timing: &TimingConfig) -> Self {
        Self { slideshow_sec: timing.slideshow_default_sec, ..Self::default() }
    }

    /// Parse `settings.txt` contents over [`Settings::default`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self::parse_over(text, Self::default())
    }

    /// Parse `settings.txt` contents. Keys that are missing or malformed
    /// keep their value from `base`.
    #[must_use]
    pub fn parse_over(text: &str, base: Self) -> Self {
        let mut s = base;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let value = value.trim();
            match key.trim() {
                "last_show" => {
                    if let Ok(name) = String::try_from(value) {
                        s.last_show = name;
                    }
                }
                "last_season" => {
                    if let Ok(n) = value.parse::<u8>() {
                        s.last_season = n;
                    }
                }
                "last_episode" => {
                    if let Ok(n) = value.parse::<u8>() {
                        s.last_episode = n;
                    }
                }
                "volume" => {
                    if let Some(v) = value.parse::<u8>().ok().filter(|v| *v <= MAX_VOLUME) {
                        s.volume = v;
                    }
                }
                "slideshow_sec" => {
                    if let Some(v) = value
                        .parse::<u8>()
                        .ok()
                        .filter(|v| (SLIDESHOW_SEC_MIN..=SLIDESHOW_SEC_MAX).contains(v))
                    {
                        s.slideshow_sec = v;
                    }
                }
                _ => {}
            }
        }
        s
    }

    /// Parse raw file bytes over `base`, ignoring a trailing partial UTF-8
    /// sequence.
    #[must_use]
    pub fn parse_bytes(bytes: &[u8], base: Self) -> Self {
        let text = match core::str::from_utf8(bytes) {
            Ok(t) => t,
            Err(e) => bytes
                .get(..e.valid_up_to())
                .and_then(|b| core::str::from_utf8(b).ok())
                .unwrap_or(""),
        };
        Self::parse_over(text, base)
    }

    /// Serialise to the `settings.txt` format.
    #[must_use]
    pub fn to_text(&self) -> String<SETTINGS_TEXT_LEN> {
        let mut out = String::new();
        // Capacity covers the longest possible rendering (32-byte show name,
        // five 3-digit values), so write! cannot fail.
        let _ = write!(
            out,
            "# {} Settings\nlast_show={}\nlast_season={}\nlast_episode={}\nvolume={}\nslideshow_sec={}\n",
            crate::config::APP_NAME,
            self.last_show,
            self.last_season,
            self.last_episode,
            self.volume,
            self.slideshow_sec,
        );
        out
    }
}

/// Settings persistence capability.
pub trait SettingsStore {
    /// Error type
    type Error: core::fmt::Debug;

    /// Load persisted settings, `None` when nothing has been saved yet.
    ///
    /// Values the stored copy lacks come from `defaults`.
    fn load(&mut self, defaults: &Settings) -> Result<Option<Settings>, Self::Error>;

    /// Persist `settings`, replacing any previous copy.
    fn persist(&mut self, settings: &Settings) -> Result<(), Self::Error>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parses_packager_defaults() {
        let text = "# SeinfeldTV Settings\nlast_show=Seinfeld\nlast_season=1\nlast_episode=1\nvolume=5\n";
        let s = Settings::parse(text);
        assert_eq!(s.last_show.as_str(), "Seinfeld");
        assert_eq!(s.last_season, 1);
        assert_eq!(s.last_episode, 1);
        assert_eq!(s.volume, 5);
        assert_eq!(s.slideshow_sec, 5);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let s = Settings::parse("volume=loud\nlast_season=-3\nslideshow_sec=0\n");
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn missing_slideshow_interval_keeps_configured_default() {
        let timing = TimingConfig { slideshow_default_sec: 12, ..TimingConfig::DEFAULT };
        let base = Settings::defaults_for(&timing);
        let s = Settings::parse_over("volume=4\nslideshow_sec=0\n", base);
        assert_eq!(s.volume, 4);
        assert_eq!(s.slideshow_sec, 12);
    }

    #[test]
    fn volume_above_max_is_rejected() {
        let s = Settings::parse("volume=11");
        assert_eq!(s.volume, DEFAULT_VOLUME);
    }

    #[test]
    fn unknown_keys_and_blank_lines_are_ignored() {
        let s = Settings::parse("\n\nbrightness=3\n  volume = 7  \n");
        assert_eq!(s.volume, 7);
    }

    #[test]
    fn text_parses_back() {
        let s = Settings {
            last_show: String::try_from("Frasier").unwrap(),
            last_season: 4,
            last_episode: 12,
            volume: 9,
            slideshow_sec: 10,
        };
        assert_eq!(Settings::parse(s.to_text().as_str()), s);
    }

    #[test]
    fn longest_settings_fit_text_buffer() {
        let s = Settings {
            last_show: String::try_from("x".repeat(DIR_NAME_LEN).as_str()).unwrap(),
            last_season: 255,
            last_episode: 255,
            volume: 255,
            slideshow_sec: 255,
        };
        assert!(s.to_text().ends_with("slideshow_sec=255\n"));
    }

    #[test]
    fn parse_bytes_drops_partial_utf8_tail() {
        let mut bytes = b"volume=3\nlast_show=Caf".to_vec();
        bytes.extend_from_slice(&[0xC3]);
        let s = Settings::parse_bytes(&bytes, Settings::default());
        assert_eq!(s.volume, 3);
        assert_eq!(s.last_show.as_str(), "Caf");
    }
}
