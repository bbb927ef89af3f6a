//! simulator run — drive the navigation core against a card tree.
//!
//! Time is virtual: every poll advances the clock by [`TICK_MS`], so a script
//! replays identically on any machine.

use std::path::Path;

use anyhow::{ensure, Result};
use platform::config::{THUMB_H, THUMB_W, VIDEO_H, VIDEO_W};
use platform::display::FixedAdvance;
use platform::storage_local::{FileSettingsStore, LocalFileStorage};
use platform::{elapsed_ms, InputFlags, SettingsStore, Storage};
use tracing::{debug, info, trace};
use ui::{AppContext, AppState, Level, Navigator, ScrollAnimator, StateChange};

use crate::script::{self, Step};

/// Virtual control-loop period.
pub const TICK_MS: u32 = 10;

/// Width of the title field beside the thumbnail, in pixels.
const TITLE_CLIP_W: u32 = VIDEO_W.saturating_sub(THUMB_W).saturating_sub(6);

/// Entry point called from main.rs
pub fn run(root: &Path, script: &str) -> Result<()> {
    ensure!(root.is_dir(), "card root {} is not a directory", root.display());
    let steps = script::parse(script)?;
    debug!(
        screen = ?(VIDEO_W, VIDEO_H),
        thumbnail = ?(THUMB_W, THUMB_H),
        title_clip = TITLE_CLIP_W,
        "display geometry"
    );
    let mut session = Session::new(LocalFileStorage::new(root), FileSettingsStore::new(root));
    session.play(&steps);
    info!(
        state = session.nav.state().name(),
        elapsed_ms = session.now,
        "script finished"
    );
    Ok(())
}

/// Navigator, capabilities and the virtual clock.
pub(crate) struct Session<S, P> {
    pub(crate) nav: Navigator,
    pub(crate) storage: S,
    pub(crate) store: P,
    pub(crate) now: u32,
    scroll: ScrollAnimator,
}

impl<S: Storage, P: SettingsStore> Session<S, P> {
    pub(crate) fn new(storage: S, store: P) -> Self {
        Self {
            nav: Navigator::default(),
            storage,
            store,
            now: 0,
            scroll: ScrollAnimator::default(),
        }
    }

    /// Boot, run every step, then idle long enough for pending settings
    /// to reach the store.
    pub(crate) fn play(&mut self, steps: &[Step]) {
        self.poll(InputFlags::NONE);
        for step in steps {
            match *step {
                Step::Input(flags) => self.poll(flags),
                Step::Wait(ms) => self.idle_for(ms),
                Step::End => {
                    let change = self.nav.playback_finished(&mut self.storage, self.now);
                    self.report(change);
                    self.advance();
                }
            }
        }
        if self.nav.state() != AppState::PowerOff {
            let quiet = self.nav.timing().settings_quiet_ms;
            self.idle_for(quiet.saturating_add(TICK_MS));
        }
    }

    fn poll(&mut self, flags: InputFlags) {
        let change = self.nav.poll(flags, &mut self.storage, &mut self.store, self.now);
        self.report(change);
        self.animate();
        self.advance();
    }

    fn idle_for(&mut self, ms: u32) {
        let start = self.now;
        while elapsed_ms(self.now, start) < ms {
            self.poll(InputFlags::NONE);
        }
    }

    fn advance(&mut self) {
        self.now = self.now.wrapping_add(TICK_MS);
    }

    fn report(&mut self, change: Option<StateChange>) {
        let Some(StateChange { from, to }) = change else {
            return;
        };
        self.scroll.reset_all();
        let ctx = self.nav.context();
        info!(
            t = self.now,
            from = from.name(),
            to = to.name(),
            focus = %focus(ctx),
            "state change"
        );
        if let Some(thumb) = ctx.thumbnail_path() {
            debug!(thumbnail = thumb.as_str(), "thumbnail");
        }
    }

    /// Run the title field's scroll automaton for this frame.
    fn animate(&mut self) {
        let label = focus(self.nav.context());
        let offset =
            self.scroll.update_text(0, &FixedAdvance::DEVICE_FONT, &label, TITLE_CLIP_W, self.now);
        if self.scroll.any_active() {
            trace!(t = self.now, offset, "title scroll");
        }
    }
}

/// What the screen is centred on, for logs and the title field.
pub(crate) fn focus(ctx: &AppContext) -> String {
    match ctx.state {
        AppState::MediaSelector => {
            ctx.menu_entry().map(|e| e.label().to_string()).unwrap_or_default()
        }
        AppState::Settings => format!(
            "volume {} / slideshow {}s ({:?})",
            ctx.settings.volume, ctx.settings.slideshow_sec, ctx.settings_row
        ),
        AppState::Playback => ctx
            .playback_path()
            .map(|p| p.to_string())
            .unwrap_or_default(),
        AppState::PhotoSlideshow => ctx.photo_path().map(|p| p.to_string()).unwrap_or_default(),
        state => match state.tier() {
            Some(tier) => {
                let level = Level::of(tier);
                let nav = ctx.nav(level);
                let label = ctx.records.label(level).or(nav.current()).unwrap_or("(empty)");
                format!("{label} [{}/{}]", nav.index.saturating_add(1).min(nav.count()), nav.count())
            }
            None => state.name().to_string(),
        },
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn heat_card() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("Movies/Heat");
        fs::create_dir_all(&dir).unwrap();
        let mut rec = vec![0u8; library::Tier::Movie.size()];
        rec[..4].copy_from_slice(library::Tier::Movie.magic());
        rec[4] = library::FORMAT_VERSION;
        rec[8..12].copy_from_slice(b"Heat");
        fs::write(dir.join("movie.sdb"), rec).unwrap();
        fs::write(dir.join("movie.avi"), b"RIFF").unwrap();
        tmp
    }

    fn session(root: &Path) -> Session<LocalFileStorage, FileSettingsStore> {
        Session::new(LocalFileStorage::new(root), FileSettingsStore::new(root))
    }

    #[test]
    fn script_reaches_playback_and_persists_volume() {
        let card = heat_card();
        let mut s = session(card.path());
        s.play(&script::parse("ch+,vol+,vol+,wait:300,vol+").unwrap());
        assert_eq!(s.nav.state(), AppState::Playback);
        assert_eq!(focus(s.nav.context()), "/Movies/Heat/movie.avi");
        let saved = fs::read_to_string(card.path().join("settings.txt")).unwrap();
        assert!(saved.contains("volume=6"), "{saved}");
    }

    #[test]
    fn power_off_stops_the_session() {
        let card = heat_card();
        let mut s = session(card.path());
        s.play(&script::parse("ch+,power,vol+").unwrap());
        assert_eq!(s.nav.state(), AppState::PowerOff);
        assert!(!card.path().join("settings.txt").exists());
    }

    #[test]
    fn browser_focus_shows_position() {
        let card = heat_card();
        let mut s = session(card.path());
        s.play(&script::parse("ch+,vol+").unwrap());
        assert_eq!(s.nav.state(), AppState::MovieBrowser);
        assert_eq!(focus(s.nav.context()), "Heat [1/1]");
    }

    #[test]
    fn splash_times_out_without_input() {
        let card = heat_card();
        let mut s = session(card.path());
        s.play(&script::parse("wait:1500").unwrap());
        assert_eq!(s.nav.state(), AppState::MediaSelector);
        assert_eq!(focus(s.nav.context()), "Movies");
    }
}
