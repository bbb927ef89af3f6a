//! Navigation state machine.
//!
//! One [`Navigator::poll`] per control-loop cycle:
//!
//! 1. the caller snapshots and clears the input latch,
//! 2. the flags are remapped to at most one [`Action`] for the current state,
//! 3. the action (or, with no action, a timer such as the splash, transition
//!    or slideshow) produces at most one state change,
//! 4. pending settings are persisted once input has been quiet long enough.
//!
//! Card problems never stop navigation: a listing failure gives an empty
//! browser, a bad descriptor leaves its level's record slot empty, and the
//! renderer shows placeholders.

use core::fmt::Write as _;

use heapless::String;
use library::layout::child_dir;
use library::{load_record, MediaType, Scanner, Tier};
use platform::config::{MAX_VOLUME, SLIDESHOW_SEC_MAX, SLIDESHOW_SEC_MIN};
use platform::{
    elapsed_ms, InputEvent, InputFlags, InputLatch, Settings, SettingsStore, Storage, TimingConfig,
};
use tracing::{debug, trace, warn};

use crate::context::{AppContext, LeafRecord, MenuEntry, PendingTransition, SettingsRow};
use crate::screen::{AppState, Level};
use crate::settings::SettingsDebouncer;

/// What one poll's input means in the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Enter PowerOff.
    PowerOff,
    /// Leave the splash screen early.
    Skip,
    /// Up one level / leave the screen.
    Back,
    /// Enter the highlighted entry.
    Select,
    /// Cursor, row or item forward.
    Next,
    /// Cursor, row or item backward.
    Previous,
    /// Raise the highlighted value (volume, interval).
    Increase,
    /// Lower the highlighted value.
    Decrease,
}

/// A state change produced by one poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StateChange {
    /// State before the poll.
    pub from: AppState,
    /// State after the poll.
    pub to: AppState,
}

/// Map one poll's input flags to an action for `state`.
///
/// Power beats everything; otherwise Back, Select, Next, Previous and the
/// volume-style adjustments win in that order.
pub fn remap(state: AppState, row: SettingsRow, flags: InputFlags) -> Option<Action> {
    use InputEvent as E;

    if state == AppState::PowerOff {
        return None;
    }
    if flags.any_of(E::Power, E::IrPower) {
        return Some(Action::PowerOff);
    }
    let ch_up = flags.any_of(E::ChannelCw, E::IrChannelUp);
    let ch_down = flags.any_of(E::ChannelCcw, E::IrChannelDown);
    let vol_up = flags.any_of(E::VolumeCw, E::IrVolumeUp);
    let vol_down = flags.any_of(E::VolumeCcw, E::IrVolumeDown);
    let mute = flags.contains(E::IrMute);

    match state {
        AppState::Boot | AppState::Transition | AppState::PowerOff => None,
        AppState::Splash => (!flags.is_empty()).then_some(Action::Skip),
        AppState::Settings => {
            let on_exit = row == SettingsRow::Exit;
            pick(&[
                (mute || (on_exit && (vol_up || vol_down)), Action::Back),
                (ch_up, Action::Next),
                (ch_down, Action::Previous),
                (vol_up, Action::Increase),
                (vol_down, Action::Decrease),
            ])
        }
        AppState::Playback => pick(&[
            (mute, Action::Back),
            (ch_up, Action::Next),
            (ch_down, Action::Previous),
            (vol_up, Action::Increase),
            (vol_down, Action::Decrease),
        ]),
        AppState::PhotoSlideshow => pick(&[
            (vol_down || mute, Action::Back),
            (ch_up, Action::Next),
            (ch_down, Action::Previous),
        ]),
        // Media selector and every browser.
        _ => pick(&[
            (vol_down || mute, Action::Back),
            (vol_up, Action::Select),
            (ch_up, Action::Next),
            (ch_down, Action::Previous),
        ]),
    }
}

/// First action whose input fired.
fn pick(candidates: &[(bool, Action)]) -> Option<Action> {
    candidates.iter().find(|(hit, _)| *hit).map(|&(_, action)| action)
}

/// The navigation controller. Owns the [`AppContext`].
#[derive(Debug, Clone)]
pub struct Navigator {
    ctx: AppContext,
    timing: TimingConfig,
    debouncer: SettingsDebouncer,
}

impl Navigator {
    /// Navigator in [`AppState::Boot`].
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            ctx: AppContext::new(),
            timing,
            debouncer: SettingsDebouncer::new(timing.settings_quiet_ms),
        }
    }

    /// Read-only view for the renderer.
    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    /// Current state.
    pub fn state(&self) -> AppState {
        self.ctx.state
    }

    /// Timing in effect.
    pub fn timing(&self) -> &TimingConfig {
        &self.timing
    }

    /// Whether a settings write is waiting for input to settle.
    pub fn settings_pending(&self) -> bool {
        self.debouncer.is_dirty()
    }

    /// Snapshot-and-clear `latch`, then [`poll`](Self::poll).
    pub fn poll_latch<S: Storage, P: SettingsStore>(
        &mut self,
        latch: &InputLatch,
        storage: &mut S,
        store: &mut P,
        now: u32,
    ) -> Option<StateChange> {
        let flags = latch.take();
        self.poll(flags, storage, store, now)
    }

    /// Run one control cycle with this cycle's input flags.
    pub fn poll<S: Storage, P: SettingsStore>(
        &mut self,
        flags: InputFlags,
        storage: &mut S,
        store: &mut P,
        now: u32,
    ) -> Option<StateChange> {
        let from = self.ctx.state;
        match remap(from, self.ctx.settings_row, flags) {
            Some(action) => {
                trace!(state = from.name(), ?action, "input");
                self.apply(action, storage, store, now);
            }
            None => self.tick(storage, store, now),
        }
        self.debouncer.poll(now, store, &self.ctx.settings);
        self.change_from(from)
    }

    /// The player finished the current item.
    ///
    /// Advances to the next entry of the same browser when there is one,
    /// otherwise returns to the browser.
    pub fn playback_finished<S: Storage>(&mut self, storage: &mut S, now: u32) -> Option<StateChange> {
        if self.ctx.state != AppState::Playback {
            return None;
        }
        let from = self.ctx.state;
        let Some(browser) = self.ctx.playback_return else {
            return None;
        };
        let level = Self::level_of(browser);
        if self.ctx.nav_mut(level).next() {
            self.preview(level, storage);
            self.remember_episode(now);
            self.enter_transition(AppState::Playback, now);
        } else {
            self.enter_transition(browser, now);
        }
        self.change_from(from)
    }

    fn change_from(&self, from: AppState) -> Option<StateChange> {
        let to = self.ctx.state;
        (from != to).then(|| {
            debug!(from = from.name(), to = to.name(), "state change");
            StateChange { from, to }
        })
    }

    // -----------------------------------------------------------------------
    // Timers (no input this cycle)
    // -----------------------------------------------------------------------

    fn tick<S: Storage, P: SettingsStore>(&mut self, storage: &mut S, store: &mut P, now: u32) {
        match self.ctx.state {
            AppState::Boot => self.boot(storage, store, now),
            AppState::Splash => {
                if elapsed_ms(now, self.ctx.splash_started_ms) >= self.timing.splash_ms {
                    self.enter_media_selector(storage);
                }
            }
            AppState::Transition => {
                let Some(t) = self.ctx.transition else {
                    return;
                };
                if elapsed_ms(now, t.started_ms) >= t.duration_ms {
                    self.ctx.transition = None;
                    self.ctx.state = t.target;
                    if t.target == AppState::PhotoSlideshow {
                        self.ctx.slideshow_last_ms = now;
                    }
                }
            }
            AppState::PhotoSlideshow => {
                let interval = u32::from(self.ctx.settings.slideshow_sec).saturating_mul(1_000);
                if elapsed_ms(now, self.ctx.slideshow_last_ms) >= interval {
                    self.step_photo(true, storage, now);
                }
            }
            _ => {}
        }
    }

    fn boot<S: Storage, P: SettingsStore>(&mut self, storage: &mut S, store: &mut P, now: u32) {
        let defaults = Settings::defaults_for(&self.timing);
        self.ctx.settings = match store.load(&defaults) {
            Ok(Some(settings)) => settings,
            Ok(None) => defaults,
            Err(e) => {
                warn!(error = ?e, "settings load failed, using defaults");
                defaults
            }
        };
        self.rebuild_menu(storage);
        debug!(
            volume = self.ctx.settings.volume,
            media = self.ctx.menu.len().saturating_sub(1),
            "boot complete"
        );
        self.ctx.splash_started_ms = now;
        self.ctx.state = AppState::Splash;
    }

    // -----------------------------------------------------------------------
    // Actions
    // -----------------------------------------------------------------------

    fn apply<S: Storage, P: SettingsStore>(
        &mut self,
        action: Action,
        storage: &mut S,
        store: &mut P,
        now: u32,
    ) {
        if action == Action::PowerOff {
            self.debouncer.flush(now, store, &self.ctx.settings);
            self.ctx.transition = None;
            self.ctx.state = AppState::PowerOff;
            return;
        }
        match self.ctx.state {
            AppState::Splash => self.enter_media_selector(storage),
            AppState::MediaSelector => self.media_selector(action, storage),
            AppState::Settings => self.settings_screen(action, now),
            AppState::Playback => self.playback(action, storage, now),
            AppState::PhotoSlideshow => match action {
                Action::Back => self.enter_transition(AppState::PhotoAlbumBrowser, now),
                Action::Next => self.step_photo(true, storage, now),
                Action::Previous => self.step_photo(false, storage, now),
                _ => {}
            },
            state => {
                if let Some(tier) = state.tier() {
                    self.browser(state, tier, action, storage, now);
                }
            }
        }
    }

    fn media_selector<S: Storage>(&mut self, action: Action, storage: &mut S) {
        match action {
            Action::Next => {
                let last = self.ctx.menu.len().saturating_sub(1);
                self.ctx.menu_index = self.ctx.menu_index.saturating_add(1).min(last);
            }
            Action::Previous => {
                self.ctx.menu_index = self.ctx.menu_index.saturating_sub(1);
            }
            Action::Select => match self.ctx.menu_entry() {
                Some(MenuEntry::Media(media)) => self.open_media(media, storage),
                Some(MenuEntry::Settings) => {
                    self.ctx.settings_row = SettingsRow::Volume;
                    self.ctx.state = AppState::Settings;
                }
                None => {}
            },
            _ => {}
        }
    }

    fn open_media<S: Storage>(&mut self, media: MediaType, storage: &mut S) {
        let tier = media.top_tier();
        let catalog = Scanner::scan(storage, media.root_dir(), tier);
        debug!(media = media.label(), entries = catalog.len(), "open media");
        self.ctx.media = Some(media);
        self.ctx.records = Default::default();
        self.ctx.top.reset(tier, media.root_dir(), catalog);
        if media == MediaType::Tv && self.ctx.top.seek(&self.ctx.settings.last_show) {
            debug!(show = self.ctx.settings.last_show.as_str(), "resume show");
        }
        self.preview(Level::Top, storage);
        self.ctx.state = AppState::for_tier(tier);
    }

    fn browser<S: Storage>(
        &mut self,
        state: AppState,
        tier: Tier,
        action: Action,
        storage: &mut S,
        now: u32,
    ) {
        let level = Level::of(tier);
        match action {
            Action::Next => {
                if self.ctx.nav_mut(level).next() {
                    self.preview(level, storage);
                }
            }
            Action::Previous => {
                if self.ctx.nav_mut(level).previous() {
                    self.preview(level, storage);
                }
            }
            Action::Select => self.select(state, tier, level, storage, now),
            Action::Back => self.back(state, level, storage),
            _ => {}
        }
    }

    fn select<S: Storage>(
        &mut self,
        state: AppState,
        tier: Tier,
        level: Level,
        storage: &mut S,
        now: u32,
    ) {
        let nav = self.ctx.nav_mut(level);
        let Some(name) = nav.current().and_then(|n| library::EntryName::try_from(n).ok()) else {
            return;
        };
        nav.selected = name.clone();
        self.preview(level, storage);

        let Some(child) = tier.child() else {
            // Leaf (or single-tier movie): play it.
            self.ctx.playback_return = Some(state);
            self.remember_episode(now);
            self.enter_transition(AppState::Playback, now);
            return;
        };

        let dir = child_dir(&self.ctx.nav(level).dir, &name);
        let catalog = Scanner::scan(storage, &dir, child);
        let child_level = Level::of(child);
        debug!(dir = dir.as_str(), tier = child.name(), entries = catalog.len(), "enter");
        self.ctx.nav_mut(child_level).reset(child, &dir, catalog);
        if let Some(resume) = self.resume_entry(child) {
            self.ctx.nav_mut(child_level).seek(&resume);
        }
        self.preview(child_level, storage);
        if child == Tier::Photo {
            self.enter_transition(AppState::PhotoSlideshow, now);
        } else {
            self.ctx.state = AppState::for_tier(child);
        }
    }

    fn back<S: Storage>(&mut self, state: AppState, level: Level, storage: &mut S) {
        match state.parent() {
            Some(AppState::MediaSelector) | None => {
                self.ctx.records = Default::default();
                self.enter_media_selector(storage);
            }
            Some(parent) => {
                // The parent's cursor was never touched, so its index and
                // preview are restored as they were.
                self.ctx.records.clear(level);
                if let Some(parent_tier) = parent.tier() {
                    let parent_level = Level::of(parent_tier);
                    if !self.ctx.records.is_loaded(parent_level) {
                        self.preview(parent_level, storage);
                    }
                }
                self.ctx.state = parent;
            }
        }
    }

    fn settings_screen(&mut self, action: Action, now: u32) {
        let row = self.ctx.settings_row;
        match action {
            Action::Back => self.ctx.state = AppState::MediaSelector,
            Action::Next => self.ctx.settings_row = row.next().unwrap_or(row),
            Action::Previous => self.ctx.settings_row = row.previous().unwrap_or(row),
            Action::Increase | Action::Decrease => {
                let up = action == Action::Increase;
                let s = &mut self.ctx.settings;
                let changed = match row {
                    SettingsRow::Volume => adjust(&mut s.volume, up, 0, MAX_VOLUME),
                    SettingsRow::SlideshowInterval => {
                        adjust(&mut s.slideshow_sec, up, SLIDESHOW_SEC_MIN, SLIDESHOW_SEC_MAX)
                    }
                    SettingsRow::Exit => false,
                };
                if changed {
                    self.debouncer.mark_dirty(now);
                }
            }
            _ => {}
        }
    }

    fn playback<S: Storage>(&mut self, action: Action, storage: &mut S, now: u32) {
        let Some(browser) = self.ctx.playback_return else {
            self.enter_media_selector(storage);
            return;
        };
        let level = Self::level_of(browser);
        match action {
            Action::Back => self.enter_transition(browser, now),
            Action::Next | Action::Previous => {
                let nav = self.ctx.nav_mut(level);
                let moved = if action == Action::Next { nav.next() } else { nav.previous() };
                if moved {
                    self.preview(level, storage);
                    self.remember_episode(now);
                    self.enter_transition(AppState::Playback, now);
                }
            }
            Action::Increase | Action::Decrease => {
                let up = action == Action::Increase;
                if adjust(&mut self.ctx.settings.volume, up, 0, MAX_VOLUME) {
                    self.debouncer.mark_dirty(now);
                }
            }
            _ => {}
        }
    }

    fn step_photo<S: Storage>(&mut self, forward: bool, storage: &mut S, now: u32) {
        let moved = if forward {
            self.ctx.leaf.next_wrapping()
        } else {
            self.ctx.leaf.previous_wrapping()
        };
        if moved {
            self.preview(Level::Leaf, storage);
        }
        self.ctx.slideshow_last_ms = now;
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn level_of(browser: AppState) -> Level {
        browser.tier().map_or(Level::Leaf, Level::of)
    }

    fn enter_transition(&mut self, target: AppState, now: u32) {
        self.ctx.transition = Some(PendingTransition {
            started_ms: now,
            duration_ms: self.timing.transition_ms,
            target,
        });
        self.ctx.state = AppState::Transition;
    }

    fn enter_media_selector<S: Storage>(&mut self, storage: &mut S) {
        self.rebuild_menu(storage);
        self.ctx.media = None;
        self.ctx.state = AppState::MediaSelector;
    }

    fn rebuild_menu<S: Storage>(&mut self, storage: &mut S) {
        self.ctx.menu.clear();
        for media in MediaType::ALL {
            match storage.exists(media.root_dir()) {
                Ok(true) => {
                    let _ = self.ctx.menu.push(MenuEntry::Media(media));
                }
                Ok(false) => {}
                Err(e) => warn!(root = media.root_dir(), error = ?e, "root check failed"),
            }
        }
        let _ = self.ctx.menu.push(MenuEntry::Settings);
        let last = self.ctx.menu.len().saturating_sub(1);
        self.ctx.menu_index = self.ctx.menu_index.min(last);
    }

    /// Load the highlighted entry of `level` into its record slot.
    fn preview<S: Storage>(&mut self, level: Level, storage: &mut S) {
        let nav = self.ctx.nav(level);
        let (Some(tier), Some(name)) = (nav.tier, nav.current()) else {
            self.ctx.records.clear(level);
            return;
        };
        match load_record(storage, &nav.dir, name, tier) {
            Ok(record) => self.ctx.records.place(record),
            Err(e) => {
                warn!(dir = nav.dir.as_str(), name, error = ?e, "record unavailable");
                self.ctx.records.clear(level);
            }
        }
    }

    /// Entry of `child` named by the saved resume point, when the show (and
    /// for episodes, the season) being entered is the one last played.
    fn resume_entry(&self, child: Tier) -> Option<String<8>> {
        let s = &self.ctx.settings;
        if self.ctx.media != Some(MediaType::Tv)
            || s.last_show.is_empty()
            || self.ctx.top.selected.as_str() != s.last_show.as_str()
        {
            return None;
        }
        let mut season = String::<8>::new();
        write!(season, "S{:02}", s.last_season).ok()?;
        match child {
            Tier::Season => Some(season),
            Tier::Episode if self.ctx.middle.selected.as_str() == season.as_str() => {
                let mut episode = String::new();
                write!(episode, "E{:02}.sdb", s.last_episode).ok()?;
                Some(episode)
            }
            _ => None,
        }
    }

    /// Track the last TV episode played for resume.
    fn remember_episode(&mut self, now: u32) {
        let Some(LeafRecord::Episode(ep)) = &self.ctx.records.leaf else {
            return;
        };
        if self.ctx.media != Some(MediaType::Tv) {
            return;
        }
        let show = self.ctx.top.selected.as_str();
        let s = &self.ctx.settings;
        if s.last_show.as_str() == show
            && s.last_season == ep.season_number
            && s.last_episode == ep.episode_number
        {
            return;
        }
        let (season, episode) = (ep.season_number, ep.episode_number);
        let s = &mut self.ctx.settings;
        s.last_show.clear();
        let _ = s.last_show.push_str(show);
        s.last_season = season;
        s.last_episode = episode;
        self.debouncer.mark_dirty(now);
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(TimingConfig::DEFAULT)
    }
}

/// Step `value` by one within `min..=max`. Returns whether it changed.
fn adjust(value: &mut u8, up: bool, min: u8, max: u8) -> bool {
    let next = if up { value.saturating_add(1).min(max) } else { value.saturating_sub(1).max(min) };
    let changed = next != *value;
    *value = next;
    changed
}
