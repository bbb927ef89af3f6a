//! Settings debounce — persist only after input has been quiet for a while.
//!
//! Every settings-affecting input marks the debouncer dirty and restarts the
//! quiet interval. The write happens on the first poll after the interval
//! has fully elapsed, so spinning the volume knob produces one write, not
//! one per detent.

use platform::{elapsed_ms, Settings, SettingsStore};
use tracing::{debug, warn};

/// Dirty flag plus last-change timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsDebouncer {
    dirty: bool,
    last_change_ms: u32,
    quiet_ms: u32,
}

impl SettingsDebouncer {
    /// Clean debouncer with the given quiet interval.
    pub const fn new(quiet_ms: u32) -> Self {
        Self { dirty: false, last_change_ms: 0, quiet_ms }
    }

    /// Record a change at `now`, superseding any pending write.
    pub fn mark_dirty(&mut self, now: u32) {
        self.dirty = true;
        self.last_change_ms = now;
    }

    /// Whether a write is pending.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Timestamp of the most recent change.
    pub fn last_change_ms(&self) -> u32 {
        self.last_change_ms
    }

    /// Persist `settings` if dirty and the quiet interval has elapsed.
    ///
    /// Returns `true` when a write succeeded. A failed write keeps the flag
    /// set and restarts the quiet interval.
    pub fn poll<P: SettingsStore>(&mut self, now: u32, store: &mut P, settings: &Settings) -> bool {
        if !self.dirty || elapsed_ms(now, self.last_change_ms) < self.quiet_ms {
            return false;
        }
        self.write(now, store, settings)
    }

    /// Persist immediately if dirty (power-off path).
    pub fn flush<P: SettingsStore>(&mut self, now: u32, store: &mut P, settings: &Settings) -> bool {
        if !self.dirty {
            return false;
        }
        self.write(now, store, settings)
    }

    fn write<P: SettingsStore>(&mut self, now: u32, store: &mut P, settings: &Settings) -> bool {
        match store.persist(settings) {
            Ok(()) => {
                debug!(volume = settings.volume, "settings persisted");
                self.dirty = false;
                true
            }
            Err(e) => {
                warn!(error = ?e, "settings persist failed");
                self.last_change_ms = now;
                false
            }
        }
    }
}
