//! Application UI layer — navigation state, scrolling text, settings debounce.
//!
//! This crate is `no_std` by default; it uses `core`, `heapless` and
//! `embedded-graphics`, and reaches the card and clock only through the
//! `platform` capability traits.
//!
//! # Modules
//!
//! - [`screen`] — [`AppState`] and hierarchy [`Level`]s
//! - [`context`] — [`AppContext`], the single state object
//! - [`navigation`] — [`Navigator`], input remapping and transitions
//! - [`scroll`] — [`ScrollAnimator`] per-field timing automaton
//! - [`render`] — clipped scroll field drawing
//! - [`settings`] — [`SettingsDebouncer`]

#![cfg_attr(not(test), no_std)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
#![deny(clippy::expect_used)]

pub mod context;
pub mod navigation;
pub mod render;
pub mod screen;
pub mod scroll;
pub mod settings;

pub use context::{AppContext, MenuEntry, SettingsRow, TierNav, TierRecords};
pub use navigation::{remap, Action, Navigator, StateChange};
pub use screen::{AppState, Level};
pub use scroll::{ScrollAnimator, ScrollPhase, ScrollSlot, MAX_SCROLL_SLOTS};
pub use settings::SettingsDebouncer;
