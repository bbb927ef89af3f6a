//! Application configuration and constants
//!
//! This module defines central configuration values used across the application.
//! Timing values are grouped in [`TimingConfig`] so every consumer takes them
//! as data rather than hardcoding literals.

/// The application name
pub const APP_NAME: &str = "TinyJukebox";

/// Visible display width in pixels (shared with the video framebuffer).
pub const VIDEO_W: u32 = 210;

/// Visible display height in pixels.
pub const VIDEO_H: u32 = 135;

/// Browser thumbnail width in pixels (RGB565).
pub const THUMB_W: u32 = 108;

/// Browser thumbnail height in pixels.
pub const THUMB_H: u32 = 67;

/// Highest volume step.
pub const MAX_VOLUME: u8 = 10;

/// Volume used when no valid setting has been persisted.
pub const DEFAULT_VOLUME: u8 = 5;

/// Slideshow interval bounds in seconds.
pub const SLIDESHOW_SEC_MIN: u8 = 1;

/// Upper slideshow interval bound in seconds.
pub const SLIDESHOW_SEC_MAX: u8 = 60;

/// Timing constants for transitions, splash, scrolling text and settings
/// persistence.
///
/// All values are milliseconds unless the field name says otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Static burst shown between major screens.
    pub transition_ms: u32,
    /// Splash screen duration before the media selector appears.
    pub splash_ms: u32,
    /// Quiet interval after the last settings change before persisting.
    pub settings_quiet_ms: u32,
    /// Dwell at offset 0 before a scroll field starts moving.
    pub scroll_initial_pause_ms: u32,
    /// Interval between scroll steps.
    pub scroll_step_ms: u32,
    /// Pixels advanced per scroll step.
    pub scroll_step_px: u16,
    /// Dwell at the maximum offset before snapping back.
    pub scroll_end_pause_ms: u32,
    /// Default photo slideshow interval in seconds.
    pub slideshow_default_sec: u8,
}

impl TimingConfig {
    /// Tuning used on the shipping device.
    pub const DEFAULT: Self = Self {
        transition_ms: 300,
        splash_ms: 1_500,
        settings_quiet_ms: 2_000,
        scroll_initial_pause_ms: 1_500,
        scroll_step_ms: 50,
        scroll_step_px: 2,
        scroll_end_pause_ms: 1_000,
        slideshow_default_sec: 5,
    };
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
