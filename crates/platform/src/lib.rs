//! Hardware Abstraction Layer (HAL) for the TinyJukebox media browser
//!
//! This crate provides the capability traits the navigation core calls but
//! does not implement, so the core can be developed and tested without the
//! physical player.
//!
//! # Architecture Layers
//!
//! ```text
//! Simulator / firmware binary
//!         ↓
//! Feature Layers (ui, library)
//!         ↓
//! Platform HAL (this crate - capability traits)
//!         ↓
//! SD card, encoders, IR receiver, display
//! ```
//!
//! # Capabilities
//!
//! - [`Storage`] - Directory listing and file reads on removable storage
//! - [`Clock`] - Monotonic millisecond clock (wraps like `millis()`)
//! - [`InputLatch`] - Edge-triggered input flags, snapshot-and-clear
//! - [`SettingsStore`] - Persisted user settings
//! - [`TextMeasure`] - Pixel width of a rendered string
//!
//! # Features
//!
//! - `std`: Local filesystem storage and in-memory mocks
//! - `defmt`: Enable defmt logging derives

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::panic)] // no panic!() in production code
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod clock;
pub mod config;
pub mod display;
pub mod input;
pub mod settings;
pub mod storage;

#[cfg(any(test, feature = "std"))]
pub mod storage_local;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main capability traits
pub use clock::{elapsed_ms, Clock, EmbassyClock};
pub use config::TimingConfig;
pub use display::{FixedAdvance, TextMeasure};
pub use input::{InputEvent, InputFlags, InputLatch};
pub use settings::{Settings, SettingsStore};
pub use storage::{DirEntry, File, Storage};
