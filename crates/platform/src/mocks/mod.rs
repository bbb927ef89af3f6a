//! Mock implementations for testing
//!
//! This module provides in-memory implementations of the platform
//! capabilities for use in unit and integration tests and in the simulator.

use std::cell::Cell;
use std::collections::{BTreeMap, BTreeSet};
use std::string::{String, ToString};
use std::vec::Vec;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;

use crate::clock::Clock;
use crate::settings::{Settings, SettingsStore};
use crate::storage::{DirEntry, File, Storage};

/// Manually advanced clock.
#[derive(Debug, Default)]
pub struct MockClock {
    now: Cell<u32>,
}

impl MockClock {
    /// Clock starting at `ms`.
    pub fn new(ms: u32) -> Self {
        Self { now: Cell::new(ms) }
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: u32) {
        self.now.set(ms);
    }

    /// Advance by `ms`, wrapping like the hardware counter.
    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

/// Error returned by [`MockStorage`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MockStorageError {
    /// No file or directory at the path.
    #[error("not found: {0}")]
    NotFound(String),
}

/// In-memory file tree.
///
/// Directories exist implicitly above every file, or explicitly via
/// [`add_dir`](Self::add_dir). Listings come back in reverse-sorted order
/// when [`reverse_listing`](Self::reverse_listing) is set so tests can prove
/// that callers do not depend on backend order.
#[derive(Debug, Default)]
pub struct MockStorage {
    files: BTreeMap<String, Vec<u8>>,
    dirs: BTreeSet<String>,
    reverse: bool,
    reads: usize,
}

impl MockStorage {
    /// Empty card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file (and its parent directories).
    pub fn add_file(&mut self, path: &str, data: impl Into<Vec<u8>>) -> &mut Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.files.insert(path, data.into());
        self
    }

    /// Add an empty directory.
    pub fn add_dir(&mut self, path: &str) -> &mut Self {
        let path = normalize(path);
        self.add_parents(&path);
        self.dirs.insert(path);
        self
    }

    /// Remove a file.
    pub fn remove_file(&mut self, path: &str) {
        self.files.remove(&normalize(path));
    }

    /// List entries in reverse name order.
    pub fn reverse_listing(&mut self, reverse: bool) -> &mut Self {
        self.reverse = reverse;
        self
    }

    /// Number of files opened so far.
    pub fn reads(&self) -> usize {
        self.reads
    }

    fn add_parents(&mut self, path: &str) {
        let mut cur = path;
        while let Some((parent, _)) = cur.rsplit_once('/') {
            if parent.is_empty() {
                break;
            }
            self.dirs.insert(parent.to_string());
            cur = parent;
        }
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        std::format!("/{trimmed}")
    }
}

/// Open handle into a [`MockStorage`] file.
pub struct MockFile {
    data: Vec<u8>,
    pos: usize,
}

impl File for MockFile {
    type Error = MockStorageError;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let rest = self.data.get(self.pos..).unwrap_or(&[]);
        let n = rest.len().min(buf.len());
        if let (Some(dst), Some(src)) = (buf.get_mut(..n), rest.get(..n)) {
            dst.copy_from_slice(src);
        }
        self.pos = self.pos.saturating_add(n);
        Ok(n)
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

impl Storage for MockStorage {
    type Error = MockStorageError;
    type File = MockFile;

    fn open_file(&mut self, path: &str) -> Result<Self::File, Self::Error> {
        let path = normalize(path);
        let data = self
            .files
            .get(&path)
            .cloned()
            .ok_or(MockStorageError::NotFound(path))?;
        self.reads = self.reads.saturating_add(1);
        Ok(MockFile { data, pos: 0 })
    }

    fn exists(&mut self, path: &str) -> Result<bool, Self::Error> {
        let path = normalize(path);
        Ok(path == "/" || self.files.contains_key(&path) || self.dirs.contains(&path))
    }

    fn list_dir(
        &mut self,
        path: &str,
        visit: &mut dyn FnMut(DirEntry<'_>),
    ) -> Result<(), Self::Error> {
        let dir = normalize(path);
        if dir != "/" && !self.dirs.contains(&dir) {
            return Err(MockStorageError::NotFound(dir));
        }
        let prefix = if dir == "/" { dir.clone() } else { std::format!("{dir}/") };
        let mut entries: BTreeMap<String, bool> = BTreeMap::new();
        for p in self.files.keys().chain(self.dirs.iter()) {
            if let Some(rest) = p.strip_prefix(&prefix) {
                if rest.is_empty() {
                    continue;
                }
                match rest.split_once('/') {
                    Some((child, _)) => entries.insert(child.to_string(), true),
                    None => entries.insert(rest.to_string(), self.dirs.contains(p)),
                };
            }
        }
        let mut list: Vec<_> = entries.into_iter().collect();
        if self.reverse {
            list.reverse();
        }
        for (name, is_dir) in &list {
            visit(DirEntry { name, is_dir: *is_dir });
        }
        Ok(())
    }
}

/// Error returned by [`MockSettingsStore`] when failure is injected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("settings store unavailable")]
pub struct MockSettingsError;

/// In-memory settings store that counts writes.
#[derive(Debug, Default)]
pub struct MockSettingsStore {
    saved: Option<Settings>,
    persist_count: usize,
    fail: bool,
    fail_load: bool,
}

impl MockSettingsStore {
    /// Store pre-seeded with `settings`.
    pub fn with(settings: Settings) -> Self {
        Self { saved: Some(settings), ..Self::default() }
    }

    /// Make every persist fail until cleared.
    pub fn set_failing(&mut self, fail: bool) {
        self.fail = fail;
    }

    /// Make every load fail until cleared.
    pub fn set_load_failing(&mut self, fail: bool) {
        self.fail_load = fail;
    }

    /// Number of successful persists.
    pub fn persist_count(&self) -> usize {
        self.persist_count
    }

    /// Last persisted settings.
    pub fn saved(&self) -> Option<&Settings> {
        self.saved.as_ref()
    }
}

impl SettingsStore for MockSettingsStore {
    type Error = MockSettingsError;

    fn load(&mut self, _defaults: &Settings) -> Result<Option<Settings>, Self::Error> {
        if self.fail_load {
            return Err(MockSettingsError);
        }
        Ok(self.saved.clone())
    }

    fn persist(&mut self, settings: &Settings) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockSettingsError);
        }
        self.saved = Some(settings.clone());
        self.persist_count = self.persist_count.saturating_add(1);
        Ok(())
    }
}

/// Mock display that records every pixel written.
pub struct MockDisplay {
    width: u32,
    height: u32,
    pixels: BTreeMap<(i32, i32), Rgb565>,
}

impl MockDisplay {
    /// Create new mock display
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, pixels: BTreeMap::new() }
    }

    /// Color last written at `(x, y)`, if any.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Every written coordinate.
    pub fn touched(&self) -> impl Iterator<Item = Point> + '_ {
        self.pixels.keys().map(|&(x, y)| Point::new(x, y))
    }
}

impl DrawTarget for MockDisplay {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            self.pixels.insert((p.x, p.y), color);
        }
        Ok(())
    }
}

impl OriginDimensions for MockDisplay {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}
