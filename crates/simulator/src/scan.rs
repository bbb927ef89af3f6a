//! simulator scan — print the whole card hierarchy with decoded titles.

use std::path::Path;

use anyhow::{ensure, Result};
use colored::Colorize;
use library::layout::child_dir;
use library::record::{format_runtime_minutes, format_runtime_seconds};
use library::{load_record, MediaType, Record, Scanner, Tier};
use platform::storage_local::LocalFileStorage;
use platform::Storage;

/// Entry point called from main.rs
pub fn run(root: &Path) -> Result<()> {
    ensure!(root.is_dir(), "card root {} is not a directory", root.display());
    let mut storage = LocalFileStorage::new(root);
    let mut printed = 0usize;
    for media in MediaType::ALL {
        if !storage.exists(media.root_dir())? {
            continue;
        }
        println!("{} {}", media.label().bold(), media.root_dir().dimmed());
        printed = printed.saturating_add(walk(&mut storage, media.root_dir(), media.top_tier(), 1));
    }
    println!("{printed} entries");
    Ok(())
}

/// Print `parent`'s entries of `tier` and recurse into child tiers.
/// Returns the number of entries printed.
pub(crate) fn walk<S: Storage>(storage: &mut S, parent: &str, tier: Tier, depth: usize) -> usize {
    let catalog = Scanner::scan(storage, parent, tier);
    let indent = "  ".repeat(depth);
    let mut printed = 0usize;
    for name in catalog.iter() {
        let line = match load_record(storage, parent, name, tier) {
            Ok(record) => describe(&record),
            Err(e) => format!("{}", format!("<unreadable: {e}>").red()),
        };
        println!("{indent}{} {line}", name.cyan());
        printed = printed.saturating_add(1);
        if let Some(child) = tier.child() {
            let dir = child_dir(parent, name);
            printed = printed.saturating_add(walk(storage, &dir, child, depth.saturating_add(1)));
        }
    }
    if catalog.truncated() {
        println!("{indent}{}", format!("(only the first {} kept)", catalog.limit()).yellow());
    }
    printed
}

/// One-line summary: label plus the most useful secondary field.
pub(crate) fn describe(record: &Record) -> String {
    let extra = match record {
        Record::Show(r) => Some(format!("{} seasons, {} episodes", r.season_count, r.total_episodes)),
        Record::Season(r) => Some(format!("{} episodes", r.episode_count)),
        Record::Episode(r) => Some(format!(
            "S{}E{} {}",
            r.season_number,
            r.episode_number,
            format_runtime_minutes(r.runtime_minutes)
        )),
        Record::Movie(r) => Some(format!("{} {}", r.year, format_runtime_minutes(r.runtime_minutes))),
        Record::Collection(r) => Some(format!("{} videos", r.video_count)),
        Record::Video(r) => Some(format_runtime_minutes(r.runtime_minutes).to_string()),
        Record::Artist(r) => Some(format!("{} albums", r.album_count)),
        Record::MusicAlbum(r) => Some(format!("{} tracks", r.track_count)),
        Record::Track(r) => Some(format_runtime_seconds(r.runtime_seconds).to_string()),
        Record::PhotoAlbum(r) => Some(format!("{} photos", r.photo_count)),
        Record::Photo(r) => (!r.date_taken.is_empty()).then(|| r.date_taken.to_string()),
        Record::Playlist(r) => Some(format!("{} videos", r.video_count)),
        Record::PlaylistVideo(r) => Some(format_runtime_minutes(r.runtime_minutes).to_string()),
    };
    match extra {
        Some(extra) => format!("{} ({extra})", record.label()),
        None => record.label().to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn descriptor(tier: Tier, text: &str) -> Vec<u8> {
        let mut buf = vec![0u8; tier.size()];
        buf[..4].copy_from_slice(tier.magic());
        buf[4] = library::FORMAT_VERSION;
        buf[8..8 + text.len()].copy_from_slice(text.as_bytes());
        buf
    }

    #[test]
    fn walk_counts_every_level() {
        let tmp = TempDir::new().unwrap();
        let artist = tmp.path().join("Music/Queen");
        fs::create_dir_all(artist.join("A01")).unwrap();
        fs::write(artist.join("artist.sdb"), descriptor(Tier::Artist, "Queen")).unwrap();
        let mut album = descriptor(Tier::MusicAlbum, "");
        album[4] = 1;
        album[16..20].copy_from_slice(b"Jazz");
        fs::write(artist.join("A01/album.sdb"), album).unwrap();
        let mut track = descriptor(Tier::Track, "Mustapha");
        track[4] = 1;
        fs::write(artist.join("A01/T01.sdb"), &track).unwrap();
        fs::write(artist.join("A01/T02.sdb"), b"TJ").unwrap();

        let mut storage = LocalFileStorage::new(tmp.path());
        assert_eq!(walk(&mut storage, "/Music", Tier::Artist, 1), 4);
    }

    #[test]
    fn describe_adds_runtime() {
        let mut bytes = descriptor(Tier::Movie, "Heat");
        bytes[6] = 170;
        bytes[56..60].copy_from_slice(b"1995");
        let record = library::decode(&bytes, Tier::Movie).unwrap();
        assert_eq!(describe(&record), "Heat (1995 2:50)");
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = TempDir::new().unwrap();
        assert!(run(&tmp.path().join("nope")).is_err());
    }
}
