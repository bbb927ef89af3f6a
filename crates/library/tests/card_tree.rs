//! End-to-end: a packaged card tree on disk → scan → load descriptors.
//!
//! Builds a small card under a temp dir with `std::fs`, then walks it with
//! `LocalFileStorage` the same way the navigation core does.

// Integration test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use std::fs;
use std::path::Path;

use library::layout::{child_dir, media_path};
use library::{load_record, MediaType, Record, Scanner, Tier, FORMAT_VERSION};
use platform::storage_local::LocalFileStorage;
use platform::Storage;
use tempfile::TempDir;

/// Descriptor bytes with magic, version (where present) and one text field.
fn descriptor(tier: Tier, number: u8, text_at: usize, text: &str) -> Vec<u8> {
    let mut buf = vec![0u8; tier.size()];
    buf[0..4].copy_from_slice(tier.magic());
    buf[4] = if tier.has_version() { FORMAT_VERSION } else { number };
    buf[text_at..text_at + text.len()].copy_from_slice(text.as_bytes());
    buf
}

fn write(root: &Path, rel: &str, bytes: &[u8]) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, bytes).unwrap();
}

fn seinfeld_card() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    let mut show = descriptor(Tier::Show, 0, 8, "Seinfeld");
    show[5] = 2;
    show[6] = 0x18;
    write(root, "TV/Seinfeld/show.sdb", &show);
    for season in 1..=2u8 {
        let dir = format!("TV/Seinfeld/S{season:02}");
        let title = format!("Season {season}");
        write(root, &format!("{dir}/season.sdb"), &descriptor(Tier::Season, season, 16, &title));
        for ep in 1..=3u8 {
            let title = format!("Episode {season}x{ep}");
            let mut rec = descriptor(Tier::Episode, season, 8, &title);
            rec[5] = ep;
            write(root, &format!("{dir}/E{ep:02}.sdb"), &rec);
            write(root, &format!("{dir}/E{ep:02}.avi"), b"RIFF");
        }
    }
    write(root, "Movies/Heat/movie.sdb", &descriptor(Tier::Movie, 0, 8, "Heat"));
    write(root, "Movies/Heat/movie.avi", b"RIFF");
    tmp
}

#[test]
fn media_roots_present_on_card() {
    let card = seinfeld_card();
    let mut storage = LocalFileStorage::new(card.path());
    let present: Vec<_> = MediaType::ALL
        .into_iter()
        .filter(|m| storage.exists(m.root_dir()).unwrap())
        .collect();
    assert_eq!(present, [MediaType::Tv, MediaType::Movies]);
}

#[test]
fn walk_show_to_episode() {
    let card = seinfeld_card();
    let mut storage = LocalFileStorage::new(card.path());

    let shows = Scanner::scan(&mut storage, "/TV", Tier::Show);
    assert_eq!(shows.iter().collect::<Vec<_>>(), ["Seinfeld"]);
    let Record::Show(show) = load_record(&mut storage, "/TV", "Seinfeld", Tier::Show).unwrap()
    else {
        panic!("expected show record");
    };
    assert_eq!(show.season_count, 2);
    assert_eq!(show.total_episodes, 24);

    let show_dir = child_dir("/TV", "Seinfeld");
    let seasons = Scanner::scan(&mut storage, &show_dir, Tier::Season);
    assert_eq!(seasons.iter().collect::<Vec<_>>(), ["S01", "S02"]);

    let season_dir = child_dir(&show_dir, "S02");
    let episodes = Scanner::scan(&mut storage, &season_dir, Tier::Episode);
    assert_eq!(episodes.len(), 3);
    let name = episodes.get(2).unwrap();
    let Record::Episode(ep) = load_record(&mut storage, &season_dir, name, Tier::Episode).unwrap()
    else {
        panic!("expected episode record");
    };
    assert_eq!((ep.season_number, ep.episode_number), (2, 3));
    assert_eq!(ep.title.as_str(), "Episode 2x3");

    let media = media_path(&season_dir, name, Tier::Episode).unwrap();
    assert!(storage.exists(&media).unwrap());
}

#[test]
fn movie_media_file_is_inside_its_dir() {
    let card = seinfeld_card();
    let mut storage = LocalFileStorage::new(card.path());
    let movies = Scanner::scan(&mut storage, "/Movies", Tier::Movie);
    let name = movies.get(0).unwrap();
    assert_eq!(load_record(&mut storage, "/Movies", name, Tier::Movie).unwrap().label(), "Heat");
    let media = media_path("/Movies", name, Tier::Movie).unwrap();
    assert_eq!(media.as_str(), "/Movies/Heat/movie.avi");
    assert!(storage.exists(&media).unwrap());
}

#[test]
fn corrupt_descriptor_does_not_hide_entry() {
    let card = seinfeld_card();
    write(card.path(), "Movies/Broken/movie.sdb", b"TJMV");
    let mut storage = LocalFileStorage::new(card.path());
    let movies = Scanner::scan(&mut storage, "/Movies", Tier::Movie);
    assert_eq!(movies.iter().collect::<Vec<_>>(), ["Broken", "Heat"]);
    assert!(load_record(&mut storage, "/Movies", "Broken", Tier::Movie).is_err());
}

#[test]
fn missing_root_scans_empty() {
    let card = seinfeld_card();
    let mut storage = LocalFileStorage::new(card.path());
    assert!(Scanner::scan(&mut storage, "/Photos", Tier::PhotoAlbum).is_empty());
}
