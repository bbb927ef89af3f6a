//! Architecture boundary tests. Run with `cargo test -p simulator --test arch_boundaries`.
// Architecture test file: expect/unwrap/panic are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//!
//! These tests enforce the layering of the workspace:
//!   Rule 1: `platform` depends on no other workspace crate
//!   Rule 2: `library` depends on `platform` only
//!   Rule 3: `ui` depends on `platform` and `library`, never on std backends
//!   Rule 4: core crates are `no_std` and free of panicking shortcuts
//!
//! The simulator links every layer, so this is the one test binary that can
//! see them all.

use std::fs;
use std::path::{Path, PathBuf};

const CORE_CRATES: [&str; 3] = ["platform", "library", "ui"];

fn crate_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join(name)
}

/// Entries of the `[dependencies]` table of a crate manifest, comments dropped.
fn dependencies(name: &str) -> Vec<String> {
    let manifest = fs::read_to_string(crate_dir(name).join("Cargo.toml")).unwrap();
    let start = manifest.find("[dependencies]").expect("manifest has [dependencies]");
    let rest = &manifest[start + "[dependencies]".len()..];
    let end = rest.find("\n[").unwrap_or(rest.len());
    rest[..end]
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect()
}

fn depends_on(name: &str, dep: &str) -> bool {
    dependencies(name).iter().any(|l| {
        l.split(['=', '.', ' ']).next() == Some(dep)
    })
}

/// Non-test source of every `.rs` file under `src/`.
fn production_sources(name: &str) -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    let mut pending = vec![crate_dir(name).join("src")];
    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                if path.file_name().is_some_and(|n| n == "mocks") {
                    continue;
                }
                pending.push(path);
            } else if path.extension().is_some_and(|e| e == "rs") {
                let text = fs::read_to_string(&path).unwrap();
                let production = text
                    .split("#[cfg(test)]")
                    .next()
                    .unwrap_or("")
                    .lines()
                    .filter(|l| {
                        let l = l.trim_start();
                        !l.starts_with("//") && !l.starts_with("#!")
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                out.push((path, production));
            }
        }
    }
    out
}

#[test]
fn platform_has_no_workspace_dependencies() {
    assert!(!depends_on("platform", "library"), "platform must not depend on library");
    assert!(!depends_on("platform", "ui"), "platform must not depend on ui");
}

#[test]
fn library_sits_on_platform_only() {
    assert!(depends_on("library", "platform"));
    assert!(!depends_on("library", "ui"), "library must not depend on ui");
}

#[test]
fn ui_does_not_pull_std_backends() {
    assert!(
        !dependencies("ui").iter().any(|l| l.contains("\"std\"")),
        "ui [dependencies] must not enable std features; use the crate's own `std` feature"
    );
}

#[test]
fn core_crates_are_no_std() {
    for name in CORE_CRATES {
        let lib = fs::read_to_string(crate_dir(name).join("src/lib.rs")).unwrap();
        assert!(lib.contains("no_std"), "{name} must be no_std outside tests");
    }
}

#[test]
fn core_crates_have_no_panicking_shortcuts() {
    for name in CORE_CRATES {
        for (path, source) in production_sources(name) {
            for needle in [".unwrap()", ".expect(", "panic!(", "todo!(", "unimplemented!("] {
                assert!(
                    !source.contains(needle),
                    "{} uses `{needle}` outside tests",
                    path.display()
                );
            }
        }
    }
}

#[test]
fn timing_comes_from_config() {
    // Durations belong in TimingConfig, not in the state machine.
    let nav = fs::read_to_string(crate_dir("ui").join("src/navigation.rs")).unwrap();
    let production = nav.split("#[cfg(test)]").next().unwrap();
    for literal in ["1500", "1_500", "2000", "2_000", "300"] {
        assert!(
            !production.contains(literal),
            "navigation.rs hardcodes `{literal}`; read it from TimingConfig"
        );
    }
}

#[test]
fn workspace_cargo_toml_has_panic_prevention_lints() {
    let cargo_toml = include_str!("../../../Cargo.toml");
    assert!(cargo_toml.contains("unwrap_used"));
    assert!(cargo_toml.contains("expect_used"));
    assert!(cargo_toml.contains(r#"panic       = "deny""#));
    assert!(cargo_toml.contains(r#"indexing_slicing = "deny""#));
}

#[test]
fn navigator_starts_at_boot() {
    let nav = ui::Navigator::default();
    assert_eq!(nav.state(), ui::AppState::Boot);
    assert_eq!(nav.timing(), &platform::TimingConfig::DEFAULT);
}

#[test]
fn every_media_root_has_a_browser() {
    for media in library::MediaType::ALL {
        let state = ui::AppState::for_tier(media.top_tier());
        assert!(state.is_browser(), "{} has no browser state", media.label());
    }
}
