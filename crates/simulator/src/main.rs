// Desktop/tooling crate — unwrap/expect/panic acceptable in non-embedded code.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod decode;
mod run;
mod scan;
mod script;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "simulator")]
#[command(about = "TinyJukebox media browser on a local card tree", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List every media root's catalog with decoded titles
    Scan {
        /// Card root (the directory holding TV/, Movies/, ...)
        root: PathBuf,
    },
    /// Decode one descriptor file
    Decode {
        /// Descriptor file (show.sdb, E01.sdb, ...)
        file: PathBuf,
        /// Tier name: show, season, episode, movie, collection, video,
        /// artist, album, track, photo-album, photo, playlist, playlist-video
        #[arg(long)]
        tier: String,
    },
    /// Drive the navigation core with a scripted input sequence
    Run {
        /// Card root
        root: PathBuf,
        /// Comma-separated steps, e.g. `vol+,ch+,vol+,wait:400,mute,power`
        #[arg(long)]
        script: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins; otherwise info for everything.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Scan { root } => scan::run(&root),
        Commands::Decode { file, tier } => decode::run(&file, &tier),
        Commands::Run { root, script } => run::run(&root, &script),
    }
}
