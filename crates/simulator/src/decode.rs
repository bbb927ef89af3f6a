//! simulator decode — decode a single descriptor file.

use std::path::Path;

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use library::{decode, Tier};

/// Entry point called from main.rs
pub fn run(file: &Path, tier: &str) -> Result<()> {
    let tier = parse_tier(tier)?;
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    match decode(&bytes, tier) {
        Ok(record) => {
            println!("{} {}", tier.name().bold(), crate::scan::describe(&record));
            println!("{record:#?}");
            Ok(())
        }
        Err(e) => {
            println!("{} {e}", "decode failed:".red());
            Err(anyhow!("{} is not a valid {} descriptor: {e}", file.display(), tier.name()))
        }
    }
}

fn parse_tier(name: &str) -> Result<Tier> {
    Tier::from_name(name).ok_or_else(|| {
        let known: Vec<_> = Tier::ALL.iter().map(|t| t.name()).collect();
        anyhow!("unknown tier {name:?} (expected one of: {})", known.join(", "))
    })
}
