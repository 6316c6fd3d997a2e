//! Sample data generator for PatchWork store files.
//!
//! Opens (or creates) a store file and seeds it with the built-in sample
//! snippets and collections.
//!
//! Run with: cargo run -p patchwork-data-gen -- --path PatchWork.json

use anyhow::{Context, Result};
use clap::Parser;
use patchwork_core::demo_data::{load_sample_data, seed_sample_data};
use patchwork_core::SnippetStore;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path of the store file to create or seed
    #[arg(short, long, default_value = "PatchWork.json")]
    path: PathBuf,

    /// Seed even when the store already holds snippets
    #[arg(long)]
    force: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let store = SnippetStore::open(&args.path)
        .with_context(|| format!("failed to open store at {}", args.path.display()))?;

    let seeded = if args.force {
        seed_sample_data(&store)?;
        true
    } else {
        load_sample_data(&store)?
    };

    if seeded {
        log::info!("seeded sample data into {}", args.path.display());
    } else {
        log::info!(
            "{} already holds snippets, skipping seed (use --force to override)",
            args.path.display()
        );
    }

    println!(
        "{}: {} snippets, {} collections",
        args.path.display(),
        store.snippet_count(),
        store.collections().len()
    );

    Ok(())
}
