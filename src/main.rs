use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod paths;
mod schema;
mod seed;
mod store;

use cli::Args;
use paths::DataPaths;
use seed::{apply_range, SeedRange};

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run(args)
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Args) -> Result<()> {
    let range = SeedRange::new(args.start, args.end);
    let paths = DataPaths::new(args.data_dir);
    println!(
        "Updating manifest for test-post-{} to test-post-{}...",
        range.start, range.end
    );
    if range.is_empty() {
        tracing::warn!(
            start = range.start,
            end = range.end,
            "start is after end; no test posts will be added"
        );
    }

    let loaded = store::load_documents(&paths)?;
    let outcome = apply_range(loaded.manifest, loaded.page_types, range);
    store::save_documents(
        &paths,
        &outcome.manifest,
        &outcome.page_types,
        &loaded.snapshot,
    )?;
    tracing::info!(data_dir = %paths.root().display(), "saved data files");

    println!("✅ Added {} new entries to manifest", outcome.added);
    println!("   Total entries: {}", outcome.manifest.entries.len());
    println!("   Total page types: {}", outcome.page_types.types.len());
    Ok(())
}
