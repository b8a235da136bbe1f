//! CLI argument parsing for the manifest seeder.
//!
//! The CLI only collects the range and the data directory; all merge policy
//! lives in `seed` so it can be exercised without a filesystem.
use clap::Parser;
use std::path::PathBuf;

/// Data directory used by the content system, relative to the tools directory.
pub const DEFAULT_DATA_DIR: &str = "../data";

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "manifest-seed",
    version,
    about = "Add test-post entries to manifest.json and page-types.json",
    after_help = "Examples:\n  manifest-seed              Seed test-post-1 through test-post-100\n  manifest-seed 1 10         Seed test-post-1 through test-post-10\n  manifest-seed 51 60 --data-dir /srv/site/data"
)]
pub struct Args {
    /// First test-post index (inclusive)
    #[arg(value_name = "START", default_value_t = 1, allow_negative_numbers = true)]
    pub start: i64,

    /// Last test-post index (inclusive)
    #[arg(value_name = "END", default_value_t = 100, allow_negative_numbers = true)]
    pub end: i64,

    /// Directory containing manifest.json and page-types.json
    #[arg(long, value_name = "DIR", default_value = DEFAULT_DATA_DIR)]
    pub data_dir: PathBuf,

    /// Emit debug logging on stderr
    #[arg(long)]
    pub verbose: bool,
}
