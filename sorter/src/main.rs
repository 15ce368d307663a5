use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use coursedrop_sorter::SorterConfig;
use coursedrop_sorter::config::DEFAULT_MAX_COLLISION_ATTEMPTS;
use tracing_subscriber::EnvFilter;

/// Files structured course downloads into a per-unit, per-week tree.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory to watch. Defaults to the platform download directory.
    #[arg(long, env = "COURSEDROP_WATCH_DIR")]
    watch_dir: Option<PathBuf>,

    /// Root of the organized tree.
    #[arg(long, env = "COURSEDROP_BASE_DIR")]
    base_dir: PathBuf,

    /// Also sort entries renamed into the watched directory.
    #[arg(long)]
    include_renames: bool,

    /// Highest collision suffix to try before giving up on a file.
    #[arg(long, default_value_t = DEFAULT_MAX_COLLISION_ATTEMPTS)]
    max_collision_attempts: u32,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let watch_dir = match args.watch_dir {
        Some(dir) => dir,
        None => dirs::download_dir()
            .context("no download directory on this platform; pass --watch-dir")?,
    };

    let config = SorterConfig::new(watch_dir, args.base_dir)
        .include_renames(args.include_renames)
        .with_max_collision_attempts(args.max_collision_attempts);

    coursedrop_sorter::run(config)
        .await
        .context("download sorter stopped")
}
