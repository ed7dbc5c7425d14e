//! Interactive library manager over a SQLite database file.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use library_manager::seed::seed_if_empty;
use library_manager::{menu, LibraryStore, StoreConfig};

#[derive(Parser, Debug)]
#[command(version, about = "Inventory and loan manager for a small library")]
struct Args {
    /// Path to the SQLite database file
    #[arg(short, long, value_name = "PATH", default_value = "library.db")]
    database: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = StoreConfig::new(&args.database);
    let mut store = LibraryStore::open(&config)?;

    let seeded = seed_if_empty(&mut store)?;
    if seeded > 0 {
        info!("seeded {seeded} dummy books into {}", args.database);
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    menu::run(&mut store, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}
