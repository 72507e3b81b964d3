use anyhow::Result;
use clap::Parser;
use tracing::info;

use gitlocalstats::app;
use gitlocalstats::cli::CliArgs;
use gitlocalstats::scan::ErrorPolicy;
use gitlocalstats::store::Store;

fn main() -> Result<()> {
    // Initialize tracing with env filter
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = CliArgs::parse();
    let policy = if args.keep_going {
        ErrorPolicy::Skip
    } else {
        ErrorPolicy::Abort
    };

    let store = Store::open_default()?;
    info!("Using registry at {}", store.path().display());

    println!("Scanning {} ...", args.folder.display());
    let summary = app::scan_folder(&args.folder, &store, policy)?;
    println!(
        "Found {} repositories, added {} new ({} total in registry)",
        summary.found, summary.added, summary.total
    );

    Ok(())
}
