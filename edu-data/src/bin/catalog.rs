use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use edu_data::Catalog;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Inspect and validate a service catalog.
///
/// Without `--dir` the catalog bundled into the binary is checked. With
/// `--dir` the five catalog files (service.json, subject.json, pass.json,
/// qna.json, cart_items.json) are read from that directory.
#[derive(Parser, Debug)]
#[command(name = "edu-catalog")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the catalog JSON files
    #[arg(short, long)]
    dir: Option<PathBuf>,

    /// Exit with an error when cross-file issues are found
    #[arg(short, long, default_value_t = false)]
    strict: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let catalog = match &args.dir {
        Some(dir) => Catalog::from_dir(dir)
            .with_context(|| format!("Failed to load catalog from: {}", dir.display()))?,
        None => Catalog::bundled().context("Failed to load bundled catalog")?,
    };

    println!("services:   {}", catalog.services.len());
    println!("subjects:   {}", catalog.subjects.len());
    println!("passes:     {}", catalog.passes.len());
    println!("qna:        {}", catalog.qna.len());
    println!("cart items: {}", catalog.cart_items.len());

    let issues = catalog.issues();
    if issues.is_empty() {
        info!("catalog is consistent");
        return Ok(());
    }

    for issue in &issues {
        warn!("{issue}");
    }
    if args.strict {
        bail!("{} catalog issue(s) found", issues.len());
    }
    Ok(())
}
