use anyhow::{Context, Result};
use colored::Colorize;
use pageroute::Config;

use crate::watcher::PageWatcher;

/// Generates once, then keeps the route table in sync with the pages directory
pub fn execute(config: Config) -> Result<()> {
    super::build::execute(&config)?;

    println!();
    println!("{}", "Watching for page changes (Ctrl-C to stop)...".green().bold());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    runtime.block_on(PageWatcher::new(config).watch())
}
