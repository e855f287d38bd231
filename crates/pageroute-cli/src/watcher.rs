use anyhow::{Context, Result};
use colored::Colorize;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use pageroute::Config;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::commands::build;

/// Quiet period before regenerating, so bursts of events rebuild once
const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watches the pages directory and regenerates the route table when pages
/// appear, disappear or get renamed
pub struct PageWatcher {
    config: Config,
    debounce: Duration,
}

impl PageWatcher {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            debounce: DEBOUNCE,
        }
    }

    /// Start watching; returns on Ctrl-C
    pub async fn watch(&self) -> Result<()> {
        let pages_dir = self.config.pages_dir();
        let extension = self.config.routing.extension.clone();

        let (tx, mut rx) = mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            match res {
                Ok(event) => {
                    if let Some(path) = page_change(&event, &extension) {
                        // Ignore if the receiver is gone (shutting down)
                        let _ = tx.blocking_send(path);
                    }
                }
                Err(e) => error!("Watch error: {:?}", e),
            }
        })?;

        watcher
            .watch(&pages_dir, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {:?}", pages_dir))?;
        println!("  {} Watching: {}", "👀".cyan(), pages_dir.display());
        info!("Watching: {:?}", pages_dir);

        loop {
            tokio::select! {
                changed = rx.recv() => {
                    let Some(path) = changed else { break };

                    // Let the burst settle, then fold everything queued into one rebuild
                    tokio::time::sleep(self.debounce).await;
                    let mut events = 1;
                    while rx.try_recv().is_ok() {
                        events += 1;
                    }

                    println!("{} Page change: {} ({} event(s))", "🔄".yellow(), path.display(), events);
                    match build::generate(&self.config) {
                        Ok(generated) => build::report(&generated),
                        Err(e) => eprintln!("{} Failed to regenerate routes: {:#}", "❌".red(), e),
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!("{} Stopped watching", "✓".green());
                    break;
                }
            }
        }

        drop(watcher);
        Ok(())
    }
}

/// Returns the path of an event that changes the set of pages
///
/// Creations and removals count when they touch a page file. Renames always
/// count: renaming a folder (for instance to `!folder`) moves every page in it.
fn page_change(event: &Event, extension: &str) -> Option<PathBuf> {
    let any_path = match event.kind {
        EventKind::Create(_) | EventKind::Remove(_) => false,
        EventKind::Modify(ModifyKind::Name(_)) => true,
        _ => return None,
    };

    event
        .paths
        .iter()
        .find(|path| any_path || has_extension(path, extension))
        .cloned()
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(extension.trim_start_matches('.'))
}
