use anyhow::{bail, Context, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Finds every page file under `pages_dir`, sorted
///
/// Paths are returned as given by the glob, rooted at `pages_dir`.
pub fn discover_pages(pages_dir: &Path, extension: &str) -> Result<Vec<String>> {
    if !pages_dir.is_dir() {
        bail!("Pages directory not found: {:?}", pages_dir);
    }

    let root = glob::Pattern::escape(&pages_dir.to_string_lossy());
    let pattern = format!(
        "{}/**/*.{}",
        root.trim_end_matches('/'),
        extension.trim_start_matches('.')
    );

    let mut files = Vec::new();
    for entry in glob::glob(&pattern).with_context(|| format!("Invalid page pattern: {}", pattern))? {
        match entry {
            Ok(path) if path.is_file() => files.push(path.to_string_lossy().into_owned()),
            Ok(_) => {}
            Err(e) => warn!("Skipping unreadable path: {}", e),
        }
    }

    files.sort();
    files.dedup();
    debug!(pattern = %pattern, count = files.len(), "pages discovered");
    Ok(files)
}
