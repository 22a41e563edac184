//! Operation: inspect and clear the project artifact cache.

use std::path::Path;

use spindle_core::workspace::Workspace;
use spindle_maven::cache::LocalCache;

/// Print artifact cache statistics.
pub fn stats(start_dir: &Path) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let cache = LocalCache::new(&workspace.root_dir);

    let jars = if cache.root().is_dir() {
        spindle_util::fs::walk_files(cache.root())
            .map_err(spindle_util::errors::SpindleError::Io)?
            .iter()
            .filter(|p| p.extension().is_some_and(|ext| ext == "jar"))
            .count()
    } else {
        0
    };

    println!("Artifact cache: {}", cache.root().display());
    println!("  Artifacts: {jars}");
    println!("  Size:      {}", format_size(cache.size()));

    Ok(())
}

/// Remove the artifact cache entirely.
pub fn clean(start_dir: &Path) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let cache = LocalCache::new(&workspace.root_dir);

    let freed = cache.size();
    if cache.root().is_dir() {
        std::fs::remove_dir_all(cache.root()).map_err(spindle_util::errors::SpindleError::Io)?;
    }
    println!("Cleared artifact cache ({} freed)", format_size(freed));

    Ok(())
}

fn format_size(bytes: u64) -> String {
    if bytes >= 1024 * 1024 * 1024 {
        format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    } else if bytes >= 1024 * 1024 {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    } else if bytes >= 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{bytes} B")
    }
}
