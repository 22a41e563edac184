//! Operation: remove build output, optionally the artifact cache too.

use std::path::Path;

use spindle_core::workspace::Workspace;
use spindle_util::errors::SpindleError;

/// Remove every module's `build/` directory.
///
/// With `all`, the workspace `.spindle/` directory (artifact cache included)
/// is removed as well, so the next `fetch` starts from nothing.
pub fn clean(start_dir: &Path, all: bool) -> miette::Result<CleanResult> {
    let workspace = Workspace::discover(start_dir)?;

    let mut build_dirs = 0u32;
    for module in &workspace.modules {
        let build_dir = module.build_dir();
        if build_dir.exists() {
            std::fs::remove_dir_all(&build_dir).map_err(SpindleError::Io)?;
            build_dirs += 1;
        }
    }

    let mut cache_cleared = false;
    if all {
        let spindle_dir = workspace.root_dir.join(".spindle");
        if spindle_dir.exists() {
            remove_if_exists(&spindle_dir);
            cache_cleared = true;
        }
    }

    if build_dirs == 0 && !cache_cleared {
        Ok(CleanResult::NothingToClean)
    } else {
        Ok(CleanResult::Cleaned {
            build_dirs,
            cache_cleared,
        })
    }
}

fn remove_if_exists(path: &Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_dir_all(path) {
            tracing::warn!("Failed to remove directory {}: {e}", path.display());
        }
    }
}

/// Result of a clean operation.
pub enum CleanResult {
    Cleaned { build_dirs: u32, cache_cleared: bool },
    NothingToClean,
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
[mod]
id = "ore-compass"
version = "1.0.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"
"#;

    #[test]
    fn removes_build_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Spindle.toml"), MANIFEST).unwrap();
        std::fs::create_dir_all(tmp.path().join("build/resources/main")).unwrap();

        let result = clean(tmp.path(), false).unwrap();
        assert!(matches!(
            result,
            CleanResult::Cleaned { build_dirs: 1, cache_cleared: false }
        ));
        assert!(!tmp.path().join("build").exists());
    }

    #[test]
    fn keeps_cache_without_all() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Spindle.toml"), MANIFEST).unwrap();
        std::fs::create_dir_all(tmp.path().join("build")).unwrap();
        std::fs::create_dir_all(tmp.path().join(".spindle/libraries")).unwrap();

        clean(tmp.path(), false).unwrap();
        assert!(tmp.path().join(".spindle/libraries").is_dir());
    }

    #[test]
    fn all_removes_cache_too() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Spindle.toml"), MANIFEST).unwrap();
        std::fs::create_dir_all(tmp.path().join(".spindle/libraries")).unwrap();

        let result = clean(tmp.path(), true).unwrap();
        assert!(matches!(
            result,
            CleanResult::Cleaned { build_dirs: 0, cache_cleared: true }
        ));
        assert!(!tmp.path().join(".spindle").exists());
    }

    #[test]
    fn nothing_to_clean() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Spindle.toml"), MANIFEST).unwrap();

        let result = clean(tmp.path(), false).unwrap();
        assert!(matches!(result, CleanResult::NothingToClean));
    }

    #[test]
    fn cleans_every_member_build_dir() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("Spindle.toml"),
            r#"
[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[workspace]
members = ["alpha", "beta"]
"#,
        )
        .unwrap();
        for (name, id) in [("alpha", "alpha-mod"), ("beta", "beta-mod")] {
            let dir = tmp.path().join(name);
            std::fs::create_dir_all(dir.join("build/libs")).unwrap();
            std::fs::write(
                dir.join("Spindle.toml"),
                format!("[mod]\nid = \"{id}\"\nversion = \"0.1.0\"\n"),
            )
            .unwrap();
        }

        let result = clean(tmp.path(), false).unwrap();
        assert!(matches!(
            result,
            CleanResult::Cleaned { build_dirs: 2, cache_cleared: false }
        ));
        assert!(!tmp.path().join("alpha/build").exists());
        assert!(!tmp.path().join("beta/build").exists());
    }
}
