//! Project-local artifact cache mirroring Maven repository layout.

use std::fs;
use std::path::{Path, PathBuf};

/// Project-local artifact cache at `<project>/.spindle/libraries/`.
#[derive(Debug, Clone)]
pub struct LocalCache {
    root: PathBuf,
}

impl LocalCache {
    /// Create a cache rooted at `project_root/.spindle/libraries/`.
    pub fn new(project_root: &Path) -> Self {
        Self {
            root: project_root.join(".spindle").join("libraries"),
        }
    }

    /// The root directory of this cache.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path within the cache for a given Maven coordinate.
    pub fn artifact_dir(&self, group: &str, artifact: &str, version: &str) -> PathBuf {
        self.root
            .join(group.replace('.', "/"))
            .join(artifact)
            .join(version)
    }

    fn artifact_path(&self, group: &str, artifact: &str, version: &str, filename: &str) -> PathBuf {
        self.artifact_dir(group, artifact, version).join(filename)
    }

    /// Check if a JAR is cached and return its path.
    pub fn get_jar(&self, group: &str, artifact: &str, version: &str) -> Option<PathBuf> {
        let filename = format!("{artifact}-{version}.jar");
        let path = self.artifact_path(group, artifact, version, &filename);
        path.is_file().then_some(path)
    }

    /// Check if a POM is cached and return its path.
    pub fn get_pom(&self, group: &str, artifact: &str, version: &str) -> Option<PathBuf> {
        let filename = format!("{artifact}-{version}.pom");
        let path = self.artifact_path(group, artifact, version, &filename);
        path.is_file().then_some(path)
    }

    /// Store artifact data in the cache, creating directories as needed.
    pub fn put(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        filename: &str,
        data: &[u8],
    ) -> miette::Result<PathBuf> {
        let dir = self.artifact_dir(group, artifact, version);
        fs::create_dir_all(&dir).map_err(spindle_util::errors::SpindleError::Io)?;
        let path = dir.join(filename);
        fs::write(&path, data).map_err(spindle_util::errors::SpindleError::Io)?;
        Ok(path)
    }

    /// Store a JAR file in the cache.
    pub fn put_jar(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        data: &[u8],
    ) -> miette::Result<PathBuf> {
        let filename = format!("{artifact}-{version}.jar");
        self.put(group, artifact, version, &filename, data)
    }

    /// Store a POM file in the cache.
    pub fn put_pom(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        pom_xml: &str,
    ) -> miette::Result<PathBuf> {
        let filename = format!("{artifact}-{version}.pom");
        self.put(group, artifact, version, &filename, pom_xml.as_bytes())
    }

    /// Check whether the JAR for this coordinate exists in cache.
    pub fn has_artifact(&self, group: &str, artifact: &str, version: &str) -> bool {
        self.get_jar(group, artifact, version).is_some()
    }

    /// Remove cached artifacts not present in the locked set.
    ///
    /// `keep` contains `(group, artifact, version)` tuples of artifacts that
    /// should be retained. Everything else gets deleted. Returns the number
    /// of version directories removed.
    pub fn prune(&self, keep: &std::collections::HashSet<(String, String, String)>) -> u32 {
        let mut removed = 0u32;
        if !self.root.is_dir() {
            return removed;
        }
        prune_version_dirs(&self.root, &self.root, keep, &mut removed);
        removed
    }

    /// Total size of the cache directory in bytes.
    pub fn size(&self) -> u64 {
        spindle_util::fs::dir_size(&self.root)
    }
}

/// Walk the cache tree to find version directories (leaf dirs containing
/// files) and remove those not in the `keep` set.
///
/// Cache layout: `<root>/<group-path>/<artifact>/<version>/`.
fn prune_version_dirs(
    root: &Path,
    current: &Path,
    keep: &std::collections::HashSet<(String, String, String)>,
    removed: &mut u32,
) {
    let Ok(entries) = fs::read_dir(current) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let has_files = fs::read_dir(&path)
            .map(|rd| rd.flatten().any(|e| e.path().is_file()))
            .unwrap_or(false);

        if has_files {
            if let Some(coord) = reconstruct_coordinate(root, &path) {
                if !keep.contains(&coord) {
                    let _ = fs::remove_dir_all(&path);
                    *removed += 1;
                }
            }
        } else {
            prune_version_dirs(root, &path, keep, removed);
            // Remove parent dirs left empty after pruning children.
            if fs::read_dir(&path)
                .map(|mut rd| rd.next().is_none())
                .unwrap_or(true)
            {
                let _ = fs::remove_dir(&path);
            }
        }
    }
}

/// Reconstruct `(group, artifact, version)` from a cache path.
///
/// Path: `<root>/net/fabricmc/fabric-loader/0.16.9`
/// Result: `("net.fabricmc", "fabric-loader", "0.16.9")`
fn reconstruct_coordinate(root: &Path, version_dir: &Path) -> Option<(String, String, String)> {
    let rel = version_dir.strip_prefix(root).ok()?;
    let components: Vec<_> = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy().to_string())
        .collect();
    if components.len() < 3 {
        return None;
    }
    let version = components.last()?.clone();
    let artifact = components[components.len() - 2].clone();
    let group = components[..components.len() - 2].join(".");
    Some((group, artifact, version))
}
