use std::path::PathBuf;

use crate::manifest::{Manifest, ResourcesConfig};

/// A resolved project module: one `Spindle.toml` manifest plus its paths.
///
/// After workspace loading, `manifest` already reflects inherited root
/// configuration (properties, repositories, catalog).
#[derive(Debug, Clone)]
pub struct Module {
    pub manifest: Manifest,
    pub manifest_path: PathBuf,
    pub root_dir: PathBuf,
}

impl Module {
    /// The mod id, or the directory name for configuration-only roots.
    pub fn name(&self) -> &str {
        match &self.manifest.mod_meta {
            Some(meta) => &meta.id,
            None => self
                .root_dir
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("workspace"),
        }
    }

    /// The mod version, if this module declares a mod.
    pub fn version(&self) -> Option<&str> {
        self.manifest
            .mod_meta
            .as_ref()
            .map(|meta| meta.version.as_str())
    }

    /// True when the module declares a mod (not a bare workspace root).
    pub fn is_mod(&self) -> bool {
        self.manifest.mod_meta.is_some()
    }

    /// Effective `[resources]` section, defaults applied.
    pub fn resources_config(&self) -> ResourcesConfig {
        self.manifest.resources.clone().unwrap_or_default()
    }

    /// Resource directory staged by `stage`.
    pub fn resources_dir(&self) -> PathBuf {
        self.root_dir.join(&self.resources_config().dir)
    }

    /// Build output directory.
    pub fn build_dir(&self) -> PathBuf {
        self.root_dir.join("build")
    }

    /// Output directory for staged resources.
    pub fn staged_resources_dir(&self) -> PathBuf {
        self.build_dir().join("resources").join("main")
    }

    /// Where the external build tool drops the distributable jar.
    pub fn jar_path(&self) -> Option<PathBuf> {
        let meta = self.manifest.mod_meta.as_ref()?;
        Some(
            self.build_dir()
                .join("libs")
                .join(format!("{}-{}.jar", meta.id, meta.version)),
        )
    }
}
