use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};

use spindle_util::errors::SpindleError;

use crate::catalog;
use crate::manifest::{Manifest, WorkspaceConfig};
use crate::module::Module;
use crate::properties;

/// A Spindle workspace: a root manifest plus member modules.
///
/// Members inherit the root's `[properties]`, `[repositories]`, and
/// `[catalog]`; a member entry overrides a root entry with the same name.
/// This is how near-identical module descriptors share one set of pinned
/// versions.
#[derive(Debug, Clone)]
pub struct Workspace {
    pub root_dir: PathBuf,
    /// The root module first when it declares a mod, then members sorted by
    /// path.
    pub modules: Vec<Module>,
    /// The root manifest as written, before inheritance.
    pub root_manifest: Manifest,
}

impl Workspace {
    /// Locate the enclosing workspace from `start` and load it.
    ///
    /// The nearest directory with a `Spindle.toml` wins, unless a higher
    /// manifest claims that directory as a workspace member.
    pub fn discover(start: &Path) -> miette::Result<Self> {
        let Some(nearest) = spindle_util::fs::find_ancestor_with(start, "Spindle.toml") else {
            return Err(SpindleError::Manifest {
                message: format!(
                    "No Spindle.toml found in {} or any parent directory",
                    start.display()
                ),
            }
            .into());
        };

        if let Some(parent) = nearest.parent() {
            if let Some(outer) = spindle_util::fs::find_ancestor_with(parent, "Spindle.toml") {
                let manifest = Manifest::from_path(&outer.join("Spindle.toml"))?;
                if let Some(ws) = &manifest.workspace {
                    if member_dirs(&outer, ws)?.contains(&nearest) {
                        tracing::debug!(
                            "deferring to workspace root {} for member {}",
                            outer.display(),
                            nearest.display()
                        );
                        return Self::load(&outer);
                    }
                }
            }
        }

        Self::load(&nearest)
    }

    /// Load a workspace rooted at `root_dir`.
    pub fn load(root_dir: &Path) -> miette::Result<Self> {
        let manifest_path = root_dir.join("Spindle.toml");
        let root_manifest = Manifest::from_path(&manifest_path)?;

        let mut modules = Vec::new();
        if root_manifest.mod_meta.is_some() {
            modules.push(Module {
                manifest: root_manifest.clone(),
                manifest_path: manifest_path.clone(),
                root_dir: root_dir.to_path_buf(),
            });
        }

        if let Some(ws) = &root_manifest.workspace {
            for dir in member_dirs(root_dir, ws)? {
                let member_path = dir.join("Spindle.toml");
                let mut manifest = Manifest::from_path(&member_path)?;
                inherit(&mut manifest, &root_manifest);
                tracing::debug!("loaded workspace member {}", dir.display());
                modules.push(Module {
                    manifest,
                    manifest_path: member_path,
                    root_dir: dir,
                });
            }
        }

        if modules.is_empty() {
            return Err(SpindleError::Manifest {
                message: format!(
                    "{} declares neither a [mod] nor [workspace] members",
                    manifest_path.display()
                ),
            }
            .into());
        }

        Ok(Self {
            root_dir: root_dir.to_path_buf(),
            modules,
            root_manifest,
        })
    }

    /// Returns `true` when more than one module is involved.
    pub fn is_multi_module(&self) -> bool {
        self.modules.len() > 1
    }

    pub fn lockfile_path(&self) -> PathBuf {
        self.root_dir.join("Spindle.lock")
    }

    /// Find a module by mod id or directory name.
    pub fn module(&self, name: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.name() == name)
    }
}

/// Apply root-level configuration a member does not override.
fn inherit(member: &mut Manifest, root: &Manifest) {
    member.properties = properties::merged(&root.properties, &member.properties);
    for (name, repo) in &root.repositories {
        member
            .repositories
            .entry(name.clone())
            .or_insert_with(|| repo.clone());
    }
    member.catalog = match (&root.catalog, member.catalog.take()) {
        (Some(root_catalog), Some(member_catalog)) => {
            Some(catalog::merge(root_catalog, &member_catalog))
        }
        (Some(root_catalog), None) => Some(root_catalog.clone()),
        (None, member_catalog) => member_catalog,
    };
}

/// Expand `[workspace].members` into existing member directories, honouring
/// `exclude`. Literal entries must exist; glob entries match manifest-bearing
/// directories up to two levels below the root.
fn member_dirs(root_dir: &Path, ws: &WorkspaceConfig) -> miette::Result<Vec<PathBuf>> {
    let exclude = build_globset(&ws.exclude)?;

    let mut dirs = Vec::new();
    let mut glob_patterns = Vec::new();
    for pattern in &ws.members {
        if pattern.contains(['*', '?', '[']) {
            glob_patterns.push(pattern.clone());
            continue;
        }
        let dir = root_dir.join(pattern);
        if !dir.join("Spindle.toml").is_file() {
            return Err(SpindleError::Manifest {
                message: format!("workspace member '{pattern}' has no Spindle.toml"),
            }
            .into());
        }
        dirs.push(dir);
    }

    if !glob_patterns.is_empty() {
        let include = build_globset(&glob_patterns)?;
        for rel in candidate_dirs(root_dir) {
            if include.is_match(&rel) {
                let dir = root_dir.join(&rel);
                if dir.join("Spindle.toml").is_file() {
                    dirs.push(dir);
                }
            }
        }
    }

    dirs.retain(|dir| {
        let rel = dir.strip_prefix(root_dir).unwrap_or(dir);
        !exclude.is_match(rel)
    });
    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}

fn build_globset(patterns: &[String]) -> miette::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| SpindleError::Manifest {
            message: format!("invalid workspace pattern '{pattern}': {e}"),
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| {
        SpindleError::Manifest {
            message: format!("invalid workspace patterns: {e}"),
        }
        .into()
    })
}

/// Directories one and two levels below the root, as relative paths. Hidden
/// directories and `build/` are never members.
fn candidate_dirs(root_dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let Ok(entries) = std::fs::read_dir(root_dir) else {
        return out;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy().into_owned();
        if name.starts_with('.') || name == "build" {
            continue;
        }
        out.push(PathBuf::from(&name));
        if let Ok(children) = std::fs::read_dir(&path) {
            for child in children.flatten() {
                if child.path().is_dir() {
                    out.push(PathBuf::from(&name).join(child.file_name()));
                }
            }
        }
    }
    out
}
