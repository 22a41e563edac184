use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::dependency::DependencyScope;
use crate::resolve::PinnedArtifact;

/// Deterministic lockfile recording exact pinned artifact versions.
///
/// Written at the workspace root as `Spindle.lock`. Artifacts are sorted by
/// group then name so regeneration is reproducible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lockfile {
    #[serde(default)]
    pub artifact: Vec<LockedArtifact>,
}

/// A single locked artifact with its resolved coordinates and, once fetched,
/// its source repository and checksum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockedArtifact {
    pub name: String,
    pub group: String,
    pub version: String,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub checksum: Option<String>,
}

impl Lockfile {
    /// Load and parse a `Spindle.lock` file from the given path.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            spindle_util::errors::SpindleError::Generic {
                message: format!("Failed to read lockfile: {e}"),
            }
        })?;
        toml::from_str(&content).map_err(|e| {
            spindle_util::errors::SpindleError::Generic {
                message: format!("Failed to parse lockfile: {e}"),
            }
            .into()
        })
    }

    /// Build a lockfile from pinned artifacts, sorted for determinism.
    pub fn from_pinned(pins: &[PinnedArtifact]) -> Self {
        let mut artifact: Vec<LockedArtifact> = pins
            .iter()
            .map(|pin| LockedArtifact {
                name: pin.coordinate.artifact_id.clone(),
                group: pin.coordinate.group_id.clone(),
                version: pin.coordinate.version.clone(),
                scope: Some(pin.scope),
                source: None,
                checksum: None,
            })
            .collect();
        artifact.sort_by(|a, b| (&a.group, &a.name).cmp(&(&b.group, &b.name)));
        Self { artifact }
    }

    /// Serialize the lockfile to a pretty-printed TOML string.
    pub fn to_string_pretty(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Write to `path` with the generated-file header.
    pub fn write_to(&self, path: &Path) -> miette::Result<()> {
        let body = self.to_string_pretty().map_err(|e| {
            spindle_util::errors::SpindleError::Generic {
                message: format!("Failed to serialize lockfile: {e}"),
            }
        })?;
        let content = format!("# This file is generated by Spindle. Do not edit by hand.\n{body}");
        std::fs::write(path, content)
            .map_err(|e| spindle_util::errors::SpindleError::Io(e).into())
    }

    /// True when the locked artifact set no longer matches `pins`.
    ///
    /// Sources and checksums are ignored: they are enrichment recorded at
    /// fetch time, not identity.
    pub fn is_stale(&self, pins: &[PinnedArtifact]) -> bool {
        let locked: BTreeSet<(&str, &str, &str)> = self
            .artifact
            .iter()
            .map(|a| (a.group.as_str(), a.name.as_str(), a.version.as_str()))
            .collect();
        let pinned: BTreeSet<(&str, &str, &str)> = pins
            .iter()
            .map(|p| {
                (
                    p.coordinate.group_id.as_str(),
                    p.coordinate.artifact_id.as_str(),
                    p.coordinate.version.as_str(),
                )
            })
            .collect();
        locked != pinned
    }

    /// Find the entry for a group:artifact pair.
    pub fn get_mut(&mut self, group: &str, name: &str) -> Option<&mut LockedArtifact> {
        self.artifact
            .iter_mut()
            .find(|a| a.group == group && a.name == name)
    }
}
