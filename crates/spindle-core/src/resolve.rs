//! Pinning: turn declared dependencies into exact artifact coordinates.
//!
//! Resolution here is descriptor-level only: property substitution, catalog
//! lookup, and platform artifact injection. Transitive graphs belong to the
//! external build tool.

use std::collections::BTreeMap;

use spindle_util::errors::SpindleError;

use crate::catalog;
use crate::dependency::{
    Dependency, DependencyScope, MavenCoordinate, LOADER_ARTIFACT, LOADER_GROUP,
    MINECRAFT_ARTIFACT, MINECRAFT_GROUP,
};
use crate::manifest::Manifest;
use crate::module::Module;
use crate::properties;
use crate::workspace::Workspace;

/// A fully interpolated, catalog-resolved coordinate ready to lock or fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinnedArtifact {
    pub coordinate: MavenCoordinate,
    pub scope: DependencyScope,
    /// Manifest key (or property name) the artifact was declared under.
    pub declared_as: String,
}

impl PinnedArtifact {
    /// True for artifacts the development runtime provides; they are locked
    /// but never probed or fetched.
    pub fn is_platform_provided(&self) -> bool {
        self.coordinate.is_game()
    }
}

/// Resolve one module's declared dependencies to pinned artifacts.
///
/// Platform artifacts come first: the game from `minecraft-version` and the
/// loader from `fabric-loader-version`. Both properties are required for any
/// module that declares a mod.
pub fn resolve_module(module: &Module) -> miette::Result<Vec<PinnedArtifact>> {
    let manifest = &module.manifest;
    let mut pins = Vec::new();

    if manifest.mod_meta.is_some() {
        pins.push(platform_pin(
            manifest,
            "minecraft-version",
            MINECRAFT_GROUP,
            MINECRAFT_ARTIFACT,
            DependencyScope::Provided,
        )?);
        pins.push(platform_pin(
            manifest,
            "fabric-loader-version",
            LOADER_GROUP,
            LOADER_ARTIFACT,
            DependencyScope::Mod,
        )?);
    }

    for (key, dep) in manifest
        .dependencies
        .iter()
        .chain(manifest.dev_dependencies.iter())
    {
        resolve_dependency(key, dep, manifest, &mut pins)?;
    }

    Ok(pins)
}

/// Resolve every module and merge into one deduplicated, sorted set.
///
/// The same group:artifact declared with two different versions anywhere in
/// the workspace is an error; there is no mediation.
pub fn resolve_workspace(workspace: &Workspace) -> miette::Result<Vec<PinnedArtifact>> {
    let mut by_ga: BTreeMap<(String, String), PinnedArtifact> = BTreeMap::new();
    for module in &workspace.modules {
        for pin in resolve_module(module)? {
            let ga = (
                pin.coordinate.group_id.clone(),
                pin.coordinate.artifact_id.clone(),
            );
            match by_ga.get(&ga) {
                Some(existing) if existing.coordinate.version != pin.coordinate.version => {
                    return Err(SpindleError::Resolution {
                        message: format!(
                            "{}:{} is declared as version {} and as version {}",
                            ga.0, ga.1, existing.coordinate.version, pin.coordinate.version
                        ),
                    }
                    .into());
                }
                Some(_) => {}
                None => {
                    by_ga.insert(ga, pin);
                }
            }
        }
    }
    Ok(by_ga.into_values().collect())
}

fn platform_pin(
    manifest: &Manifest,
    property: &str,
    group: &str,
    artifact: &str,
    scope: DependencyScope,
) -> miette::Result<PinnedArtifact> {
    let Some(version) = manifest.properties.get(property) else {
        return Err(SpindleError::Resolution {
            message: format!("required property '{property}' is not set"),
        }
        .into());
    };
    let coordinate = MavenCoordinate {
        group_id: group.to_string(),
        artifact_id: artifact.to_string(),
        version: version.clone(),
    };
    coordinate
        .validate()
        .map_err(|e| SpindleError::Resolution {
            message: format!("property '{property}': {e}"),
        })?;
    Ok(PinnedArtifact {
        coordinate,
        scope,
        declared_as: property.to_string(),
    })
}

fn resolve_dependency(
    key: &str,
    dep: &Dependency,
    manifest: &Manifest,
    pins: &mut Vec<PinnedArtifact>,
) -> miette::Result<()> {
    let fail = |message: String| SpindleError::Resolution {
        message: format!("dependency '{key}': {message}"),
    };

    match dep {
        Dependency::Short(spec) => {
            let substituted =
                properties::substitute(spec, &manifest.properties).map_err(fail)?;
            let coordinate = MavenCoordinate::parse_strict(&substituted).map_err(fail)?;
            pins.push(PinnedArtifact {
                coordinate,
                scope: DependencyScope::default(),
                declared_as: key.to_string(),
            });
        }
        Dependency::Detailed(detailed) => {
            let version =
                properties::substitute(&detailed.version, &manifest.properties).map_err(fail)?;
            let coordinate = MavenCoordinate {
                group_id: detailed.group.clone(),
                artifact_id: detailed.artifact.clone(),
                version,
            };
            coordinate.validate().map_err(fail)?;
            pins.push(PinnedArtifact {
                coordinate,
                scope: detailed.scope.unwrap_or_default(),
                declared_as: key.to_string(),
            });
        }
        Dependency::Catalog(catalog_ref) => {
            let Some(cat) = &manifest.catalog else {
                return Err(fail("references the catalog, but no [catalog] is defined".into()).into());
            };
            let scope = catalog_ref.scope.unwrap_or_default();
            let entries = if cat.bundles.contains_key(&catalog_ref.catalog) {
                catalog::resolve_bundle(cat, &catalog_ref.catalog)
            } else {
                catalog::resolve_library(cat, &catalog_ref.catalog).map(|entry| vec![entry])
            }
            .map_err(fail)?;
            for entry in entries {
                let version =
                    properties::substitute(&entry.version, &manifest.properties).map_err(fail)?;
                let coordinate = MavenCoordinate {
                    group_id: entry.group,
                    artifact_id: entry.artifact,
                    version,
                };
                coordinate.validate().map_err(fail)?;
                pins.push(PinnedArtifact {
                    coordinate,
                    scope,
                    declared_as: key.to_string(),
                });
            }
        }
    }
    Ok(())
}
