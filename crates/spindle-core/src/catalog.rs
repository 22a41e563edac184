use crate::manifest::{CatalogConfig, CatalogVersion};

/// Resolved version catalog entry with the actual version string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCatalogEntry {
    pub group: String,
    pub artifact: String,
    pub version: String,
}

/// Look up a single catalog library by name, resolving `version.ref`.
///
/// Errors name the exact descriptor mistake so `check` can surface it.
pub fn resolve_library(
    catalog: &CatalogConfig,
    name: &str,
) -> Result<ResolvedCatalogEntry, String> {
    let Some(lib) = catalog.libraries.get(name) else {
        return Err(format!("catalog has no library named '{name}'"));
    };
    let version = match &lib.version {
        Some(CatalogVersion::Literal(version)) => version.clone(),
        Some(CatalogVersion::Ref { reference }) => {
            catalog.versions.get(reference).cloned().ok_or_else(|| {
                format!("catalog library '{name}' references unknown version '{reference}'")
            })?
        }
        None => return Err(format!("catalog library '{name}' declares no version")),
    };
    Ok(ResolvedCatalogEntry {
        group: lib.group.clone(),
        artifact: lib.artifact.clone(),
        version,
    })
}

/// Expand a bundle into its member entries.
pub fn resolve_bundle(
    catalog: &CatalogConfig,
    name: &str,
) -> Result<Vec<ResolvedCatalogEntry>, String> {
    let Some(members) = catalog.bundles.get(name) else {
        return Err(format!("catalog has no bundle named '{name}'"));
    };
    members
        .iter()
        .map(|member| resolve_library(catalog, member))
        .collect()
}

/// Merge a member catalog over the workspace-root catalog (member wins).
pub fn merge(root: &CatalogConfig, member: &CatalogConfig) -> CatalogConfig {
    let mut out = root.clone();
    for (name, version) in &member.versions {
        out.versions.insert(name.clone(), version.clone());
    }
    for (name, library) in &member.libraries {
        out.libraries.insert(name.clone(), library.clone());
    }
    for (name, bundle) in &member.bundles {
        out.bundles.insert(name.clone(), bundle.clone());
    }
    out
}
