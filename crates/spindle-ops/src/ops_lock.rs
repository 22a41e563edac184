//! Operation: resolve all modules and regenerate `Spindle.lock`.

use std::path::Path;

use spindle_core::config::GlobalConfig;
use spindle_core::dependency::MavenCoordinate;
use spindle_core::lockfile::Lockfile;
use spindle_core::resolve;
use spindle_core::workspace::Workspace;
use spindle_maven::download;
use spindle_maven::metadata;
use spindle_maven::repository::MavenRepository;
use spindle_util::progress::{spinner, status, status_warn};

/// Force fresh resolution across the workspace and write `Spindle.lock`.
///
/// Each pinned artifact is probed against the configured repositories so
/// the lockfile records where it will be fetched from. An artifact that no
/// repository hosts still locks (with a warning); `fetch` reports it as a
/// hard error.
pub async fn lock(start_dir: &Path) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let pins = resolve::resolve_workspace(&workspace)?;
    let mut lockfile = Lockfile::from_pinned(&pins);

    // Checksums are recorded at fetch time; keep them across re-locks so a
    // version bump of one dependency does not blank the rest.
    let lockfile_path = workspace.lockfile_path();
    if lockfile_path.is_file() {
        if let Ok(previous) = Lockfile::from_path(&lockfile_path) {
            for old in &previous.artifact {
                if let Some(entry) = lockfile.get_mut(&old.group, &old.name) {
                    if entry.version == old.version {
                        entry.checksum = old.checksum.clone();
                    }
                }
            }
        }
    }

    let config = GlobalConfig::load().unwrap_or_default();
    let repos = crate::repositories_for(&workspace, &config);
    let client = download::build_client()?;

    let pb = spinner("Locating artifacts...");
    for pin in &pins {
        if pin.is_platform_provided() {
            continue;
        }
        let coord = &pin.coordinate;
        pb.set_message(coord.to_string());
        match find_source(&client, &repos, coord).await? {
            Some(repo_name) => {
                if let Some(entry) = lockfile.get_mut(&coord.group_id, &coord.artifact_id) {
                    entry.source = Some(repo_name);
                }
            }
            None => {
                status_warn(
                    "Warning",
                    &format!("{coord} was not found in any configured repository"),
                );
            }
        }
    }
    pb.finish_and_clear();

    lockfile.write_to(&lockfile_path)?;
    status(
        "Locked",
        &format!(
            "{} artifacts -> {}",
            lockfile.artifact.len(),
            lockfile_path.display()
        ),
    );
    Ok(())
}

/// Return the name of the first repository hosting `coord`, if any.
///
/// Prefers `maven-metadata.xml` where the repository publishes one; falls
/// back to probing for the POM, since some repositories (notably Mojang's
/// library mirror) serve artifacts without metadata.
pub async fn find_source(
    client: &reqwest::Client,
    repos: &[MavenRepository],
    coord: &MavenCoordinate,
) -> miette::Result<Option<String>> {
    for repo in repos {
        let meta_url = repo.metadata_url(&coord.group_id, &coord.artifact_id);
        if let Some(text) = download::download_text(client, repo, &meta_url).await? {
            match metadata::parse_metadata(&text) {
                Ok(meta) => {
                    if meta.has_version(&coord.version) {
                        return Ok(Some(repo.name.clone()));
                    }
                    continue;
                }
                Err(e) => {
                    tracing::debug!("{}: unreadable metadata for {coord}: {e}", repo.name);
                }
            }
        }
        let pom_url = repo.pom_url(&coord.group_id, &coord.artifact_id, &coord.version);
        if download::download_bytes(client, repo, &pom_url)
            .await?
            .is_some()
        {
            return Ok(Some(repo.name.clone()));
        }
    }
    Ok(None)
}
