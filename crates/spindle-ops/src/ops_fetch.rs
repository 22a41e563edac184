//! Operation: download all locked artifacts into the project cache.

use std::collections::HashSet;
use std::path::Path;

use spindle_core::config::GlobalConfig;
use spindle_core::lockfile::Lockfile;
use spindle_core::resolve;
use spindle_core::workspace::Workspace;
use spindle_maven::cache::LocalCache;
use spindle_maven::download;
use spindle_util::hash::{sha256_bytes, sha256_file};
use spindle_util::progress::{spinner, status};

/// Fetch every pinned artifact: fill the cache, verify downloads against
/// repository checksums, prune stale entries, and update `Spindle.lock`.
///
/// Platform-provided artifacts (the game itself) are never downloaded; the
/// loader is an ordinary Maven artifact and goes through the same path as
/// mod dependencies.
pub async fn fetch(start_dir: &Path, verbose: bool) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let pins = resolve::resolve_workspace(&workspace)?;

    let lockfile_path = workspace.lockfile_path();
    let mut lockfile = if lockfile_path.is_file() {
        match Lockfile::from_path(&lockfile_path) {
            Ok(existing) if !existing.is_stale(&pins) => existing,
            _ => Lockfile::from_pinned(&pins),
        }
    } else {
        Lockfile::from_pinned(&pins)
    };

    let config = GlobalConfig::load().unwrap_or_default();
    let repos = crate::repositories_for(&workspace, &config);
    let cache = LocalCache::new(&workspace.root_dir);
    let client = download::build_client()?;

    let to_fetch: Vec<_> = pins.iter().filter(|p| !p.is_platform_provided()).collect();
    let mut downloaded = 0u32;
    let mut up_to_date = 0u32;
    let mut missing: Vec<String> = Vec::new();

    let sp = spinner(&format!("Fetching {} artifacts...", to_fetch.len()));
    for pin in &to_fetch {
        let coord = &pin.coordinate;
        let (group, artifact, version) = (&coord.group_id, &coord.artifact_id, &coord.version);

        if let Some(jar_path) = cache.get_jar(group, artifact, version) {
            up_to_date += 1;
            // Older lockfiles may predate checksum recording.
            if let Some(entry) = lockfile.get_mut(group, artifact) {
                if entry.checksum.is_none() {
                    if let Ok(digest) = sha256_file(&jar_path) {
                        entry.checksum = Some(digest);
                    }
                }
            }
            continue;
        }

        sp.set_message(format!("Downloading {artifact}:{version}..."));

        let mut found = false;
        for repo in &repos {
            let url = repo.jar_url(group, artifact, version, None);
            let label = format!("{artifact}:{version}");
            let Some(data) = download::download_artifact(&client, repo, &url, &label).await?
            else {
                continue;
            };
            spindle_maven::checksum::verify(&client, repo, &url, &data).await?;
            cache.put_jar(group, artifact, version, &data)?;

            // POMs are informational here; a repository serving the JAR
            // without one is still usable.
            let pom_url = repo.pom_url(group, artifact, version);
            if let Some(pom) = download::download_text(&client, repo, &pom_url).await? {
                cache.put_pom(group, artifact, version, &pom)?;
            }

            if let Some(entry) = lockfile.get_mut(group, artifact) {
                entry.source = Some(repo.name.clone());
                entry.checksum = Some(sha256_bytes(&data));
            }
            downloaded += 1;
            found = true;
            break;
        }

        if !found {
            missing.push(format!("{coord} (declared as '{}')", pin.declared_as));
        }
    }
    sp.finish_and_clear();

    if !missing.is_empty() {
        return Err(spindle_util::errors::SpindleError::Network {
            message: format!(
                "{} artifact(s) not found in any configured repository:\n  {}",
                missing.len(),
                missing.join("\n  ")
            ),
        }
        .into());
    }

    let keep: HashSet<(String, String, String)> = to_fetch
        .iter()
        .map(|p| {
            (
                p.coordinate.group_id.clone(),
                p.coordinate.artifact_id.clone(),
                p.coordinate.version.clone(),
            )
        })
        .collect();
    let pruned = cache.prune(&keep);

    lockfile.write_to(&lockfile_path)?;

    let total = to_fetch.len();
    if downloaded > 0 || pruned > 0 || verbose {
        status(
            "Fetched",
            &format!("{total} artifacts, {downloaded} downloaded, {up_to_date} up-to-date, {pruned} pruned"),
        );
    } else if total > 0 {
        status("Fetched", &format!("all {total} artifacts up-to-date"));
    }

    Ok(())
}

/// Verify that all cached JARs match their lockfile checksums.
///
/// Reports all mismatches at once rather than failing on the first one.
pub fn verify_checksums(start_dir: &Path) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let lockfile = Lockfile::from_path(&workspace.lockfile_path())?;
    let cache = LocalCache::new(&workspace.root_dir);
    let mut mismatches: Vec<String> = Vec::new();
    let mut verified = 0u32;
    let mut skipped = 0u32;

    for entry in &lockfile.artifact {
        let expected = match &entry.checksum {
            Some(c) if !c.is_empty() => c,
            _ => {
                skipped += 1;
                continue;
            }
        };

        let jar_path = match cache.get_jar(&entry.group, &entry.name, &entry.version) {
            Some(p) => p,
            None => {
                skipped += 1;
                continue;
            }
        };

        let actual =
            sha256_file(&jar_path).map_err(|e| spindle_util::errors::SpindleError::Generic {
                message: format!(
                    "Failed to read cached JAR {}:{}:{}: {e}",
                    entry.group, entry.name, entry.version
                ),
            })?;
        if actual == *expected {
            verified += 1;
        } else {
            mismatches.push(format!(
                "{}:{}:{}\n  expected: {expected}\n  actual:   {actual}",
                entry.group, entry.name, entry.version
            ));
        }
    }

    if mismatches.is_empty() {
        status(
            "Verified",
            &format!("{verified} checksums ({skipped} skipped, no cached JAR or no checksum)"),
        );
        Ok(())
    } else {
        let count = mismatches.len();
        let details = mismatches.join("\n");
        Err(spindle_util::errors::SpindleError::Generic {
            message: format!(
                "{count} checksum mismatch(es) detected:\n{details}\n\n\
                 Cached JARs may be corrupted. Delete .spindle/libraries and run `spindle fetch`."
            ),
        }
        .into())
    }
}
