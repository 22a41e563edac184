//! Operation: check for newer versions of pinned artifacts.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use spindle_core::config::GlobalConfig;
use spindle_core::resolve;
use spindle_core::workspace::Workspace;
use spindle_maven::download;
use spindle_maven::fabric_meta::FabricMeta;
use spindle_maven::metadata;
use spindle_maven::version::{self, MavenVersion};

/// Options for `spindle outdated`.
#[derive(Default)]
pub struct OutdatedOptions {
    /// Offer snapshots and pre-releases as update candidates.
    pub unstable: bool,
}

/// A single outdated entry.
struct OutdatedEntry {
    name: String,
    current: String,
    latest: String,
    declared_as: String,
}

/// Check all pinned artifacts for available updates and print a report.
///
/// Maven artifacts (the loader included) are compared against repository
/// metadata; the game version is compared against the Fabric Meta version
/// list, since it is not a Maven artifact.
pub async fn outdated(start_dir: &Path, opts: &OutdatedOptions) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let pins = resolve::resolve_workspace(&workspace)?;
    let config = GlobalConfig::load().unwrap_or_default();
    let repos = crate::repositories_for(&workspace, &config);

    let sp = spindle_util::progress::spinner("Checking for outdated dependencies...");
    let client = download::build_client()?;

    let semaphore = Arc::new(Semaphore::new(8));
    let mut join_set = JoinSet::new();

    for pin in pins.iter().filter(|p| !p.is_platform_provided()) {
        let repos = repos.clone();
        let client = client.clone();
        let sem = semaphore.clone();
        let stable_only = !opts.unstable;
        let group = pin.coordinate.group_id.clone();
        let artifact = pin.coordinate.artifact_id.clone();
        let current = pin.coordinate.version.clone();
        let declared_as = pin.declared_as.clone();

        join_set.spawn(async move {
            let _permit = sem.acquire().await.unwrap();
            for repo in &repos {
                let url = repo.metadata_url(&group, &artifact);
                match download::download_text(&client, repo, &url).await {
                    Ok(Some(xml)) => {
                        if let Ok(meta) = metadata::parse_metadata(&xml) {
                            let candidates = meta.versions.iter().map(String::as_str);
                            if let Some(latest) = version::newest(candidates, stable_only) {
                                if latest > MavenVersion::parse(&current) {
                                    return Ok(Some(OutdatedEntry {
                                        name: format!("{group}:{artifact}"),
                                        current,
                                        latest: latest.original,
                                        declared_as,
                                    }));
                                }
                            }
                        }
                        break;
                    }
                    Ok(None) => continue,
                    Err(e) => return Err(e),
                }
            }
            Ok(None)
        });
    }

    let mut entries: Vec<OutdatedEntry> = Vec::new();
    while let Some(result) = join_set.join_next().await {
        match result {
            Ok(Ok(Some(entry))) => entries.push(entry),
            Ok(Err(e)) => return Err(e),
            Ok(Ok(None)) => {}
            Err(e) => return Err(miette::miette!("Background task failed: {}", e)),
        }
    }

    if let Some(entry) = game_update(&workspace, &client, opts.unstable).await? {
        entries.push(entry);
    }

    sp.finish_and_clear();

    if entries.is_empty() {
        spindle_util::progress::status("Outdated", "all dependencies are up to date");
        return Ok(());
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));

    println!(
        "{:<50} {:<15} {:<15} Declared as",
        "Dependency", "Current", "Latest"
    );
    println!("{}", "-".repeat(90));
    for entry in &entries {
        println!(
            "{:<50} {:<15} {:<15} {}",
            entry.name, entry.current, entry.latest, entry.declared_as
        );
    }

    Ok(())
}

/// Compare the declared game version against the Fabric Meta list.
///
/// Snapshot identifiers ("25w03a") defy version ordering, so recency is
/// judged by position in the list, which Meta serves newest first.
async fn game_update(
    workspace: &Workspace,
    client: &reqwest::Client,
    unstable: bool,
) -> miette::Result<Option<OutdatedEntry>> {
    let Some(current) = workspace
        .modules
        .iter()
        .find_map(|m| m.manifest.properties.get("minecraft-version").cloned())
    else {
        return Ok(None);
    };

    let meta = FabricMeta::new(client.clone());
    let games = meta.game_versions().await?;
    let latest = if unstable {
        games.first().map(|g| g.version.clone())
    } else {
        games.iter().find(|g| g.stable).map(|g| g.version.clone())
    };
    let Some(latest) = latest else {
        return Ok(None);
    };
    if latest == current {
        return Ok(None);
    }

    let current_pos = games.iter().position(|g| g.version == current);
    let latest_pos = games.iter().position(|g| g.version == latest);
    match (current_pos, latest_pos) {
        (Some(c), Some(l)) if c > l => Ok(Some(OutdatedEntry {
            name: "minecraft".to_string(),
            current,
            latest,
            declared_as: "minecraft-version".to_string(),
        })),
        _ => Ok(None),
    }
}
