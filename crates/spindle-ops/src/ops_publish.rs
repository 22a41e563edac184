//! Operation: upload mod artifacts to a Maven repository.

use std::path::Path;

use spindle_core::config::GlobalConfig;
use spindle_core::resolve;
use spindle_core::workspace::Workspace;
use spindle_maven::download;
use spindle_maven::publish::{self, PomDependency};
use spindle_util::errors::SpindleError;
use spindle_util::progress::{status, status_info};

/// Options for `spindle publish`.
#[derive(Debug, Default)]
pub struct PublishOptions {
    /// Print what would be uploaded without sending anything.
    pub dry_run: bool,
}

/// Publish every module that declares a `[publish]` section.
///
/// The jar is the build tool's output; publishing refuses to run when it is
/// missing rather than uploading a stale file from a previous version.
pub async fn publish(start_dir: &Path, opts: &PublishOptions) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let targets: Vec<_> = workspace
        .modules
        .iter()
        .filter(|m| m.is_mod() && m.manifest.publish.is_some())
        .collect();
    if targets.is_empty() {
        return Err(SpindleError::Generic {
            message: "no module declares a [publish] section in Spindle.toml".to_string(),
        }
        .into());
    }

    let config = GlobalConfig::load().unwrap_or_default();
    let repos = crate::repositories_for(&workspace, &config);
    let client = download::build_client()?;

    for module in targets {
        let meta = module
            .manifest
            .mod_meta
            .as_ref()
            .ok_or_else(|| SpindleError::Manifest {
                message: format!("{}: [publish] requires a [mod] section", module.name()),
            })?;
        let publish_cfg = module
            .manifest
            .publish
            .as_ref()
            .ok_or_else(|| SpindleError::Manifest {
                message: format!("{}: missing [publish] section", module.name()),
            })?;

        let repo_name =
            publish_cfg
                .repository
                .as_deref()
                .ok_or_else(|| SpindleError::Manifest {
                    message: format!(
                        "{}: [publish] must name a target repository",
                        module.name()
                    ),
                })?;
        let repo = repos
            .iter()
            .find(|r| r.name == repo_name)
            .ok_or_else(|| SpindleError::Manifest {
                message: format!(
                    "{}: publish repository '{repo_name}' is not declared in [repositories] or global config",
                    module.name()
                ),
            })?;

        let jar_path = module.jar_path().ok_or_else(|| SpindleError::Resource {
            message: format!("{}: module has no jar output", module.name()),
        })?;
        if !jar_path.is_file() {
            return Err(SpindleError::Resource {
                message: format!(
                    "{}: {} does not exist; run your build tool to produce the jar first",
                    module.name(),
                    jar_path.display()
                ),
            }
            .into());
        }

        // The game is provided by the runtime and hosted on no repository;
        // listing it would break consumers' resolution.
        let dependencies: Vec<PomDependency> = resolve::resolve_module(module)?
            .iter()
            .filter(|p| !p.is_platform_provided())
            .map(|p| PomDependency {
                group: p.coordinate.group_id.clone(),
                artifact: p.coordinate.artifact_id.clone(),
                version: p.coordinate.version.clone(),
                scope: p.scope.maven_scope().to_string(),
            })
            .collect();

        let pom = publish::generate_pom(
            &publish_cfg.group,
            &meta.id,
            &meta.version,
            meta.name.as_deref(),
            meta.description.as_deref(),
            meta.license.as_deref(),
            &dependencies,
        );

        let jar_url = repo.jar_url(&publish_cfg.group, &meta.id, &meta.version, None);
        let pom_url = repo.pom_url(&publish_cfg.group, &meta.id, &meta.version);

        if opts.dry_run {
            status_info("Publish", &format!("{} {} (dry run)", meta.id, meta.version));
            status_info("", &format!("would upload {jar_url}"));
            status_info("", &format!("would upload {pom_url}"));
            continue;
        }

        let jar_data = std::fs::read(&jar_path).map_err(SpindleError::Io)?;
        publish::upload_with_checksums(&client, repo, &jar_url, &jar_data).await?;
        publish::upload_with_checksums(&client, repo, &pom_url, pom.as_bytes()).await?;

        status(
            "Published",
            &format!("{} {} -> {}", meta.id, meta.version, repo.name),
        );
    }

    Ok(())
}
