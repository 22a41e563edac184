//! Operation: validate manifests, pins, and resources without writing anything.
//!
//! The offline pass checks everything derivable from the working tree: mod
//! metadata, property keys, repository URLs, resource templates, and that
//! every declared dependency pins to a well-formed `group:artifact:version`.
//! The online pass additionally probes repositories and the Fabric Meta
//! service for the pinned versions.

use std::collections::BTreeSet;
use std::path::Path;

use spindle_core::config::GlobalConfig;
use spindle_core::dependency::{LOADER_ARTIFACT, LOADER_GROUP};
use spindle_core::modmeta;
use spindle_core::module::Module;
use spindle_core::resolve;
use spindle_core::workspace::Workspace;
use spindle_maven::download;
use spindle_maven::fabric_meta::FabricMeta;

/// Options for `spindle check`.
#[derive(Debug, Default)]
pub struct CheckOptions {
    /// Also probe repositories and Fabric Meta for the pinned versions.
    pub online: bool,
}

/// Everything a check run found, split by severity.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }
}

/// Validate the workspace enclosing `start_dir`.
pub async fn check(start_dir: &Path, opts: &CheckOptions) -> miette::Result<CheckReport> {
    let workspace = Workspace::discover(start_dir)?;
    let mut report = check_offline(&workspace);

    // Online probing only makes sense for a pin set that resolved.
    if opts.online && report.is_clean() {
        check_online(&workspace, &mut report).await?;
    }

    Ok(report)
}

/// Run every check that needs no network access.
pub fn check_offline(workspace: &Workspace) -> CheckReport {
    let mut report = CheckReport::default();

    for module in &workspace.modules {
        check_module(module, &mut report);
    }

    let mut all_resolved = true;
    for module in &workspace.modules {
        if let Err(e) = resolve::resolve_module(module) {
            report.error(format!("{}: {e}", module.name()));
            all_resolved = false;
        }
    }
    // Cross-module conflicts only surface once every module pins cleanly.
    if all_resolved {
        if let Err(e) = resolve::resolve_workspace(workspace) {
            report.error(e.to_string());
        }
    }

    report
}

fn check_module(module: &Module, report: &mut CheckReport) {
    let manifest = &module.manifest;
    let name = module.name();

    for key in manifest.properties.keys() {
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.')
        {
            report.error(format!(
                "{name}: property key '{key}' may only contain [A-Za-z0-9._-]"
            ));
        }
    }

    for (repo_name, entry) in &manifest.repositories {
        let url = entry.url();
        if url.starts_with("http://") {
            report.warn(format!(
                "{name}: repository '{repo_name}' uses unencrypted http: {url}"
            ));
        } else if !url.starts_with("https://") {
            report.error(format!(
                "{name}: repository '{repo_name}' has an invalid URL: {url}"
            ));
        }
    }

    let Some(meta) = &manifest.mod_meta else {
        return;
    };

    for issue in modmeta::validate_metadata(meta) {
        report.error(format!("{name}: {issue}"));
    }

    let resources_dir = module.resources_dir();
    if !resources_dir.is_dir() {
        report.warn(format!(
            "{name}: resources directory {} does not exist",
            resources_dir.display()
        ));
    }

    for template in &module.resources_config().template {
        let path = resources_dir.join(template);
        if !path.is_file() {
            // fabric.mod.json is generated from [mod] when absent.
            if template != "fabric.mod.json" {
                report.error(format!(
                    "{name}: template file '{template}' is not in {}",
                    resources_dir.display()
                ));
            }
            continue;
        }
        let Ok(content) = std::fs::read_to_string(&path) else {
            report.error(format!("{name}: template file '{template}' is not UTF-8"));
            continue;
        };
        if template == "fabric.mod.json" {
            if let Err(e) = modmeta::render_template(&content, meta, &manifest.properties) {
                report.error(format!("{name}: {template}: {e}"));
            }
        } else {
            let ctx = modmeta::substitution_context(meta, &manifest.properties);
            match spindle_core::properties::substitute(&content, &ctx) {
                Ok(rendered) => {
                    if template.ends_with(".json")
                        && serde_json::from_str::<serde_json::Value>(&rendered).is_err()
                    {
                        report.error(format!(
                            "{name}: template file '{template}' does not render to valid JSON"
                        ));
                    }
                }
                Err(e) => report.error(format!("{name}: {template}: {e}")),
            }
        }
    }
}

/// Probe repositories and Fabric Meta for every pinned version.
async fn check_online(workspace: &Workspace, report: &mut CheckReport) -> miette::Result<()> {
    let pins = resolve::resolve_workspace(workspace)?;
    let config = GlobalConfig::load().unwrap_or_default();
    let repos = crate::repositories_for(workspace, &config);
    let client = download::build_client()?;

    let sp = spindle_util::progress::spinner("Checking repositories...");
    for pin in &pins {
        if pin.is_platform_provided() {
            continue;
        }
        let coord = &pin.coordinate;
        sp.set_message(format!("Checking {coord}..."));
        if crate::ops_lock::find_source(&client, &repos, coord)
            .await?
            .is_none()
        {
            report.error(format!(
                "{coord} (declared as '{}') was not found in any configured repository",
                pin.declared_as
            ));
        }
    }

    sp.set_message("Checking platform versions...");
    let meta = FabricMeta::new(client.clone());
    let games = meta.game_versions().await?;
    let loaders = meta.loader_versions().await?;

    for pin in &pins {
        let coord = &pin.coordinate;
        if coord.is_game() {
            if !games.iter().any(|g| g.version == coord.version) {
                report.error(format!(
                    "minecraft-version '{}' is not a published game version",
                    coord.version
                ));
            }
        } else if coord.group_id == LOADER_GROUP && coord.artifact_id == LOADER_ARTIFACT {
            if !loaders.iter().any(|l| l.version == coord.version) {
                report.error(format!(
                    "fabric-loader-version '{}' is not a published loader version",
                    coord.version
                ));
            }
        }
    }

    // Loader availability is per game version; Meta can lag a few hours
    // after a release, so a missing pairing is only a warning.
    let mut checked: BTreeSet<(String, String)> = BTreeSet::new();
    for module in &workspace.modules {
        if !module.is_mod() {
            continue;
        }
        let props = &module.manifest.properties;
        let (Some(game), Some(loader)) = (
            props.get("minecraft-version"),
            props.get("fabric-loader-version"),
        ) else {
            continue;
        };
        if !checked.insert((game.clone(), loader.clone())) {
            continue;
        }
        if !games.iter().any(|g| g.version == *game) {
            continue;
        }
        let offered = meta.loaders_for_game(game).await?;
        if !offered.iter().any(|l| l.version == *loader) {
            report.warn(format!(
                "fabric-loader {loader} is not listed for minecraft {game}"
            ));
        }
    }
    sp.finish_and_clear();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(manifest: &str) -> (tempfile::TempDir, Workspace) {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("Spindle.toml"), manifest).unwrap();
        let ws = Workspace::load(tmp.path()).unwrap();
        (tmp, ws)
    }

    const CLEAN_MANIFEST: &str = r#"
[mod]
id = "glowstone-lanterns"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:0.110.0+1.21.4"
"#;

    #[test]
    fn clean_project_passes() {
        let (tmp, ws) = project(CLEAN_MANIFEST);
        std::fs::create_dir_all(tmp.path().join("src/main/resources")).unwrap();

        let report = check_offline(&ws);
        assert!(report.is_clean(), "errors: {:?}", report.errors);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn missing_resources_dir_warns() {
        let (_tmp, ws) = project(CLEAN_MANIFEST);
        let report = check_offline(&ws);
        assert!(report.is_clean());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("resources directory"));
    }

    #[test]
    fn missing_platform_property_is_an_error() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
"#,
        );
        let report = check_offline(&ws);
        assert!(!report.is_clean());
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("fabric-loader-version")));
    }

    #[test]
    fn invalid_mod_id_is_an_error() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "UpperCase"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"
"#,
        );
        let report = check_offline(&ws);
        assert!(report.errors.iter().any(|e| e.contains("mod id")));
    }

    #[test]
    fn non_http_repository_is_an_error() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[repositories]
weird = "ftp://maven.example.dev"
"#,
        );
        let report = check_offline(&ws);
        assert!(report.errors.iter().any(|e| e.contains("invalid URL")));
    }

    #[test]
    fn plain_http_repository_warns() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[repositories]
lan = "http://maven.local/releases"
"#,
        );
        let report = check_offline(&ws);
        assert!(report.is_clean());
        assert!(report.warnings.iter().any(|w| w.contains("unencrypted")));
    }

    #[test]
    fn unknown_property_in_dependency_is_an_error() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:${fabric-api-version}"
"#,
        );
        let report = check_offline(&ws);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("fabric-api-version")));
    }

    #[test]
    fn bad_property_key_is_an_error() {
        let (_tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"
"bad key" = "1.0"
"#,
        );
        let report = check_offline(&ws);
        assert!(report.errors.iter().any(|e| e.contains("property key")));
    }

    #[test]
    fn missing_declared_template_is_an_error() {
        let (tmp, ws) = project(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[resources]
template = ["fabric.mod.json", "assets/demo/sounds.json"]
"#,
        );
        std::fs::create_dir_all(tmp.path().join("src/main/resources")).unwrap();
        let report = check_offline(&ws);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("assets/demo/sounds.json")));
    }

    #[test]
    fn template_with_unknown_placeholder_is_an_error() {
        let (tmp, ws) = project(CLEAN_MANIFEST);
        let res = tmp.path().join("src/main/resources");
        std::fs::create_dir_all(&res).unwrap();
        std::fs::write(
            res.join("fabric.mod.json"),
            r#"{
  "schemaVersion": 1,
  "id": "glowstone-lanterns",
  "version": "${version}",
  "depends": { "fabric-api": "${fabric-api-version}" }
}
"#,
        )
        .unwrap();

        let report = check_offline(&ws);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("fabric-api-version")));
    }

    #[test]
    fn valid_template_passes() {
        let (tmp, ws) = project(CLEAN_MANIFEST);
        let res = tmp.path().join("src/main/resources");
        std::fs::create_dir_all(&res).unwrap();
        std::fs::write(
            res.join("fabric.mod.json"),
            r#"{
  "schemaVersion": 1,
  "id": "glowstone-lanterns",
  "version": "${version}",
  "depends": { "minecraft": "~${minecraft-version}" }
}
"#,
        )
        .unwrap();

        let report = check_offline(&ws);
        assert!(report.is_clean(), "errors: {:?}", report.errors);
    }

    #[test]
    fn version_conflict_across_modules_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("Spindle.toml"),
            r#"
[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[workspace]
members = ["core-mod", "addon-mod"]
"#,
        )
        .unwrap();
        for (dir, api) in [("core-mod", "0.110.0+1.21.4"), ("addon-mod", "0.92.0+1.21.4")] {
            let member = tmp.path().join(dir);
            std::fs::create_dir_all(&member).unwrap();
            std::fs::write(
                member.join("Spindle.toml"),
                format!(
                    r#"
[mod]
id = "{dir}"
version = "0.1.0"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:{api}"
"#
                ),
            )
            .unwrap();
        }

        let ws = Workspace::load(tmp.path()).unwrap();
        let report = check_offline(&ws);
        assert!(report
            .errors
            .iter()
            .any(|e| e.contains("0.110.0+1.21.4") && e.contains("0.92.0+1.21.4")));
    }
}
