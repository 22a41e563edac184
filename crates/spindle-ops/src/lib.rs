pub mod ops_add;
pub mod ops_cache;
pub mod ops_check;
pub mod ops_clean;
pub mod ops_fetch;
pub mod ops_lock;
pub mod ops_outdated;
pub mod ops_platform;
pub mod ops_publish;
pub mod ops_remove;
pub mod ops_stage;

use std::collections::BTreeSet;

use spindle_core::config::GlobalConfig;
use spindle_core::workspace::Workspace;
use spindle_maven::repository::MavenRepository;

/// Assemble the repository list for a workspace.
///
/// Declared `[repositories]` entries come first (every module, first
/// declaration of a name wins), then global config repositories, then the
/// well-known defaults unless something already covers them. Credentials from
/// the global config fill in entries the manifests leave unauthenticated.
pub fn repositories_for(workspace: &Workspace, config: &GlobalConfig) -> Vec<MavenRepository> {
    let mut repos: Vec<MavenRepository> = Vec::new();
    let mut seen: BTreeSet<String> = BTreeSet::new();

    for module in &workspace.modules {
        for (name, entry) in &module.manifest.repositories {
            if seen.insert(name.clone()) {
                repos.push(MavenRepository::from_entry(name, entry));
            }
        }
    }
    for (name, url) in &config.repositories {
        if seen.insert(name.clone()) {
            repos.push(MavenRepository::from_url(name, url));
        }
    }

    if !repos.iter().any(|r| r.url.contains("maven.fabricmc.net")) {
        repos.push(MavenRepository::fabric());
    }
    if !repos.iter().any(|r| r.url.contains("repo.maven.apache.org")) {
        repos.push(MavenRepository::maven_central());
    }
    if !repos.iter().any(|r| r.url.contains("libraries.minecraft.net")) {
        repos.push(MavenRepository::mojang_libraries());
    }

    repos
        .into_iter()
        .map(|repo| match config.credentials.get(&repo.name) {
            Some(creds) => repo.with_credentials(creds),
            None => repo,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use spindle_core::manifest::Manifest;
    use spindle_core::module::Module;

    fn workspace_from(toml: &str) -> Workspace {
        let manifest = Manifest::from_str(toml).unwrap();
        Workspace {
            root_dir: std::path::PathBuf::from("/tmp/proj"),
            modules: vec![Module {
                manifest: manifest.clone(),
                manifest_path: std::path::PathBuf::from("/tmp/proj/Spindle.toml"),
                root_dir: std::path::PathBuf::from("/tmp/proj"),
            }],
            root_manifest: manifest,
        }
    }

    #[test]
    fn defaults_appended_when_nothing_declared() {
        let ws = workspace_from(
            r#"
[mod]
id = "demo"
version = "0.1.0"
"#,
        );
        let repos = repositories_for(&ws, &GlobalConfig::default());
        let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["fabric", "maven-central", "mojang-libraries"]);
    }

    #[test]
    fn declared_fabric_suppresses_default() {
        let ws = workspace_from(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[repositories]
fabricmc = "https://maven.fabricmc.net/"
"#,
        );
        let repos = repositories_for(&ws, &GlobalConfig::default());
        assert_eq!(
            repos
                .iter()
                .filter(|r| r.url.contains("maven.fabricmc.net"))
                .count(),
            1
        );
        assert_eq!(repos[0].name, "fabricmc");
    }

    #[test]
    fn config_credentials_attach_by_name() {
        let ws = workspace_from(
            r#"
[mod]
id = "demo"
version = "0.1.0"

[repositories]
private = "https://maven.example.dev/releases"
"#,
        );
        let mut config = GlobalConfig::default();
        config.credentials.insert(
            "private".to_string(),
            spindle_core::config::CredentialEntry {
                username: None,
                password: None,
                token: Some("abc123".to_string()),
            },
        );
        let repos = repositories_for(&ws, &config);
        let private = repos.iter().find(|r| r.name == "private").unwrap();
        assert_eq!(private.token.as_deref(), Some("abc123"));
    }
}
