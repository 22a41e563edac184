use spindle_core::dependency::Dependency;
use spindle_core::manifest::{Environment, Manifest, RepositoryEntry};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

#[test]
fn test_parse_simple_mod_fixture() {
    let path = fixtures_dir().join("simple-mod.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    let meta = manifest.mod_meta.as_ref().unwrap();
    assert_eq!(meta.id, "glowstone-lanterns");
    assert_eq!(meta.version, "0.1.0");
    assert_eq!(meta.name.as_deref(), Some("Glowstone Lanterns"));
    assert_eq!(meta.license.as_deref(), Some("MIT"));
    assert_eq!(meta.environment, Environment::Both);
    assert_eq!(meta.entrypoints["main"], vec!["com.example.lanterns.LanternsInit"]);
    assert_eq!(
        manifest.properties.get("minecraft-version").map(String::as_str),
        Some("1.21.4")
    );
    assert_eq!(manifest.dependencies.len(), 1);
    assert_eq!(manifest.repositories["fabric"].url(), "https://maven.fabricmc.net");
}

#[test]
fn test_parse_full_mod_fixture() {
    let path = fixtures_dir().join("full-mod.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    let meta = manifest.mod_meta.as_ref().unwrap();
    assert_eq!(meta.id, "ore-compass");
    assert_eq!(meta.environment, Environment::Client);
    assert_eq!(meta.authors, vec!["alice", "bob"]);
    assert_eq!(meta.mixins, vec!["ore-compass.mixins.json"]);
    assert_eq!(meta.entrypoints.len(), 2);
    assert_eq!(meta.depends["java"], ">=21");
    assert_eq!(meta.suggests["modmenu"], "*");
    assert_eq!(meta.breaks["legacy-compass"], "<2.0.0");

    assert_eq!(manifest.dependencies.len(), 3);
    assert!(matches!(manifest.dependencies["fabric-api"], Dependency::Short(_)));
    assert!(matches!(
        manifest.dependencies["cloth-config"],
        Dependency::Detailed(_)
    ));
    assert!(matches!(
        manifest.dependencies["annotations"],
        Dependency::Catalog(_)
    ));
    assert_eq!(manifest.dev_dependencies.len(), 1);

    let catalog = manifest.catalog.as_ref().unwrap();
    assert_eq!(catalog.versions.len(), 2);
    assert_eq!(catalog.libraries.len(), 3);
    assert_eq!(
        catalog.bundles["night-config"],
        vec!["night-config-core".to_string(), "night-config-toml".to_string()]
    );

    let resources = manifest.resources.as_ref().unwrap();
    assert_eq!(resources.dir, "src/main/resources");
    assert_eq!(resources.template, vec!["fabric.mod.json"]);

    let publish = manifest.publish.as_ref().unwrap();
    assert_eq!(publish.group, "dev.example");
    assert_eq!(publish.repository.as_deref(), Some("private"));
}

#[test]
fn test_parse_full_mod_detailed_repository() {
    let path = fixtures_dir().join("full-mod.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    match &manifest.repositories["private"] {
        RepositoryEntry::Detailed { url, auth, .. } => {
            assert_eq!(url, "https://maven.example.dev/releases");
            assert_eq!(auth.as_deref(), Some("basic"));
        }
        RepositoryEntry::Url(_) => panic!("expected detailed repository entry"),
    }
}

#[test]
fn test_parse_workspace_root_fixture() {
    let path = fixtures_dir().join("workspace-root.toml");
    let manifest = Manifest::from_path(&path).unwrap();
    assert!(manifest.mod_meta.is_none());
    let ws = manifest.workspace.as_ref().unwrap();
    assert_eq!(ws.members, vec!["core-mod", "addons/*"]);
    assert_eq!(ws.exclude, vec!["addons/legacy"]);
    assert_eq!(manifest.repositories.len(), 2);
    assert!(manifest.catalog.is_some());
}

#[test]
fn test_parse_missing_mod_id_fails() {
    let path = fixtures_dir().join("invalid-missing-id.toml");
    let result = Manifest::from_path(&path);
    assert!(result.is_err(), "manifest without a mod id should fail to parse");
}

#[test]
fn test_parse_nonexistent_fixture() {
    let path = fixtures_dir().join("does-not-exist.toml");
    let result = Manifest::from_path(&path);
    assert!(result.is_err());
}
