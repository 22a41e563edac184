use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn spindle_cmd() -> Command {
    Command::cargo_bin("spindle").unwrap()
}

#[test]
fn test_new_mod_project() {
    let tmp = TempDir::new().unwrap();
    let project_name = "glow-lanterns";

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", project_name])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created new mod project"));

    let project_dir = tmp.path().join(project_name);
    assert!(project_dir.join("Spindle.toml").is_file());
    assert!(project_dir.join("Spindle.lock").is_file());
    assert!(project_dir.join(".gitignore").is_file());
    assert!(project_dir.join(".spindle.env").is_file());
    assert!(project_dir
        .join("src/main/java/com/example/glow_lanterns")
        .is_dir());
    assert!(project_dir
        .join("src/main/resources/fabric.mod.json")
        .is_file());

    let manifest = fs::read_to_string(project_dir.join("Spindle.toml")).unwrap();
    assert!(manifest.contains("id = \"glow-lanterns\""));
    assert!(manifest.contains(&format!("name = \"{project_name}\"")));
    assert!(manifest.contains("minecraft-version = \"1.21.4\""));
    assert!(manifest.contains("fabric-loader-version = \"0.16.9\""));
    assert!(manifest.contains("fabric = \"https://maven.fabricmc.net\""));

    // ${key} references survive scaffolding; staging resolves them later.
    let fmj =
        fs::read_to_string(project_dir.join("src/main/resources/fabric.mod.json")).unwrap();
    assert!(fmj.contains("\"id\": \"${id}\""));
    assert!(fmj.contains("com.example.glow_lanterns.Init"));
}

#[test]
fn test_new_library_project() {
    let tmp = TempDir::new().unwrap();
    let project_name = "torch-lib";

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", project_name, "--template", "library"])
        .assert()
        .success();

    let project_dir = tmp.path().join(project_name);
    assert!(project_dir.join("testmod/Spindle.toml").is_file());
    assert!(project_dir
        .join("testmod/src/main/resources/fabric.mod.json")
        .is_file());

    let manifest = fs::read_to_string(project_dir.join("Spindle.toml")).unwrap();
    assert!(manifest.contains("[catalog.versions]"));
    assert!(manifest.contains("[workspace]"));
    assert!(manifest.contains("members = [\"testmod\"]"));
    assert!(manifest.contains("[publish]"));

    let testmod = fs::read_to_string(project_dir.join("testmod/Spindle.toml")).unwrap();
    assert!(testmod.contains("id = \"torch-lib-testmod\""));
}

#[test]
fn test_new_existing_directory_fails() {
    let tmp = TempDir::new().unwrap();
    let project_name = "already-exists";
    fs::create_dir(tmp.path().join(project_name)).unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", project_name])
        .assert()
        .failure();
}

#[test]
fn test_new_unknown_template_fails() {
    let tmp = TempDir::new().unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", "bad-tmpl", "--template", "nonexistent"])
        .assert()
        .failure();
}

#[test]
fn test_new_gitignore_covers_generated_paths() {
    let tmp = TempDir::new().unwrap();
    let project_name = "gitignore-test";

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", project_name])
        .assert()
        .success();

    let gitignore = fs::read_to_string(tmp.path().join(project_name).join(".gitignore")).unwrap();
    assert!(gitignore.contains("build/"));
    assert!(gitignore.contains(".spindle/"));
    assert!(gitignore.contains(".spindle.env"));
}

#[test]
fn test_new_sanitizes_mod_id() {
    let tmp = TempDir::new().unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["new", "Glow Lanterns"])
        .assert()
        .success();

    let manifest =
        fs::read_to_string(tmp.path().join("Glow Lanterns").join("Spindle.toml")).unwrap();
    assert!(manifest.contains("id = \"glow-lanterns\""));
    assert!(manifest.contains("name = \"Glow Lanterns\""));
}

#[test]
fn test_init_creates_only_core_files() {
    let tmp = TempDir::new().unwrap();
    let project_dir = tmp.path().join("existing-mod");
    fs::create_dir(&project_dir).unwrap();
    fs::create_dir_all(project_dir.join("src/main/java")).unwrap();
    fs::write(project_dir.join("src/main/java/Init.java"), "class Init {}").unwrap();

    spindle_cmd()
        .current_dir(&project_dir)
        .args(["init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized mod project"));

    assert!(project_dir.join("Spindle.toml").is_file());
    assert!(project_dir.join("Spindle.lock").is_file());
    assert!(project_dir.join(".gitignore").is_file());
    assert!(project_dir.join(".spindle.env").is_file());

    assert!(
        !project_dir.join("src/main/resources").exists(),
        "init must not create source directories"
    );
    assert!(
        project_dir.join("src/main/java/Init.java").is_file(),
        "init must not touch existing source files"
    );

    let manifest = fs::read_to_string(project_dir.join("Spindle.toml")).unwrap();
    assert!(manifest.contains("id = \"existing-mod\""));
}

#[test]
fn test_init_refuses_when_manifest_exists() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Spindle.toml"), "[properties]\n").unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["init"])
        .assert()
        .failure();
}

#[test]
fn test_init_does_not_overwrite_existing_files() {
    let tmp = TempDir::new().unwrap();
    let project_dir = tmp.path().join("has-gitignore");
    fs::create_dir(&project_dir).unwrap();
    fs::write(project_dir.join(".gitignore"), "my-custom-ignores\n").unwrap();

    spindle_cmd()
        .current_dir(&project_dir)
        .args(["init"])
        .assert()
        .success();

    let gitignore = fs::read_to_string(project_dir.join(".gitignore")).unwrap();
    assert_eq!(
        gitignore, "my-custom-ignores\n",
        "init must not overwrite existing .gitignore"
    );
    assert!(project_dir.join("Spindle.toml").is_file());
}

#[test]
fn test_scaffolded_projects_pass_check() {
    for template in &["mod", "library"] {
        let tmp = TempDir::new().unwrap();
        let project_name = format!("fresh-{}", template);

        spindle_cmd()
            .current_dir(tmp.path())
            .args(["new", &project_name, "--template", template])
            .assert()
            .success();

        spindle_cmd()
            .current_dir(tmp.path().join(&project_name))
            .args(["check"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Finished"));
    }
}

#[test]
fn test_all_templates_produce_parseable_manifests() {
    for template in &["mod", "library"] {
        let tmp = TempDir::new().unwrap();
        let project_name = format!("parse-{}", template);

        spindle_cmd()
            .current_dir(tmp.path())
            .args(["new", &project_name, "--template", template])
            .assert()
            .success();

        let manifest_content =
            fs::read_to_string(tmp.path().join(&project_name).join("Spindle.toml")).unwrap();
        let result = spindle_core::manifest::Manifest::from_str(&manifest_content);
        assert!(
            result.is_ok(),
            "Template '{}' generated unparseable Spindle.toml: {:?}",
            template,
            result.err()
        );
    }
}
