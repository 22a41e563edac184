use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn spindle_cmd() -> Command {
    Command::cargo_bin("spindle").unwrap()
}

const CLEAN_MANIFEST: &str = r#"[mod]
id = "glow-lanterns"
name = "Glow Lanterns"
version = "0.3.0"
license = "MIT"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"
fabric-api-version = "0.110.0+1.21.4"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:${fabric-api-version}"
"#;

fn write_project(dir: &std::path::Path, manifest: &str) {
    fs::write(dir.join("Spindle.toml"), manifest).unwrap();
    fs::create_dir_all(dir.join("src/main/resources")).unwrap();
}

#[test]
fn test_check_clean_project_passes() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), CLEAN_MANIFEST);

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Finished"));
}

#[test]
fn test_check_reports_invalid_mod_id() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        r#"[mod]
id = "Glow Lanterns"
version = "0.3.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"
"#,
    );

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("mod id"));
}

#[test]
fn test_check_reports_unknown_property() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        r#"[mod]
id = "glow-lanterns"
version = "0.3.0"

[properties]
minecraft-version = "1.21.4"
fabric-loader-version = "0.16.9"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:${fabric-api-version}"
"#,
    );

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fabric-api-version"));
}

#[test]
fn test_check_reports_missing_platform_property() {
    let tmp = TempDir::new().unwrap();
    write_project(
        tmp.path(),
        r#"[mod]
id = "glow-lanterns"
version = "0.3.0"

[properties]
minecraft-version = "1.21.4"
"#,
    );

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("fabric-loader-version"));
}

#[test]
fn test_check_warns_on_missing_resources_dir() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Spindle.toml"), CLEAN_MANIFEST).unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"));
}

#[test]
fn test_check_validates_handwritten_template() {
    let tmp = TempDir::new().unwrap();
    write_project(tmp.path(), CLEAN_MANIFEST);
    fs::write(
        tmp.path().join("src/main/resources/fabric.mod.json"),
        r#"{"schemaVersion": 1, "id": "glow-lanterns", "version": "${no-such-property}"}"#,
    )
    .unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-property"));
}

#[test]
fn test_check_outside_project_fails() {
    let tmp = TempDir::new().unwrap();

    spindle_cmd()
        .current_dir(tmp.path())
        .args(["check"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Spindle.toml found"));
}
