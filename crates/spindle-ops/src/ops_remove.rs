//! Operation: remove a dependency from Spindle.toml.

use std::path::Path;

use toml_edit::DocumentMut;

/// Options for `spindle remove`.
pub struct RemoveOptions {
    /// The dependency name (table key in Spindle.toml).
    pub name: String,
    /// Remove from dev dependencies.
    pub dev: bool,
}

/// Remove a dependency from `Spindle.toml` using format-preserving edits.
pub fn remove_dependency(manifest_path: &Path, opts: &RemoveOptions) -> miette::Result<()> {
    let content = std::fs::read_to_string(manifest_path).map_err(|e| {
        spindle_util::errors::SpindleError::Manifest {
            message: format!("Failed to read {}: {e}", manifest_path.display()),
        }
    })?;

    let mut doc: DocumentMut =
        content
            .parse()
            .map_err(|e| spindle_util::errors::SpindleError::Manifest {
                message: format!("Failed to parse Spindle.toml: {e}"),
            })?;

    let removed = if opts.dev {
        remove_key_at(&mut doc, &["dev-dependencies", &opts.name])
    } else {
        remove_key_at(&mut doc, &["dependencies", &opts.name])
    };

    if !removed {
        return Err(spindle_util::errors::SpindleError::Generic {
            message: format!("Dependency '{}' not found in Spindle.toml", opts.name),
        }
        .into());
    }

    std::fs::write(manifest_path, doc.to_string())
        .map_err(|e| spindle_util::errors::SpindleError::Io(e).into())
}

/// Navigate a TOML document path and remove the leaf key.
fn remove_key_at(doc: &mut DocumentMut, path: &[&str]) -> bool {
    if path.is_empty() {
        return false;
    }
    if path.len() == 1 {
        return doc.remove(path[0]).is_some();
    }

    let mut current = doc.as_table_mut();
    for &key in &path[..path.len() - 1] {
        match current.get_mut(key) {
            Some(toml_edit::Item::Table(ref mut t)) => current = t,
            _ => return false,
        }
    }
    current.remove(path[path.len() - 1]).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_existing_dependency() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Spindle.toml");
        std::fs::write(
            &path,
            r#"[mod]
id = "ore-compass"
version = "1.0.0"

[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:0.110.0+1.21.4"
modmenu = "com.terraformersmc:modmenu:13.0.0"
"#,
        )
        .unwrap();

        remove_dependency(
            &path,
            &RemoveOptions {
                name: "modmenu".to_string(),
                dev: false,
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("modmenu"));
        assert!(content.contains("fabric-api"));
    }

    #[test]
    fn remove_nonexistent_dependency() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Spindle.toml");
        std::fs::write(
            &path,
            r#"[mod]
id = "ore-compass"
version = "1.0.0"

[dependencies]
"#,
        )
        .unwrap();

        let result = remove_dependency(
            &path,
            &RemoveOptions {
                name: "missing".to_string(),
                dev: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn dev_flag_targets_dev_section() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Spindle.toml");
        std::fs::write(
            &path,
            r#"[mod]
id = "ore-compass"
version = "1.0.0"

[dependencies]
shared = "com.example:shared:1.0.0"

[dev-dependencies]
shared = "com.example:shared:2.0.0"
"#,
        )
        .unwrap();

        remove_dependency(
            &path,
            &RemoveOptions {
                name: "shared".to_string(),
                dev: true,
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains(r#"shared = "com.example:shared:1.0.0""#));
        assert!(!content.contains("com.example:shared:2.0.0"));
    }

    #[test]
    fn preserves_formatting() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("Spindle.toml");
        let original = r#"[mod]
id = "ore-compass"
version = "1.0.0"

# Runtime mods
[dependencies]
fabric-api = "net.fabricmc.fabric-api:fabric-api:0.110.0+1.21.4"
modmenu = "com.terraformersmc:modmenu:13.0.0"
"#;
        std::fs::write(&path, original).unwrap();

        remove_dependency(
            &path,
            &RemoveOptions {
                name: "modmenu".to_string(),
                dev: false,
            },
        )
        .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# Runtime mods"));
        assert!(content.contains("fabric-api"));
    }
}
