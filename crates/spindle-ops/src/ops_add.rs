//! Operation: add a dependency to Spindle.toml.

use std::path::Path;

use spindle_core::dependency::{DependencyScope, MavenCoordinate};
use toml_edit::{DocumentMut, InlineTable, Item, Table, Value};

/// Options for `spindle add`.
pub struct AddOptions {
    /// The dependency spec: `group:artifact:version`.
    pub spec: String,
    /// Add as a dev dependency.
    pub dev: bool,
    /// Explicit scope; shorthand form is used when absent.
    pub scope: Option<DependencyScope>,
    /// Table key; defaults to the artifact ID.
    pub key: Option<String>,
}

/// Add a dependency to `Spindle.toml` using format-preserving edits.
pub fn add_dependency(manifest_path: &Path, opts: &AddOptions) -> miette::Result<()> {
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

    let coord = MavenCoordinate::parse_strict(&opts.spec).map_err(|e| {
        spindle_util::errors::SpindleError::Generic {
            message: format!("Invalid dependency '{}': {e}", opts.spec),
        }
    })?;

    let dep_key = opts
        .key
        .clone()
        .unwrap_or_else(|| coord.artifact_id.clone());
    let dep_value = match opts.scope {
        Some(scope) => {
            let mut table = InlineTable::new();
            table.insert("group", Value::from(coord.group_id.clone()));
            table.insert("artifact", Value::from(coord.artifact_id.clone()));
            table.insert("version", Value::from(coord.version.clone()));
            table.insert("scope", Value::from(scope.as_str()));
            Item::Value(Value::InlineTable(table))
        }
        None => Item::Value(Value::from(coord.to_string())),
    };

    let section = if opts.dev {
        "dev-dependencies"
    } else {
        "dependencies"
    };
    ensure_table(&mut doc, &[section]);
    doc[section][&dep_key] = dep_value;

    std::fs::write(manifest_path, doc.to_string())
        .map_err(|e| spindle_util::errors::SpindleError::Io(e).into())
}

/// Ensure a nested table path exists in the document.
fn ensure_table(doc: &mut DocumentMut, keys: &[&str]) {
    let mut current = doc.as_table_mut() as &mut Table;
    for &key in keys {
        if !current.contains_key(key) {
            current.insert(key, Item::Table(Table::new()));
        }
        current = match current.get_mut(key) {
            Some(Item::Table(t)) => t,
            _ => return,
        };
    }
}
