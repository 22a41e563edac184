use miette::Result;

use spindle_core::dependency::DependencyScope;
use spindle_ops::ops_add::{add_dependency, AddOptions};
use spindle_util::errors::SpindleError;
use spindle_util::fs::find_ancestor_with;

pub fn exec(dep: &str, dev: bool, scope: Option<&str>, key: Option<String>) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    let project_root =
        find_ancestor_with(&cwd, "Spindle.toml").ok_or_else(|| SpindleError::Manifest {
            message: "Could not find Spindle.toml in this directory or any parent".to_string(),
        })?;

    let scope = scope
        .map(str::parse::<DependencyScope>)
        .transpose()
        .map_err(|e| SpindleError::Generic { message: e })?;

    add_dependency(
        &project_root.join("Spindle.toml"),
        &AddOptions {
            spec: dep.to_string(),
            dev,
            scope,
            key,
        },
    )?;

    if dev {
        eprintln!("Added {dep} to [dev-dependencies]");
    } else {
        eprintln!("Added {dep} to [dependencies]");
    }
    Ok(())
}
