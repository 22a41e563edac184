use miette::Result;

use spindle_ops::ops_remove::{remove_dependency, RemoveOptions};
use spindle_util::errors::SpindleError;
use spindle_util::fs::find_ancestor_with;

pub fn exec(dep: &str, dev: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    let project_root =
        find_ancestor_with(&cwd, "Spindle.toml").ok_or_else(|| SpindleError::Manifest {
            message: "Could not find Spindle.toml in this directory or any parent".to_string(),
        })?;

    remove_dependency(
        &project_root.join("Spindle.toml"),
        &RemoveOptions {
            name: dep.to_string(),
            dev,
        },
    )?;

    eprintln!("Removed {dep} from Spindle.toml");
    Ok(())
}
