use miette::Result;

use spindle_core::properties::load_env_file;
use spindle_core::workspace::Workspace;
use spindle_util::errors::SpindleError;

pub fn exec(reveal: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    let workspace = Workspace::discover(&cwd)?;

    for module in &workspace.modules {
        if workspace.is_multi_module() {
            println!("{}:", module.name());
        } else {
            println!("Properties:");
        }
        if module.manifest.properties.is_empty() {
            println!("  (none)");
        }
        for (key, value) in &module.manifest.properties {
            println!("  {} = {}", key, value);
        }
    }

    let env_path = workspace.root_dir.join(".spindle.env");
    let env_vars = load_env_file(&env_path)?;

    if env_vars.is_empty() {
        println!();
        println!("No environment overrides configured.");
        println!("  .spindle.env: {}", env_path.display());
        return Ok(());
    }

    println!();
    println!(".spindle.env ({} entries):", env_vars.len());
    for (key, value) in &env_vars {
        let display_value = if reveal { value.as_str() } else { "********" };
        println!("  {} = {}", key, display_value);
    }

    Ok(())
}
