use miette::Result;

use spindle_core::template::{TemplateContext, TemplateRegistry};
use spindle_core::{DEFAULT_LOADER_VERSION, DEFAULT_MINECRAFT_VERSION};
use spindle_util::errors::SpindleError;

pub fn exec(template: &str) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    let manifest_path = cwd.join("Spindle.toml");

    if manifest_path.exists() {
        return Err(SpindleError::Generic {
            message: "Spindle.toml already exists in this directory".to_string(),
        }
        .into());
    }

    let name = cwd
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("my-mod");

    let registry = TemplateRegistry::new()?;
    let tmpl = registry
        .get(template)
        .ok_or_else(|| SpindleError::Generic {
            message: format!(
                "Unknown template '{}'. Available: {}",
                template,
                registry.names().join(", ")
            ),
        })?;

    let ctx = TemplateContext::new(name, DEFAULT_MINECRAFT_VERSION, DEFAULT_LOADER_VERSION);
    tmpl.render_core_only(&cwd, &ctx)?;

    println!("Initialized mod project in {}", cwd.display());

    Ok(())
}
