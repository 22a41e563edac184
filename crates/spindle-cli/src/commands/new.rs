use miette::Result;
use std::path::Path;

use spindle_core::template::{TemplateContext, TemplateRegistry};
use spindle_core::{DEFAULT_LOADER_VERSION, DEFAULT_MINECRAFT_VERSION};
use spindle_util::errors::SpindleError;

pub fn exec(name: &str, template: &str) -> Result<()> {
    let project_dir = Path::new(name);
    if project_dir.exists() {
        return Err(SpindleError::Generic {
            message: format!("Directory '{}' already exists", name),
        }
        .into());
    }

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

    std::fs::create_dir_all(project_dir).map_err(SpindleError::Io)?;

    let ctx = TemplateContext::new(name, DEFAULT_MINECRAFT_VERSION, DEFAULT_LOADER_VERSION);
    tmpl.render(project_dir, &ctx)?;

    println!(
        "Created new mod project '{}' with template '{}'",
        name, template
    );

    Ok(())
}
