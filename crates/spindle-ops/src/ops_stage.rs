//! Operation: stage mod resources into `build/resources/main`.
//!
//! Staging copies the module's resource tree, renders `${key}` template
//! files, and guarantees a valid `fabric.mod.json` in the output: rendered
//! from the handwritten template when one exists, generated from `[mod]`
//! otherwise.

use std::path::Path;

use spindle_core::modmeta;
use spindle_core::module::Module;
use spindle_core::properties;
use spindle_core::workspace::Workspace;
use spindle_util::errors::SpindleError;
use spindle_util::fs::TreeFilter;
use spindle_util::progress::status;

/// Stage every mod module in the workspace enclosing `start_dir`.
pub fn stage(start_dir: &Path) -> miette::Result<()> {
    let workspace = Workspace::discover(start_dir)?;
    let mut staged = 0u32;
    for module in &workspace.modules {
        if !module.is_mod() {
            continue;
        }
        stage_module(module)?;
        staged += 1;
    }
    if staged == 0 {
        return Err(SpindleError::Resource {
            message: "no module declares a [mod] section; nothing to stage".to_string(),
        }
        .into());
    }
    Ok(())
}

/// Stage one module's resources. The previous staging output is replaced.
pub fn stage_module(module: &Module) -> miette::Result<()> {
    let Some(meta) = &module.manifest.mod_meta else {
        return Ok(());
    };

    let issues = modmeta::validate_metadata(meta);
    if !issues.is_empty() {
        return Err(SpindleError::Resource {
            message: format!("{}: {}", module.name(), issues.join("; ")),
        }
        .into());
    }

    let config = module.resources_config();
    let source = module.resources_dir();
    let out = module.staged_resources_dir();
    spindle_util::fs::recreate_dir(&out).map_err(SpindleError::Io)?;

    let filter =
        TreeFilter::new(&config.include, &config.exclude).map_err(|e| SpindleError::Resource {
            message: format!("{}: invalid resource pattern: {e}", module.name()),
        })?;
    let props = &module.manifest.properties;
    let ctx = modmeta::substitution_context(meta, props);

    let mut copied = 0u32;
    let mut rendered = 0u32;
    for rel in spindle_util::fs::walk_files(&source).map_err(SpindleError::Io)? {
        if !filter.matches(&rel) {
            tracing::debug!("skipping excluded resource {}", rel.display());
            continue;
        }
        let from = source.join(&rel);
        let to = out.join(&rel);
        if let Some(parent) = to.parent() {
            spindle_util::fs::ensure_dir(parent).map_err(SpindleError::Io)?;
        }

        let is_template = config.template.iter().any(|t| Path::new(t) == rel);
        if !is_template {
            std::fs::copy(&from, &to).map_err(SpindleError::Io)?;
            copied += 1;
            continue;
        }

        let content = std::fs::read_to_string(&from).map_err(SpindleError::Io)?;
        let output = if rel == Path::new("fabric.mod.json") {
            let (text, _) = modmeta::render_template(&content, meta, props).map_err(|e| {
                SpindleError::Resource {
                    message: format!("{}: fabric.mod.json: {e}", module.name()),
                }
            })?;
            text
        } else {
            let text =
                properties::substitute(&content, &ctx).map_err(|e| SpindleError::Resource {
                    message: format!("{}: {}: {e}", module.name(), rel.display()),
                })?;
            if rel.extension().is_some_and(|ext| ext == "json") {
                serde_json::from_str::<serde_json::Value>(&text).map_err(|e| {
                    SpindleError::Resource {
                        message: format!(
                            "{}: {} does not render to valid JSON: {e}",
                            module.name(),
                            rel.display()
                        ),
                    }
                })?;
            }
            text
        };
        std::fs::write(&to, output).map_err(SpindleError::Io)?;
        rendered += 1;
    }

    // A jar without mod metadata is not loadable; generate the document
    // from [mod] when the source tree carries none.
    if !out.join("fabric.mod.json").is_file() {
        let doc = modmeta::render(meta, props);
        let json = modmeta::to_json_string(&doc).map_err(|e| SpindleError::Resource {
            message: format!("{}: failed to serialize fabric.mod.json: {e}", module.name()),
        })?;
        std::fs::write(out.join("fabric.mod.json"), json).map_err(SpindleError::Io)?;
        rendered += 1;
    }

    status(
        "Staged",
        &format!(
            "{} ({} copied, {} rendered) -> {}",
            module.name(),
            copied,
            rendered,
            out.display()
        ),
    );
    Ok(())
}
