//! Embedded project template system for `spindle new` / `spindle init`.
//!
//! Templates are TOML descriptors compiled into the binary via `include_str!`.
//! Each template declares the directories, files, and `Spindle.toml` content
//! to generate for a new project. Simple `{{variable}}` interpolation is
//! performed at render time; `${key}` references are left alone for the
//! staging step to resolve.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

use spindle_util::errors::SpindleError;

/// Metadata about a project template (name, description).
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateMeta {
    pub name: String,
    pub description: String,
}

/// The manifest section, raw `Spindle.toml` content with `{{variable}}`
/// placeholders.
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestTemplate {
    pub content: String,
}

/// A directory to create during project scaffolding.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoryEntry {
    pub path: String,
}

/// A file to create during project scaffolding, with interpolated content.
#[derive(Debug, Clone, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub content: String,
}

/// A complete project template parsed from a TOML descriptor.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectTemplate {
    pub template: TemplateMeta,
    pub manifest: ManifestTemplate,
    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

/// Variables available for `{{variable}}` interpolation in template content.
pub struct TemplateContext {
    vars: BTreeMap<String, String>,
}

impl TemplateContext {
    /// Create a context with the standard project variables.
    pub fn new(project_name: &str, minecraft_version: &str, loader_version: &str) -> Self {
        let mod_id = sanitize_mod_id(project_name);
        let mut vars = BTreeMap::new();
        vars.insert("mod_name".to_string(), project_name.to_string());
        vars.insert("package_name".to_string(), mod_id.replace('-', "_"));
        vars.insert("mod_id".to_string(), mod_id);
        vars.insert(
            "minecraft_version".to_string(),
            minecraft_version.to_string(),
        );
        vars.insert("loader_version".to_string(), loader_version.to_string());
        Self { vars }
    }

    /// Add a custom variable to the context.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

/// Derive a valid Fabric mod id from a free-form project name.
pub fn sanitize_mod_id(name: &str) -> String {
    let mut id: String = name
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    while id.starts_with(|c: char| !c.is_ascii_lowercase()) && !id.is_empty() {
        id.remove(0);
    }
    if id.len() < 2 {
        id = format!("mod-{id}");
    }
    id.truncate(64);
    id
}

/// Replace all `{{key}}` placeholders in `input` with values from `ctx`.
/// Placeholders naming no known variable are left intact.
pub fn interpolate(input: &str, ctx: &TemplateContext) -> String {
    let mut result = input.to_string();
    for (key, value) in &ctx.vars {
        let placeholder = format!("{{{{{}}}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

impl ProjectTemplate {
    /// Parse a template from a TOML string.
    pub fn parse_toml(toml_str: &str) -> miette::Result<Self> {
        toml::from_str(toml_str).map_err(|e| {
            SpindleError::Generic {
                message: format!("Failed to parse project template: {e}"),
            }
            .into()
        })
    }

    /// Render the full template (directories, resource files, and core files)
    /// into a directory. Used by `spindle new`.
    pub fn render(&self, root: &Path, ctx: &TemplateContext) -> miette::Result<()> {
        for dir in &self.directories {
            let path = root.join(interpolate(&dir.path, ctx));
            std::fs::create_dir_all(&path).map_err(SpindleError::Io)?;
        }

        self.write_core_files(root, ctx, false)?;

        for file in &self.files {
            let path = root.join(interpolate(&file.path, ctx));
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(SpindleError::Io)?;
            }
            let content = interpolate(&file.content, ctx);
            std::fs::write(&path, content).map_err(SpindleError::Io)?;
        }

        Ok(())
    }

    /// Render only the core project files (`Spindle.toml`, `Spindle.lock`,
    /// `.spindle.env`, `.gitignore`) plus any template-defined files outside
    /// `src/`, without creating source directories. Used by `spindle init`
    /// on an existing project.
    ///
    /// Existing files are never overwritten.
    pub fn render_core_only(&self, root: &Path, ctx: &TemplateContext) -> miette::Result<()> {
        self.write_core_files(root, ctx, true)?;
        self.write_non_source_files(root, ctx, true)
    }

    fn write_core_files(
        &self,
        root: &Path,
        ctx: &TemplateContext,
        skip_existing: bool,
    ) -> miette::Result<()> {
        let write = |path: std::path::PathBuf, content: &str| -> miette::Result<()> {
            if skip_existing && path.exists() {
                return Ok(());
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(SpindleError::Io)?;
            }
            std::fs::write(&path, content).map_err(SpindleError::Io)?;
            Ok(())
        };

        write(
            root.join("Spindle.toml"),
            &interpolate(&self.manifest.content, ctx),
        )?;

        write(
            root.join("Spindle.lock"),
            "# This file is generated by Spindle. Do not edit by hand.\n",
        )?;

        write(root.join(".gitignore"), "build/\n.spindle/\n.spindle.env\n")?;

        write(
            root.join(".spindle.env"),
            "# Secrets and machine-local values (this file is gitignored)\n\
             # Values here are available via ${env:VAR} in Spindle.toml.\n",
        )?;

        Ok(())
    }

    /// Write template `[[files]]` entries whose paths do not start with `src/`.
    fn write_non_source_files(
        &self,
        root: &Path,
        ctx: &TemplateContext,
        skip_existing: bool,
    ) -> miette::Result<()> {
        for file in &self.files {
            if file.path.starts_with("src/") {
                continue;
            }
            let path = root.join(interpolate(&file.path, ctx));
            if skip_existing && path.exists() {
                continue;
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(SpindleError::Io)?;
            }
            let content = interpolate(&file.content, ctx);
            std::fs::write(&path, content).map_err(SpindleError::Io)?;
        }
        Ok(())
    }
}

/// Registry of all built-in project templates.
pub struct TemplateRegistry {
    templates: BTreeMap<String, ProjectTemplate>,
}

impl TemplateRegistry {
    /// Build the registry from all embedded template TOML files.
    pub fn new() -> miette::Result<Self> {
        let raw_templates: Vec<(&str, &str)> = vec![
            ("mod", include_str!("../templates/mod.toml")),
            ("library", include_str!("../templates/library.toml")),
        ];

        let mut templates = BTreeMap::new();
        for (name, src) in raw_templates {
            let tmpl = ProjectTemplate::parse_toml(src).map_err(|_| SpindleError::Generic {
                message: format!("Built-in template '{name}' is malformed"),
            })?;
            templates.insert(name.to_string(), tmpl);
        }

        Ok(Self { templates })
    }

    /// Look up a template by name.
    pub fn get(&self, name: &str) -> Option<&ProjectTemplate> {
        self.templates.get(name)
    }

    /// List all available template names with descriptions.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.templates
            .iter()
            .map(|(k, v)| (k.as_str(), v.template.description.as_str()))
            .collect()
    }

    /// Return all valid template names (for CLI validation).
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(|k| k.as_str()).collect()
    }
}
