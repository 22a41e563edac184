//! `fabric.mod.json` model and rendering.
//!
//! The staged file follows schema version 1 of the Fabric mod metadata
//! format. Rendering either substitutes `${key}` values into a handwritten
//! template from the resources directory, or generates the whole document
//! from the `[mod]` section.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::manifest::{Environment, ModMetadata};
use crate::properties;

/// Schema version Spindle renders and accepts.
pub const SCHEMA_VERSION: u32 = 1;

/// The `fabric.mod.json` document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FabricModJson {
    #[serde(rename = "schemaVersion")]
    pub schema_version: u32,
    pub id: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub contact: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub entrypoints: BTreeMap<String, Vec<Entrypoint>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mixins: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub depends: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub suggests: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub breaks: BTreeMap<String, String>,
}

/// An entrypoint declaration: a bare class reference or an adapter object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entrypoint {
    Reference(String),
    Adapted { adapter: String, value: String },
}

/// Build the document from manifest metadata and resolved properties.
///
/// `depends` entries for the loader and the game are injected from the
/// version properties unless the manifest declares them itself. The `~`
/// constraint on the game keeps the declared minor series.
pub fn render(meta: &ModMetadata, props: &BTreeMap<String, String>) -> FabricModJson {
    let mut depends = meta.depends.clone();
    if !depends.contains_key("fabricloader") {
        if let Some(loader) = props.get("fabric-loader-version") {
            depends.insert("fabricloader".to_string(), format!(">={loader}"));
        }
    }
    if !depends.contains_key("minecraft") {
        if let Some(game) = props.get("minecraft-version") {
            depends.insert("minecraft".to_string(), format!("~{game}"));
        }
    }

    let entrypoints = meta
        .entrypoints
        .iter()
        .map(|(name, refs)| {
            let refs = refs.iter().cloned().map(Entrypoint::Reference).collect();
            (name.clone(), refs)
        })
        .collect();

    FabricModJson {
        schema_version: SCHEMA_VERSION,
        id: meta.id.clone(),
        version: meta.version.clone(),
        name: meta.name.clone(),
        description: meta.description.clone(),
        authors: meta.authors.clone(),
        contact: meta.contact.clone(),
        license: meta.license.clone(),
        icon: meta.icon.clone(),
        environment: meta.environment,
        entrypoints,
        mixins: meta.mixins.clone(),
        depends,
        suggests: meta.suggests.clone(),
        breaks: meta.breaks.clone(),
    }
}

/// Serialize with two-space indentation and a trailing newline.
pub fn to_json_string(doc: &FabricModJson) -> serde_json::Result<String> {
    let mut out = serde_json::to_string_pretty(doc)?;
    out.push('\n');
    Ok(out)
}

/// Substitute `${key}` references in a handwritten template and parse the
/// result, verifying the identity fields match the manifest.
pub fn render_template(
    template: &str,
    meta: &ModMetadata,
    props: &BTreeMap<String, String>,
) -> Result<(String, FabricModJson), String> {
    let ctx = substitution_context(meta, props);
    let rendered = properties::substitute(template, &ctx)?;
    let doc: FabricModJson = serde_json::from_str(&rendered)
        .map_err(|e| format!("rendered fabric.mod.json is invalid: {e}"))?;
    if doc.schema_version != SCHEMA_VERSION {
        return Err(format!(
            "unsupported schemaVersion {} (expected {SCHEMA_VERSION})",
            doc.schema_version
        ));
    }
    if doc.id != meta.id {
        return Err(format!(
            "template id '{}' does not match manifest id '{}'",
            doc.id, meta.id
        ));
    }
    if doc.version != meta.version {
        return Err(format!(
            "template version '{}' does not match manifest version '{}'",
            doc.version, meta.version
        ));
    }
    Ok((rendered, doc))
}

/// `${key}` context for resource templates: every project property plus the
/// mod identity fields.
pub fn substitution_context(
    meta: &ModMetadata,
    props: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut ctx = props.clone();
    ctx.insert("id".to_string(), meta.id.clone());
    ctx.insert("version".to_string(), meta.version.clone());
    if let Some(name) = &meta.name {
        ctx.insert("name".to_string(), name.clone());
    }
    if let Some(description) = &meta.description {
        ctx.insert("description".to_string(), description.clone());
    }
    ctx
}

/// Fabric mod identifiers: a lowercase letter followed by 1 to 63 characters
/// from `[a-z0-9-_]`.
pub fn valid_mod_id(id: &str) -> bool {
    let mut chars = id.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    (2..=64).contains(&id.len())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Validate a version predicate: `*`, or whitespace-separated tokens each of
/// an optional operator (`>=`, `<=`, `>`, `<`, `=`, `~`, `^`) and a version.
pub fn valid_version_predicate(predicate: &str) -> bool {
    let predicate = predicate.trim();
    if predicate == "*" {
        return true;
    }
    let mut tokens = predicate.split_whitespace().peekable();
    if tokens.peek().is_none() {
        return false;
    }
    tokens.all(|token| {
        let rest = token
            .strip_prefix(">=")
            .or_else(|| token.strip_prefix("<="))
            .or_else(|| token.strip_prefix('>'))
            .or_else(|| token.strip_prefix('<'))
            .or_else(|| token.strip_prefix('='))
            .or_else(|| token.strip_prefix('~'))
            .or_else(|| token.strip_prefix('^'))
            .unwrap_or(token);
        !rest.is_empty()
    })
}

/// Validate the `[mod]` section, returning every issue found.
pub fn validate_metadata(meta: &ModMetadata) -> Vec<String> {
    let mut issues = Vec::new();
    if !valid_mod_id(&meta.id) {
        issues.push(format!(
            "mod id '{}' must be a lowercase letter followed by 1-63 of [a-z0-9-_]",
            meta.id
        ));
    }
    if let Err(e) = semver::Version::parse(&meta.version) {
        issues.push(format!(
            "mod version '{}' is not a semantic version: {e}",
            meta.version
        ));
    }
    for (target, predicate) in meta
        .depends
        .iter()
        .chain(meta.suggests.iter())
        .chain(meta.breaks.iter())
    {
        if !valid_version_predicate(predicate) {
            issues.push(format!(
                "'{target}' has a malformed version predicate '{predicate}'"
            ));
        }
    }
    for (name, refs) in &meta.entrypoints {
        if refs.is_empty() {
            issues.push(format!("entrypoint '{name}' lists no classes"));
        }
        for class_ref in refs {
            if class_ref.trim().is_empty() {
                issues.push(format!("entrypoint '{name}' has an empty class reference"));
            }
        }
    }
    issues
}
