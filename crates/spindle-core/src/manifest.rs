use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::dependency::Dependency;

/// The parsed representation of a `Spindle.toml` file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Mod identity. Absent on a virtual workspace root that only carries
    /// shared configuration for its members.
    #[serde(default, rename = "mod")]
    pub mod_meta: Option<ModMetadata>,

    /// Named version properties (e.g. `minecraft-version`), referenced as
    /// `${key}` in coordinates and resource templates.
    #[serde(default)]
    pub properties: BTreeMap<String, String>,

    #[serde(default)]
    pub dependencies: BTreeMap<String, Dependency>,

    /// Dependencies of the test mod source set only.
    #[serde(default, rename = "dev-dependencies")]
    pub dev_dependencies: BTreeMap<String, Dependency>,

    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryEntry>,

    #[serde(default)]
    pub catalog: Option<CatalogConfig>,

    #[serde(default)]
    pub resources: Option<ResourcesConfig>,

    #[serde(default)]
    pub workspace: Option<WorkspaceConfig>,

    #[serde(default)]
    pub publish: Option<PublishConfig>,
}

/// Mod identity and metadata from the `[mod]` section.
///
/// These fields feed `fabric.mod.json` rendering and publishing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModMetadata {
    pub id: String,
    pub version: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub license: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub entrypoints: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub mixins: Vec<String>,
    #[serde(default)]
    pub contact: BTreeMap<String, String>,
    /// Version predicates keyed by mod id, staged into `depends`.
    #[serde(default)]
    pub depends: BTreeMap<String, String>,
    #[serde(default)]
    pub suggests: BTreeMap<String, String>,
    #[serde(default)]
    pub breaks: BTreeMap<String, String>,
}

/// Which side loads the mod. Serialized exactly as `fabric.mod.json` expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    #[serde(rename = "*")]
    Both,
    #[serde(rename = "client")]
    Client,
    #[serde(rename = "server")]
    Server,
}

impl Default for Environment {
    fn default() -> Self {
        Self::Both
    }
}

/// A Maven repository reference, either a URL string or a detailed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RepositoryEntry {
    Url(String),
    Detailed {
        url: String,
        #[serde(default)]
        auth: Option<String>,
        #[serde(default)]
        username: Option<String>,
        #[serde(default)]
        password: Option<String>,
    },
}

impl RepositoryEntry {
    pub fn url(&self) -> &str {
        match self {
            RepositoryEntry::Url(url) => url,
            RepositoryEntry::Detailed { url, .. } => url,
        }
    }
}

/// Workspace configuration from the `[workspace]` section.
///
/// Members are paths relative to the root and may contain globs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Version catalog configuration from `[catalog]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub versions: BTreeMap<String, String>,
    #[serde(default)]
    pub libraries: BTreeMap<String, CatalogLibrary>,
    #[serde(default)]
    pub bundles: BTreeMap<String, Vec<String>>,
}

/// A library entry in the version catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLibrary {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub version: Option<CatalogVersion>,
}

/// A catalog version: a literal string, or `version.ref = "name"` pointing
/// into `[catalog.versions]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogVersion {
    Literal(String),
    Ref {
        #[serde(rename = "ref")]
        reference: String,
    },
}

/// Resource staging configuration from `[resources]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcesConfig {
    /// Source directory, relative to the module root.
    #[serde(default = "default_resources_dir")]
    pub dir: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Files rendered with `${key}` substitution while staging.
    #[serde(default = "default_template_files")]
    pub template: Vec<String>,
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            dir: default_resources_dir(),
            include: Vec::new(),
            exclude: Vec::new(),
            template: default_template_files(),
        }
    }
}

fn default_resources_dir() -> String {
    "src/main/resources".to_string()
}

fn default_template_files() -> Vec<String> {
    vec!["fabric.mod.json".to_string()]
}

/// Publishing configuration from `[publish]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    /// Maven group the mod artifact is published under.
    pub group: String,
    /// Name of the `[repositories]` entry to upload to.
    #[serde(default)]
    pub repository: Option<String>,
}

impl Manifest {
    /// Load and parse a `Spindle.toml` file from the given path.
    ///
    /// Before parsing, `${env:VAR}` references in the manifest content are
    /// resolved using `.spindle.env` (if present alongside `Spindle.toml`)
    /// and process environment variables.
    pub fn from_path(path: &Path) -> miette::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            spindle_util::errors::SpindleError::Manifest {
                message: format!("Failed to read {}: {e}", path.display()),
            }
        })?;

        let dir = path.parent().unwrap_or(Path::new("."));
        let env_vars =
            crate::properties::load_env_file(&dir.join(".spindle.env")).unwrap_or_default();
        let resolved = crate::properties::interpolate(&content, &env_vars);

        Self::from_str(&resolved)
    }

    /// Parse a `Spindle.toml` from a string (no interpolation).
    pub fn from_str(content: &str) -> miette::Result<Self> {
        toml::from_str(content).map_err(|e| {
            spindle_util::errors::SpindleError::Manifest {
                message: format!("Failed to parse Spindle.toml: {e}"),
            }
            .into()
        })
    }
}
