use serde::{Deserialize, Serialize};

/// Group and artifact of the game itself. The development runtime provides
/// it; it is never probed or fetched from a Maven repository.
pub const MINECRAFT_GROUP: &str = "com.mojang";
pub const MINECRAFT_ARTIFACT: &str = "minecraft";

/// Group and artifact of the Fabric Loader, published on the Fabric repository.
pub const LOADER_GROUP: &str = "net.fabricmc";
pub const LOADER_ARTIFACT: &str = "fabric-loader";

/// A dependency specification in Spindle.toml.
///
/// Supports shorthand (`"group:artifact:version"`), detailed tables, and
/// version catalog references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Dependency {
    Short(String),
    Detailed(DetailedDependency),
    Catalog(CatalogDependency),
}

/// A dependency with explicit group, artifact, version, and optional metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
    #[serde(default)]
    pub optional: bool,
}

/// A reference to a version catalog entry (library or bundle).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDependency {
    pub catalog: String,
    #[serde(default)]
    pub scope: Option<DependencyScope>,
}

/// Dependency scope, mirroring the configurations a Fabric build exposes.
///
/// `Mod` artifacts are mods: the external build tool remaps them and they may
/// appear in `fabric.mod.json`. The remaining scopes follow Maven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyScope {
    Mod,
    Compile,
    Provided,
    Runtime,
}

impl Default for DependencyScope {
    fn default() -> Self {
        Self::Mod
    }
}

impl DependencyScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            DependencyScope::Mod => "mod",
            DependencyScope::Compile => "compile",
            DependencyScope::Provided => "provided",
            DependencyScope::Runtime => "runtime",
        }
    }

    /// Scope name used in generated POMs. `mod` has no Maven equivalent and
    /// maps to `compile`.
    pub fn maven_scope(&self) -> &'static str {
        match self {
            DependencyScope::Mod | DependencyScope::Compile => "compile",
            DependencyScope::Provided => "provided",
            DependencyScope::Runtime => "runtime",
        }
    }
}

impl std::str::FromStr for DependencyScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mod" => Ok(Self::Mod),
            "compile" => Ok(Self::Compile),
            "provided" => Ok(Self::Provided),
            "runtime" => Ok(Self::Runtime),
            other => Err(format!(
                "unknown scope '{other}' (expected mod, compile, provided, or runtime)"
            )),
        }
    }
}

impl std::fmt::Display for DependencyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maven coordinates parsed from a shorthand string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MavenCoordinate {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

impl MavenCoordinate {
    /// Parse `"group:artifact:version"` into coordinates.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        if parts.len() == 3 {
            Some(Self {
                group_id: parts[0].to_string(),
                artifact_id: parts[1].to_string(),
                version: parts[2].to_string(),
            })
        } else {
            None
        }
    }

    /// Parse and validate in one step, with a human-readable error.
    pub fn parse_strict(s: &str) -> Result<Self, String> {
        let coordinate = Self::parse(s)
            .ok_or_else(|| format!("'{s}' is not a group:artifact:version triple"))?;
        coordinate.validate()?;
        Ok(coordinate)
    }

    /// Check well-formedness of already-parsed coordinates.
    ///
    /// Group and artifact segments allow `[A-Za-z0-9._-]`. The version allows
    /// any non-whitespace characters (Fabric artifacts carry `+` build
    /// metadata) but must not hold an unresolved `${...}` reference.
    pub fn validate(&self) -> Result<(), String> {
        segment_well_formed("group", &self.group_id)?;
        segment_well_formed("artifact", &self.artifact_id)?;
        if self.version.is_empty() {
            return Err(format!("'{self}' has an empty version"));
        }
        if self.version.chars().any(char::is_whitespace) {
            return Err(format!("version '{}' contains whitespace", self.version));
        }
        if self.version.contains("${") {
            return Err(format!(
                "version '{}' holds an unresolved property reference",
                self.version
            ));
        }
        Ok(())
    }

    /// True for the game artifact, which the development runtime provides.
    pub fn is_game(&self) -> bool {
        self.group_id == MINECRAFT_GROUP && self.artifact_id == MINECRAFT_ARTIFACT
    }
}

fn segment_well_formed(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} segment is empty"));
    }
    if let Some(bad) = value
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && !matches!(c, '.' | '_' | '-'))
    {
        return Err(format!("{kind} '{value}' contains invalid character '{bad}'"));
    }
    Ok(())
}

impl std::fmt::Display for MavenCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group_id, self.artifact_id, self.version)
    }
}
