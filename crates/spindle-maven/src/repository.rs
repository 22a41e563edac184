//! Maven repository abstraction: URL layout, well-known repositories,
//! credentials.

use spindle_core::config::CredentialEntry;
use spindle_core::manifest::RepositoryEntry;

/// Maven Central base URL.
pub const MAVEN_CENTRAL_URL: &str = "https://repo.maven.apache.org/maven2";

/// The Fabric project's repository (loader, API, loom artifacts).
pub const FABRIC_MAVEN_URL: &str = "https://maven.fabricmc.net";

/// Mojang's library repository. The game jar itself is not published here;
/// this serves the game's own library dependencies.
pub const MOJANG_LIBRARIES_URL: &str = "https://libraries.minecraft.net";

/// A configured Maven repository with optional credentials.
#[derive(Debug, Clone)]
pub struct MavenRepository {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Bearer token, preferred over basic auth when set.
    pub token: Option<String>,
}

impl MavenRepository {
    /// Build a `MavenRepository` from a name and a manifest `RepositoryEntry`.
    pub fn from_entry(name: &str, entry: &RepositoryEntry) -> Self {
        match entry {
            RepositoryEntry::Url(url) => Self {
                name: name.to_string(),
                url: url.trim_end_matches('/').to_string(),
                username: None,
                password: None,
                token: None,
            },
            RepositoryEntry::Detailed {
                url,
                username,
                password,
                ..
            } => Self {
                name: name.to_string(),
                url: url.trim_end_matches('/').to_string(),
                username: username.clone().filter(|s| !s.is_empty()),
                password: password.clone().filter(|s| !s.is_empty()),
                token: None,
            },
        }
    }

    /// Build a repository from a bare URL (global config entries).
    pub fn from_url(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.trim_end_matches('/').to_string(),
            username: None,
            password: None,
            token: None,
        }
    }

    /// Fill in credentials from the global config where the manifest left
    /// them unset.
    pub fn with_credentials(mut self, creds: &CredentialEntry) -> Self {
        if self.token.is_none() {
            self.token = creds.token.clone();
        }
        if self.username.is_none() {
            self.username = creds.username.clone();
        }
        if self.password.is_none() {
            self.password = creds.password.clone();
        }
        self
    }

    /// Construct the default Maven Central repository.
    pub fn maven_central() -> Self {
        Self::from_url("maven-central", MAVEN_CENTRAL_URL)
    }

    /// Construct the Fabric repository.
    pub fn fabric() -> Self {
        Self::from_url("fabric", FABRIC_MAVEN_URL)
    }

    /// Construct Mojang's library repository.
    pub fn mojang_libraries() -> Self {
        Self::from_url("mojang-libraries", MOJANG_LIBRARIES_URL)
    }

    /// Standard Maven layout path for a given coordinate.
    ///
    /// `net.fabricmc:fabric-loader:0.16.9` becomes
    /// `net/fabricmc/fabric-loader/0.16.9`
    pub fn coordinate_path(group: &str, artifact: &str, version: &str) -> String {
        format!("{}/{}/{}", group.replace('.', "/"), artifact, version)
    }

    /// Full URL to a specific file within the Maven repository.
    pub fn file_url(&self, group: &str, artifact: &str, version: &str, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            self.url,
            Self::coordinate_path(group, artifact, version),
            filename
        )
    }

    /// URL to the POM file for a given coordinate.
    pub fn pom_url(&self, group: &str, artifact: &str, version: &str) -> String {
        let filename = format!("{artifact}-{version}.pom");
        self.file_url(group, artifact, version, &filename)
    }

    /// URL to the JAR file for a given coordinate.
    pub fn jar_url(
        &self,
        group: &str,
        artifact: &str,
        version: &str,
        classifier: Option<&str>,
    ) -> String {
        let filename = match classifier {
            Some(c) => format!("{artifact}-{version}-{c}.jar"),
            None => format!("{artifact}-{version}.jar"),
        };
        self.file_url(group, artifact, version, &filename)
    }

    /// URL to the `maven-metadata.xml` at the artifact level (version listing).
    pub fn metadata_url(&self, group: &str, artifact: &str) -> String {
        format!(
            "{}/{}/{}/maven-metadata.xml",
            self.url,
            group.replace('.', "/"),
            artifact
        )
    }

    /// Whether this repository has authentication configured.
    pub fn has_auth(&self) -> bool {
        self.username.is_some() || self.password.is_some() || self.token.is_some()
    }
}
