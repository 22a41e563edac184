//! Publishing mod artifacts to Maven repositories.
//!
//! Uploads are plain HTTP PUTs in standard Maven layout: the jar, a generated
//! POM, and `.md5`/`.sha1`/`.sha256` sidecars for each file.

use reqwest::Client;

use spindle_util::errors::SpindleError;
use spindle_util::hash;

use crate::auth;
use crate::repository::MavenRepository;

/// A dependency row in a generated POM.
#[derive(Debug, Clone)]
pub struct PomDependency {
    pub group: String,
    pub artifact: String,
    pub version: String,
    /// Maven scope (`compile`, `provided`, `runtime`).
    pub scope: String,
}

/// Render a minimal publishable POM for a mod artifact.
pub fn generate_pom(
    group: &str,
    artifact: &str,
    version: &str,
    name: Option<&str>,
    description: Option<&str>,
    license: Option<&str>,
    dependencies: &[PomDependency],
) -> String {
    let mut pom = String::new();
    pom.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    pom.push_str(
        "<project xmlns=\"http://maven.apache.org/POM/4.0.0\"\n         \
         xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\"\n         \
         xsi:schemaLocation=\"http://maven.apache.org/POM/4.0.0 http://maven.apache.org/xsd/maven-4.0.0.xsd\">\n",
    );
    pom.push_str("  <modelVersion>4.0.0</modelVersion>\n");
    pom.push_str(&format!("  <groupId>{}</groupId>\n", xml_escape(group)));
    pom.push_str(&format!("  <artifactId>{}</artifactId>\n", xml_escape(artifact)));
    pom.push_str(&format!("  <version>{}</version>\n", xml_escape(version)));

    if let Some(name) = name {
        pom.push_str(&format!("  <name>{}</name>\n", xml_escape(name)));
    }
    if let Some(description) = description {
        pom.push_str(&format!(
            "  <description>{}</description>\n",
            xml_escape(description)
        ));
    }
    if let Some(license) = license {
        pom.push_str("  <licenses>\n    <license>\n");
        pom.push_str(&format!("      <name>{}</name>\n", xml_escape(license)));
        pom.push_str("    </license>\n  </licenses>\n");
    }

    if !dependencies.is_empty() {
        pom.push_str("  <dependencies>\n");
        for dep in dependencies {
            pom.push_str("    <dependency>\n");
            pom.push_str(&format!("      <groupId>{}</groupId>\n", xml_escape(&dep.group)));
            pom.push_str(&format!(
                "      <artifactId>{}</artifactId>\n",
                xml_escape(&dep.artifact)
            ));
            pom.push_str(&format!(
                "      <version>{}</version>\n",
                xml_escape(&dep.version)
            ));
            pom.push_str(&format!("      <scope>{}</scope>\n", xml_escape(&dep.scope)));
            pom.push_str("    </dependency>\n");
        }
        pom.push_str("  </dependencies>\n");
    }

    pom.push_str("</project>\n");
    pom
}

fn xml_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// PUT one file to the repository.
pub async fn upload_file(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
    data: Vec<u8>,
) -> miette::Result<()> {
    let mut req = client.put(url).body(data);
    req = auth::apply_auth(req, repo);

    let resp = req.send().await.map_err(|e| SpindleError::Network {
        message: format!("Upload to {url} failed: {e}"),
    })?;

    let status = resp.status();
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        return Err(SpindleError::Network {
            message: format!("HTTP {status} uploading {url}: check your repository credentials"),
        }
        .into());
    }
    if !status.is_success() {
        return Err(SpindleError::Network {
            message: format!("HTTP {status} uploading {url}"),
        }
        .into());
    }

    tracing::debug!("uploaded {url}");
    Ok(())
}

/// PUT a file plus its `.md5`, `.sha1`, and `.sha256` sidecars.
pub async fn upload_with_checksums(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
    data: &[u8],
) -> miette::Result<()> {
    upload_file(client, repo, url, data.to_vec()).await?;

    let md5 = hash::md5_bytes(data);
    upload_file(client, repo, &format!("{url}.md5"), md5.into_bytes()).await?;

    let sha1 = hash::sha1_bytes(data);
    upload_file(client, repo, &format!("{url}.sha1"), sha1.into_bytes()).await?;

    let sha256 = hash::sha256_bytes(data);
    upload_file(client, repo, &format!("{url}.sha256"), sha256.into_bytes()).await?;

    Ok(())
}
