//! Artifact checksum verification against repository sidecar files.

use reqwest::Client;

use spindle_util::hash;

use crate::download;
use crate::repository::MavenRepository;

/// Verify downloaded data against the repository's checksum sidecars.
///
/// Tries `.sha256` first, falls back to `.sha1`, then `.md5`. Logs a warning
/// when the repository publishes no sidecar at all.
pub async fn verify(
    client: &Client,
    repo: &MavenRepository,
    file_url: &str,
    data: &[u8],
) -> miette::Result<()> {
    let sha256_url = format!("{file_url}.sha256");
    if let Some(expected) = download::download_text(client, repo, &sha256_url).await? {
        let expected = extract_hash(&expected);
        return check(&hash::sha256_bytes(data), &expected, "SHA-256", file_url);
    }

    let sha1_url = format!("{file_url}.sha1");
    if let Some(expected) = download::download_text(client, repo, &sha1_url).await? {
        let expected = extract_hash(&expected);
        return check(&hash::sha1_bytes(data), &expected, "SHA-1", file_url);
    }

    let md5_url = format!("{file_url}.md5");
    if let Some(expected) = download::download_text(client, repo, &md5_url).await? {
        let expected = extract_hash(&expected);
        return check(&hash::md5_bytes(data), &expected, "MD5", file_url);
    }

    tracing::warn!("No checksum sidecar found for {file_url}");
    Ok(())
}

fn check(actual: &str, expected: &str, algo: &str, url: &str) -> miette::Result<()> {
    if actual.eq_ignore_ascii_case(expected) {
        tracing::debug!("{algo} ok for {url}");
        Ok(())
    } else {
        Err(spindle_util::errors::SpindleError::Network {
            message: format!("{algo} mismatch for {url}: expected {expected}, got {actual}"),
        }
        .into())
    }
}

/// Extract the hex hash from a checksum file.
///
/// Maven checksum files may contain just the hash, or `hash  filename`.
fn extract_hash(content: &str) -> String {
    content.split_whitespace().next().unwrap_or("").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_hash_simple() {
        assert_eq!(extract_hash("abc123\n"), "abc123");
    }

    #[test]
    fn extract_hash_with_filename() {
        assert_eq!(extract_hash("abc123  fabric-loader-0.16.9.jar\n"), "abc123");
    }

    #[test]
    fn extract_hash_empty() {
        assert_eq!(extract_hash("  \n"), "");
    }

    #[test]
    fn check_is_case_insensitive() {
        assert!(check("ABC123", "abc123", "SHA-256", "url").is_ok());
    }

    #[test]
    fn check_rejects_mismatch() {
        assert!(check("abc", "def", "SHA-1", "url").is_err());
    }
}
