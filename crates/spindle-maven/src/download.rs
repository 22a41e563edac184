//! Artifact downloading from Maven repositories.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};

use crate::auth;
use crate::repository::MavenRepository;
use spindle_util::errors::SpindleError;

const MAX_RETRIES: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(2);
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

fn network(message: String) -> SpindleError {
    SpindleError::Network { message }
}

/// Build a shared reqwest client for Maven downloads.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .user_agent("spindle/0.1")
        .build()
        .map_err(|e| network(format!("Failed to create HTTP client: {e}")).into())
}

enum GetOutcome {
    Success(Response),
    NotFound,
    Retryable(String),
}

/// One authenticated GET. 404 and retry-worthy failures (timeouts, refused
/// connections, 5xx) are data, not errors; everything else is fatal.
async fn send_get(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<GetOutcome> {
    let req = auth::apply_auth(client.get(url), repo);
    match req.send().await {
        Ok(resp) => {
            let status = resp.status();
            if status == StatusCode::NOT_FOUND {
                return Ok(GetOutcome::NotFound);
            }
            if status.is_server_error() {
                return Ok(GetOutcome::Retryable(format!("HTTP {status} from {url}")));
            }
            if !status.is_success() {
                return Err(network(format!("HTTP {status} fetching {url}")).into());
            }
            Ok(GetOutcome::Success(resp))
        }
        Err(e) if e.is_timeout() || e.is_connect() => Ok(GetOutcome::Retryable(e.to_string())),
        Err(e) => Err(network(format!("Request to {url} failed: {e}")).into()),
    }
}

async fn fetch_with_retries(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
    bar_label: Option<&str>,
) -> miette::Result<Option<Vec<u8>>> {
    let mut last_err = String::new();

    for attempt in 0..MAX_RETRIES {
        if attempt > 0 {
            tokio::time::sleep(RETRY_DELAY * attempt).await;
        }

        match send_get(client, repo, url).await? {
            GetOutcome::Success(resp) => {
                let pb = bar_label.and_then(|label| {
                    let total = resp.content_length().unwrap_or(0);
                    (total > 100_000).then(|| spindle_util::progress::download_bar(total, label))
                });
                let bytes = resp
                    .bytes()
                    .await
                    .map_err(|e| network(format!("Failed to read response from {url}: {e}")))?;
                if let Some(pb) = pb {
                    pb.set_position(bytes.len() as u64);
                    pb.finish_and_clear();
                }
                return Ok(Some(bytes.to_vec()));
            }
            GetOutcome::NotFound => return Ok(None),
            GetOutcome::Retryable(e) => last_err = e,
        }
    }

    Err(network(format!("Failed after {MAX_RETRIES} retries for {url}: {last_err}")).into())
}

/// Download raw bytes from a URL, with authentication and retries.
///
/// Returns `Ok(None)` for 404 (artifact not present in this repository),
/// `Ok(Some(bytes))` on success, or an error after exhausting retries.
pub async fn download_bytes(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<Vec<u8>>> {
    fetch_with_retries(client, repo, url, None).await
}

/// Download an artifact (JAR, POM), showing a byte progress bar for bodies
/// over 100 KB.
pub async fn download_artifact(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
    label: &str,
) -> miette::Result<Option<Vec<u8>>> {
    fetch_with_retries(client, repo, url, Some(label)).await
}

/// Download a text file (POM, metadata, checksum sidecar).
pub async fn download_text(
    client: &Client,
    repo: &MavenRepository,
    url: &str,
) -> miette::Result<Option<String>> {
    match download_bytes(client, repo, url).await? {
        Some(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).to_string())),
        None => Ok(None),
    }
}
