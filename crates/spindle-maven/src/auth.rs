//! Repository authentication using credentials from `Spindle.toml` and the
//! global config.
//!
//! Project manifests carry credentials via `${env:SECRET}` interpolation from
//! `.spindle.env`:
//!
//! ```toml
//! [repositories]
//! company = { url = "https://nexus.co/maven", username = "${env:NEXUS_USER}", password = "${env:NEXUS_PASS}" }
//! ```
//!
//! By the time the manifest is loaded, `${env:...}` values are already
//! interpolated, so this module just reads the resolved credentials. Tokens
//! come from `[credentials]` in `~/.spindle/config.toml`.

use reqwest::RequestBuilder;

use crate::repository::MavenRepository;

/// Apply authentication to a request if the repository has credentials.
pub fn apply_auth(request: RequestBuilder, repo: &MavenRepository) -> RequestBuilder {
    if let Some(token) = &repo.token {
        return request.bearer_auth(token);
    }
    match (&repo.username, &repo.password) {
        (Some(user), pass) => request.basic_auth(user, pass.as_deref()),
        (None, _) => request,
    }
}
