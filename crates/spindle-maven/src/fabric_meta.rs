//! Client for the Fabric Meta service (`meta.fabricmc.net/v2`).
//!
//! Fabric Meta is the authoritative listing of published game versions,
//! loader versions, and which loader builds support which game version.
//! `outdated`, `platform`, and online `check` all go through this client.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use spindle_util::errors::SpindleError;

/// Fabric Meta API base URL.
pub const FABRIC_META_URL: &str = "https://meta.fabricmc.net/v2";

/// A game version entry from `/versions/game`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameVersion {
    pub version: String,
    pub stable: bool,
}

/// A loader version entry from `/versions/loader`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderVersion {
    pub version: String,
    pub maven: String,
    pub build: u32,
    pub stable: bool,
}

/// One entry from `/versions/loader/{game}`: a loader build paired with the
/// intermediary mappings for that game version.
#[derive(Debug, Clone, Deserialize)]
pub struct LoaderForGame {
    pub loader: LoaderVersion,
}

/// Fabric Meta HTTP client.
#[derive(Debug, Clone)]
pub struct FabricMeta {
    client: Client,
    base: String,
}

impl FabricMeta {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base: FABRIC_META_URL.to_string(),
        }
    }

    /// Every published game version, newest first.
    pub async fn game_versions(&self) -> miette::Result<Vec<GameVersion>> {
        self.get_json("versions/game").await
    }

    /// Every published loader version, newest first.
    pub async fn loader_versions(&self) -> miette::Result<Vec<LoaderVersion>> {
        self.get_json("versions/loader").await
    }

    /// Loader builds available for a specific game version, newest first.
    pub async fn loaders_for_game(&self, game: &str) -> miette::Result<Vec<LoaderVersion>> {
        let entries: Vec<LoaderForGame> = self.get_json(&format!("versions/loader/{game}")).await?;
        Ok(entries.into_iter().map(|e| e.loader).collect())
    }

    /// The newest game version Mojang marked stable.
    pub async fn latest_stable_game(&self) -> miette::Result<Option<String>> {
        let versions = self.game_versions().await?;
        Ok(versions.into_iter().find(|v| v.stable).map(|v| v.version))
    }

    /// The newest loader version marked stable.
    pub async fn latest_stable_loader(&self) -> miette::Result<Option<String>> {
        let versions = self.loader_versions().await?;
        Ok(versions.into_iter().find(|v| v.stable).map(|v| v.version))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> miette::Result<T> {
        let url = format!("{}/{path}", self.base);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SpindleError::Platform {
                message: format!("Request to {url} failed: {e}"),
            })?;

        if !resp.status().is_success() {
            return Err(SpindleError::Platform {
                message: format!("HTTP {} from {url}", resp.status()),
            }
            .into());
        }

        resp.json::<T>().await.map_err(|e| {
            SpindleError::Platform {
                message: format!("Unexpected response from {url}: {e}"),
            }
            .into()
        })
    }
}
