//! Maven repository protocol: artifact download, checksum verification,
//! version metadata, local cache, authentication, and publishing, plus the
//! Fabric Meta API client for game and loader version listings.

pub mod auth;
pub mod cache;
pub mod checksum;
pub mod download;
pub mod fabric_meta;
pub mod metadata;
pub mod publish;
pub mod repository;
pub mod version;
