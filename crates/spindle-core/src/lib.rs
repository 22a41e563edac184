//! Core data types for the Spindle build companion.
//!
//! This crate defines the fundamental types that represent a Fabric mod
//! project: manifest parsing, modules, workspaces, dependency coordinates,
//! version properties, version catalogs, mod metadata rendering, lockfiles,
//! scaffolding templates, and global configuration.
//!
//! This crate is intentionally free of async code and network I/O.

/// Default Minecraft version used when scaffolding new projects.
pub const DEFAULT_MINECRAFT_VERSION: &str = "1.21.4";

/// Default Fabric Loader version used when scaffolding new projects.
pub const DEFAULT_LOADER_VERSION: &str = "0.16.9";

pub mod catalog;
pub mod config;
pub mod dependency;
pub mod lockfile;
pub mod manifest;
pub mod modmeta;
pub mod module;
pub mod properties;
pub mod resolve;
pub mod template;
pub mod workspace;
