//! CLI argument definitions for Spindle.
//!
//! Uses `clap` derive macros to define the full command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "spindle",
    version,
    about = "A build companion for Fabric mod projects",
    long_about = "Spindle manages the declarative side of a Fabric mod project: the \
                  Spindle.toml manifest, pinned dependency versions, the artifact \
                  cache, and fabric.mod.json generation. Compiling and packaging the \
                  mod stays with your build tool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new mod project
    New {
        /// Project name
        name: String,
        /// Project template: mod, library
        #[arg(short, long, default_value = "mod")]
        template: String,
    },

    /// Initialize Spindle in an existing directory
    Init {
        /// Project template: mod, library
        #[arg(short, long, default_value = "mod")]
        template: String,
    },

    /// Validate manifests, pins, and resource templates
    Check {
        /// Also probe repositories and Fabric Meta for the pinned versions
        #[arg(long)]
        online: bool,
    },

    /// Render resources into build/resources/main
    Stage,

    /// Regenerate the lockfile
    Lock,

    /// Download locked artifacts into the project cache
    Fetch {
        /// Re-verify checksums of cached artifacts against the lockfile
        #[arg(long)]
        verify: bool,
    },

    /// Add a dependency
    Add {
        /// Dependency coordinate (group:artifact:version)
        dep: String,
        /// Add as dev dependency
        #[arg(long)]
        dev: bool,
        /// Dependency scope: mod, compile, provided, runtime
        #[arg(long)]
        scope: Option<String>,
        /// Manifest key (defaults to the artifact ID)
        #[arg(long)]
        key: Option<String>,
    },

    /// Remove a dependency
    #[command(alias = "rm")]
    Remove {
        /// Dependency name
        dep: String,
        /// Remove from dev dependencies
        #[arg(long)]
        dev: bool,
    },

    /// Show pinned artifacts with newer published versions
    Outdated {
        /// Offer snapshots and pre-releases as update candidates
        #[arg(long)]
        unstable: bool,
    },

    /// Query game and loader versions from Fabric Meta
    Platform {
        #[command(subcommand)]
        action: PlatformAction,
    },

    /// Print effective properties and .spindle.env entries
    Properties {
        /// Show environment values unmasked
        #[arg(long)]
        reveal: bool,
    },

    /// Upload mod artifacts to a Maven repository
    Publish {
        /// Print what would be uploaded without sending anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove build output
    Clean {
        /// Also remove the artifact cache (.spindle/)
        #[arg(long)]
        all: bool,
    },

    /// Manage the artifact cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum PlatformAction {
    /// List published game versions
    Games {
        /// List every version instead of the newest few
        #[arg(long)]
        all: bool,
    },
    /// List loader versions
    Loaders {
        /// Restrict to builds published for one game version
        #[arg(long)]
        game: Option<String>,
        /// List every version instead of the newest few
        #[arg(long)]
        all: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum CacheAction {
    /// Show artifact count and size
    Stats,
    /// Clear the artifact cache
    Clean,
}

pub fn parse() -> Cli {
    Cli::parse()
}
