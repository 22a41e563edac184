//! Operation: list game and loader versions from Fabric Meta.

use spindle_maven::download;
use spindle_maven::fabric_meta::FabricMeta;

/// How many rows to print before suggesting `--all`.
const DEFAULT_LIMIT: usize = 15;

/// List published game versions, newest first.
pub async fn games(all: bool) -> miette::Result<()> {
    let client = download::build_client()?;
    let meta = FabricMeta::new(client);

    let sp = spindle_util::progress::spinner("Fetching game versions...");
    let versions = meta.game_versions().await?;
    sp.finish_and_clear();

    let total = versions.len();
    let shown = if all { total } else { total.min(DEFAULT_LIMIT) };

    println!("{:<16} Stable", "Version");
    println!("{}", "-".repeat(24));
    for game in versions.iter().take(shown) {
        println!("{:<16} {}", game.version, if game.stable { "yes" } else { "no" });
    }
    if shown < total {
        println!("... and {} more (use --all to list every version)", total - shown);
    }

    Ok(())
}

/// List loader versions, optionally restricted to one game version.
pub async fn loaders(game: Option<&str>, all: bool) -> miette::Result<()> {
    let client = download::build_client()?;
    let meta = FabricMeta::new(client);

    let sp = spindle_util::progress::spinner("Fetching loader versions...");
    let versions = match game {
        Some(game) => meta.loaders_for_game(game).await?,
        None => meta.loader_versions().await?,
    };
    sp.finish_and_clear();

    if versions.is_empty() {
        if let Some(game) = game {
            return Err(spindle_util::errors::SpindleError::Platform {
                message: format!("no loader versions published for minecraft {game}"),
            }
            .into());
        }
    }

    let total = versions.len();
    let shown = if all { total } else { total.min(DEFAULT_LIMIT) };

    println!("{:<12} {:<8} Stable", "Version", "Build");
    println!("{}", "-".repeat(28));
    for loader in versions.iter().take(shown) {
        println!(
            "{:<12} {:<8} {}",
            loader.version,
            loader.build,
            if loader.stable { "yes" } else { "no" }
        );
    }
    if shown < total {
        println!("... and {} more (use --all to list every version)", total - shown);
    }

    Ok(())
}
