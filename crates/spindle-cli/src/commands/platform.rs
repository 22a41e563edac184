//! Platform command implementation.

use miette::Result;

use crate::cli::PlatformAction;

pub async fn exec(action: PlatformAction) -> Result<()> {
    match action {
        PlatformAction::Games { all } => spindle_ops::ops_platform::games(all).await,
        PlatformAction::Loaders { game, all } => {
            spindle_ops::ops_platform::loaders(game.as_deref(), all).await
        }
    }
}
