//! Command dispatch and handler modules.

mod add;
mod cache;
mod check;
mod clean;
mod fetch;
mod init;
mod lock;
mod new;
mod outdated;
mod platform;
mod properties;
mod publish;
mod remove;
mod stage;

use miette::Result;

use crate::cli::{Cli, Command};

/// Route a parsed CLI invocation to the appropriate command handler.
pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::New { name, template } => new::exec(&name, &template),
        Command::Init { template } => init::exec(&template),
        Command::Check { online } => check::exec(online).await,
        Command::Stage => stage::exec(),
        Command::Lock => lock::exec().await,
        Command::Fetch { verify } => fetch::exec(cli.verbose, verify).await,
        Command::Add {
            dep,
            dev,
            scope,
            key,
        } => add::exec(&dep, dev, scope.as_deref(), key),
        Command::Remove { dep, dev } => remove::exec(&dep, dev),
        Command::Outdated { unstable } => outdated::exec(unstable).await,
        Command::Platform { action } => platform::exec(action).await,
        Command::Properties { reveal } => properties::exec(reveal),
        Command::Publish { dry_run } => publish::exec(dry_run).await,
        Command::Clean { all } => clean::exec(all),
        Command::Cache { action } => cache::exec(action),
    }
}
