//! Publish command implementation.

use miette::Result;

use spindle_ops::ops_publish::{self, PublishOptions};
use spindle_util::errors::SpindleError;

pub async fn exec(dry_run: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    ops_publish::publish(&cwd, &PublishOptions { dry_run }).await
}
