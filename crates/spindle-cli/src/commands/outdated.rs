//! Outdated command implementation.

use miette::Result;

use spindle_ops::ops_outdated::{self, OutdatedOptions};
use spindle_util::errors::SpindleError;

pub async fn exec(unstable: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    ops_outdated::outdated(&cwd, &OutdatedOptions { unstable }).await
}
