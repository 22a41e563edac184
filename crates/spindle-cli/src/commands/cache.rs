//! Cache command implementation.

use miette::Result;

use spindle_util::errors::SpindleError;

use crate::cli::CacheAction;

pub fn exec(action: CacheAction) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    match action {
        CacheAction::Stats => spindle_ops::ops_cache::stats(&cwd),
        CacheAction::Clean => spindle_ops::ops_cache::clean(&cwd),
    }
}
