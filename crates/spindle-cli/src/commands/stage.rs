//! Stage command implementation.

use miette::Result;

use spindle_util::errors::SpindleError;

pub fn exec() -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    spindle_ops::ops_stage::stage(&cwd)
}
