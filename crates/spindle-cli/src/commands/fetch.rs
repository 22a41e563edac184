//! Handler for `spindle fetch`.

use miette::Result;

use spindle_util::errors::SpindleError;

pub async fn exec(verbose: bool, verify: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;

    if verify {
        return spindle_ops::ops_fetch::verify_checksums(&cwd);
    }

    spindle_ops::ops_fetch::fetch(&cwd, verbose).await
}
