//! Check command implementation.

use console::Style;
use miette::Result;

use spindle_ops::ops_check::{self, CheckOptions};
use spindle_util::errors::SpindleError;
use spindle_util::progress::status;

pub async fn exec(online: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;
    let report = ops_check::check(&cwd, &CheckOptions { online }).await?;

    let yellow = Style::new().yellow().bold();
    for warning in &report.warnings {
        eprintln!("{}: {warning}", yellow.apply_to("warning"));
    }

    if report.is_clean() {
        let mode = if online { "online" } else { "offline" };
        status(
            "Finished",
            &format!("{mode} check, {} warning(s)", report.warnings.len()),
        );
        return Ok(());
    }

    let red = Style::new().red().bold();
    for error in &report.errors {
        eprintln!("{}: {error}", red.apply_to("error"));
    }
    Err(SpindleError::Generic {
        message: format!("check failed with {} error(s)", report.errors.len()),
    }
    .into())
}
