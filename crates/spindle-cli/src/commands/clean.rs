use miette::Result;

use spindle_ops::ops_clean::{self, CleanResult};
use spindle_util::errors::SpindleError;

pub fn exec(all: bool) -> Result<()> {
    let cwd = std::env::current_dir().map_err(SpindleError::Io)?;

    match ops_clean::clean(&cwd, all)? {
        CleanResult::Cleaned {
            build_dirs,
            cache_cleared,
        } => {
            if build_dirs > 0 {
                println!("Cleaned {} build director{}", build_dirs, plural_y(build_dirs));
            }
            if cache_cleared {
                println!("Removed the artifact cache");
            }
        }
        CleanResult::NothingToClean => println!("Nothing to clean"),
    }

    Ok(())
}

fn plural_y(n: u32) -> &'static str {
    if n == 1 {
        "y"
    } else {
        "ies"
    }
}
