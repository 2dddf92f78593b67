//! Format command - re-render a record for display

use crate::cli::args::FormatArgs;
use crate::cli::io::{read_input, render_record};
use crate::config::Config;
use crate::error::BuildInfoResult;
use crate::record::{self, FormatOpts};

/// Execute the format command
pub async fn execute(args: FormatArgs, config: &Config) -> BuildInfoResult<()> {
    let dt = read_input(&args.input).await?;
    let opts = FormatOpts {
        remove_attrs: args.remove_attrs || config.output.remove_attrs,
    };

    let formatted = record::format(&dt, opts)?;
    if formatted.is_empty() {
        return Ok(());
    }
    println!("{}", render_record(&formatted, config.output.pretty)?);
    Ok(())
}
