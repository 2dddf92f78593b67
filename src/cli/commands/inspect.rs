//! Inspect command - show the record embedded in an image config

use crate::cli::args::InspectArgs;
use crate::cli::io::{read_input, render};
use crate::config::Config;
use crate::error::BuildInfoResult;
use crate::record::from_image_config;
use console::style;

/// Execute the inspect command
pub async fn execute(args: InspectArgs, config: &Config) -> BuildInfoResult<()> {
    let dt = read_input(&args.input).await?;

    match from_image_config(&dt)? {
        Some(bi) => println!("{}", render(&bi, config.output.pretty)?),
        None => eprintln!("{}", style("No build info in image config").dim()),
    }
    Ok(())
}
