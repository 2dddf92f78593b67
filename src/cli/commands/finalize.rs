//! Finalize command - merge resolved build sources into a record

use crate::cli::args::FinalizeArgs;
use crate::cli::io::{load_metadata, load_string_map, render_record};
use crate::config::Config;
use crate::error::BuildInfoResult;
use crate::metadata::encode_metadata;

/// Execute the finalize command
pub async fn execute(args: FinalizeArgs, config: &Config) -> BuildInfoResult<()> {
    let metadata = load_metadata(args.metadata.as_deref()).await?;
    let build_sources = load_string_map(&args.sources).await?;

    let dt = encode_metadata(&metadata, &args.key, &build_sources)?;
    println!("{}", render_record(&dt, config.output.pretty)?);
    Ok(())
}
