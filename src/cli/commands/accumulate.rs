//! Accumulate command - create or update a record from request attributes

use crate::cli::args::AccumulateArgs;
use crate::cli::io::{load_metadata, load_string_map, render_record};
use crate::config::Config;
use crate::error::BuildInfoResult;
use crate::metadata::get_metadata;
use std::collections::BTreeMap;
use tracing::debug;

/// Execute the accumulate command
pub async fn execute(args: AccumulateArgs, config: &Config) -> BuildInfoResult<()> {
    let metadata = load_metadata(args.metadata.as_deref()).await?;

    // --attr flags win over the attributes file
    let mut req_attrs = match args.attrs_file {
        Some(ref path) => load_string_map(path).await?,
        None => BTreeMap::new(),
    };
    req_attrs.extend(args.attr);
    debug!("Accumulating {} request attributes", req_attrs.len());

    let dt = get_metadata(&metadata, &args.key, &args.frontend, &req_attrs)?;
    println!("{}", render_record(&dt, config.output.pretty)?);
    Ok(())
}
