//! Decode and encode commands - convert between JSON and embedded records

use crate::cli::args::{DecodeArgs, EncodeArgs};
use crate::cli::io::{read_input, render};
use crate::config::Config;
use crate::error::{BuildInfoError, BuildInfoResult};
use crate::record::{self, BuildInfo};

/// Execute the decode command
pub async fn decode(args: DecodeArgs, config: &Config) -> BuildInfoResult<()> {
    let enc = if args.input == "-" {
        let dt = read_input("-").await?;
        String::from_utf8_lossy(&dt).into_owned()
    } else {
        args.input
    };

    let bi = record::decode(&enc)?;
    println!("{}", render(&bi, config.output.pretty)?);
    Ok(())
}

/// Execute the encode command
pub async fn encode(args: EncodeArgs, _config: &Config) -> BuildInfoResult<()> {
    let dt = read_input(&args.input).await?;
    let bi: BuildInfo =
        serde_json::from_slice(&dt).map_err(|e| BuildInfoError::json("build info", e))?;

    println!("{}", record::encode(&bi)?);
    Ok(())
}
