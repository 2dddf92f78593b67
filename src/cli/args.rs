//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// buildinfo - build provenance records
///
/// Accumulates request attributes, merges resolved sources and recovers
/// nested dependency provenance for multi-platform builds.
#[derive(Parser, Debug)]
#[command(name = "buildinfo")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "BUILDINFO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print records on a single line
    #[arg(long, global = true)]
    pub compact: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update a record from frontend request attributes
    Accumulate(AccumulateArgs),

    /// Finalize a record with the sources resolved by the solver
    Finalize(FinalizeArgs),

    /// Re-render a record for display
    Format(FormatArgs),

    /// Show the record embedded in an image config
    Inspect(InspectArgs),

    /// Decode a base64 embedded record
    Decode(DecodeArgs),

    /// Encode a record for embedding
    Encode(EncodeArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the accumulate command
#[derive(Parser, Debug)]
pub struct AccumulateArgs {
    /// Exporter metadata file (JSON object of metadata key to record)
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Metadata key, optionally with a platform (base/os/arch)
    #[arg(short, long)]
    pub key: String,

    /// Frontend that handled the request
    #[arg(short, long, default_value = "")]
    pub frontend: String,

    /// Request attribute (KEY=VALUE)
    #[arg(short, long, value_parser = parse_key_val)]
    pub attr: Vec<(String, String)>,

    /// JSON object of request attributes
    #[arg(long)]
    pub attrs_file: Option<PathBuf>,
}

/// Arguments for the finalize command
#[derive(Parser, Debug)]
pub struct FinalizeArgs {
    /// Exporter metadata file (JSON object of metadata key to record)
    #[arg(short, long)]
    pub metadata: Option<PathBuf>,

    /// Metadata key, optionally with a platform (base/os/arch)
    #[arg(short, long)]
    pub key: String,

    /// JSON object of build source identifier to pin
    #[arg(short, long)]
    pub sources: PathBuf,
}

/// Arguments for the format command
#[derive(Parser, Debug)]
pub struct FormatArgs {
    /// Record file, or - for stdin
    #[arg(default_value = "-")]
    pub input: String,

    /// Strip attributes from the record
    #[arg(long)]
    pub remove_attrs: bool,
}

/// Arguments for the inspect command
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Image config file, or - for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

/// Arguments for the decode command
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// Base64 encoded record, or - for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

/// Arguments for the encode command
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// Record file, or - for stdin
    #[arg(default_value = "-")]
    pub input: String,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., output.pretty)
        key: String,
        /// Value to set
        value: String,
    },
}

/// Parse a KEY=VALUE pair; the value may itself contain '='
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE format: no '=' found in '{s}'"))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
