//! Wire encoding of build info records
//!
//! Records travel as JSON; when embedded in other metadata (image configs,
//! input metadata) the JSON is base64 encoded with the standard alphabet.

use super::{BuildInfo, IMAGE_CONFIG_BUILD_INFO};
use crate::error::{BuildInfoError, BuildInfoResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::Deserialize;
use tracing::trace;

/// Decode a base64 encoded build info
pub fn decode(enc: &str) -> BuildInfoResult<BuildInfo> {
    decode_with_context(enc, "build info")
}

/// Encode a build info for embedding
pub fn encode(bi: &BuildInfo) -> BuildInfoResult<String> {
    let json = serde_json::to_vec(bi).map_err(|e| BuildInfoError::json("build info", e))?;
    Ok(STANDARD.encode(json))
}

pub(crate) fn decode_with_context(enc: &str, context: &str) -> BuildInfoResult<BuildInfo> {
    let bytes = STANDARD
        .decode(enc.trim())
        .map_err(|e| BuildInfoError::base64(context, e))?;
    serde_json::from_slice(&bytes).map_err(|e| BuildInfoError::json(context, e))
}

/// Build info formatting options
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOpts {
    /// Drop attributes from the record
    pub remove_attrs: bool,
}

/// Re-render a JSON record for external display
///
/// Empty input is returned unchanged.
pub fn format(dt: &[u8], opts: FormatOpts) -> BuildInfoResult<Vec<u8>> {
    if dt.is_empty() {
        return Ok(dt.to_vec());
    }
    let mut bi: BuildInfo = serde_json::from_slice(dt)
        .map_err(|e| BuildInfoError::json("build info for formatting", e))?;
    if opts.remove_attrs {
        bi = bi.without_attrs();
    }
    serde_json::to_vec(&bi).map_err(|e| BuildInfoError::json("build info for formatting", e))
}

/// Subset of an OCI image config that may carry build info
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageConfig {
    #[serde(rename = "moby.buildkit.buildinfo.v1", default)]
    pub build_info: String,
}

/// Extract the build info embedded in an image config blob
///
/// A missing blob or a config without the build info field yields `None`.
pub fn from_image_config(dt: &[u8]) -> BuildInfoResult<Option<BuildInfo>> {
    if dt.is_empty() {
        return Ok(None);
    }
    let config: ImageConfig =
        serde_json::from_slice(dt).map_err(|e| BuildInfoError::json("image config", e))?;
    if config.build_info.is_empty() {
        trace!("image config has no {} field", IMAGE_CONFIG_BUILD_INFO);
        return Ok(None);
    }
    decode_with_context(&config.build_info, "build info from image config").map(Some)
}
