//! Dependency decoding
//!
//! Named input contexts reach the frontend as `input-metadata:<name>`
//! attributes holding the JSON exporter response of the build that produced
//! them. When that response carries build info, it becomes a dependency of
//! the current record.

use crate::error::{BuildInfoError, BuildInfoResult};
use crate::key::MetadataKey;
use crate::record::codec::decode_with_context;
use crate::record::{Attrs, BuildInfo, EXPORTER_BUILD_INFO};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

const INPUT_METADATA_PREFIX: &str = "input-metadata:";

/// Decode the build info of input contexts found in `attrs`.
///
/// Entries for other platforms than the one in `key` and inputs without
/// build info are skipped. An empty map means no dependencies.
pub fn decode_deps(key: &str, attrs: &Attrs) -> BuildInfoResult<BTreeMap<String, BuildInfo>> {
    let suffix = MetadataKey::parse(key).platform_suffix();

    let mut deps = BTreeMap::new();
    for (k, v) in attrs {
        let (Some(name), Some(value)) = (k.strip_prefix(INPUT_METADATA_PREFIX), v) else {
            continue;
        };

        let name = match suffix.as_deref() {
            Some(suffix) => match name.strip_suffix(suffix) {
                Some(name) => name,
                None => {
                    trace!("skipping {} for another platform", k);
                    continue;
                }
            },
            None => name,
        };

        let response: HashMap<String, String> = serde_json::from_str(value)
            .map_err(|e| BuildInfoError::json("input-metadata", e))?;

        let Some(enc) = response.get(EXPORTER_BUILD_INFO) else {
            trace!("input {} has no build info", name);
            continue;
        };

        let bi = decode_with_context(enc, "build info from input-metadata")?;
        deps.insert(name.to_string(), bi);
    }

    debug!("Decoded {} dependencies for {}", deps.len(), key);
    Ok(deps)
}
