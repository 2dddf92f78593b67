//! Metadata accumulation
//!
//! A build records one build info per metadata key. The record is created
//! from the request attributes when the frontend is invoked, updated by
//! later requests for the same key, and finalized with the sources the
//! solver resolved. Every step decodes the stored JSON, recomputes the
//! derived fields and returns the re-encoded record; the caller stores it.

use crate::attrs::filter_attrs;
use crate::deps::decode_deps;
use crate::error::{BuildInfoError, BuildInfoResult};
use crate::record::{Attrs, BuildInfo};
use crate::source::merge_sources;
use std::collections::BTreeMap;
use tracing::debug;

/// Exporter metadata: metadata key to JSON encoded record
pub type Metadata = BTreeMap<String, Vec<u8>>;

/// Create or update the record for `key` from a frontend request.
///
/// With an existing record, a non-empty `frontend` replaces the stored one,
/// request attributes are layered over the stored ones and newly decoded
/// dependencies replace stored dependencies of the same name.
pub fn accumulate_request(
    existing: Option<&[u8]>,
    key: &str,
    frontend: &str,
    req_attrs: &BTreeMap<String, String>,
) -> BuildInfoResult<Vec<u8>> {
    let bi = match existing {
        Some(dt) => {
            let mut bi = decode_record(dt, key)?;
            if !frontend.is_empty() {
                bi.frontend = frontend.to_string();
            }
            let attrs = layer_attrs(req_attrs, &bi.attrs);
            let deps = decode_deps(key, &attrs)?;
            bi.deps.extend(deps);
            bi.attrs = filter_attrs(key, &attrs);
            bi
        }
        None => {
            let attrs = to_attrs(req_attrs);
            BuildInfo {
                frontend: frontend.to_string(),
                attrs: filter_attrs(key, &attrs),
                sources: Vec::new(),
                deps: decode_deps(key, &attrs)?,
            }
        }
    };

    debug!(
        "Accumulated build info for {}: {} attrs, {} deps",
        key,
        bi.attrs.len(),
        bi.deps.len()
    );
    encode_record(&bi, key)
}

/// Finalize the record for `key` with the sources resolved by the solver.
///
/// `build_sources` maps source identifiers to their pins. The sources
/// already in the record are the frontend-declared ones. A missing record
/// is finalized from an empty one.
pub fn finalize_with_sources(
    existing: Option<&[u8]>,
    key: &str,
    build_sources: &BTreeMap<String, String>,
) -> BuildInfoResult<Vec<u8>> {
    let mut bi = match existing {
        Some(dt) => decode_record(dt, key)?,
        None => BuildInfo::default(),
    };

    let deps = decode_deps(key, &bi.attrs)?;
    bi.deps.extend(deps);
    bi.sources = merge_sources(build_sources, std::mem::take(&mut bi.sources))?;
    bi.attrs = filter_attrs(key, &bi.attrs);

    debug!(
        "Finalized build info for {}: {} sources",
        key,
        bi.sources.len()
    );
    encode_record(&bi, key)
}

/// Build info for `key` from a request, merged with any stored record
pub fn get_metadata(
    metadata: &Metadata,
    key: &str,
    frontend: &str,
    req_attrs: &BTreeMap<String, String>,
) -> BuildInfoResult<Vec<u8>> {
    accumulate_request(lookup(metadata, key), key, frontend, req_attrs)
}

/// Stored build info for `key` finalized with resolved build sources
pub fn encode_metadata(
    metadata: &Metadata,
    key: &str,
    build_sources: &BTreeMap<String, String>,
) -> BuildInfoResult<Vec<u8>> {
    finalize_with_sources(lookup(metadata, key), key, build_sources)
}

fn lookup<'a>(metadata: &'a Metadata, key: &str) -> Option<&'a [u8]> {
    metadata.get(key).map(Vec::as_slice)
}

fn decode_record(dt: &[u8], key: &str) -> BuildInfoResult<BuildInfo> {
    serde_json::from_slice(dt)
        .map_err(|e| BuildInfoError::json(format!("build info for {:?}", key), e))
}

fn encode_record(bi: &BuildInfo, key: &str) -> BuildInfoResult<Vec<u8>> {
    serde_json::to_vec(bi).map_err(|e| BuildInfoError::json(format!("build info for {:?}", key), e))
}

/// Request attributes win over stored ones; stored nulls are not carried over
fn layer_attrs(req_attrs: &BTreeMap<String, String>, stored: &Attrs) -> Attrs {
    let mut attrs: Attrs = stored
        .iter()
        .filter_map(|(k, v)| v.as_ref().map(|v| (k.clone(), Some(v.clone()))))
        .collect();
    attrs.extend(to_attrs(req_attrs));
    attrs
}

fn to_attrs(m: &BTreeMap<String, String>) -> Attrs {
    m.iter()
        .map(|(k, v)| (k.clone(), Some(v.clone())))
        .collect()
}
