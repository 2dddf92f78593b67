//! Source merging
//!
//! Combines the sources resolved by the solver with the sources declared by
//! the frontend. Frontend entries carry the reference as the user wrote it;
//! the solver only knows the normalized form and the pin.

use super::identifier::Identifier;
use super::redact::redact_credentials;
use super::reference::normalize;
use crate::error::BuildInfoResult;
use crate::record::{Source, SourceType};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Merge resolved build sources with frontend-declared sources.
///
/// `build_sources` maps raw source identifiers to the pin they resolved to.
/// `frontend_sources` is consumed: each image correlated with a build source
/// is taken out so the final sweep only sees the leftovers. The result has
/// one entry per dedup key and is sorted by ref.
pub fn merge_sources(
    build_sources: &BTreeMap<String, String>,
    frontend_sources: Vec<Source>,
) -> BuildInfoResult<Vec<Source>> {
    let mut frontend = frontend_sources;
    let mut merged: BTreeMap<String, Source> = BTreeMap::new();

    for (build_source, pin) in build_sources {
        match Identifier::parse(build_source)? {
            Identifier::Image(reference) => {
                let key = reference.to_string();
                let declared = frontend
                    .iter()
                    .position(|s| s.kind == SourceType::DockerImage && s.alias == key);
                if let Some(index) = declared {
                    if !merged.contains_key(&key) {
                        let declared = frontend.remove(index);
                        let source =
                            Source::new(SourceType::DockerImage, normalize(&declared.reference)?, pin);
                        merged.insert(key.clone(), source);
                    }
                }
                if !merged.contains_key(&key) {
                    let source = Source::new(SourceType::DockerImage, key.clone(), pin);
                    merged.insert(key, source);
                }
            }
            Identifier::Git(git) => {
                let key = git.to_string();
                if !merged.contains_key(&key) {
                    let source = Source::new(SourceType::Git, redact_credentials(&key), pin);
                    merged.insert(key, source);
                }
            }
            Identifier::Http(url) => {
                if !merged.contains_key(&url) {
                    let source = Source::new(SourceType::Http, redact_credentials(&url), pin);
                    merged.insert(url, source);
                }
            }
            Identifier::Local(_) | Identifier::OciLayout(_) => {
                trace!("ignoring build source {}", build_source);
            }
        }
    }

    // Leftover frontend images are mostly duplicates, but a build made only
    // of a FROM has no other record of its base image.
    for declared in frontend {
        if declared.kind != SourceType::DockerImage || merged.contains_key(&declared.alias) {
            continue;
        }
        trace!("recording unresolved {} source {}", declared.kind, declared.reference);
        let source = Source::new(
            SourceType::DockerImage,
            normalize(&declared.reference)?,
            declared.pin,
        );
        merged.insert(declared.alias, source);
    }

    let mut sources: Vec<Source> = merged.into_values().collect();
    sources.sort_by(|a, b| a.reference.cmp(&b.reference));

    debug!("Merged {} sources", sources.len());
    Ok(sources)
}
