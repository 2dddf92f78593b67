//! Attribute filtering
//!
//! Frontend options carry everything a client sent with the build request.
//! Only a subset can change the build result; the rest is dropped before the
//! attributes are recorded.

use crate::key::MetadataKey;
use crate::record::Attrs;

const BUILD_ARG_PREFIX: &str = "build-arg:";
const LABEL_PREFIX: &str = "label:";
const CONTEXT_PREFIX: &str = "context:";

/// Bare attribute keys that can affect the build result
pub const KNOWN_ATTRS: &[&str] = &[
    "context",
    "filename",
    "source",
    "shm-size",
    "target",
    "ulimit",
];

/// Build args that toggle build system behavior without changing the output
pub const KNOWN_CONTROL_ARGS: &[&str] = &[
    "BUILDKIT_CACHE_MOUNT_NS",
    "BUILDKIT_CONTEXT_KEEP_GIT_DIR",
    "BUILDKIT_INLINE_BUILDINFO_ATTRS",
    "BUILDKIT_INLINE_CACHE",
    "BUILDKIT_MULTI_PLATFORM",
    "BUILDKIT_SANDBOX_HOSTNAME",
    "BUILDKIT_SYNTAX",
];

/// Check if an attribute key is a control arg
pub fn is_control_arg(attr_key: &str) -> bool {
    attr_key
        .strip_prefix(BUILD_ARG_PREFIX)
        .is_some_and(|name| KNOWN_CONTROL_ARGS.iter().any(|arg| name.starts_with(arg)))
}

/// Keep only the attributes that could change the build result.
///
/// `context:` entries are scoped to the platform of `key`: entries for other
/// platforms are dropped and the `::<platform>` suffix is stripped from the
/// key and value of the matching ones.
pub fn filter_attrs(key: &str, attrs: &Attrs) -> Attrs {
    let suffix = MetadataKey::parse(key).platform_suffix();

    let mut filtered = Attrs::new();
    for (k, v) in attrs {
        let Some(value) = v else {
            continue;
        };
        if is_control_arg(k) {
            continue;
        }
        if k.starts_with(BUILD_ARG_PREFIX) || k.starts_with(LABEL_PREFIX) {
            filtered.insert(k.clone(), Some(value.clone()));
            continue;
        }
        if k.starts_with(CONTEXT_PREFIX) {
            match suffix.as_deref() {
                Some(suffix) => {
                    if let Some(name) = k.strip_suffix(suffix) {
                        let value = value.strip_suffix(suffix).unwrap_or(value);
                        filtered.insert(name.to_string(), Some(value.to_string()));
                    }
                }
                None => {
                    filtered.insert(k.clone(), Some(value.clone()));
                }
            }
            continue;
        }
        if KNOWN_ATTRS.contains(&k.as_str()) {
            filtered.insert(k.clone(), Some(value.clone()));
        }
    }
    filtered
}
