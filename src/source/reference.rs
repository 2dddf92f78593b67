//! Container image reference normalization.
//!
//! Parses references like `alpine`, `ghcr.io/org/app:v1` or
//! `repo@sha256:<hex>` into their fully qualified form
//! (`docker.io/library/alpine`, ...).

use crate::error::{BuildInfoError, BuildInfoResult};
use std::fmt;

/// Default registry when none is specified.
const DEFAULT_DOMAIN: &str = "docker.io";

/// Legacy alias of the default registry.
const LEGACY_DEFAULT_DOMAIN: &str = "index.docker.io";

/// Namespace of official images on the default registry.
const OFFICIAL_REPO_PREFIX: &str = "library/";

/// Default tag when neither tag nor digest is specified.
const DEFAULT_TAG: &str = "latest";

const NAME_TOTAL_LENGTH_MAX: usize = 255;
const TAG_LENGTH_MAX: usize = 128;
const DIGEST_HEX_MIN: usize = 32;

/// Fully qualified image reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Registry host, with optional port (e.g. "docker.io", "localhost:5000")
    pub domain: String,
    /// Repository path (e.g. "library/alpine", "org/app")
    pub path: String,
    pub tag: Option<String>,
    /// Digest (e.g. "sha256:...")
    pub digest: Option<String>,
}

impl ImageReference {
    /// Parse a reference, filling in the default registry and official
    /// image namespace for short names.
    pub fn parse_normalized(reference: &str) -> BuildInfoResult<Self> {
        let fail = |reason: &str| BuildInfoError::reference(reference, reason);

        if reference.is_empty() {
            return Err(fail("repository name must have at least one component"));
        }

        let (remainder, digest) = match reference.split_once('@') {
            Some((name, digest)) => {
                validate_digest(digest).map_err(fail)?;
                (name, Some(digest.to_string()))
            }
            None => (reference, None),
        };

        // A colon after the last slash starts the tag; earlier colons belong
        // to a registry port.
        let last_slash = remainder.rfind('/').map_or(0, |i| i + 1);
        let (name, tag) = match remainder[last_slash..].rfind(':') {
            Some(i) => {
                let split = last_slash + i;
                let tag = &remainder[split + 1..];
                validate_tag(tag).map_err(fail)?;
                (&remainder[..split], Some(tag.to_string()))
            }
            None => (remainder, None),
        };

        if name.len() > NAME_TOTAL_LENGTH_MAX {
            return Err(fail("repository name must not be more than 255 characters"));
        }

        let (domain, path) = split_domain(name);
        validate_domain(&domain).map_err(fail)?;
        validate_path(&path).map_err(fail)?;

        Ok(Self {
            domain,
            path,
            tag,
            digest,
        })
    }

    /// True if the reference has neither tag nor digest
    pub fn is_name_only(&self) -> bool {
        self.tag.is_none() && self.digest.is_none()
    }

    /// Add the default tag to a reference that has neither tag nor digest
    pub fn with_default_tag(mut self) -> Self {
        if self.is_name_only() {
            self.tag = Some(DEFAULT_TAG.to_string());
        }
        self
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.domain, self.path)?;
        if let Some(ref tag) = self.tag {
            write!(f, ":{}", tag)?;
        }
        if let Some(ref digest) = self.digest {
            write!(f, "@{}", digest)?;
        }
        Ok(())
    }
}

/// Parse and qualify a reference, adding the default tag when needed.
pub fn normalize(reference: &str) -> BuildInfoResult<String> {
    Ok(ImageReference::parse_normalized(reference)?
        .with_default_tag()
        .to_string())
}

fn split_domain(name: &str) -> (String, String) {
    let (domain, path) = match name.split_once('/') {
        Some((first, rest))
            if first.contains('.') || first.contains(':') || first == "localhost" =>
        {
            (first.to_string(), rest.to_string())
        }
        _ => (DEFAULT_DOMAIN.to_string(), name.to_string()),
    };

    let domain = if domain == LEGACY_DEFAULT_DOMAIN {
        DEFAULT_DOMAIN.to_string()
    } else {
        domain
    };

    let path = if domain == DEFAULT_DOMAIN && !path.contains('/') {
        format!("{}{}", OFFICIAL_REPO_PREFIX, path)
    } else {
        path
    };

    (domain, path)
}

fn validate_domain(domain: &str) -> Result<(), &'static str> {
    let (host, port) = match domain.rsplit_once(':') {
        Some((host, port)) => (host, Some(port)),
        None => (domain, None),
    };
    if let Some(port) = port {
        if port.is_empty() || !port.chars().all(|c| c.is_ascii_digit()) {
            return Err("invalid reference format");
        }
    }
    let valid_label = |label: &str| {
        !label.is_empty()
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    };
    if !host.split('.').all(valid_label) {
        return Err("invalid reference format");
    }
    Ok(())
}

fn validate_path(path: &str) -> Result<(), &'static str> {
    if path.is_empty() {
        return Err("repository name must have at least one component");
    }
    for component in path.split('/') {
        if !is_path_component(component) {
            if is_path_component(&component.to_ascii_lowercase()) {
                return Err("repository name must be lowercase");
            }
            return Err("invalid reference format");
        }
    }
    Ok(())
}

/// `[a-z0-9]+` runs joined by `.`, `_`, `__` or any number of `-`
fn is_path_component(component: &str) -> bool {
    let is_alnum = |c: char| c.is_ascii_lowercase() || c.is_ascii_digit();

    let mut separator = String::new();
    let mut prev_alnum = false;
    for c in component.chars() {
        if is_alnum(c) {
            if !separator.is_empty() && !is_separator(&separator) {
                return false;
            }
            separator.clear();
            prev_alnum = true;
        } else if matches!(c, '.' | '_' | '-') {
            if !prev_alnum && separator.is_empty() {
                return false;
            }
            separator.push(c);
            prev_alnum = false;
        } else {
            return false;
        }
    }
    prev_alnum
}

fn is_separator(separator: &str) -> bool {
    matches!(separator, "." | "_" | "__") || separator.chars().all(|c| c == '-')
}

fn validate_tag(tag: &str) -> Result<(), &'static str> {
    let mut chars = tag.chars();
    let valid = tag.len() <= TAG_LENGTH_MAX
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'));
    if valid {
        Ok(())
    } else {
        Err("invalid reference format")
    }
}

fn validate_digest(digest: &str) -> Result<(), &'static str> {
    let Some((algorithm, encoded)) = digest.split_once(':') else {
        return Err("invalid digest format: expected algorithm:hex");
    };
    let algorithm_ok = !algorithm.is_empty()
        && algorithm
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '_' | '-'));
    let encoded_ok =
        encoded.len() >= DIGEST_HEX_MIN && encoded.chars().all(|c| c.is_ascii_hexdigit());
    if algorithm_ok && encoded_ok {
        Ok(())
    } else {
        Err("invalid digest format: expected algorithm:hex")
    }
}
