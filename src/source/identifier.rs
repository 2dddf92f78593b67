//! Build source identifiers
//!
//! The solver reports every source it resolved as `<scheme>://<rest>` with
//! the pin it resolved to. Identifiers are parsed into typed values so the
//! merger can canonicalize each kind.

use super::reference::ImageReference;
use crate::error::{BuildInfoError, BuildInfoResult};
use std::fmt;
use std::str::FromStr;

const DOCKER_IMAGE_SCHEME: &str = "docker-image";
const GIT_SCHEME: &str = "git";
const HTTP_SCHEME: &str = "http";
const HTTPS_SCHEME: &str = "https";
const LOCAL_SCHEME: &str = "local";
const OCI_LAYOUT_SCHEME: &str = "oci-layout";

/// Prefixes that already name a git transport
const GIT_TRANSPORTS: &[&str] = &["http://", "https://", "git://", "ssh://", "git@"];

/// A parsed build source identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    /// Container image
    Image(ImageReference),

    /// Git repository
    Git(GitIdentifier),

    /// HTTP(S) artifact
    Http(String),

    /// Local directory sent by the client
    Local(String),

    /// Image from an OCI layout store
    OciLayout(String),
}

/// Git repository with optional ref and subdirectory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitIdentifier {
    pub remote: String,
    pub git_ref: Option<String>,
    pub subdir: Option<String>,
}

impl GitIdentifier {
    /// Parse `<remote>[#<ref>[:<subdir>]]`
    pub fn parse(remote_url: &str) -> Result<Self, &'static str> {
        let remote_url = if GIT_TRANSPORTS.iter().any(|t| remote_url.starts_with(t)) {
            remote_url.to_string()
        } else {
            format!("https://{}", remote_url)
        };

        let (remote, fragment) = match remote_url.split_once('#') {
            Some((remote, fragment)) => (remote, Some(fragment)),
            None => (remote_url.as_str(), None),
        };

        let host = remote
            .split_once("://")
            .map_or(remote, |(_, rest)| rest)
            .trim_start_matches("git@");
        if host.is_empty() {
            return Err("empty git remote");
        }

        let (git_ref, subdir) = match fragment {
            Some(fragment) => match fragment.split_once(':') {
                Some((git_ref, subdir)) => (non_empty(git_ref), non_empty(subdir)),
                None => (non_empty(fragment), None),
            },
            None => (None, None),
        };

        Ok(Self {
            remote: remote.to_string(),
            git_ref,
            subdir,
        })
    }
}

impl fmt::Display for GitIdentifier {
    /// Composite key `remote[#ref][:subdir]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.remote)?;
        if let Some(ref git_ref) = self.git_ref {
            write!(f, "#{}", git_ref)?;
        }
        if let Some(ref subdir) = self.subdir {
            write!(f, ":{}", subdir)?;
        }
        Ok(())
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

impl Identifier {
    /// Parse a `<scheme>://<rest>` build source string
    pub fn parse(s: &str) -> BuildInfoResult<Self> {
        let Some((scheme, rest)) = s.split_once("://") else {
            return Err(BuildInfoError::identifier(s, "missing scheme"));
        };

        match scheme {
            DOCKER_IMAGE_SCHEME => {
                let reference = ImageReference::parse_normalized(rest)?.with_default_tag();
                Ok(Self::Image(reference))
            }
            GIT_SCHEME => GitIdentifier::parse(rest)
                .map(Self::Git)
                .map_err(|reason| BuildInfoError::identifier(s, reason)),
            HTTP_SCHEME | HTTPS_SCHEME => {
                if rest.is_empty() || rest.starts_with('/') {
                    return Err(BuildInfoError::identifier(s, "missing host"));
                }
                Ok(Self::Http(s.to_string()))
            }
            LOCAL_SCHEME => Ok(Self::Local(rest.to_string())),
            OCI_LAYOUT_SCHEME => Ok(Self::OciLayout(rest.to_string())),
            other => Err(BuildInfoError::identifier(
                s,
                format!("unknown scheme {}", other),
            )),
        }
    }
}

impl FromStr for Identifier {
    type Err = BuildInfoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
