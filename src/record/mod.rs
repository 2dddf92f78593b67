//! Build info record model
//!
//! A [`BuildInfo`] is the provenance record of one build step: the frontend
//! that interpreted the build definition, the attributes that can change its
//! output, the external sources it consumed and the records of nested build
//! contexts it used as inputs.

pub mod codec;

pub use codec::{decode, encode, format, from_image_config, FormatOpts, ImageConfig};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Result key under which an input's build info is exported in input metadata
pub const EXPORTER_BUILD_INFO: &str = "containerimage.buildinfo";

/// Image config field that carries an embedded, base64 encoded build info
pub const IMAGE_CONFIG_BUILD_INFO: &str = "moby.buildkit.buildinfo.v1";

/// Frontend attributes; `None` is kept distinct from an empty value
pub type Attrs = BTreeMap<String, Option<String>>;

/// Provenance record for one build step or target
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// Frontend that produced the build
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub frontend: String,

    /// Attributes that can affect the build result
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: Attrs,

    /// External sources, sorted by ref
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<Source>,

    /// Build info of input contexts, keyed by context name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub deps: BTreeMap<String, BuildInfo>,
}

/// Kind of external source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceType {
    #[serde(rename = "docker-image")]
    DockerImage,
    #[serde(rename = "git")]
    Git,
    #[serde(rename = "http")]
    Http,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::DockerImage => "docker-image",
            Self::Git => "git",
            Self::Http => "http",
        };
        write!(f, "{}", name)
    }
}

/// One external input consumed by a build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    /// Source kind
    #[serde(rename = "type")]
    pub kind: SourceType,

    /// Canonical reference, credentials redacted
    #[serde(rename = "ref", default)]
    pub reference: String,

    /// Frontend-local name (images only)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub alias: String,

    /// Immutable content identifier, e.g. a digest or commit
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pin: String,
}

impl Source {
    /// Create a source without an alias
    pub fn new(kind: SourceType, reference: impl Into<String>, pin: impl Into<String>) -> Self {
        Self {
            kind,
            reference: reference.into(),
            alias: String::new(),
            pin: pin.into(),
        }
    }

    /// Set the frontend alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = alias.into();
        self
    }
}

impl BuildInfo {
    /// Copy of this record without attributes, for external display
    pub fn without_attrs(&self) -> Self {
        Self {
            attrs: Attrs::new(),
            ..self.clone()
        }
    }
}
