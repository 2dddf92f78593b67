//! Build sources
//!
//! Parsing of the source identifiers reported by the solver, normalization
//! of image references and merging of resolved sources into a record.

pub mod identifier;
pub mod merge;
pub mod redact;
pub mod reference;

pub use identifier::{GitIdentifier, Identifier};
pub use merge::merge_sources;
pub use redact::redact_credentials;
pub use reference::{normalize, ImageReference};
