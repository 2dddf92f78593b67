//! buildinfo - Build provenance records
//!
//! Records which images, git repositories and HTTP artifacts a build
//! consumed, which of its parameters can change the output, and the
//! provenance of the input contexts it was given.

pub mod attrs;
pub mod cli;
pub mod config;
pub mod deps;
pub mod error;
pub mod key;
pub mod metadata;
pub mod record;
pub mod source;

pub use error::{BuildInfoError, BuildInfoResult};
pub use metadata::{
    accumulate_request, encode_metadata, finalize_with_sources, get_metadata, Metadata,
};
pub use record::{BuildInfo, Source, SourceType};
