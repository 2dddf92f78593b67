//! CLI command implementations

pub mod accumulate;
pub mod codec;
pub mod config;
pub mod finalize;
pub mod format;
pub mod inspect;

pub use accumulate::execute as accumulate;
pub use codec::{decode, encode};
pub use config::execute as config;
pub use finalize::execute as finalize;
pub use format::execute as format;
pub use inspect::execute as inspect;
