//! Command line interface

pub mod args;
pub mod commands;
pub mod io;

pub use args::{Cli, Commands};
