//! # CLI Command Implementations
//!
//! Each subcommand of `cdn-externals` lives in its own file with:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - An `execute` function that takes the parsed `Args` and performs the
//!   command's logic by calling into the `cdn_externals` library.

pub mod completions;
pub mod ls;
pub mod resolve;
pub mod validate;
