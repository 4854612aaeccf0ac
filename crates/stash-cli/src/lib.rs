//! stash-cli library
//!
//! Argument types, logging setup and the command implementations behind
//! the `stash` binary, exposed so they can be tested without a process.

pub mod cli;
pub mod commands;
pub mod logging;

pub use cli::{Cli, Commands, ServeArgs};

#[cfg(test)]
mod tests;
