//! Subcommand implementations.

pub mod classify;
pub mod solve;
pub mod validate;
