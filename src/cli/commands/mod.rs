//! Subcommands of the `chomp` binary

pub mod board;
pub mod train;
