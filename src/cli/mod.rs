//! Command-line interface for Chomp self-play
//!
//! `train` runs a self-play session and writes its exports, `board` replays
//! a move list and prints the resulting grid.

pub mod commands;
pub mod output;
