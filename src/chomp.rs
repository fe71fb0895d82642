//! Chomp game implementation

pub mod board;
pub mod game;

pub use board::{BoardState, Cell, Move};
pub use game::{MatchRecord, Seat, play_match};
