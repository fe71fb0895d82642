//! Self-play learning for the game of Chomp
//!
//! This crate provides:
//! - A Chomp board with a poisoned corner, legal-move listing and move application
//! - Matchbox-style learning agents that keep one weighted move table per board state
//! - A self-play session that runs agents against each other on a pairing schedule
//! - Snapshot exports (CSV win ratios, JSON playbooks, text heatmaps) for external renderers

pub mod chomp;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod learner;
pub mod pipeline;
pub mod ports;
pub mod utils;

pub use chomp::{BoardState, Cell, MatchRecord, Move, Seat, play_match};
pub use config::{Pairing, SelfPlayConfig};
pub use error::{Error, Result};
pub use learner::{Agent, AgentStats, MoveTable, Outcome, Playbook, ReinforcementValues};
pub use pipeline::{SelfPlaySession, SessionSummary};
