//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::collections::HashSet;

use chomp::{Agent, BoardState};
use rand::{SeedableRng, rngs::StdRng};

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Board from marker rows (0 = empty, 1 = normal, 2 = poison)
pub fn board(rows: &[&[u8]]) -> BoardState {
    BoardState::from_markers(rows).expect("valid marker grid")
}

/// Every weight of every table in the agent's playbook
pub fn all_weights(agent: &Agent) -> Vec<f64> {
    agent
        .playbook()
        .iter()
        .flat_map(|table| table.weights().iter().copied())
        .collect()
}

/// True when no two tables in the playbook share a grid
pub fn playbook_is_unique(agent: &Agent) -> bool {
    let mut seen = HashSet::new();
    agent
        .playbook()
        .iter()
        .all(|table| seen.insert(table.state().clone()))
}
