//! Learning agent that plays Chomp from a growing playbook of move tables.

use log::{debug, trace};
use rand::{Rng, prelude::IndexedRandom};
use serde::{Deserialize, Serialize};

use super::{
    move_table::MoveTable,
    playbook::Playbook,
    reinforcement::{Outcome, ReinforcementValues},
};
use crate::{
    chomp::{BoardState, Move},
    utils::win_ratio,
};

/// Chomp learning agent
#[derive(Debug, Clone)]
pub struct Agent {
    name: String,
    playbook: Playbook,
    /// `(state, move)` pairs played in the game in progress
    current_moves: Vec<(BoardState, Move)>,
    wins: usize,
    losses: usize,
    /// Ratio snapshot appended after every completed game
    win_ratio: Vec<f64>,
    reinforcement: ReinforcementValues,
}

impl Agent {
    /// Create an agent with an empty playbook and the default rule.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_reinforcement(name, ReinforcementValues::default())
    }

    pub fn with_reinforcement(name: impl Into<String>, reinforcement: ReinforcementValues) -> Self {
        Agent {
            name: name.into(),
            playbook: Playbook::new(),
            current_moves: Vec::new(),
            wins: 0,
            losses: 0,
            win_ratio: Vec::new(),
            reinforcement,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    /// Moves recorded in the game in progress
    pub fn current_moves(&self) -> &[(BoardState, Move)] {
        &self.current_moves
    }

    pub fn wins(&self) -> usize {
        self.wins
    }

    pub fn losses(&self) -> usize {
        self.losses
    }

    pub fn games_played(&self) -> usize {
        self.wins + self.losses
    }

    /// Win ratio history, one entry per completed game
    pub fn win_ratio(&self) -> &[f64] {
        &self.win_ratio
    }

    /// Move table for `state`, if this agent has one
    pub fn table(&self, state: &BoardState) -> Option<&MoveTable> {
        self.playbook.get(state)
    }

    /// Pick a move from `state` and return the resulting state.
    ///
    /// Known states are sampled by weight. Unknown states get a uniform
    /// random move, and the state that move produces is added to the
    /// playbook if it is new.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NoLegalMoves`] if `state` is terminal.
    pub fn select_move<R>(&mut self, state: &BoardState, rng: &mut R) -> crate::Result<BoardState>
    where
        R: Rng + ?Sized,
    {
        if let Some(table) = self.playbook.get(state) {
            let mv = table.sample(rng).ok_or(crate::Error::NoLegalMoves)?;
            trace!("{} sampled {mv} from its playbook", self.name);
            let next = state.apply_move(mv)?;
            self.current_moves.push((state.clone(), mv));
            return Ok(next);
        }

        let mv = *state
            .legal_moves()
            .choose(rng)
            .ok_or(crate::Error::NoLegalMoves)?;
        trace!("{} explored {mv} from an unknown state", self.name);
        let next = state.apply_move(mv)?;
        self.current_moves.push((state.clone(), mv));

        let (position, created) = self.playbook.insert_if_absent(next.clone());
        if created {
            debug!(
                "{} added move table #{position} ({} moves)",
                self.name,
                next.legal_moves().len()
            );
        }

        Ok(next)
    }

    /// Reinforce every move of the finished game and count a win.
    pub fn record_win(&mut self) {
        self.record(Outcome::Win);
    }

    /// Decay every move of the finished game (not below the floor) and
    /// count a loss.
    pub fn record_loss(&mut self) {
        self.record(Outcome::Loss);
    }

    /// Apply the learning update for `outcome`, then clear the game trace.
    ///
    /// Moves made from states that have no table (for example the opening
    /// board of a fresh agent) are skipped.
    pub fn record(&mut self, outcome: Outcome) {
        let ReinforcementValues { win, loss, floor } = self.reinforcement;

        for (state, mv) in self.current_moves.drain(..) {
            if let Some(table) = self.playbook.get_mut(&state) {
                match outcome {
                    Outcome::Win => table.reinforce(mv, win),
                    Outcome::Loss => table.penalize(mv, loss, floor),
                };
            }
        }

        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Loss => self.losses += 1,
        }
        self.win_ratio.push(win_ratio(self.wins, self.losses));
    }

    /// Forget all learning: drop the playbook, trace, counters and history.
    pub fn reset(&mut self) {
        self.playbook = Playbook::new();
        self.current_moves.clear();
        self.wins = 0;
        self.losses = 0;
        self.win_ratio.clear();
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        let tables = self.playbook.len();
        let total_weight = self
            .playbook
            .iter()
            .flat_map(|table| table.weights().iter())
            .sum::<f64>();
        let avg_entropy = if tables == 0 {
            0.0
        } else {
            self.playbook.iter().map(MoveTable::entropy).sum::<f64>() / tables as f64
        };

        AgentStats {
            name: self.name.clone(),
            wins: self.wins,
            losses: self.losses,
            final_win_ratio: self.win_ratio.last().copied(),
            playbook_size: tables,
            total_weight,
            avg_entropy,
        }
    }
}

/// Statistics about a Chomp agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStats {
    pub name: String,
    pub wins: usize,
    pub losses: usize,
    pub final_win_ratio: Option<f64>,
    pub playbook_size: usize,
    pub total_weight: f64,
    pub avg_entropy: f64,
}
