//! Move table: the learned weights for one board state

use serde::{Deserialize, Serialize};

use crate::{
    chomp::{BoardState, Move},
    utils::{entropy_from_weights, normalize_weights, weighted_index},
};

/// Initial weight given to every legal move
pub const INITIAL_WEIGHT: f64 = 1.0;

/// Ceiling for reinforced weights. A table's total weight stays finite, so
/// weighted sampling keeps working for moves that never stop winning.
pub const MAX_WEIGHT: f64 = 1e100;

/// The legal moves of a single board state with one weight per move.
///
/// Moves are computed once from the captured state and never change.
/// Only the weights are mutated, by the owning agent's learning updates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTable {
    state: BoardState,
    moves: Vec<Move>,
    weights: Vec<f64>,
}

impl MoveTable {
    /// Create a table for `state` with every legal move weighted 1.0
    pub fn new(state: BoardState) -> Self {
        let moves = state.legal_moves();
        let weights = vec![INITIAL_WEIGHT; moves.len()];
        MoveTable {
            state,
            moves,
            weights,
        }
    }

    /// The state this table was built for
    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Position of `mv` within the table, if it is one of its moves
    pub fn index_of(&self, mv: Move) -> Option<usize> {
        self.moves.iter().position(|&candidate| candidate == mv)
    }

    /// Current weight of `mv`
    pub fn weight(&self, mv: Move) -> Option<f64> {
        self.index_of(mv).map(|index| self.weights[index])
    }

    /// Iterate over `(move, weight)` pairs in move order
    pub fn entries(&self) -> impl Iterator<Item = (Move, f64)> + '_ {
        self.moves.iter().copied().zip(self.weights.iter().copied())
    }

    /// Draw a move with probability proportional to its weight.
    ///
    /// Returns `None` only for a table built from a terminal state.
    pub fn sample(&self, rng: &mut (impl rand::Rng + ?Sized)) -> Option<Move> {
        weighted_index(rng, &self.weights).map(|index| self.moves[index])
    }

    /// Multiply the weight of `mv` by `factor`, capped at [`MAX_WEIGHT`].
    /// Returns `false` if `mv` is not in the table.
    pub fn reinforce(&mut self, mv: Move, factor: f64) -> bool {
        match self.index_of(mv) {
            Some(index) => {
                self.weights[index] = (self.weights[index] * factor).min(MAX_WEIGHT);
                true
            }
            None => false,
        }
    }

    /// Multiply the weight of `mv` by `factor` while it is above `floor`.
    /// The result is clamped to `floor`. Returns `false` if `mv` is not in
    /// the table.
    pub fn penalize(&mut self, mv: Move, factor: f64, floor: f64) -> bool {
        match self.index_of(mv) {
            Some(index) => {
                let weight = self.weights[index];
                if weight > floor {
                    self.weights[index] = (weight * factor).max(floor);
                }
                true
            }
            None => false,
        }
    }

    /// Weights normalized to a probability distribution
    pub fn probabilities(&self) -> Option<Vec<f64>> {
        normalize_weights(self.weights.iter().copied())
    }

    /// Entropy of the move distribution
    pub fn entropy(&self) -> f64 {
        entropy_from_weights(self.weights.iter().copied())
    }

    /// Upper bound of the heatmap scale: the largest weight, or 1.0 when empty
    pub fn max_weight(&self) -> f64 {
        self.weights
            .iter()
            .copied()
            .reduce(f64::max)
            .unwrap_or(INITIAL_WEIGHT)
    }

    /// Weight grid shaped like the board. Squares that are not moves are `None`.
    pub fn heatmap(&self) -> Vec<Vec<Option<f64>>> {
        let mut grid = vec![vec![None; self.state.width()]; self.state.height()];
        for (mv, weight) in self.entries() {
            grid[mv.row][mv.col] = Some(weight);
        }
        grid
    }

    /// Reset every weight to its initial value
    pub fn reset(&mut self) {
        for weight in &mut self.weights {
            *weight = INITIAL_WEIGHT;
        }
    }
}
