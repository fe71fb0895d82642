//! Match driver: alternates two agents over a shared board until one is stuck

use log::{debug, trace};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::board::BoardState;
use crate::learner::Agent;

/// Which side of a match an agent occupied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    /// Opens the match
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// A completed match with its full state history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Every state from the opening board to the terminal one
    pub states: Vec<BoardState>,
    pub winner: Seat,
    /// Number of moves played (`states.len() - 1`)
    pub turns: usize,
}

impl MatchRecord {
    pub fn loser(&self) -> Seat {
        self.winner.other()
    }

    /// The terminal state the loser was left facing
    pub fn final_state(&self) -> Option<&BoardState> {
        self.states.last()
    }
}

/// Play one match on a fresh `width x height` board. `first` always opens.
///
/// The agent to move on a terminal board loses: it receives `record_loss`
/// and its opponent `record_win`. The loop is bounded by `width * height`
/// turns since every move eats at least one normal square.
pub fn play_match<R>(
    first: &mut Agent,
    second: &mut Agent,
    width: usize,
    height: usize,
    rng: &mut R,
) -> crate::Result<MatchRecord>
where
    R: Rng + ?Sized,
{
    let mut states = vec![BoardState::new(width, height)?];
    let mut to_move = Seat::First;

    loop {
        let current = states.last().ok_or(crate::Error::NoLegalMoves)?;

        if current.is_terminal() {
            let winner = to_move.other();
            let (winning, losing) = match winner {
                Seat::First => (&mut *first, &mut *second),
                Seat::Second => (&mut *second, &mut *first),
            };
            losing.record_loss();
            winning.record_win();

            let turns = states.len() - 1;
            debug!(
                "{} beat {} in {turns} turns",
                winning.name(),
                losing.name()
            );
            return Ok(MatchRecord {
                states,
                winner,
                turns,
            });
        }

        let agent = match to_move {
            Seat::First => &mut *first,
            Seat::Second => &mut *second,
        };
        let next = agent.select_move(current, rng)?;
        trace!("{} moved to\n{next}", agent.name());

        states.push(next);
        to_move = to_move.other();
    }
}
