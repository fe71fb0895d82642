//! Self-play session: a roster of agents playing a pairing schedule

use log::info;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    chomp::{MatchRecord, Seat, play_match},
    config::{Pairing, SelfPlayConfig},
    learner::{Agent, AgentStats},
    ports::Observer,
};

/// Result of a self-play session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Total matches played
    pub total_matches: usize,
    /// Matches won by the opening side
    pub first_seat_wins: usize,
    /// Mean number of moves per match
    pub avg_match_length: f64,
    pub agents: Vec<AgentStats>,
}

/// A self-play session
pub struct SelfPlaySession {
    config: SelfPlayConfig,
    schedule: Vec<Pairing>,
    agents: Vec<Agent>,
    observers: Vec<Box<dyn Observer>>,
    matches_played: usize,
    first_seat_wins: usize,
    total_turns: usize,
    rng: StdRng,
}

impl std::fmt::Debug for SelfPlaySession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelfPlaySession")
            .field("config", &self.config)
            .field("agents", &self.agents.len())
            .field("observers", &self.observers.len())
            .field("matches_played", &self.matches_played)
            .finish()
    }
}

impl SelfPlaySession {
    /// Create a new session with a fresh roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration does not validate.
    pub fn new(config: SelfPlayConfig) -> Result<Self> {
        config.validate()?;

        let agents = (0..config.agents)
            .map(|i| Agent::with_reinforcement(format!("agent-{i}"), config.reinforcement))
            .collect();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        Ok(SelfPlaySession {
            schedule: config.schedule(),
            config,
            agents,
            observers: Vec::new(),
            matches_played: 0,
            first_seat_wins: 0,
            total_turns: 0,
            rng,
        })
    }

    /// Add an observer to the session
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &SelfPlayConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, index: usize) -> Option<&Agent> {
        self.agents.get(index)
    }

    /// Hand the trained roster back to the caller
    pub fn into_agents(self) -> Vec<Agent> {
        self.agents
    }

    pub fn matches_played(&self) -> usize {
        self.matches_played
    }

    /// Play `rounds` rounds of the schedule and summarise the result.
    pub fn run(&mut self) -> Result<SessionSummary> {
        let total = self.config.total_matches();
        info!(
            "self-play on a {}x{} board: {} agents, {total} matches",
            self.config.width, self.config.height, self.config.agents
        );

        for observer in &mut self.observers {
            observer.on_session_start(total)?;
        }

        let schedule = self.schedule.clone();
        for _ in 0..self.config.rounds {
            for &pairing in &schedule {
                self.play_pairing(pairing)?;
            }
        }

        for observer in &mut self.observers {
            observer.on_session_end()?;
        }

        let summary = self.summary();
        info!(
            "self-play finished: {} matches, opener won {}",
            summary.total_matches, summary.first_seat_wins
        );
        Ok(summary)
    }

    /// Play a single match between two roster entries.
    pub fn play_pairing(&mut self, pairing: Pairing) -> Result<MatchRecord> {
        let match_num = self.matches_played;
        for observer in &mut self.observers {
            observer.on_match_start(match_num, pairing)?;
        }

        let (first, second) = pair_mut(&mut self.agents, pairing)?;
        let record = play_match(
            first,
            second,
            self.config.width,
            self.config.height,
            &mut self.rng,
        )?;

        self.matches_played += 1;
        self.total_turns += record.turns;
        if record.winner == Seat::First {
            self.first_seat_wins += 1;
        }

        for observer in &mut self.observers {
            observer.on_match_end(match_num, pairing, &record)?;
        }
        Ok(record)
    }

    /// Summary of everything played so far
    pub fn summary(&self) -> SessionSummary {
        let avg_match_length = if self.matches_played == 0 {
            0.0
        } else {
            self.total_turns as f64 / self.matches_played as f64
        };
        SessionSummary {
            total_matches: self.matches_played,
            first_seat_wins: self.first_seat_wins,
            avg_match_length,
            agents: self.agents.iter().map(Agent::stats).collect(),
        }
    }
}

/// Borrow two distinct roster entries mutably.
fn pair_mut(agents: &mut [Agent], pairing: Pairing) -> Result<(&mut Agent, &mut Agent)> {
    let Pairing { first, second } = pairing;
    if first == second || first >= agents.len() || second >= agents.len() {
        return Err(crate::Error::InvalidConfiguration {
            message: format!(
                "pairing {first}-{second} is not valid for a roster of {}",
                agents.len()
            ),
        });
    }

    if first < second {
        let (head, tail) = agents.split_at_mut(second);
        Ok((&mut head[first], &mut tail[0]))
    } else {
        let (head, tail) = agents.split_at_mut(first);
        Ok((&mut tail[0], &mut head[second]))
    }
}
