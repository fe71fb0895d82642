//! Configuration for self-play sessions.

use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::learner::ReinforcementValues;

/// One scheduled match: roster indices, `first` opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pairing {
    pub first: usize,
    pub second: usize,
}

impl Pairing {
    pub fn new(first: usize, second: usize) -> Self {
        Self { first, second }
    }
}

/// Configuration for a self-play session.
///
/// # Examples
///
/// ```
/// use chomp::config::{Pairing, SelfPlayConfig};
///
/// let config = SelfPlayConfig::default()
///     .with_board(5, 4)
///     .with_rounds(200)
///     .with_agents(2)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.schedule(), vec![Pairing::new(0, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelfPlayConfig {
    /// Board width (columns)
    pub width: usize,
    /// Board height (rows)
    pub height: usize,
    /// Number of times the pairing schedule is played
    pub rounds: usize,
    /// Number of agents in the roster
    pub agents: usize,
    /// Explicit schedule; defaults to agent 0 against each other agent
    pub pairings: Option<Vec<Pairing>>,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
    pub reinforcement: ReinforcementValues,
}

impl Default for SelfPlayConfig {
    fn default() -> Self {
        Self {
            width: 4,
            height: 3,
            rounds: 1000,
            agents: 3,
            pairings: None,
            seed: None,
            reinforcement: ReinforcementValues::default(),
        }
    }
}

impl SelfPlayConfig {
    /// Load a configuration from a JSON file. Missing fields take defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_board(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    pub fn with_agents(mut self, agents: usize) -> Self {
        self.agents = agents;
        self
    }

    pub fn with_pairings(mut self, pairings: Vec<Pairing>) -> Self {
        self.pairings = Some(pairings);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_reinforcement(mut self, reinforcement: ReinforcementValues) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    /// Pairings played once per round
    pub fn schedule(&self) -> Vec<Pairing> {
        match &self.pairings {
            Some(pairings) => pairings.clone(),
            None => (1..self.agents).map(|other| Pairing::new(0, other)).collect(),
        }
    }

    /// Total matches the session will play
    pub fn total_matches(&self) -> usize {
        self.rounds * self.schedule().len()
    }

    pub fn validate(&self) -> crate::Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(crate::Error::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.agents < 2 {
            return Err(invalid(format!(
                "at least two agents are required, got {}",
                self.agents
            )));
        }

        let schedule = self.schedule();
        if schedule.is_empty() {
            return Err(invalid("pairing schedule is empty".to_string()));
        }
        for pairing in &schedule {
            if pairing.first >= self.agents || pairing.second >= self.agents {
                return Err(invalid(format!(
                    "pairing {}-{} refers to an agent outside the roster of {}",
                    pairing.first, pairing.second, self.agents
                )));
            }
            if pairing.first == pairing.second {
                return Err(invalid(format!(
                    "agent {} cannot be paired with itself",
                    pairing.first
                )));
            }
        }

        self.reinforcement.validate()
    }
}

fn invalid(message: String) -> crate::Error {
    crate::Error::InvalidConfiguration { message }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_pits_first_agent_against_the_rest() {
        let config = SelfPlayConfig::default();
        assert_eq!(config.schedule(), vec![Pairing::new(0, 1), Pairing::new(0, 2)]);
        assert_eq!(config.total_matches(), 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_rosters() {
        assert!(SelfPlayConfig::default().with_agents(1).validate().is_err());
        assert!(matches!(
            SelfPlayConfig::default().with_board(0, 3).validate(),
            Err(crate::Error::InvalidDimensions { .. })
        ));
        assert!(
            SelfPlayConfig::default()
                .with_pairings(vec![Pairing::new(0, 3)])
                .validate()
                .is_err()
        );
        assert!(
            SelfPlayConfig::default()
                .with_pairings(vec![Pairing::new(1, 1)])
                .validate()
                .is_err()
        );
        assert!(
            SelfPlayConfig::default()
                .with_pairings(Vec::new())
                .validate()
                .is_err()
        );
    }

    #[test]
    fn partial_json_takes_defaults() {
        let config: SelfPlayConfig =
            serde_json::from_str(r#"{ "width": 6, "seed": 3 }"#).unwrap();
        assert_eq!(config.width, 6);
        assert_eq!(config.height, 3);
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.reinforcement, ReinforcementValues::default());
    }
}
