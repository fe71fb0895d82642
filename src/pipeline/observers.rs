//! Observer implementations for self-play sessions

use std::collections::BTreeMap;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    chomp::{MatchRecord, Seat},
    config::Pairing,
    ports::Observer,
};

/// Progress bar observer - Shows self-play progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    first_seat_wins: usize,
    second_seat_wins: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            first_seat_wins: 0,
            second_seat_wins: 0,
        }
    }

    fn message(&self) -> String {
        format!(
            "opener {} / responder {}",
            self.first_seat_wins, self.second_seat_wins
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_session_start(&mut self, total_matches: usize) -> Result<()> {
        let pb = ProgressBar::new(total_matches as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} matches ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_match_end(&mut self, match_num: usize, _pairing: Pairing, record: &MatchRecord) -> Result<()> {
        match record.winner {
            Seat::First => self.first_seat_wins += 1,
            Seat::Second => self.second_seat_wins += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(match_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Metrics observer - Tracks match lengths and wins per roster entry
#[derive(Debug, Default)]
pub struct MetricsObserver {
    match_lengths: Vec<usize>,
    first_seat_wins: usize,
    /// Roster index -> matches won
    wins_by_agent: BTreeMap<usize, usize>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_matches(&self) -> usize {
        self.match_lengths.len()
    }

    /// Share of matches won by the side that opened
    pub fn first_seat_win_rate(&self) -> f64 {
        if self.match_lengths.is_empty() {
            0.0
        } else {
            self.first_seat_wins as f64 / self.match_lengths.len() as f64
        }
    }

    /// Get average match length in moves
    pub fn avg_match_length(&self) -> f64 {
        if self.match_lengths.is_empty() {
            0.0
        } else {
            self.match_lengths.iter().sum::<usize>() as f64 / self.match_lengths.len() as f64
        }
    }

    pub fn longest_match(&self) -> usize {
        self.match_lengths.iter().copied().max().unwrap_or(0)
    }

    pub fn wins_for(&self, agent: usize) -> usize {
        self.wins_by_agent.get(&agent).copied().unwrap_or(0)
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_matches: self.total_matches(),
            first_seat_wins: self.first_seat_wins,
            first_seat_win_rate: self.first_seat_win_rate(),
            avg_match_length: self.avg_match_length(),
            longest_match: self.longest_match(),
            wins_by_agent: self.wins_by_agent.clone(),
        }
    }
}

impl Observer for MetricsObserver {
    fn on_match_end(&mut self, _match_num: usize, pairing: Pairing, record: &MatchRecord) -> Result<()> {
        self.match_lengths.push(record.turns);
        let winner = match record.winner {
            Seat::First => {
                self.first_seat_wins += 1;
                pairing.first
            }
            Seat::Second => pairing.second,
        };
        *self.wins_by_agent.entry(winner).or_insert(0) += 1;
        Ok(())
    }
}

/// Summary of self-play metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_matches: usize,
    pub first_seat_wins: usize,
    pub first_seat_win_rate: f64,
    pub avg_match_length: f64,
    pub longest_match: usize,
    pub wins_by_agent: BTreeMap<usize, usize>,
}
