//! CSV export of win-ratio histories for external plotting

use std::{fs::File, io::Write, path::Path};

use serde::Serialize;

use crate::{Result, learner::Agent};

/// A single row in the win-ratio CSV export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WinRatioRecord<'a> {
    pub agent: &'a str,
    /// 1-based game number from that agent's point of view
    pub game: usize,
    pub win_ratio: f64,
}

/// Flatten the win-ratio histories of `agents` into rows
pub fn win_ratio_records<'a>(agents: &'a [Agent]) -> Vec<WinRatioRecord<'a>> {
    agents
        .iter()
        .flat_map(|agent| {
            agent
                .win_ratio()
                .iter()
                .enumerate()
                .map(move |(i, &win_ratio)| WinRatioRecord {
                    agent: agent.name(),
                    game: i + 1,
                    win_ratio,
                })
        })
        .collect()
}

/// Write `agent,game,win_ratio` rows to any writer
pub fn write_win_ratio<W: Write>(agents: &[Agent], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    for record in win_ratio_records(agents) {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

/// Write the win-ratio CSV to `path`
pub fn write_win_ratio_csv<P: AsRef<Path>>(agents: &[Agent], path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| crate::Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    write_win_ratio(agents, file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_each_agents_history() {
        let mut a = Agent::new("a");
        let mut b = Agent::new("b");
        a.record_win();
        b.record_loss();
        a.record_loss();
        b.record_win();

        let mut buffer = Vec::new();
        write_win_ratio(&[a, b], &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "agent,game,win_ratio");
        assert_eq!(lines[1], "a,1,0.5");
        assert_eq!(lines[2], "a,2,0.5");
        assert_eq!(lines[3], "b,1,0.5");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn agents_without_games_contribute_nothing() {
        let agents = [Agent::new("idle")];
        assert!(win_ratio_records(&agents).is_empty());
    }
}
