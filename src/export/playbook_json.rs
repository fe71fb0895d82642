//! JSON snapshots of an agent's playbook for heatmap rendering

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    chomp::Move,
    learner::{Agent, MoveTable},
};

/// Read-only view of one move table, shaped for a heatmap renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapSnapshot {
    /// Board markers (0 = empty, 1 = normal, 2 = poison), one row per entry
    pub grid: Vec<Vec<u8>>,
    pub moves: Vec<Move>,
    pub weights: Vec<f64>,
    /// Weight per square, `None` where the square is not a move
    pub heatmap: Vec<Vec<Option<f64>>>,
    /// Colour scale runs over `[0, max_weight]`
    pub max_weight: f64,
}

impl From<&MoveTable> for HeatmapSnapshot {
    fn from(table: &MoveTable) -> Self {
        HeatmapSnapshot {
            grid: table.state().markers(),
            moves: table.moves().to_vec(),
            weights: table.weights().to_vec(),
            heatmap: table.heatmap(),
            max_weight: table.max_weight(),
        }
    }
}

/// Playbook export for one agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookSnapshot {
    pub agent: String,
    pub wins: usize,
    pub losses: usize,
    pub tables: Vec<HeatmapSnapshot>,
}

/// Snapshot every table of `agent` in insertion order
pub fn playbook_snapshot(agent: &Agent) -> PlaybookSnapshot {
    PlaybookSnapshot {
        agent: agent.name().to_string(),
        wins: agent.wins(),
        losses: agent.losses(),
        tables: agent.playbook().iter().map(HeatmapSnapshot::from).collect(),
    }
}

/// Write the playbook snapshot as pretty JSON to any writer
pub fn write_playbook<W: Write>(agent: &Agent, writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, &playbook_snapshot(agent))?;
    Ok(())
}

/// Write the playbook snapshot of `agent` to `path`
pub fn write_playbook_json<P: AsRef<Path>>(agent: &Agent, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| crate::Error::Io {
        operation: format!("create {}", path.display()),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_playbook(agent, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::chomp::BoardState;

    #[test]
    fn snapshot_mirrors_table_contents() {
        let table = MoveTable::new(BoardState::from_markers(&[&[2, 1], &[1, 0]]).unwrap());
        let snapshot = HeatmapSnapshot::from(&table);

        assert_eq!(snapshot.grid, vec![vec![2, 1], vec![1, 0]]);
        assert_eq!(snapshot.moves, vec![Move::new(0, 1), Move::new(1, 0)]);
        assert_eq!(snapshot.weights, vec![1.0, 1.0]);
        assert_eq!(snapshot.heatmap[0][0], None);
        assert_eq!(snapshot.max_weight, 1.0);
    }

    #[test]
    fn playbook_json_lists_every_table() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut agent = Agent::new("json");
        let board = BoardState::new(4, 3).unwrap();
        agent.select_move(&board, &mut rng).unwrap();
        agent.record_win();

        let mut buffer = Vec::new();
        write_playbook(&agent, &mut buffer).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();

        assert_eq!(parsed["agent"], "json");
        assert_eq!(parsed["wins"], 1);
        assert_eq!(parsed["tables"].as_array().unwrap().len(), 1);
        assert_eq!(parsed["tables"][0]["grid"].as_array().unwrap().len(), 3);
    }
}
