//! Playbook: one move table per distinct board state

use std::collections::HashMap;

use super::move_table::MoveTable;
use crate::chomp::BoardState;

/// Insertion-ordered collection of move tables keyed by board value.
///
/// Tables are only ever added. Two states with equal grids always resolve
/// to the same table.
#[derive(Debug, Clone, Default)]
pub struct Playbook {
    tables: Vec<MoveTable>,
    index: HashMap<BoardState, usize>,
}

impl Playbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains(&self, state: &BoardState) -> bool {
        self.index.contains_key(state)
    }

    pub fn get(&self, state: &BoardState) -> Option<&MoveTable> {
        self.index.get(state).map(|&i| &self.tables[i])
    }

    pub fn get_mut(&mut self, state: &BoardState) -> Option<&mut MoveTable> {
        self.index.get(state).map(|&i| &mut self.tables[i])
    }

    /// Position of the table for `state` in insertion order
    pub fn position(&self, state: &BoardState) -> Option<usize> {
        self.index.get(state).copied()
    }

    /// Add a fresh table for `state` unless one exists. Returns the table's
    /// position and whether it was newly created.
    pub fn insert_if_absent(&mut self, state: BoardState) -> (usize, bool) {
        if let Some(&i) = self.index.get(&state) {
            return (i, false);
        }
        let i = self.tables.len();
        self.index.insert(state.clone(), i);
        self.tables.push(MoveTable::new(state));
        (i, true)
    }

    /// Tables in the order they were first encountered
    pub fn iter(&self) -> std::slice::Iter<'_, MoveTable> {
        self.tables.iter()
    }

}

impl<'a> IntoIterator for &'a Playbook {
    type Item = &'a MoveTable;
    type IntoIter = std::slice::Iter<'a, MoveTable>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
