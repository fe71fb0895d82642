//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// A square on the Chomp board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    /// Already eaten
    Empty,
    /// Still on the board and available to be eaten
    Normal,
    /// The poisoned square; whoever is left with only this square loses
    Poison,
}

impl Cell {
    /// Numeric marker used by renderers (0 = empty, 1 = normal, 2 = poison)
    pub fn marker(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Normal => 1,
            Cell::Poison => 2,
        }
    }

    pub fn from_marker(marker: u8) -> Option<Cell> {
        match marker {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Normal),
            2 => Some(Cell::Poison),
            _ => None,
        }
    }
}

/// A move selects the square at `(row, col)` and eats every square with a
/// row and column at least as large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Move {
    pub row: usize,
    pub col: usize,
}

impl Move {
    pub fn new(row: usize, col: usize) -> Self {
        Move { row, col }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Move {
    fn from((row, col): (usize, usize)) -> Self {
        Move { row, col }
    }
}

/// Immutable snapshot of a Chomp board.
///
/// Equality and hashing are by value over the full grid (including its
/// shape), which makes a `BoardState` usable directly as a playbook key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardState {
    width: usize,
    height: usize,
    /// Row-major cells, `height * width` long
    cells: Vec<Cell>,
}

impl BoardState {
    /// Create a fresh board: every square normal except the poison at `[0, 0]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chomp::chomp::{BoardState, Cell};
    ///
    /// let board = BoardState::new(2, 1).unwrap();
    /// assert_eq!(board.cell(0, 0), Some(Cell::Poison));
    /// assert_eq!(board.cell(0, 1), Some(Cell::Normal));
    /// assert_eq!(board.to_ascii(), "[2] [1] \n");
    /// ```
    pub fn new(width: usize, height: usize) -> Result<Self, crate::Error> {
        if width == 0 || height == 0 {
            return Err(crate::Error::InvalidDimensions { width, height });
        }

        let mut cells = vec![Cell::Normal; width * height];
        cells[0] = Cell::Poison;

        Ok(BoardState {
            width,
            height,
            cells,
        })
    }

    /// Build a board from rows of markers (0, 1, 2).
    ///
    /// Rows must be non-empty and of equal length. The poison placement is not
    /// checked, which lets tests construct arbitrary intermediate positions.
    pub fn from_markers(rows: &[&[u8]]) -> Result<Self, crate::Error> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        if width == 0 || height == 0 {
            return Err(crate::Error::InvalidDimensions { width, height });
        }

        let mut cells = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!("row {r} has {} cells, expected {width}", row.len()),
                });
            }
            for (c, &marker) in row.iter().enumerate() {
                let cell =
                    Cell::from_marker(marker).ok_or_else(|| crate::Error::InvalidConfiguration {
                        message: format!("unknown marker {marker} at ({r}, {c})"),
                    })?;
                cells.push(cell);
            }
        }

        Ok(BoardState {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at `(row, col)`, or `None` when out of bounds
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Iterate over rows as slices, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.cells.chunks(self.width)
    }

    /// Grid of numeric markers, one inner vector per row
    pub fn markers(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|cell| cell.marker()).collect())
            .collect()
    }

    /// Number of squares that can still be eaten
    pub fn normal_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell == Cell::Normal).count()
    }

    /// All legal moves in row-major order.
    ///
    /// Only normal squares are legal; empty and poisoned squares never are.
    pub fn legal_moves(&self) -> Vec<Move> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Normal)
            .map(|(i, _)| Move::new(i / self.width, i % self.width))
            .collect()
    }

    /// A state is terminal when the player to move has nothing left but poison.
    pub fn is_terminal(&self) -> bool {
        !self.cells.contains(&Cell::Normal)
    }

    /// Eat the rectangle below and to the right of `mv`, returning a new state.
    #[must_use = "apply_move returns a new board state; the source state is unchanged"]
    pub fn apply_move(&self, mv: Move) -> Result<BoardState, crate::Error> {
        match self.cell(mv.row, mv.col) {
            None => {
                return Err(crate::Error::MoveOutOfBounds {
                    row: mv.row,
                    col: mv.col,
                    width: self.width,
                    height: self.height,
                });
            }
            Some(Cell::Normal) => {}
            Some(_) => {
                return Err(crate::Error::IllegalMove {
                    row: mv.row,
                    col: mv.col,
                });
            }
        }

        let mut next = self.clone();
        for row in mv.row..self.height {
            let start = row * self.width;
            for cell in &mut next.cells[start + mv.col..start + self.width] {
                *cell = Cell::Empty;
            }
        }
        Ok(next)
    }

    /// Plain text dump, one line per row, each cell as `[marker] `
    pub fn to_ascii(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for cell in row {
                write!(f, "[{}] ", cell.marker())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_has_single_poison_at_origin() {
        let board = BoardState::new(4, 3).unwrap();
        let poison = board
            .rows()
            .flatten()
            .filter(|&&cell| cell == Cell::Poison)
            .count();
        assert_eq!(poison, 1);
        assert_eq!(board.cell(0, 0), Some(Cell::Poison));
        assert_eq!(board.normal_count(), 11);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            BoardState::new(0, 3),
            Err(crate::Error::InvalidDimensions { width: 0, height: 3 })
        ));
        assert!(BoardState::new(3, 0).is_err());
    }

    #[test]
    fn legal_moves_are_row_major_and_skip_poison() {
        let board = BoardState::new(2, 2).unwrap();
        assert_eq!(
            board.legal_moves(),
            vec![Move::new(0, 1), Move::new(1, 0), Move::new(1, 1)]
        );
    }

    #[test]
    fn two_by_one_board_scenario() {
        let board = BoardState::new(2, 1).unwrap();
        assert_eq!(board.markers(), vec![vec![2, 1]]);
        assert_eq!(board.legal_moves(), vec![Move::new(0, 1)]);

        let next = board.apply_move(Move::new(0, 1)).unwrap();
        assert_eq!(next.markers(), vec![vec![2, 0]]);
        assert!(next.is_terminal());
        assert!(next.legal_moves().is_empty());
    }

    #[test]
    fn apply_move_clears_lower_right_rectangle_only() {
        let board = BoardState::new(4, 3).unwrap();
        let next = board.apply_move(Move::new(1, 2)).unwrap();
        assert_eq!(
            next.markers(),
            vec![vec![2, 1, 1, 1], vec![1, 1, 0, 0], vec![1, 1, 0, 0]]
        );
        // source state untouched
        assert_eq!(board.normal_count(), 11);
    }

    #[test]
    fn apply_move_rejects_out_of_bounds_and_non_normal_targets() {
        let board = BoardState::new(2, 2).unwrap();
        assert!(matches!(
            board.apply_move(Move::new(2, 0)),
            Err(crate::Error::MoveOutOfBounds { .. })
        ));
        assert!(matches!(
            board.apply_move(Move::new(0, 0)),
            Err(crate::Error::IllegalMove { row: 0, col: 0 })
        ));

        let eaten = board.apply_move(Move::new(1, 1)).unwrap();
        assert!(matches!(
            eaten.apply_move(Move::new(1, 1)),
            Err(crate::Error::IllegalMove { row: 1, col: 1 })
        ));
    }

    #[test]
    fn ascii_dump_matches_marker_layout() {
        let board = BoardState::new(3, 2)
            .unwrap()
            .apply_move(Move::new(1, 1))
            .unwrap();
        assert_eq!(board.to_ascii(), "[2] [1] [1] \n[1] [0] [0] \n");
    }

    #[test]
    fn from_markers_round_trips_grid() {
        let board = BoardState::from_markers(&[&[2, 1], &[1, 0]]).unwrap();
        assert_eq!(board.width(), 2);
        assert_eq!(board.height(), 2);
        assert_eq!(board.markers(), vec![vec![2, 1], vec![1, 0]]);
        assert!(BoardState::from_markers(&[&[2, 1], &[1]]).is_err());
        assert!(BoardState::from_markers(&[&[2, 7]]).is_err());
    }

    #[test]
    fn equality_includes_shape() {
        let wide = BoardState::from_markers(&[&[2, 1]]).unwrap();
        let tall = BoardState::from_markers(&[&[2], &[1]]).unwrap();
        assert_ne!(wide, tall);
    }
}
