//! Plain-text renderings for terminals

use crate::learner::MoveTable;

/// Render a move table as a fixed-width grid.
///
/// Moves show their weight with two decimals. Squares that are not moves
/// show `--`.
///
/// ```
/// use chomp::{chomp::BoardState, export::heatmap_text, learner::MoveTable};
///
/// let table = MoveTable::new(BoardState::new(2, 1).unwrap());
/// assert_eq!(heatmap_text(&table), "   --  1.00\n");
/// ```
pub fn heatmap_text(table: &MoveTable) -> String {
    let mut out = String::new();
    for row in table.heatmap() {
        let line: Vec<String> = row
            .iter()
            .map(|cell| match cell {
                Some(weight) => format!("{weight:>5.2}"),
                None => format!("{:>5}", "--"),
            })
            .collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
