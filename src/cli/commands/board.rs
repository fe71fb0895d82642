//! Board command - print a board after a sequence of moves

use anyhow::{Context, Result, anyhow};
use clap::Parser;

use crate::chomp::{BoardState, Move};

#[derive(Parser, Debug)]
#[command(about = "Print a board and its legal moves")]
pub struct BoardArgs {
    /// Board width (columns)
    #[arg(long, short = 'W', default_value_t = 4)]
    pub width: usize,

    /// Board height (rows)
    #[arg(long, short = 'H', default_value_t = 3)]
    pub height: usize,

    /// Moves to apply in order, each as row,col
    #[arg(long, short = 'm', num_args = 1..)]
    pub moves: Vec<String>,
}

pub(crate) fn parse_move(raw: &str) -> Result<Move> {
    let (row, col) = raw
        .split_once(',')
        .ok_or_else(|| anyhow!("Invalid move '{raw}' (expected row,col)"))?;
    let row = row
        .trim()
        .parse()
        .with_context(|| format!("Invalid row in move '{raw}'"))?;
    let col = col
        .trim()
        .parse()
        .with_context(|| format!("Invalid column in move '{raw}'"))?;
    Ok(Move::new(row, col))
}

/// Apply the requested moves to a fresh board
pub(crate) fn replay(args: &BoardArgs) -> Result<BoardState> {
    let mut state = BoardState::new(args.width, args.height)?;
    for (index, raw) in args.moves.iter().enumerate() {
        let mv = parse_move(raw)?;
        state = state
            .apply_move(mv)
            .with_context(|| format!("Move {} ({mv}) cannot be played", index + 1))?;
    }
    Ok(state)
}

pub fn execute(args: BoardArgs) -> Result<()> {
    let state = replay(&args)?;
    print!("{state}");

    let moves = state.legal_moves();
    if moves.is_empty() {
        println!("No legal moves: the player to move loses.");
    } else {
        let listed: Vec<String> = moves.iter().map(Move::to_string).collect();
        println!("Legal moves: {}", listed.join(" "));
    }
    Ok(())
}
