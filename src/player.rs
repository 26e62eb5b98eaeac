use std::io::{self, BufRead, Write};

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::trace;

use crate::{
    error::{Error, Result},
    game::{is_terminal, legal_actions, turn_to_move, Action, Board, BOARD_SIZE},
    search::minimax,
};

pub trait Player {
    fn name(&self) -> &str;

    /// Picks an action for the player to move on `board`.
    fn choose(&mut self, board: &Board) -> Result<Action>;
}

// ##############################
// # MinimaxPlayer
// ##############################

/// Always plays the minimax action.
#[derive(Clone, Debug, Default)]
pub struct MinimaxPlayer;

impl MinimaxPlayer {
    pub fn new() -> Self {
        MinimaxPlayer
    }
}

impl Player for MinimaxPlayer {
    fn name(&self) -> &str {
        "minimax"
    }

    fn choose(&mut self, board: &Board) -> Result<Action> {
        if is_terminal(board) {
            return Err(Error::GameOver);
        }
        minimax(board).ok_or(Error::GameOver)
    }
}

// ##############################
// # RandomPlayer
// ##############################

#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        RandomPlayer {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        RandomPlayer {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn choose(&mut self, board: &Board) -> Result<Action> {
        if is_terminal(board) {
            return Err(Error::GameOver);
        }

        let possible_moves: Vec<Action> = legal_actions(board).into_iter().collect();
        let action = possible_moves[self.rng.gen_range(0..possible_moves.len())];
        trace!(%action, options = possible_moves.len(), "random player chose");
        Ok(action)
    }
}

// ##############################
// # HumanPlayer
// ##############################

/// Reads moves from a line-based input.
///
/// Accepts either `row col` (both 1 to 3) or a single keypad number 1 to 9
/// counted row-major from the top left.
pub struct HumanPlayer<R, W> {
    input: R,
    output: W,
}

impl HumanPlayer<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        HumanPlayer::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        HumanPlayer { input, output }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn name(&self) -> &str {
        "human"
    }

    fn choose(&mut self, board: &Board) -> Result<Action> {
        if is_terminal(board) {
            return Err(Error::GameOver);
        }

        let possible_moves = legal_actions(board);
        let mut input = String::new();
        loop {
            write!(
                self.output,
                "{}Enter your move as {} (row col, or 1-9): ",
                board,
                turn_to_move(board)
            )?;
            self.output.flush()?;

            input.clear();
            if self.input.read_line(&mut input)? == 0 {
                return Err(Error::InputClosed);
            }

            match parse_action(&input) {
                Some(action) if possible_moves.contains(action) => return Ok(action),
                _ => writeln!(self.output, "Invalid move!")?,
            }
        }
    }
}

/// Parses `"row col"` (1-based) or a single keypad index `1..=9`.
pub fn parse_action(input: &str) -> Option<Action> {
    let numbers = input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<usize>().ok())
        .collect::<Option<Vec<_>>>()?;

    match numbers.as_slice() {
        [index] if (1..=BOARD_SIZE * BOARD_SIZE).contains(index) => Action::from_index(index - 1),
        [row, col] if (1..=BOARD_SIZE).contains(row) && (1..=BOARD_SIZE).contains(col) => {
            Some(Action::new(row - 1, col - 1))
        }
        _ => None,
    }
}
