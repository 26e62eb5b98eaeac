use std::fmt;

use colored::{ColoredString, Colorize};
use tracing::info;

use crate::{
    error::Result,
    game::{apply, initial_state, is_terminal, turn_to_move, winner, Action, Board, Mark},
    player::Player,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark),
    Draw,
}

impl Outcome {
    /// The outcome of a finished board, or `None` while play continues.
    pub fn of(board: &Board) -> Option<Self> {
        match winner(board) {
            Some(mark) => Some(Outcome::Win(mark)),
            None if is_terminal(board) => Some(Outcome::Draw),
            None => None,
        }
    }

    fn colored(&self) -> ColoredString {
        let text = self.to_string();
        match self {
            Outcome::Win(Mark::X) => text.as_str().green(),
            Outcome::Win(Mark::O) => text.as_str().blue(),
            Outcome::Draw => text.as_str().yellow(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win(mark) => write!(f, "Player {} wins!", mark),
            Outcome::Draw => write!(f, "It's a draw!"),
        }
    }
}

// ##############################
// # Game
// ##############################

/// Alternates two players from the empty board until the game is over.
/// A `Game` can be played repeatedly; each call to `play` starts afresh.
pub struct Game {
    player_x: Box<dyn Player>,
    player_o: Box<dyn Player>,
    board: Board,
    history: Vec<Action>,
    verbose: bool,
}

impl Game {
    pub fn new(player_x: Box<dyn Player>, player_o: Box<dyn Player>) -> Self {
        Game {
            player_x,
            player_o,
            board: initial_state(),
            history: Vec::new(),
            verbose: false,
        }
    }

    /// Print the board and every move to stdout.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn history(&self) -> &[Action] {
        &self.history
    }

    pub fn play(&mut self) -> Result<Outcome> {
        self.board = initial_state();
        self.history.clear();

        loop {
            if let Some(outcome) = Outcome::of(&self.board) {
                info!(%outcome, moves = self.history.len(), "game over");
                if self.verbose {
                    println!("{}", self.board);
                    println!("{}", outcome.colored());
                }
                return Ok(outcome);
            }

            if self.verbose {
                println!("{}", self.board);
            }

            let mover = turn_to_move(&self.board);
            let player = match mover {
                Mark::X => &mut self.player_x,
                Mark::O => &mut self.player_o,
            };

            let action = player.choose(&self.board)?;
            self.board = apply(&self.board, action)?;
            self.history.push(action);

            if self.verbose {
                println!("Player {} ({}) chose {}", mover, player.name(), action);
            }
        }
    }
}

// ##############################
// # Tally
// ##############################

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
}

impl Tally {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win(Mark::X) => self.x_wins += 1,
            Outcome::Win(Mark::O) => self.o_wins += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player X: {} | Player O: {} | Draws: {}",
            self.x_wins.to_string().as_str().green(),
            self.o_wins.to_string().as_str().blue(),
            self.draws.to_string().as_str().yellow()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        game::legal_actions,
        player::{MinimaxPlayer, RandomPlayer},
    };

    /// Plays a fixed list of moves, then whatever is left in row-major order.
    struct ScriptedPlayer {
        moves: Vec<Action>,
    }

    impl Player for ScriptedPlayer {
        fn name(&self) -> &str {
            "scripted"
        }

        fn choose(&mut self, board: &Board) -> Result<Action> {
            if self.moves.is_empty() {
                return legal_actions(board).iter().next().ok_or(Error::GameOver);
            }
            Ok(self.moves.remove(0))
        }
    }

    #[test]
    fn test_outcome_of() {
        assert_eq!(Outcome::of(&initial_state()), None);
        assert_eq!(
            Outcome::of(&"XXX/OO_/___".parse().unwrap()),
            Some(Outcome::Win(Mark::X))
        );
        assert_eq!(
            Outcome::of(&"XOX/XOO/OXX".parse().unwrap()),
            Some(Outcome::Draw)
        );
    }

    #[test]
    fn test_minimax_self_play_draws() {
        let mut game = Game::new(Box::new(MinimaxPlayer::new()), Box::new(MinimaxPlayer::new()));
        assert_eq!(game.play().unwrap(), Outcome::Draw);
        assert_eq!(game.history().len(), 9);
        assert!(is_terminal(game.board()));

        // replaying gives the same game
        let first = game.history().to_vec();
        game.play().unwrap();
        assert_eq!(game.history(), first.as_slice());
    }

    #[test]
    fn test_scripted_win() {
        let x = ScriptedPlayer {
            moves: vec![Action::new(0, 0), Action::new(0, 1), Action::new(0, 2)],
        };
        let o = ScriptedPlayer {
            moves: vec![Action::new(1, 0), Action::new(1, 1)],
        };
        let mut game = Game::new(Box::new(x), Box::new(o));
        assert_eq!(game.play().unwrap(), Outcome::Win(Mark::X));
        assert_eq!(game.history().len(), 5);
    }

    #[test]
    fn test_illegal_move_is_an_error() {
        let x = ScriptedPlayer {
            moves: vec![Action::new(1, 1)],
        };
        let o = ScriptedPlayer {
            moves: vec![Action::new(1, 1)],
        };
        let mut game = Game::new(Box::new(x), Box::new(o));
        assert!(matches!(
            game.play(),
            Err(Error::InvalidAction { row: 1, col: 1 })
        ));
    }

    #[test]
    fn test_minimax_beats_or_draws_random() {
        let mut tally = Tally::default();
        let mut game = Game::new(Box::new(RandomPlayer::seeded(3)), Box::new(MinimaxPlayer::new()));
        for _ in 0..5 {
            tally.record(game.play().unwrap());
        }
        assert_eq!(tally.games(), 5);
        assert_eq!(tally.x_wins, 0);
    }

    #[test]
    fn test_tally_counts() {
        let mut tally = Tally::default();
        tally.record(Outcome::Win(Mark::X));
        tally.record(Outcome::Draw);
        tally.record(Outcome::Draw);
        assert_eq!(
            tally,
            Tally {
                x_wins: 1,
                o_wins: 0,
                draws: 2
            }
        );
        assert_eq!(tally.games(), 3);
    }
}
