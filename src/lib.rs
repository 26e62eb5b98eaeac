//! Tic-tac-toe solved by exhaustive minimax.
//!
//! [`game`] holds the board model and the rules, [`search`] the minimax
//! procedure built on top of them. [`player`] and [`play`] are the pieces a
//! driver needs to run games between humans and engines.
//!
//! ```
//! use tictactoe::{apply, initial_state, is_terminal, minimax, utility};
//!
//! let mut board = initial_state();
//! while !is_terminal(&board) {
//!     let action = minimax(&board).unwrap();
//!     board = apply(&board, action).unwrap();
//! }
//! assert_eq!(utility(&board), 0);
//! ```

pub mod error;
pub mod game;
pub mod play;
pub mod player;
pub mod search;

pub use error::{Error, Result};
pub use game::{
    apply, initial_state, is_terminal, legal_actions, turn_to_move, utility, winner, Action,
    Actions, Board, Cell, Mark,
};
pub use play::{Game, Outcome, Tally};
pub use player::{HumanPlayer, MinimaxPlayer, Player, RandomPlayer};
pub use search::{best_for_maximizer, best_for_minimizer, minimax, solve, Evaluation};
