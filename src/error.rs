//! Error types for the tictactoe crate

use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid action: ({row}, {col}) is not a legal move on this board")]
    InvalidAction { row: usize, col: usize },

    #[error("invalid board: {reason}")]
    InvalidState { reason: String },

    #[error("game already over")]
    GameOver,

    #[error("input closed before a move was entered")]
    InputClosed,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_state(reason: impl Into<String>) -> Self {
        Error::InvalidState {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
