//! Exhaustive minimax over the full game tree.
//!
//! There is no pruning and no memoization: the tree below the empty board has
//! fewer than 550,000 nodes, so every call walks it completely. Ties between
//! equally valued actions go to the first one in row-major order, since
//! `legal_actions` iterates that way and only a strictly better value
//! replaces the current best.

use tracing::debug;

use crate::game::{apply, is_terminal, legal_actions, turn_to_move, utility, Action, Board, Mark};

/// A game-theoretic value together with the action that achieves it.
/// The action is `None` only for terminal boards.
pub type Evaluation = (i32, Option<Action>);

/// Value of `board` when X (the maximizer) is to move.
pub fn best_for_maximizer(board: &Board) -> Evaluation {
    if is_terminal(board) {
        return (utility(board), None);
    }

    let mut best_value = i32::MIN;
    let mut best_action = None;
    for (action, next) in successors(board) {
        let (value, _) = best_for_minimizer(&next);
        if value > best_value {
            best_value = value;
            best_action = Some(action);
        }
    }
    (best_value, best_action)
}

/// Value of `board` when O (the minimizer) is to move.
pub fn best_for_minimizer(board: &Board) -> Evaluation {
    if is_terminal(board) {
        return (utility(board), None);
    }

    let mut best_value = i32::MAX;
    let mut best_action = None;
    for (action, next) in successors(board) {
        let (value, _) = best_for_maximizer(&next);
        if value < best_value {
            best_value = value;
            best_action = Some(action);
        }
    }
    (best_value, best_action)
}

/// Evaluates `board` from the point of view of whoever is to move.
pub fn solve(board: &Board) -> Evaluation {
    match turn_to_move(board) {
        Mark::X => best_for_maximizer(board),
        Mark::O => best_for_minimizer(board),
    }
}

/// The optimal action for the player to move.
///
/// Callers must check `is_terminal` first: a finished board has no action and
/// yields `None`.
pub fn minimax(board: &Board) -> Option<Action> {
    let (value, action) = solve(board);
    debug!(
        mover = %turn_to_move(board),
        value,
        action = ?action,
        "minimax search finished"
    );
    action
}

fn successors(board: &Board) -> impl Iterator<Item = (Action, Board)> + '_ {
    legal_actions(board)
        .into_iter()
        .filter_map(move |action| apply(board, action).ok().map(|next| (action, next)))
}
