use std::{fmt, iter, str::FromStr};

use flagset::{flags, FlagSet};

use crate::error::{Error, Result};

// #############################
// #                           #
// #      Fixed Constants      #
// #                           #
// #############################
pub const BOARD_SIZE: usize = 3;
pub const BOARD_SIZE_SQUARED: usize = BOARD_SIZE * BOARD_SIZE;

// Checked in this order by `winner`
const WINNING_LINES: [[(usize, usize); BOARD_SIZE]; 8] = [
    [(0, 0), (0, 1), (0, 2)], // rows
    [(1, 0), (1, 1), (1, 2)],
    [(2, 0), (2, 1), (2, 2)],
    [(0, 0), (1, 0), (2, 0)], // columns
    [(0, 1), (1, 1), (2, 1)],
    [(0, 2), (1, 2), (2, 2)],
    [(0, 0), (1, 1), (2, 2)], // diagonals
    [(0, 2), (1, 1), (2, 0)],
];

// #############################
// #                           #
// #        Mark / Cell        #
// #                           #
// #############################

/// One of the two players. `X` always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn to_char(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }

    pub fn other(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '_',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '_' | '.' | '-' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    pub fn mark(self) -> Option<Mark> {
        match self {
            Cell::Empty => None,
            Cell::X => Some(Mark::X),
            Cell::O => Some(Mark::O),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

impl From<Mark> for Cell {
    fn from(mark: Mark) -> Self {
        match mark {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

// #############################
// #                           #
// #          Action           #
// #                           #
// #############################

/// A `(row, col)` coordinate. Only meaningful relative to a specific board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub const fn new(row: usize, col: usize) -> Self {
        Action { row, col }
    }

    /// Builds the action for a row-major cell index in `0..9`.
    pub fn from_index(index: usize) -> Option<Self> {
        (index < BOARD_SIZE_SQUARED).then(|| Action::new(index / BOARD_SIZE, index % BOARD_SIZE))
    }

    pub fn index(self) -> usize {
        self.row * BOARD_SIZE + self.col
    }

    pub fn is_on_board(self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    fn square(self) -> Option<Square> {
        if !self.is_on_board() {
            return None;
        }
        Some(SQUARES[self.index()])
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Action::new(row, col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

// #############################
// #                           #
// #         Actions           #
// #                           #
// #############################

flags! {
    /// The nine squares, declared row-major. Declaration order is the
    /// iteration order of `Actions`.
    pub enum Square: u16 {
        TopLeft,
        TopCenter,
        TopRight,
        MiddleLeft,
        Center,
        MiddleRight,
        BottomLeft,
        BottomCenter,
        BottomRight,
    }
}

const SQUARES: [Square; BOARD_SIZE_SQUARED] = [
    Square::TopLeft,
    Square::TopCenter,
    Square::TopRight,
    Square::MiddleLeft,
    Square::Center,
    Square::MiddleRight,
    Square::BottomLeft,
    Square::BottomCenter,
    Square::BottomRight,
];

impl Square {
    fn action(self) -> Action {
        let (row, col) = match self {
            Square::TopLeft => (0, 0),
            Square::TopCenter => (0, 1),
            Square::TopRight => (0, 2),
            Square::MiddleLeft => (1, 0),
            Square::Center => (1, 1),
            Square::MiddleRight => (1, 2),
            Square::BottomLeft => (2, 0),
            Square::BottomCenter => (2, 1),
            Square::BottomRight => (2, 2),
        };
        Action::new(row, col)
    }
}

/// A set of actions. Iterates in row-major order, (0, 0) first and (2, 2)
/// last, which is what makes minimax tie-breaking reproducible.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Actions(FlagSet<Square>);

impl Actions {
    pub fn contains(&self, action: Action) -> bool {
        action
            .square()
            .map_or(false, |square| self.0.contains(square))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.into_iter().count()
    }

    pub fn iter(&self) -> ActionsIter {
        self.into_iter()
    }

    /// Returns a copy of this set with `action` removed.
    pub fn without(self, action: Action) -> Self {
        match action.square() {
            Some(square) => Actions(self.0 - square),
            None => self,
        }
    }

    fn insert(&mut self, square: Square) {
        self.0 |= square;
    }
}

pub type ActionsIter = iter::Map<<FlagSet<Square> as IntoIterator>::IntoIter, fn(Square) -> Action>;

impl IntoIterator for Actions {
    type Item = Action;
    type IntoIter = ActionsIter;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter().map(Square::action as fn(Square) -> Action)
    }
}

impl<'a> IntoIterator for &'a Actions {
    type Item = Action;
    type IntoIter = ActionsIter;

    fn into_iter(self) -> Self::IntoIter {
        (*self).into_iter()
    }
}

impl FromIterator<Action> for Actions {
    /// Off-board actions are dropped.
    fn from_iter<I: IntoIterator<Item = Action>>(iter: I) -> Self {
        let mut actions = Actions::default();
        for square in iter.into_iter().filter_map(Action::square) {
            actions.insert(square);
        }
        actions
    }
}

// #############################
// #                           #
// #           Board           #
// #                           #
// #############################

/// A 3x3 grid. Boards are plain values: every transition produces a new one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    pub const fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Builds a board from rows of cells, rejecting anything that is not 3x3.
    pub fn from_rows(rows: &[Vec<Cell>]) -> Result<Self> {
        if rows.len() != BOARD_SIZE {
            return Err(Error::invalid_state(format!(
                "expected {} rows, got {}",
                BOARD_SIZE,
                rows.len()
            )));
        }

        let mut board = Board::new();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != BOARD_SIZE {
                return Err(Error::invalid_state(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    BOARD_SIZE
                )));
            }
            board.cells[i].copy_from_slice(row);
        }
        Ok(board)
    }

    pub fn get(&self, action: Action) -> Option<Cell> {
        action
            .is_on_board()
            .then(|| self.cells[action.row][action.col])
    }

    pub fn rows(&self) -> &[[Cell; BOARD_SIZE]; BOARD_SIZE] {
        &self.cells
    }

    /// Every cell with its coordinate, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (Action, Cell)> + '_ {
        (0..BOARD_SIZE_SQUARED).map(move |index| {
            let action = Action::new(index / BOARD_SIZE, index % BOARD_SIZE);
            (action, self.cells[action.row][action.col])
        })
    }

    pub fn count(&self, cell: Cell) -> usize {
        self.cells().filter(|&(_, c)| c == cell).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells().all(|(_, cell)| !cell.is_empty())
    }

    /// Whether the mark counts are consistent with alternating play from the
    /// empty board, X first.
    pub fn is_reachable(&self) -> bool {
        let x = self.count(Cell::X);
        let o = self.count(Cell::O);
        x == o || x == o + 1
    }

    fn with(mut self, action: Action, cell: Cell) -> Self {
        self.cells[action.row][action.col] = cell;
        self
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.cells.iter() {
            for cell in row {
                write!(f, "{}", cell.to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = Error;

    /// Parses nine cell characters. `/` and whitespace are ignored, so both
    /// `"XO_/_X_/__O"` and the `Display` output are accepted.
    fn from_str(s: &str) -> Result<Self> {
        let cells = s
            .chars()
            .filter(|c| *c != '/' && !c.is_whitespace())
            .map(|c| {
                Cell::from_char(c)
                    .ok_or_else(|| Error::invalid_state(format!("unknown cell character '{}'", c)))
            })
            .collect::<Result<Vec<_>>>()?;

        if cells.len() != BOARD_SIZE_SQUARED {
            return Err(Error::invalid_state(format!(
                "expected {} cells, got {}",
                BOARD_SIZE_SQUARED,
                cells.len()
            )));
        }

        let rows: Vec<Vec<Cell>> = cells.chunks(BOARD_SIZE).map(<[Cell]>::to_vec).collect();
        Board::from_rows(&rows)
    }
}

// #############################
// #                           #
// #          Rules            #
// #                           #
// #############################

/// The all-empty starting board.
pub fn initial_state() -> Board {
    Board::new()
}

/// `O` if X has placed more marks than O, otherwise `X`.
pub fn turn_to_move(board: &Board) -> Mark {
    if board.count(Cell::X) > board.count(Cell::O) {
        Mark::O
    } else {
        Mark::X
    }
}

/// Every empty cell. Does not look at whether the game is already won.
pub fn legal_actions(board: &Board) -> Actions {
    board
        .cells()
        .filter(|(_, cell)| cell.is_empty())
        .map(|(action, _)| action)
        .collect()
}

/// Places the mark of the player to move at `action` and returns the new
/// board. `board` itself is never modified.
pub fn apply(board: &Board, action: Action) -> Result<Board> {
    if !legal_actions(board).contains(action) {
        return Err(Error::InvalidAction {
            row: action.row,
            col: action.col,
        });
    }
    Ok(board.with(action, turn_to_move(board).into()))
}

/// The owner of the first complete line: rows, then columns, then diagonals.
pub fn winner(board: &Board) -> Option<Mark> {
    WINNING_LINES.into_iter().find_map(|line| {
        let [a, b, c] = line.map(|(row, col)| board.cells[row][col]);
        match a.mark() {
            Some(mark) if a == b && b == c => Some(mark),
            _ => None,
        }
    })
}

pub fn is_terminal(board: &Board) -> bool {
    board.is_full() || winner(board).is_some()
}

/// `1` if X has won, `-1` if O has won, `0` otherwise.
pub fn utility(board: &Board) -> i32 {
    match winner(board) {
        Some(Mark::X) => 1,
        Some(Mark::O) => -1,
        None => 0,
    }
}
