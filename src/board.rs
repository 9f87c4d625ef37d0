//! The game grid, gravity drops and win detection

use anyhow::{anyhow, Result};

use crate::{error::MoveError, CONNECT, HEIGHT, WIDTH};

/// Grid of cells indexed `[column][row]`, row 0 being the top of the board
pub type Positions = [[Cell; HEIGHT]; WIDTH];

/// Positional weights indexed `[column][row]`, the number of lines of four
/// passing through each cell
pub const WEIGHTS: [[i32; HEIGHT]; WIDTH] = [
    [3, 4, 5, 5, 4, 3],
    [4, 6, 8, 8, 6, 4],
    [5, 8, 11, 11, 8, 5],
    [7, 10, 13, 13, 10, 7],
    [5, 8, 11, 11, 8, 5],
    [4, 6, 8, 8, 6, 4],
    [3, 4, 5, 5, 4, 3],
];

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    /// The opposing player
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// The player's number, 1 or 2, as shown to users
    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.number() as usize - 1
    }
}

/// Content of a single grid cell
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        match player {
            Player::One => Cell::PlayerOne,
            Player::Two => Cell::PlayerTwo,
        }
    }
}

/// Endpoints of a line of four, as `(column, row)` pairs in scan order
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct WinningLine {
    pub start: (usize, usize),
    pub end: (usize, usize),
}

impl WinningLine {
    /// All cells of the line from `start` to `end`
    pub fn cells(&self) -> [(usize, usize); CONNECT] {
        let step = |from: usize, to: usize| (to as isize - from as isize).signum();
        let (dx, dy) = (
            step(self.start.0, self.end.0),
            step(self.start.1, self.end.1),
        );
        let mut cells = [self.start; CONNECT];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = (
                (self.start.0 as isize + dx * i as isize) as usize,
                (self.start.1 as isize + dy * i as isize) as usize,
            );
        }
        cells
    }

    pub fn contains(&self, column: usize, row: usize) -> bool {
        self.cells().contains(&(column, row))
    }
}

/// Start cell and step of every possible line of four, in scan order:
/// vertical, horizontal, diagonal down-right, diagonal up-right
fn lines() -> impl Iterator<Item = ((usize, usize), (isize, isize))> {
    let vertical = (0..WIDTH)
        .flat_map(|column| (0..=HEIGHT - CONNECT).map(move |row| ((column, row), (0, 1))));
    let horizontal = (0..HEIGHT)
        .flat_map(|row| (0..=WIDTH - CONNECT).map(move |column| ((column, row), (1, 0))));
    let down_right = (0..=HEIGHT - CONNECT)
        .flat_map(|row| (0..=WIDTH - CONNECT).map(move |column| ((column, row), (1, 1))));
    let up_right = (CONNECT - 1..HEIGHT)
        .flat_map(|row| (0..=WIDTH - CONNECT).map(move |column| ((column, row), (1, -1))));

    vertical.chain(horizontal).chain(down_right).chain(up_right)
}

/// A 7x6 Connect 4 grid, copied by value for every simulated move
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Board {
    positions: Positions,
}

impl Board {
    /// Creates an empty board
    pub fn new() -> Self {
        Self {
            positions: [[Cell::Empty; HEIGHT]; WIDTH],
        }
    }

    /// Creates a board holding a copy of the given grid
    pub fn from_positions(positions: Positions) -> Self {
        Self { positions }
    }

    /// Creates a board from a string of one-indexed column digits, played
    /// alternately starting with player one
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut player = Player::One;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    board.drop_checked(column - 1, player)?;
                    player = player.other();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    /// A copy of the grid
    pub fn positions(&self) -> Positions {
        self.positions
    }

    /// The cell at `column`, `row`, row 0 being the top
    pub fn cell(&self, column: usize, row: usize) -> Cell {
        self.positions[column][row]
    }

    /// Empties the board
    pub fn reset(&mut self) {
        self.positions = [[Cell::Empty; HEIGHT]; WIDTH];
    }

    pub fn playable(&self, column: usize) -> bool {
        column < WIDTH && self.positions[column][0].is_empty()
    }

    /// Drops a token of `player` into `column`, returning the row it landed in
    ///
    /// # Panics
    /// Panics if the column is out of range or full. Callers pick columns
    /// from [`possible_drops`](Board::possible_drops).
    pub fn drop(&mut self, column: usize, player: Player) -> usize {
        match self.drop_checked(column, player) {
            Ok(row) => row,
            Err(err) => panic!("invalid drop: {}", err),
        }
    }

    /// Drops a token of `player` into `column`, leaving the board untouched
    /// if the column is out of range or full
    pub fn drop_checked(&mut self, column: usize, player: Player) -> Result<usize, MoveError> {
        if column >= WIDTH {
            return Err(MoveError::ColumnOutOfRange { column });
        }
        // the lowest empty cell sits directly above the first occupied one
        let row = match self.positions[column].iter().position(|cell| !cell.is_empty()) {
            Some(0) => return Err(MoveError::ColumnFull { column }),
            Some(occupied) => occupied - 1,
            None => HEIGHT - 1,
        };
        self.positions[column][row] = player.into();
        Ok(row)
    }

    /// Columns with room for another token, left to right
    pub fn possible_drops(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.playable(column)).collect()
    }

    pub fn is_full(&self) -> bool {
        !(0..WIDTH).any(|column| self.playable(column))
    }

    /// Whether `player` has four aligned tokens anywhere on the board
    pub fn is_winner(&self, player: Player) -> bool {
        self.winning_line(player).is_some()
    }

    /// Whether the board is full or `player` has won. Only the given
    /// player's lines are checked.
    pub fn is_game_over(&self, player: Player) -> bool {
        self.is_full() || self.is_winner(player)
    }

    /// The first line of four for `player`, scanning vertical, horizontal,
    /// diagonal down-right then diagonal up-right
    pub fn winning_line(&self, player: Player) -> Option<WinningLine> {
        let cell = Cell::from(player);
        lines()
            .find(|&((column, row), (dx, dy))| {
                (0..CONNECT as isize).all(|i| {
                    let x = (column as isize + dx * i) as usize;
                    let y = (row as isize + dy * i) as usize;
                    self.positions[x][y] == cell
                })
            })
            .map(|((column, row), (dx, dy))| {
                let last = CONNECT as isize - 1;
                WinningLine {
                    start: (column, row),
                    end: (
                        (column as isize + dx * last) as usize,
                        (row as isize + dy * last) as usize,
                    ),
                }
            })
    }

    /// Static score of the position from `player`'s point of view
    ///
    /// A won position scores `win_score + depth_remaining` so quicker wins
    /// rank higher. A lost position scores `loss_score` however soon the
    /// loss comes. Otherwise the score is the sum of [`WEIGHTS`] over the
    /// cells `player` occupies.
    pub fn eval(&self, player: Player, win_score: i32, loss_score: i32, depth_remaining: usize) -> i32 {
        if self.is_winner(player) {
            return win_score + depth_remaining as i32;
        }
        if self.is_winner(player.other()) {
            return loss_score;
        }

        let cell = Cell::from(player);
        self.positions
            .iter()
            .zip(WEIGHTS.iter())
            .flat_map(|(cells, weights)| cells.iter().zip(weights.iter()))
            .filter(|(occupant, _)| **occupant == cell)
            .map(|(_, weight)| weight)
            .sum()
    }

    /// Number of tokens on the board
    pub fn num_moves(&self) -> usize {
        self.positions
            .iter()
            .flat_map(|column| column.iter())
            .filter(|cell| !cell.is_empty())
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
