//! An agent choosing moves by depth-limited minimax with alpha-beta pruning

use log::{debug, trace};
use rayon::prelude::*;
use static_assertions::*;

use crate::{
    board::{Board, Player},
    error::EngineError,
    HEIGHT, WIDTH,
};

/// Score of a won position before the depth bonus
pub const WIN_SCORE: i32 = 5000;
/// Score of a lost position
pub const LOSS_SCORE: i32 = -5000;
/// Lower bound of the initial search window
pub const INITIAL_ALPHA: i32 = -10000;
/// Upper bound of the initial search window
pub const INITIAL_BETA: i32 = 10000;

// a win found with every ply still to go must stay inside the window
const_assert!(WIN_SCORE + ((WIDTH * HEIGHT) as i32) < INITIAL_BETA);
const_assert!(LOSS_SCORE > INITIAL_ALPHA);

/// How the root of the game tree is explored
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SearchMode {
    /// Plain recursive search, the window tightens across root moves
    Sequential,
    /// One worker per root move, each searching with the full initial window
    RootParallel,
}

impl Default for SearchMode {
    fn default() -> Self {
        SearchMode::Sequential
    }
}

/// The result of a search
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Decision {
    /// The zero-indexed column to play
    pub column: usize,
    /// The backed-up minimax value from the engine player's point of view
    pub score: i32,
    /// The number of positions visited (for diagnostics only)
    pub node_count: usize,
}

/// Bookkeeping for a single search
#[derive(Default)]
struct Search {
    node_count: usize,
    best_move: Option<usize>,
}

/// An agent playing for one player at a fixed search depth
///
/// # Position Scoring
/// Positions are scored from the engine player's point of view. A position
/// won by the engine player scores [`WIN_SCORE`] plus the depth still left to
/// search, so among forced wins the quickest one is preferred. A lost
/// position scores [`LOSS_SCORE`] regardless of how close the loss is. Any
/// other position at the search horizon gets the positional score of
/// [`Board::eval`].
#[derive(Copy, Clone, Debug)]
pub struct Engine {
    depth: usize,
    player: Player,
    mode: SearchMode,
}

impl Engine {
    /// Creates a sequential engine searching `depth` plies ahead for `player`
    pub fn new(depth: usize, player: Player) -> Result<Self, EngineError> {
        if depth == 0 {
            return Err(EngineError::InvalidDepth { depth });
        }
        Ok(Self {
            depth,
            player,
            mode: SearchMode::Sequential,
        })
    }

    /// Switches an existing `Engine` to another search mode
    pub fn with_search_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn search_mode(&self) -> SearchMode {
        self.mode
    }

    /// Picks a column for the engine player
    ///
    /// Columns are explored left to right and a later column only replaces
    /// the current best on a strictly greater score, so ties go to the
    /// leftmost column in both search modes. The board is never modified.
    pub fn decide(&self, board: &Board) -> Result<Decision, EngineError> {
        if board.is_full() {
            return Err(EngineError::NoLegalMove);
        }

        let decision = match self.mode {
            SearchMode::Sequential => self.sequential_search(board),
            SearchMode::RootParallel => self.parallel_search(board),
        };
        debug!(
            "player {} depth {} ({:?}): column {}, score {}, {} nodes",
            self.player.number(),
            self.depth,
            self.mode,
            decision.column,
            decision.score,
            decision.node_count
        );
        Ok(decision)
    }

    fn sequential_search(&self, board: &Board) -> Decision {
        let mut search = Search::default();
        let score = self.max_value(board, self.depth, INITIAL_ALPHA, INITIAL_BETA, &mut search);

        // the root stops early without trying a move when the opponent has
        // already won, fall back to the leftmost legal column
        let column = search
            .best_move
            .or_else(|| board.possible_drops().first().copied())
            .unwrap_or(WIDTH);

        Decision {
            column,
            score,
            node_count: search.node_count,
        }
    }

    fn parallel_search(&self, board: &Board) -> Decision {
        if self.is_max_terminal(board, self.depth) {
            return self.sequential_search(board);
        }

        // each worker owns the slot of its column, collected in column order
        let slots: Vec<(usize, i32, usize)> = board
            .possible_drops()
            .into_par_iter()
            .map(|column| {
                let mut next = *board;
                next.drop(column, self.player);

                let mut search = Search::default();
                let score =
                    self.min_value(&next, self.depth - 1, INITIAL_ALPHA, INITIAL_BETA, &mut search);
                (column, score, search.node_count)
            })
            .collect();

        let mut decision = Decision {
            column: WIDTH,
            score: INITIAL_ALPHA,
            node_count: 1,
        };
        for &(column, score, node_count) in slots.iter() {
            trace!("root column {}: score {}", column, score);
            decision.node_count += node_count;
            // strictly greater keeps the lowest column among equal scores
            if score > decision.score {
                decision.column = column;
                decision.score = score;
            }
        }
        decision
    }

    /// Whether a node with the engine player to move ends the search
    ///
    /// Only the opponent can have just completed a line here, the engine
    /// player's own wins are caught one ply earlier by `min_value`.
    fn is_max_terminal(&self, board: &Board, depth_to_go: usize) -> bool {
        depth_to_go == 0 || board.is_game_over(self.player.other())
    }

    fn is_min_terminal(&self, board: &Board, depth_to_go: usize) -> bool {
        depth_to_go == 0 || board.is_game_over(self.player)
    }

    fn eval(&self, board: &Board, depth_to_go: usize) -> i32 {
        board.eval(self.player, WIN_SCORE, LOSS_SCORE, depth_to_go)
    }

    /// Value of a position with the engine player to move
    fn max_value(
        &self,
        board: &Board,
        depth_to_go: usize,
        mut alpha: i32,
        beta: i32,
        search: &mut Search,
    ) -> i32 {
        search.node_count += 1;

        if self.is_max_terminal(board, depth_to_go) {
            return self.eval(board, depth_to_go);
        }

        let is_root = depth_to_go == self.depth;
        // below the root the engine player's lines end the search in min_value
        debug_assert!(is_root || !board.is_winner(self.player));

        let mut score = INITIAL_ALPHA;
        for column in board.possible_drops() {
            let mut next = *board;
            next.drop(column, self.player);

            let s = self.min_value(&next, depth_to_go - 1, alpha, beta, search);
            if is_root {
                trace!("root column {}: score {}", column, s);
            }
            if s > score {
                score = s;
                if is_root {
                    search.best_move = Some(column);
                }
            }
            if s > alpha {
                alpha = s;
            }
            // the minimising parent already has a better option, prune
            if beta <= alpha {
                break;
            }
        }
        score
    }

    /// Value of a position with the opponent to move
    fn min_value(
        &self,
        board: &Board,
        depth_to_go: usize,
        alpha: i32,
        mut beta: i32,
        search: &mut Search,
    ) -> i32 {
        search.node_count += 1;

        if self.is_min_terminal(board, depth_to_go) {
            return self.eval(board, depth_to_go);
        }

        let opponent = self.player.other();
        debug_assert!(!board.is_winner(opponent));

        let mut score = INITIAL_BETA;
        for column in board.possible_drops() {
            let mut next = *board;
            next.drop(column, opponent);

            let s = self.max_value(&next, depth_to_go - 1, alpha, beta, search);
            if s < score {
                score = s;
            }
            if s < beta {
                beta = s;
            }
            // the maximising parent already has a better option, prune
            if alpha >= beta {
                break;
            }
        }
        score
    }
}
