//! A Connect 4 player built on depth-limited minimax search
//!
//! The engine looks a fixed number of plies ahead, pruning with alpha-beta,
//! and scores the positions it reaches with a positional weight table that
//! favours the centre of the board.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, engine::Engine, Player};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board = Board::from_moves("11223")?;
//! let engine = Engine::new(3, Player::One)?;
//! let decision = engine.decide(&board)?;
//!
//! // complete the four in a row on the bottom row
//! assert_eq!(decision.column, 3);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod engine;

pub mod config;

pub mod game;


pub use board::{Board, Cell, Player, WinningLine};
pub use config::{GameConfig, ParticipantKind, PlayerConfig};
pub use engine::{Decision, Engine, SearchMode};
pub use error::{ConfigError, EngineError, MoveError};
pub use game::{Game, GameObserver};

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of aligned tokens needed to win
pub const CONNECT: usize = 4;

// a line of four has to fit on the board in both axes
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
