//! Typed errors for the board, the engine and match configuration

use thiserror::Error;

use crate::WIDTH;

/// A drop that cannot be applied to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {column} out of range, columns must be between 0 and {}", WIDTH - 1)]
    ColumnOutOfRange { column: usize },

    #[error("column {column} is full")]
    ColumnFull { column: usize },
}

/// Contract violations reported by the decision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("no legal move, the board is full")]
    NoLegalMove,

    #[error("search depth must be at least 1, got {depth}")]
    InvalidDepth { depth: usize },
}

/// Invalid match configuration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("search depth for player {player} must be between 1 and {max}, got {depth}")]
    InvalidDepth { player: u8, depth: usize, max: usize },

    #[error("could not parse '{0}' as a player kind, expected 'human' or 'ai'")]
    UnknownParticipant(String),
}
