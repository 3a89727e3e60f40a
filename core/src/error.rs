use thiserror::Error;

use crate::{CellCount, Coord};

/// Reasons a board configuration is rejected before any session exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one row and one column, got {rows}x{cols}")]
    EmptyBoard { rows: Coord, cols: Coord },
    #[error("Board of {rows}x{cols} exceeds the 255x255 limit")]
    BoardTooLarge { rows: usize, cols: usize },
    #[error("At least one mine is required")]
    NoMines,
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Mine layout does not match the board configuration")]
    LayoutMismatch,
    #[error("Mine layout places a mine on the first revealed cell")]
    MineOnStart,
    #[error("Unknown difficulty {0:?}")]
    UnknownDifficulty(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Coordinates ({row}, {col}) are outside the board")]
    OutOfBounds { row: Coord, col: Coord },
    #[error("Game already ended, no new moves are accepted")]
    GameOver,
    #[error("No game in progress")]
    NoGameInProgress,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failures of persisted side channels such as the game history. Never affect gameplay.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage is unavailable: {0}")]
    Io(#[from] std::io::Error),
    #[error("Value could not be encoded: {0}")]
    Encoding(#[from] serde_json::Error),
}
