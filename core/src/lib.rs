//! Game rules for a single-player minesweeper: deferred mine placement, adjacency counts, flood-fill reveals, flags,
//! the session state machine and a persisted history of won games.
//!
//! Rendering and input handling live outside this crate. A host drives a [`Controller`] (or a bare [`GameSession`])
//! and redraws from the returned [`RevealResult`] and [`FlagResult`] batches.

pub use adjacency::*;
pub use board::*;
pub use cell::*;
pub use controller::*;
pub use difficulty::*;
pub use error::*;
pub use flag::*;
pub use generator::*;
pub use history::*;
pub use minefield::*;
pub use reveal::*;
pub use session::*;
pub use storage::*;
pub use types::*;

mod adjacency;
mod board;
mod cell;
mod controller;
mod difficulty;
mod error;
mod flag;
mod generator;
mod history;
mod minefield;
mod reveal;
mod session;
mod storage;
mod types;
