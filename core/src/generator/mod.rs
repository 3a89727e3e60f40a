use core::fmt::Debug;

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Produces the mine layout of a session, asked at most once per board.
pub trait MinefieldGenerator: Debug {
    /// Builds a layout for `config` that never places a mine on `exclude`.
    fn generate(&self, config: GameConfig, exclude: Coord2) -> Result<Minefield>;
}

impl<G: MinefieldGenerator + ?Sized> MinefieldGenerator for Box<G> {
    fn generate(&self, config: GameConfig, exclude: Coord2) -> Result<Minefield> {
        (**self).generate(config, exclude)
    }
}

/// Checks that a layout honors what the session asked for.
pub(crate) fn check_layout(minefield: &Minefield, config: GameConfig, exclude: Coord2) -> Result<()> {
    if minefield.game_config() != config {
        return Err(ConfigError::LayoutMismatch.into());
    }
    if minefield.contains_mine(exclude) {
        return Err(ConfigError::MineOnStart.into());
    }
    Ok(())
}
