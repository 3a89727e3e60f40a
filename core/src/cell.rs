use serde::{Deserialize, Serialize};

/// Player-visible state of a cell. Transitions are Hidden <-> Flagged and Hidden -> Revealed only.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub is_mine: bool,
    /// Mines in the 8-neighborhood, 0 for mines themselves.
    pub adjacent_mines: u8,
    pub state: CellState,
}

impl Cell {
    pub const fn is_revealed(self) -> bool {
        matches!(self.state, CellState::Revealed)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self.state, CellState::Flagged)
    }
}
