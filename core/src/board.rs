use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Grid of cells owned by a single session.
///
/// Starts without mines so flags can be placed before the first reveal; mines are placed exactly once afterwards and
/// never move again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    config: GameConfig,
    cells: Array2<Cell>,
    mines_placed: bool,
    revealed_count: CellCount,
    flagged_count: CellCount,
}

impl Board {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            cells: Array2::default(config.size.to_nd_index()),
            mines_placed: false,
            revealed_count: 0,
            flagged_count: 0,
        }
    }

    /// Board with `minefield` already placed, mostly useful to exercise the reveal engine on its own.
    pub fn with_minefield(minefield: &Minefield) -> Self {
        let mut board = Self::new(minefield.game_config());
        board.place_mines(minefield);
        board
    }

    pub(crate) fn place_mines(&mut self, minefield: &Minefield) {
        debug_assert!(!self.mines_placed, "mines must only be placed once");
        debug_assert_eq!(minefield.size(), self.config.size);

        let counts = minefield.adjacency_counts();
        for (((row, col), cell), &count) in self.cells.indexed_iter_mut().zip(counts.iter()) {
            cell.is_mine = minefield.contains_mine((row as Coord, col as Coord));
            cell.adjacent_mines = count;
        }
        self.mines_placed = true;
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.cells[coords.to_nd_index()]
    }

    pub fn state_at(&self, coords: Coord2) -> CellState {
        self.cell_at(coords).state
    }

    pub(crate) fn cell_mut(&mut self, coords: Coord2) -> &mut Cell {
        &mut self.cells[coords.to_nd_index()]
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Safe cells revealed so far.
    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Remaining-mines estimate shown to the player, negative when over-flagged.
    pub fn mines_left(&self) -> i32 {
        i32::from(self.config.mines) - i32::from(self.flagged_count)
    }

    /// Every safe cell has been revealed.
    pub fn is_cleared(&self) -> bool {
        self.mines_placed && self.revealed_count == self.config.safe_cells()
    }

    /// Mine positions in row-major order, empty before placement.
    pub fn mine_positions(&self) -> Vec<Coord2> {
        self.cells
            .indexed_iter()
            .filter(|(_, cell)| cell.is_mine)
            .map(|((row, col), _)| (row as Coord, col as Coord))
            .collect()
    }

    pub(crate) fn record_revealed(&mut self) {
        self.revealed_count += 1;
    }

    pub(crate) fn record_flag(&mut self, flagged: bool) {
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
    }

    /// Plain text dump, `#` hidden, `F` flagged, `*` revealed mine, digits or `.` for revealed counts.
    pub fn render_text(&self) -> String {
        let (rows, cols) = self.size();
        let mut out = String::with_capacity(usize::from(rows) * (usize::from(cols) + 1));
        for row in 0..rows {
            for col in 0..cols {
                let cell = self.cell_at((row, col));
                out.push(match (cell.state, cell.is_mine, cell.adjacent_mines) {
                    (CellState::Hidden, _, _) => '#',
                    (CellState::Flagged, _, _) => 'F',
                    (CellState::Revealed, true, _) => '*',
                    (CellState::Revealed, false, 0) => '.',
                    (CellState::Revealed, false, count) => char::from(b'0' + count),
                });
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_hidden_and_mine_free() {
        let board = Board::new(Difficulty::Easy.config());

        assert!(!board.mines_placed());
        assert!(board.mine_positions().is_empty());
        assert_eq!(board.state_at((4, 4)), CellState::Hidden);
        assert_eq!(board.mines_left(), 10);
        assert!(!board.is_cleared());
    }

    #[test]
    fn placing_mines_fills_counts() {
        let field = Minefield::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();
        let board = Board::with_minefield(&field);

        assert!(board.mines_placed());
        assert!(board.cell_at((0, 0)).is_mine);
        assert_eq!(board.cell_at((0, 0)).adjacent_mines, 0);
        assert_eq!(board.cell_at((1, 1)).adjacent_mines, 2);
        assert_eq!(board.mine_positions(), vec![(0, 0), (2, 2)]);
    }

    #[test]
    fn render_text_marks_each_state() {
        let field = Minefield::from_mine_coords((2, 3), &[(0, 0)]).unwrap();
        let mut board = Board::with_minefield(&field);
        board.cell_mut((0, 1)).state = CellState::Revealed;
        board.cell_mut((0, 2)).state = CellState::Revealed;
        board.cell_mut((1, 0)).state = CellState::Flagged;

        assert_eq!(board.render_text(), "#1.\nF##\n");
    }
}
