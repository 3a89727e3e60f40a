use crate::*;

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FlagResult {
    pub now_flagged: bool,
    /// False when the target was already revealed.
    pub changed: bool,
    pub mines_left: i32,
}

impl Board {
    /// Flips Hidden <-> Flagged. Revealed cells are left untouched.
    ///
    /// Flags are only a player estimate, they need not sit on actual mines.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.config().validate_coords(coords)?;

        let (now_flagged, changed) = match self.state_at(coords) {
            CellState::Hidden => {
                self.cell_mut(coords).state = CellState::Flagged;
                self.record_flag(true);
                (true, true)
            }
            CellState::Flagged => {
                self.cell_mut(coords).state = CellState::Hidden;
                self.record_flag(false);
                (false, true)
            }
            CellState::Revealed => (false, false),
        };

        Ok(FlagResult {
            now_flagged,
            changed,
            mines_left: self.mines_left(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board() -> Board {
        Board::with_minefield(&Minefield::from_mine_coords((3, 3), &[(0, 0)]).unwrap())
    }

    #[test]
    fn toggling_twice_restores_hidden() {
        let mut board = board();

        let first = board.toggle_flag((2, 2)).unwrap();
        assert_eq!(
            first,
            FlagResult {
                now_flagged: true,
                changed: true,
                mines_left: 0
            }
        );
        assert_eq!(board.state_at((2, 2)), CellState::Flagged);

        let second = board.toggle_flag((2, 2)).unwrap();
        assert!(!second.now_flagged);
        assert_eq!(second.mines_left, 1);
        assert_eq!(board.state_at((2, 2)), CellState::Hidden);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn revealed_cell_cannot_be_flagged() {
        let mut board = board();
        board.reveal((1, 1)).unwrap();

        let result = board.toggle_flag((1, 1)).unwrap();

        assert!(!result.changed);
        assert!(!result.now_flagged);
        assert_eq!(board.state_at((1, 1)), CellState::Revealed);
        assert_eq!(board.flagged_count(), 0);
    }

    #[test]
    fn over_flagging_goes_negative() {
        let mut board = board();
        board.toggle_flag((0, 1)).unwrap();
        let result = board.toggle_flag((0, 2)).unwrap();

        assert_eq!(result.mines_left, -1);
    }

    #[test]
    fn rejects_outside_coordinates() {
        let mut board = board();
        assert_eq!(
            board.toggle_flag((0, 3)),
            Err(GameError::OutOfBounds { row: 0, col: 3 })
        );
    }
}
