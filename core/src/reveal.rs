use std::collections::{BTreeSet, VecDeque};

use crate::*;

/// Batch of changes caused by one reveal call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealResult {
    /// Newly revealed cells in reveal order, each listed once.
    pub cells_revealed: Vec<Coord2>,
    pub hit_mine: bool,
    /// The reveal uncovered the last safe cell.
    pub cleared: bool,
}

impl RevealResult {
    /// Whether this result could have caused an update to the board
    pub fn has_update(&self) -> bool {
        self.hit_mine || !self.cells_revealed.is_empty()
    }
}

impl Board {
    /// Reveals a hidden cell, flood-filling through zero-count cells with an explicit work queue.
    ///
    /// Revealed and flagged targets are left alone and produce an empty result. The cleared check runs after every
    /// single cell so the cascade stops on the exact reveal that wins.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealResult> {
        let coords = self.config().validate_coords(coords)?;
        let mut result = RevealResult::default();

        let cell = self.cell_at(coords);
        if cell.state != CellState::Hidden {
            log::trace!("Ignoring reveal of {:?} cell at {:?}", cell.state, coords);
            return Ok(result);
        }

        if cell.is_mine {
            self.cell_mut(coords).state = CellState::Revealed;
            result.hit_mine = true;
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(result);
        }

        let mut queued = BTreeSet::from([coords]);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = self.cell_mut(visit_coords);
            // a flag may sit on a queued cell only if it was placed before the reveal call, skip it
            if cell.state != CellState::Hidden {
                continue;
            }
            cell.state = CellState::Revealed;
            let count = cell.adjacent_mines;
            self.record_revealed();
            result.cells_revealed.push(visit_coords);
            log::trace!("Revealed {:?}, mine count: {}", visit_coords, count);

            if self.is_cleared() {
                result.cleared = true;
                break;
            }

            if count == 0 {
                let next: Vec<_> = self
                    .iter_neighbors(visit_coords)
                    .filter(|&pos| self.state_at(pos) == CellState::Hidden)
                    .filter(|&pos| queued.insert(pos))
                    .collect();
                to_visit.extend(next);
            }
        }

        log::debug!(
            "Reveal at {:?} opened {} cells",
            coords,
            result.cells_revealed.len()
        );
        Ok(result)
    }
}
