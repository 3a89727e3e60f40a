use chrono::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Pending -> Active (first reveal, mines are placed here)
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Board not generated yet
    #[default]
    Pending,
    /// Timer running, reveals accepted
    Active,
    /// Every safe cell revealed
    Won,
    /// A mine was revealed
    Lost,
}

impl Phase {
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// Phase change caused by a reveal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Won(HistoryRecord),
    Lost {
        triggered: Coord2,
        /// Every mine on the board, for the presentation to show.
        mines: Vec<Coord2>,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealReport {
    pub result: RevealResult,
    pub transition: Option<Transition>,
}

/// One game from first click to win or loss.
///
/// Mines are placed lazily by the generator on the first reveal, with that cell kept safe. Once the phase is
/// [`Phase::Won`] or [`Phase::Lost`] every mutating call fails with [`GameError::GameOver`] and leaves the board as it
/// was.
#[derive(Debug)]
pub struct GameSession<G = RandomMinefieldGenerator> {
    difficulty: Difficulty,
    board: Board,
    generator: G,
    phase: Phase,
    elapsed_seconds: u32,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self::with_generator(difficulty, RandomMinefieldGenerator::from_entropy())
    }

    pub fn seeded(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_generator(difficulty, RandomMinefieldGenerator::new(seed))
    }
}

impl<G: MinefieldGenerator> GameSession<G> {
    pub fn with_generator(difficulty: Difficulty, generator: G) -> Self {
        Self {
            difficulty,
            board: Board::new(difficulty.config()),
            generator,
            phase: Phase::Pending,
            elapsed_seconds: 0,
            started_at: None,
            ended_at: None,
            triggered_mine: None,
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell_at(&self, coords: Coord2) -> Cell {
        self.board.cell_at(coords)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.board.revealed_count()
    }

    pub fn flagged_count(&self) -> CellCount {
        self.board.flagged_count()
    }

    pub fn mines_left(&self) -> i32 {
        self.board.mines_left()
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.elapsed_seconds
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Mine locations the presentation may show, only after a loss.
    pub fn exposed_mines(&self) -> Vec<Coord2> {
        match self.phase {
            Phase::Lost => self.board.mine_positions(),
            _ => Vec::new(),
        }
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealReport> {
        let coords = self.board.config().validate_coords(coords)?;
        self.check_not_finished()?;

        if self.phase.is_pending() {
            // revealing a flag is a no-op and must not start the game
            if self.board.state_at(coords) != CellState::Hidden {
                return Ok(RevealReport::default());
            }
            let minefield = self.generator.generate(self.board.config(), coords)?;
            self.board.place_mines(&minefield);
            self.mark_started();
        }

        let result = self.board.reveal(coords)?;
        let transition = if result.hit_mine {
            Some(self.end_game(false, coords))
        } else if result.cleared {
            Some(self.end_game(true, coords))
        } else {
            None
        };

        Ok(RevealReport { result, transition })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        let coords = self.board.config().validate_coords(coords)?;
        self.check_not_finished()?;
        self.board.toggle_flag(coords)
    }

    /// Advances the timer by one second while active. Returns the new elapsed time, or `None` when the timer is not
    /// running.
    pub fn on_tick(&mut self) -> Option<u32> {
        if self.phase != Phase::Active {
            return None;
        }
        self.elapsed_seconds = self.elapsed_seconds.saturating_add(1);
        Some(self.elapsed_seconds)
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.phase.is_finished() {
            Err(GameError::GameOver)
        } else {
            Ok(())
        }
    }

    fn mark_started(&mut self) {
        let now = Utc::now();
        log::debug!("{} game started at {}", self.difficulty, now);
        self.started_at = Some(now);
        self.phase = Phase::Active;
    }

    fn end_game(&mut self, won: bool, last_move: Coord2) -> Transition {
        debug_assert_eq!(self.phase, Phase::Active);
        let now = Utc::now();
        self.ended_at = Some(now);

        if won {
            self.phase = Phase::Won;
            log::debug!(
                "{} game won in {}s at {}",
                self.difficulty,
                self.elapsed_seconds,
                now
            );
            Transition::Won(HistoryRecord {
                difficulty: self.difficulty,
                elapsed_seconds: self.elapsed_seconds,
                completed_at: now,
            })
        } else {
            self.phase = Phase::Lost;
            self.triggered_mine = Some(last_move);
            log::debug!("{} game lost on {:?} at {}", self.difficulty, last_move, now);
            Transition::Lost {
                triggered: last_move,
                mines: self.board.mine_positions(),
            }
        }
    }
}
