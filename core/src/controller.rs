use crate::*;

pub type BoxedGenerator = Box<dyn MinefieldGenerator>;

/// Everything a presentation layer needs after a reveal.
#[derive(Debug)]
pub struct Turn {
    pub report: RevealReport,
    pub phase: Phase,
    pub mines_left: i32,
    /// Set when a win could not be written to history. Gameplay is unaffected.
    pub history_error: Option<StorageError>,
}

/// Entry point for a presentation layer: one current game plus the history it feeds.
#[derive(Debug)]
pub struct Controller<H> {
    history: H,
    session: Option<GameSession<BoxedGenerator>>,
}

impl<H: HistoryStore> Controller<H> {
    pub fn new(history: H) -> Self {
        Self {
            history,
            session: None,
        }
    }

    /// Discards any current game and starts a new one with a random layout.
    pub fn start_game(&mut self, difficulty: Difficulty) -> &GameSession<BoxedGenerator> {
        self.start_with_generator(difficulty, RandomMinefieldGenerator::from_entropy())
    }

    pub fn start_game_named(&mut self, name: &str) -> Result<&GameSession<BoxedGenerator>> {
        let difficulty: Difficulty = name.parse()?;
        Ok(self.start_game(difficulty))
    }

    pub fn start_seeded(&mut self, difficulty: Difficulty, seed: u64) -> &GameSession<BoxedGenerator> {
        self.start_with_generator(difficulty, RandomMinefieldGenerator::new(seed))
    }

    pub fn start_with_generator(
        &mut self,
        difficulty: Difficulty,
        generator: impl MinefieldGenerator + 'static,
    ) -> &GameSession<BoxedGenerator> {
        if let Some(old) = &self.session {
            log::debug!("Discarding {:?} {} game", old.phase(), old.difficulty());
        }
        self.session.insert(GameSession::with_generator(difficulty, Box::new(generator)))
    }

    pub fn session(&self) -> Option<&GameSession<BoxedGenerator>> {
        self.session.as_ref()
    }

    pub fn history_store(&self) -> &H {
        &self.history
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<Turn> {
        let session = self.session.as_mut().ok_or(GameError::NoGameInProgress)?;
        let report = session.reveal(coords)?;

        let mut history_error = None;
        if let Some(Transition::Won(record)) = &report.transition {
            if let Err(err) = self.history.append(record.clone()) {
                log::error!("Could not save won game to history: {}", err);
                history_error = Some(err);
            }
        }

        Ok(Turn {
            phase: session.phase(),
            mines_left: session.mines_left(),
            report,
            history_error,
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagResult> {
        self.session
            .as_mut()
            .ok_or(GameError::NoGameInProgress)?
            .toggle_flag(coords)
    }

    /// Forwards a host timer tick to the current game, see [`GameSession::on_tick`].
    pub fn on_tick(&mut self) -> Option<u32> {
        self.session.as_mut().and_then(|session| session.on_tick())
    }

    pub fn history(&self, filter: DifficultyFilter) -> Vec<HistoryRecord> {
        self.history.query(filter)
    }

    pub fn clear_history(&mut self) -> core::result::Result<(), StorageError> {
        self.history.clear()
    }
}
