use crate::command::{self, Command};
use crate::config::Settings;
use minehunt_core::*;
use std::io::{self, Write};
use web_time::Instant;

/// Line-oriented front end over a [`Controller`].
#[derive(Debug)]
pub struct Host<H> {
    controller: Controller<H>,
    settings: Settings,
    games_started: u64,
    ticker: crate::ticker::Ticker,
}

impl<H: HistoryStore> Host<H> {
    pub fn new(history: H, settings: Settings, now: Instant) -> Self {
        Self {
            controller: Controller::new(history),
            settings,
            games_started: 0,
            ticker: crate::ticker::Ticker::new(now),
        }
    }

    pub fn controller(&self) -> &Controller<H> {
        &self.controller
    }

    /// Feeds elapsed wall time to the game timer as whole-second ticks.
    pub fn tick(&mut self, now: Instant) {
        for _ in 0..self.ticker.advance(now) {
            if self.controller.on_tick().is_none() {
                break;
            }
        }
    }

    pub fn new_game(&mut self, difficulty: Difficulty, now: Instant) {
        let session = match self.settings.seed {
            // consecutive games from one seed are still distinct
            Some(seed) => self
                .controller
                .start_seeded(difficulty, seed.wrapping_add(self.games_started)),
            None => self.controller.start_game(difficulty),
        };
        let (rows, cols) = session.board().size();
        log::info!(
            "New {} game, {}x{} with {} mines",
            difficulty,
            rows,
            cols,
            session.board().config().mines
        );
        self.games_started += 1;
        self.ticker.reset(now);
    }

    /// Runs one command, returns `false` once the user asked to quit.
    pub fn run(&mut self, command: Command, now: Instant, out: &mut impl Write) -> io::Result<bool> {
        match command {
            Command::New(difficulty) => {
                let difficulty = difficulty.unwrap_or(self.settings.difficulty);
                self.new_game(difficulty, now);
                writeln!(out, "new {} game", difficulty)?;
            }
            Command::Reveal(coords) => self.reveal(coords, now, out)?,
            Command::Flag(coords) => match self.controller.toggle_flag(coords) {
                Ok(FlagResult { changed: false, .. }) => {
                    writeln!(out, "{:?} is already revealed", coords)?;
                }
                Ok(result) => {
                    let verb = if result.now_flagged { "flagged" } else { "unflagged" };
                    writeln!(out, "{} {:?}, {} mines left", verb, coords, result.mines_left)?;
                }
                Err(err) => writeln!(out, "error: {}", err)?,
            },
            Command::Show => self.show(out)?,
            Command::History(filter) => {
                let records = self.controller.history(filter);
                if records.is_empty() {
                    writeln!(out, "no won games ({})", filter)?;
                }
                for record in records {
                    writeln!(
                        out,
                        "{}  {:<6}  {}s",
                        record.completed_at.format("%Y-%m-%d %H:%M"),
                        record.difficulty,
                        record.elapsed_seconds
                    )?;
                }
            }
            Command::ClearHistory => match self.controller.clear_history() {
                Ok(()) => writeln!(out, "history cleared")?,
                Err(err) => writeln!(out, "error: could not clear history: {}", err)?,
            },
            Command::Help => writeln!(out, "{}", command::HELP)?,
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn reveal(&mut self, coords: Coord2, now: Instant, out: &mut impl Write) -> io::Result<()> {
        let was_pending = self
            .controller
            .session()
            .is_some_and(|session| session.phase().is_pending());

        let turn = match self.controller.reveal(coords) {
            Ok(turn) => turn,
            Err(err) => return writeln!(out, "error: {}", err),
        };
        if was_pending && turn.phase == Phase::Active {
            // timer starts with the first reveal, not with `new`
            self.ticker.reset(now);
        }

        let result = &turn.report.result;
        if !result.has_update() {
            return writeln!(out, "nothing to reveal at {:?}", coords);
        }
        match &turn.report.transition {
            Some(Transition::Lost { triggered, mines }) => {
                writeln!(out, "boom at {:?}, {} mines were hidden", triggered, mines.len())?;
                self.show(out)?;
            }
            Some(Transition::Won(record)) => {
                writeln!(
                    out,
                    "cleared {} in {}s",
                    record.difficulty, record.elapsed_seconds
                )?;
                if let Some(err) = &turn.history_error {
                    writeln!(out, "warning: win not saved: {}", err)?;
                }
            }
            None => writeln!(
                out,
                "revealed {} cells, {} mines left",
                result.cells_revealed.len(),
                turn.mines_left
            )?,
        }
        Ok(())
    }

    fn show(&self, out: &mut impl Write) -> io::Result<()> {
        let Some(session) = self.controller.session() else {
            return writeln!(out, "no game, try `new`");
        };
        write!(out, "{}", render(session))?;
        writeln!(
            out,
            "{:?}  mines left {}  time {}s",
            session.phase(),
            session.mines_left(),
            session.elapsed_seconds()
        )
    }
}

/// Board text with every mine shown once the game is lost.
fn render<G: MinefieldGenerator>(session: &GameSession<G>) -> String {
    let board = session.board();
    let mut grid: Vec<Vec<char>> = board
        .render_text()
        .lines()
        .map(|line| line.chars().collect())
        .collect();
    for coords in session.exposed_mines() {
        let cell = session.cell_at(coords);
        // flags stay visible over the mines they guessed
        if !cell.is_flagged() && !cell.is_revealed() {
            grid[usize::from(coords.0)][usize::from(coords.1)] = '*';
        }
    }
    grid.into_iter()
        .map(|line| line.into_iter().chain(Some('\n')).collect::<String>())
        .collect()
}

/// Reads commands until `quit` or end of input.
pub fn run_loop<H: HistoryStore>(
    host: &mut Host<H>,
    input: impl io::BufRead,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line?;
        let now = Instant::now();
        host.tick(now);
        match command::parse(&line) {
            Ok(None) => {}
            Ok(Some(command)) => {
                if !host.run(command, now, out)? {
                    break;
                }
            }
            Err(err) => writeln!(out, "error: {:#}", err)?,
        }
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use web_time::Duration;

    fn settings(seed: Option<u64>) -> Settings {
        Settings {
            difficulty: Difficulty::Easy,
            seed,
            history_dir: PathBuf::from("unused"),
        }
    }

    fn output(host: &mut Host<History>, command: Command) -> String {
        let mut out = Vec::new();
        assert!(host.run(command, Instant::now(), &mut out).unwrap());
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn show_without_game() {
        let mut host = Host::new(History::new(), settings(None), Instant::now());
        assert_eq!(output(&mut host, Command::Show), "no game, try `new`\n");
    }

    #[test]
    fn new_game_shows_hidden_board() {
        let mut host = Host::new(History::new(), settings(Some(7)), Instant::now());
        output(&mut host, Command::New(Some(Difficulty::Medium)));

        let shown = output(&mut host, Command::Show);

        let lines: Vec<_> = shown.lines().collect();
        assert_eq!(lines.len(), 17);
        assert!(lines[..16].iter().all(|line| *line == "#".repeat(16)));
        assert_eq!(lines[16], "Pending  mines left 40  time 0s");
    }

    #[test]
    fn flag_and_reveal_summaries() {
        let mut host = Host::new(History::new(), settings(Some(7)), Instant::now());
        output(&mut host, Command::New(None));

        assert_eq!(
            output(&mut host, Command::Flag((0, 0))),
            "flagged (0, 0), 9 mines left\n"
        );
        assert_eq!(
            output(&mut host, Command::Reveal((0, 0))),
            "nothing to reveal at (0, 0)\n"
        );
        assert_eq!(
            output(&mut host, Command::Reveal((9, 0))),
            "error: Coordinates (9, 0) are outside the board\n"
        );
        assert!(!output(&mut host, Command::Reveal((4, 4))).starts_with("error"));
    }

    #[test]
    fn ticks_only_count_after_first_reveal() {
        let start = Instant::now();
        let mut host = Host::new(History::new(), settings(Some(3)), start);
        host.new_game(Difficulty::Hard, start);

        host.tick(start + Duration::from_secs(5));
        host.run(Command::Reveal((8, 15)), start + Duration::from_secs(5), &mut Vec::<u8>::new())
            .unwrap();
        host.tick(start + Duration::from_millis(7500));

        let session = host.controller().session().unwrap();
        assert_eq!(session.phase(), Phase::Active);
        assert_eq!(session.elapsed_seconds(), 2);
    }

    #[test]
    fn lost_board_shows_hidden_mines_but_keeps_flags() {
        let mines = [(0, 1), (1, 0), (1, 1), (4, 4), (4, 5), (5, 4), (5, 5), (7, 7), (7, 8), (8, 7)];
        let generator = FixedMinefieldGenerator::from_mine_coords((9, 9), &mines).unwrap();
        let mut session = GameSession::with_generator(Difficulty::Easy, generator);
        session.reveal((4, 0)).unwrap();
        session.toggle_flag((7, 7)).unwrap();
        session.reveal((4, 4)).unwrap();

        let text = render(&session);

        let rows: Vec<Vec<char>> = text.lines().map(|line| line.chars().collect()).collect();
        assert_eq!(rows[0][0], '#');
        assert_eq!(rows[0][1], '*');
        assert_eq!(rows[4][4], '*');
        assert_eq!(rows[7][7], 'F');
        assert_eq!(rows[8][7], '*');
        assert_eq!(rows[8][8], '#');
        assert_eq!(text.matches('*').count(), 9);
    }

    #[test]
    fn loop_stops_at_quit() {
        let mut host = Host::new(History::new(), settings(Some(1)), Instant::now());
        let input = b"new\n\nbogus\nhistory\nquit\nshow\n";
        let mut out = Vec::new();

        run_loop(&mut host, &input[..], &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("new easy game\n"));
        assert!(out.contains("error: Unrecognized command \"bogus\""));
        assert!(out.contains("no won games (all)"));
        assert!(!out.contains("Pending"));
    }
}
