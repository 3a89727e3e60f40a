use anyhow::{Context, bail};
use minehunt_core::{Coord, Coord2, Difficulty, DifficultyFilter};

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    New(Option<Difficulty>),
    Reveal(Coord2),
    Flag(Coord2),
    Show,
    History(DifficultyFilter),
    ClearHistory,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  new [easy|medium|hard]   start a new game
  r <row> <col>            reveal a cell
  f <row> <col>            toggle a flag
  show                     print the board
  history [all|easy|...]   list won games, newest first
  clear-history            forget all won games
  quit";

/// Parses one input line, `None` for blank lines.
pub fn parse(line: &str) -> anyhow::Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<_> = words.collect();

    let command = match (name, args.as_slice()) {
        ("new" | "n", []) => Command::New(None),
        ("new" | "n", [difficulty]) => Command::New(Some(difficulty.parse()?)),
        ("reveal" | "r", [row, col]) => Command::Reveal(coords(row, col)?),
        ("flag" | "f", [row, col]) => Command::Flag(coords(row, col)?),
        ("show" | "s", []) => Command::Show,
        ("history" | "h", []) => Command::History(DifficultyFilter::All),
        ("history" | "h", [filter]) => Command::History(filter.parse()?),
        ("clear-history", []) => Command::ClearHistory,
        ("help" | "?", []) => Command::Help,
        ("quit" | "q" | "exit", []) => Command::Quit,
        _ => bail!("Unrecognized command {:?}, try `help`", line.trim()),
    };
    Ok(Some(command))
}

fn coords(row: &str, col: &str) -> anyhow::Result<Coord2> {
    let row: Coord = row.parse().with_context(|| format!("Invalid row {row:?}"))?;
    let col: Coord = col.parse().with_context(|| format!("Invalid column {col:?}"))?;
    Ok((row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves() {
        assert_eq!(parse("r 3 4").unwrap(), Some(Command::Reveal((3, 4))));
        assert_eq!(parse("  flag 0 15 ").unwrap(), Some(Command::Flag((0, 15))));
    }

    #[test]
    fn parses_game_and_history_commands() {
        assert_eq!(parse("new").unwrap(), Some(Command::New(None)));
        assert_eq!(
            parse("new hard").unwrap(),
            Some(Command::New(Some(Difficulty::Hard)))
        );
        assert_eq!(
            parse("history medium").unwrap(),
            Some(Command::History(DifficultyFilter::Only(Difficulty::Medium)))
        );
        assert_eq!(
            parse("h").unwrap(),
            Some(Command::History(DifficultyFilter::All))
        );
        assert_eq!(parse("clear-history").unwrap(), Some(Command::ClearHistory));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(parse("r 3").is_err());
        assert!(parse("r -1 2").is_err());
        assert!(parse("r 300 2").is_err());
        assert!(parse("new nightmare").is_err());
        assert!(parse("dance").is_err());
    }
}
