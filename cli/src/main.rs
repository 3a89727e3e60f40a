use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use minehunt_core::{Difficulty, FileStorage, PersistentHistory};
use std::io;
use std::path::PathBuf;
use web_time::Instant;

mod command;
mod config;
mod host;
mod ticker;

use config::{FileConfig, Settings};
use host::Host;

/// Play minesweeper from the terminal, one command per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Starting difficulty: easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Seed for reproducible layouts, incremented for every new game
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory holding the won-games history
    #[arg(long, value_name = "DIR")]
    history_dir: Option<PathBuf>,

    /// TOML config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    env_logger::Builder::new()
        .filter_level(args.verbose.log_level_filter())
        .init();

    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => FileConfig::default(),
    };
    let settings = Settings::resolve(args.difficulty, args.seed, args.history_dir, file);
    log::debug!("Effective settings: {:?}", settings);

    let history = PersistentHistory::open(FileStorage::new(&settings.history_dir));
    let now = Instant::now();
    let difficulty = settings.difficulty;
    let mut host = Host::new(history, settings, now);
    host.new_game(difficulty, now);

    println!("{}", command::HELP);
    let stdout = io::stdout();
    host::run_loop(&mut host, io::stdin().lock(), &mut stdout.lock())
        .context("Terminal input failed")
}
