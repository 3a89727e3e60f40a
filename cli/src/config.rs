use anyhow::Context;
use minehunt_core::Difficulty;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_HISTORY_DIR: &str = ".minehunt";

/// Optional TOML file, every key may be omitted.
///
/// ```toml
/// [game]
/// difficulty = "medium"
/// seed = 1234
///
/// [history]
/// dir = "/var/lib/minehunt"
/// ```
#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub game: GameSection,
    pub history: HistorySection,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameSection {
    pub difficulty: Option<Difficulty>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistorySection {
    pub dir: Option<PathBuf>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }
}

/// Effective settings: command line over config file over defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub difficulty: Difficulty,
    pub seed: Option<u64>,
    pub history_dir: PathBuf,
}

impl Settings {
    pub fn resolve(
        difficulty: Option<Difficulty>,
        seed: Option<u64>,
        history_dir: Option<PathBuf>,
        file: FileConfig,
    ) -> Self {
        Self {
            difficulty: difficulty.or(file.game.difficulty).unwrap_or_default(),
            seed: seed.or(file.game.seed),
            history_dir: history_dir
                .or(file.history.dir)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_DIR)),
        }
    }
}
