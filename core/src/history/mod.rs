//! Record of won games, capped to the most recent entries.

use chrono::prelude::*;
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::*;
pub use persistent::*;

mod persistent;

/// Maximum number of records kept, oldest are evicted first
pub const MAX_HISTORY_RECORDS: usize = 50;

/// A single won game
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub difficulty: Difficulty,
    /// Whole seconds on the game timer
    #[serde(rename = "time")]
    pub elapsed_seconds: u32,
    #[serde(rename = "date")]
    pub completed_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn matches(self, difficulty: Difficulty) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == difficulty,
        }
    }
}

impl From<Difficulty> for DifficultyFilter {
    fn from(difficulty: Difficulty) -> Self {
        Self::Only(difficulty)
    }
}

impl FromStr for DifficultyFilter {
    type Err = ConfigError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl fmt::Display for DifficultyFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Only(difficulty) => f.write_str(difficulty.name()),
        }
    }
}

/// Append-only store of won games.
///
/// Writes may fail; callers treat history as a best-effort side channel and keep playing.
pub trait HistoryStore {
    fn append(&mut self, record: HistoryRecord) -> core::result::Result<(), StorageError>;

    /// Matching records, newest completion first.
    fn query(&self, filter: DifficultyFilter) -> Vec<HistoryRecord>;

    fn clear(&mut self) -> core::result::Result<(), StorageError>;
}

/// In-memory history in insertion order, serialized as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    records: VecDeque<HistoryRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from records in insertion order, keeping only the most recent ones.
    pub fn from_records(records: impl IntoIterator<Item = HistoryRecord>) -> Self {
        let mut history = Self::new();
        for record in records {
            history.push(record);
        }
        history
    }

    /// Appends a record, returning the evicted oldest one if the cap was exceeded.
    pub fn push(&mut self, record: HistoryRecord) -> Option<HistoryRecord> {
        self.records.push_back(record);
        if self.records.len() > MAX_HISTORY_RECORDS {
            self.records.pop_front()
        } else {
            None
        }
    }

    /// Records in insertion order, oldest first.
    pub fn records(&self) -> impl Iterator<Item = &HistoryRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, filter: DifficultyFilter) -> Vec<HistoryRecord> {
        // reversed first so equal timestamps keep newest-inserted first through the stable sort
        let mut matching: Vec<_> = self
            .records
            .iter()
            .rev()
            .filter(|record| filter.matches(record.difficulty))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        matching
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Best time per difficulty, if any game of that difficulty was won.
    pub fn best_time(&self, difficulty: Difficulty) -> Option<u32> {
        self.records
            .iter()
            .filter(|record| record.difficulty == difficulty)
            .map(|record| record.elapsed_seconds)
            .min()
    }
}

impl StorageKey for History {
    const KEY: &'static str = "minehunt:history:v1";
}

impl HistoryStore for History {
    fn append(&mut self, record: HistoryRecord) -> core::result::Result<(), StorageError> {
        self.push(record);
        Ok(())
    }

    fn query(&self, filter: DifficultyFilter) -> Vec<HistoryRecord> {
        History::query(self, filter)
    }

    fn clear(&mut self) -> core::result::Result<(), StorageError> {
        History::clear(self);
        Ok(())
    }
}
