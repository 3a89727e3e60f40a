use super::*;

/// History mirrored into a storage backend under [`History::KEY`].
///
/// The full array is rewritten after every change. When a write fails the in-memory copy still holds the change, so
/// the current process keeps seeing it even though it may not survive a restart.
#[derive(Clone, Debug)]
pub struct PersistentHistory<S> {
    storage: S,
    history: History,
}

impl<S: StorageBackend> PersistentHistory<S> {
    /// Loads existing records, treating missing or corrupt data as an empty history.
    pub fn open(storage: S) -> Self {
        let history: History = load_or_default(&storage);
        log::info!("Loaded {} history records", history.len());
        Self { storage, history }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}

impl<S: StorageBackend> HistoryStore for PersistentHistory<S> {
    fn append(&mut self, record: HistoryRecord) -> core::result::Result<(), StorageError> {
        if let Some(evicted) = self.history.push(record) {
            log::debug!("Evicted history record from {}", evicted.completed_at);
        }
        save(&self.history, &mut self.storage)?;
        log::info!("History saved ({} entries)", self.history.len());
        Ok(())
    }

    fn query(&self, filter: DifficultyFilter) -> Vec<HistoryRecord> {
        self.history.query(filter)
    }

    fn clear(&mut self) -> core::result::Result<(), StorageError> {
        self.history.clear();
        self.storage.remove_item(History::KEY)?;
        log::info!("History cleared");
        Ok(())
    }
}
