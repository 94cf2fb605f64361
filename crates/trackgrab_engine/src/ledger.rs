use serde::{Deserialize, Serialize};
use thiserror::Error;
use trackgrab_core::HistoryEntry;
use trackgrab_logging::{grab_debug, grab_info, grab_warn};

use crate::store::{KeyValueStore, StoreError};

/// Storage key holding the serialized history document.
pub const HISTORY_KEY: &str = "downloadHistory";

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedEntry {
    #[serde(rename = "songName")]
    label: String,
    #[serde(rename = "downloadLink")]
    link: String,
}

impl From<&HistoryEntry> for PersistedEntry {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            label: entry.label().to_string(),
            link: entry.link().to_string(),
        }
    }
}

impl From<PersistedEntry> for HistoryEntry {
    fn from(entry: PersistedEntry) -> Self {
        HistoryEntry::new(entry.label, entry.link)
    }
}

/// Append-only log of successful downloads, most recent last.
///
/// Every append rewrites the whole document. The in-memory sequence only
/// advances once the store accepted the new document, so it always equals
/// what a fresh `load` would return.
pub struct HistoryLedger<S> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryLedger<S> {
    /// Creates an empty ledger without touching the store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Creates a ledger and loads the persisted history.
    pub fn open(store: S) -> Self {
        let mut ledger = Self::new(store);
        ledger.load();
        ledger
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Reads the persisted history. Missing, unreadable or malformed data
    /// yields an empty history; this never fails.
    pub fn load(&mut self) -> Vec<HistoryEntry> {
        self.entries = read_entries(&self.store);
        self.entries.clone()
    }

    /// Appends `entry` and persists the full sequence, returning it.
    ///
    /// On error nothing changes, in memory or in the store.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<Vec<HistoryEntry>, LedgerError> {
        let mut next = self.entries.clone();
        next.push(entry);

        let persisted: Vec<PersistedEntry> = next.iter().map(PersistedEntry::from).collect();
        let document = serde_json::to_string(&persisted)?;
        self.store.set(HISTORY_KEY, &document)?;

        self.entries = next;
        grab_debug!("history now holds {} entries", self.entries.len());
        Ok(self.entries.clone())
    }
}

fn read_entries(store: &dyn KeyValueStore) -> Vec<HistoryEntry> {
    let document = match store.get(HISTORY_KEY) {
        Ok(Some(text)) => text,
        Ok(None) => return Vec::new(),
        Err(err) => {
            grab_warn!("Failed to read download history: {}", err);
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<PersistedEntry>>(&document) {
        Ok(entries) => {
            grab_info!("Loaded {} history entries", entries.len());
            entries.into_iter().map(HistoryEntry::from).collect()
        }
        Err(err) => {
            grab_warn!("Ignoring malformed download history: {}", err);
            Vec::new()
        }
    }
}
