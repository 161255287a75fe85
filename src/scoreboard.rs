//! High score leaderboard controller
//!
//! Holds the ranked record list in memory and keeps storage in step with it
//! on a best-effort basis. Changes apply to the in-memory list immediately;
//! storage work is queued and completed in `settle`, which the host calls
//! once per frame. Failures are logged and reflected in `SyncStatus`, never
//! retried or rolled back.

use crate::platform::now_iso8601;
use crate::records::{Record, RecordList};
use crate::store::{self, Storage, StoreError};

/// How the in-memory list relates to what is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStatus {
    /// Initial read requested, not yet settled
    Loading,
    /// Storage matches memory (as far as we know)
    Synced,
    /// A write is queued
    Pending,
    /// The last storage operation failed; memory is ahead of storage
    Unsynced,
}

pub struct ScoreBoard {
    store: Box<dyn Storage>,
    records: RecordList,
    load_requested: bool,
    persist_requested: bool,
    status: SyncStatus,
}

impl ScoreBoard {
    pub fn new(store: Box<dyn Storage>) -> Self {
        Self {
            store,
            records: RecordList::new(),
            load_requested: false,
            persist_requested: false,
            status: SyncStatus::Synced,
        }
    }

    pub fn records(&self) -> &RecordList {
        &self.records
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn store(&self) -> &dyn Storage {
        self.store.as_ref()
    }

    /// Queue the initial read of stored records
    pub fn load_initial(&mut self) {
        self.load_requested = true;
        self.status = SyncStatus::Loading;
    }

    /// Record a score now; the write happens on the next `settle`
    /// Returns the rank achieved (1-indexed)
    pub fn append(&mut self, user: &str, score: u64) -> usize {
        self.append_record(Record::new(user, score, now_iso8601()))
    }

    pub fn append_record(&mut self, record: Record) -> usize {
        log::info!("New record: {} ({} points)", record.user, record.score);
        let rank = self.records.insert(record);
        self.persist_requested = true;
        if self.status != SyncStatus::Loading {
            self.status = SyncStatus::Pending;
        }
        rank
    }

    /// True while a load or write is waiting for `settle`
    pub fn has_pending(&self) -> bool {
        self.load_requested || self.persist_requested
    }

    /// Complete queued storage work
    pub fn settle(&mut self) {
        let mut failed = false;

        if std::mem::take(&mut self.load_requested) {
            failed |= !self.finish_load();
        }

        if std::mem::take(&mut self.persist_requested) {
            match store::save_records(self.store.as_mut(), &self.records) {
                Ok(()) => log::info!("Records saved ({} entries)", self.records.len()),
                Err(e) => {
                    log::error!("Error saving records: {}", e);
                    failed = true;
                }
            }
        }

        if failed {
            self.status = SyncStatus::Unsynced;
        } else if matches!(self.status, SyncStatus::Loading | SyncStatus::Pending) {
            self.status = SyncStatus::Synced;
        }
    }

    /// Merge stored records with anything appended before the load settled.
    /// Returns false if storage could not be read.
    fn finish_load(&mut self) -> bool {
        match store::load_records(self.store.as_ref()) {
            Ok(stored) => {
                log::info!("Loaded {} records", stored.len());
                let local = std::mem::replace(&mut self.records, stored);
                for record in local.iter().cloned() {
                    self.records.insert(record);
                }
                true
            }
            Err(e @ StoreError::Deserialization { .. }) => {
                // Unreadable history is dropped; the next write replaces it
                log::warn!("Discarding stored records: {}", e);
                true
            }
            Err(e) => {
                log::error!("Error loading records: {}", e);
                false
            }
        }
    }
}
