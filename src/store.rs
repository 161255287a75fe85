//! Key-value persistence
//!
//! Features:
//! - One opaque string value per key (JSON documents in practice)
//! - Missing key reads as `None`, never as an error
//! - Backends: in-memory (here), file and LocalStorage (see `platform`)

use std::collections::HashMap;

use thiserror::Error;

use crate::records::RecordList;

/// Key holding the serialized record list
pub const RECORDS_KEY: &str = "records";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("corrupt data under `{key}`")]
    Deserialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to serialize data for `{key}`")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Read-all/write-all key-value storage
///
/// Writes replace the whole value; a later read never sees a partial write.
pub trait Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// Load the record list; a missing key is an empty list
pub fn load_records(store: &dyn Storage) -> Result<RecordList, StoreError> {
    let Some(json) = store.get_item(RECORDS_KEY)? else {
        return Ok(RecordList::new());
    };
    let mut records: RecordList =
        serde_json::from_str(&json).map_err(|source| StoreError::Deserialization {
            key: RECORDS_KEY.to_string(),
            source,
        })?;
    records.normalize_order();
    Ok(records)
}

/// Overwrite the stored record list
pub fn save_records(store: &mut dyn Storage, records: &RecordList) -> Result<(), StoreError> {
    let json = serde_json::to_string(records).map_err(|source| StoreError::Serialization {
        key: RECORDS_KEY.to_string(),
        source,
    })?;
    store.set_item(RECORDS_KEY, &json)
}

/// Process-local storage; also used to inject failures in tests
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: HashMap<String, String>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key
    pub fn with_item(mut self, key: &str, value: &str) -> Self {
        self.items.insert(key.to_string(), value.to_string());
        self
    }

    /// Every read fails
    pub fn failing_reads(mut self) -> Self {
        self.fail_reads = true;
        self
    }

    /// Every write fails
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }
}

impl Storage for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.fail_reads {
            return Err(StoreError::Read {
                key: key.to_string(),
                reason: "reads disabled".to_string(),
            });
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.fail_writes {
            return Err(StoreError::Write {
                key: key.to_string(),
                reason: "writes disabled".to_string(),
            });
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
