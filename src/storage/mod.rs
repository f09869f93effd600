//! Persistence adapters that move ledger snapshots in and out of a
//! key-value byte store.

pub mod json_backend;
pub mod memory;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{errors::StorageError, ledger::ExpenseRecord};

pub use json_backend::FileStore;
pub use memory::MemoryStore;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Key under which expenses are stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

pub const SNAPSHOT_SCHEMA_VERSION: u8 = 1;

/// Byte-string store addressed by string keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;
    /// Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
    fn keys(&self) -> Result<Vec<String>>;
}

/// Loads and saves the ordered record sequence of a ledger.
pub trait ExpenseStorage: Send + Sync {
    fn load(&self) -> Result<Vec<ExpenseRecord>>;
    fn save(&self, records: &[ExpenseRecord]) -> Result<()>;
}

#[derive(Debug, Serialize)]
struct SnapshotRef<'a> {
    schema_version: u8,
    records: &'a [ExpenseRecord],
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Versioned {
        #[serde(default = "default_schema_version")]
        schema_version: u8,
        records: Vec<ExpenseRecord>,
    },
    Bare(Vec<ExpenseRecord>),
}

fn default_schema_version() -> u8 {
    SNAPSHOT_SCHEMA_VERSION
}

/// Stores the records as one JSON document under a single key.
///
/// Writes a versioned envelope; on load it also accepts a bare JSON array of
/// records. A missing key loads as an empty ledger.
#[derive(Debug, Clone)]
pub struct KeyValuePersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> KeyValuePersistence<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn with_default_key(store: S) -> Self {
        Self::new(store, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}

impl<S: KeyValueStore> ExpenseStorage for KeyValuePersistence<S> {
    fn load(&self) -> Result<Vec<ExpenseRecord>> {
        let Some(bytes) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "no stored expenses");
            return Ok(Vec::new());
        };
        let records = match serde_json::from_slice(&bytes)? {
            StoredSnapshot::Versioned {
                schema_version,
                records,
            } => {
                if schema_version != SNAPSHOT_SCHEMA_VERSION {
                    return Err(StorageError::UnsupportedSchema(schema_version));
                }
                debug!(key = %self.key, schema_version, "read versioned snapshot");
                records
            }
            StoredSnapshot::Bare(records) => records,
        };
        info!(key = %self.key, records = records.len(), "loaded expenses");
        Ok(records)
    }

    fn save(&self, records: &[ExpenseRecord]) -> Result<()> {
        let snapshot = SnapshotRef {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            records,
        };
        let bytes = serde_json::to_vec_pretty(&snapshot)?;
        self.store.set(&self.key, &bytes)?;
        info!(key = %self.key, records = records.len(), "saved expenses");
        Ok(())
    }
}
