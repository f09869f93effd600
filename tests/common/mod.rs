#![allow(dead_code)]

pub mod generators;

use std::sync::Mutex;

use expense_ledger::{
    config::ConfigManager,
    ledger::ExpenseCandidate,
    storage::{FileStore, KeyValuePersistence},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates file-backed storage and a config manager in a unique directory.
pub fn setup_test_env() -> (KeyValuePersistence<FileStore>, ConfigManager) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = FileStore::new(base.join("store")).expect("create file store");
    let storage = KeyValuePersistence::with_default_key(store);
    let config_manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");

    (storage, config_manager)
}

/// A valid candidate with sensible defaults.
pub fn mock_candidate() -> ExpenseCandidate {
    ExpenseCandidate::new(50.0, "Test expense", "Food", "2024-01-15")
}

pub fn candidate(amount: f64, description: &str, category: &str, date: &str) -> ExpenseCandidate {
    ExpenseCandidate::new(amount, description, category, date)
}
