use std::sync::Arc;

use parking_lot::RwLock;

use super::{
    expense::{ExpenseCandidate, ExpensePatch, ExpenseRecord},
    id::ExpenseId,
    ledger::Ledger,
};
use crate::errors::{LedgerError, ValidationErrors};

/// Thread-safe handle to a [`Ledger`].
///
/// Mutations take the write lock and run one at a time; reads share the
/// read lock and never observe a half-applied mutation. Clones share the
/// same ledger.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    pub fn add(&self, candidate: &ExpenseCandidate) -> Result<ExpenseRecord, ValidationErrors> {
        self.inner.write().add(candidate)
    }

    pub fn update(
        &self,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> Result<ExpenseRecord, LedgerError> {
        self.inner.write().update(id, patch)
    }

    pub fn remove(&self, id: ExpenseId) -> Result<ExpenseRecord, LedgerError> {
        self.inner.write().remove(id)
    }

    pub fn get(&self, id: ExpenseId) -> Option<ExpenseRecord> {
        self.inner.read().get(id).cloned()
    }

    /// Owned copy of every record, in insertion order.
    pub fn all(&self) -> Vec<ExpenseRecord> {
        self.inner.read().all().to_vec()
    }

    pub fn query<P>(&self, predicate: P) -> Vec<ExpenseRecord>
    where
        P: FnMut(&ExpenseRecord) -> bool,
    {
        self.inner
            .read()
            .query(predicate)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Runs `reader` against a consistent view of the ledger.
    pub fn read<R>(&self, reader: impl FnOnce(&Ledger) -> R) -> R {
        reader(&self.inner.read())
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self::new(ledger)
    }
}
