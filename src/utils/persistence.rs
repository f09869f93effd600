use tracing::info;

use crate::{
    errors::StorageError,
    ledger::Ledger,
    storage::ExpenseStorage,
    validation::Validator,
};

/// Hydrates a ledger from `storage`, re-validating every stored record.
pub fn load_ledger(
    storage: &dyn ExpenseStorage,
    validator: Validator,
) -> Result<Ledger, StorageError> {
    let records = storage.load()?;
    Ok(Ledger::hydrate(validator, records)?)
}

/// Writes the ledger's records, in order, to `storage`.
pub fn save_ledger(storage: &dyn ExpenseStorage, ledger: &Ledger) -> Result<(), StorageError> {
    storage.save(ledger.all())?;
    info!(ledger = %ledger.id(), records = ledger.len(), "persisted ledger");
    Ok(())
}
