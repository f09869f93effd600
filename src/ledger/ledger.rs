use std::collections::HashMap;

use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{
    expense::{ExpenseCandidate, ExpensePatch, ExpenseRecord},
    id::{ExpenseId, IdGenerator},
};
use crate::{
    errors::{LedgerError, ValidationErrors},
    validation::Validator,
};

/// Ordered, id-indexed collection of committed expense records.
///
/// Records only enter through [`Ledger::add`], [`Ledger::update`] or
/// [`Ledger::hydrate`], each of which runs the validator first, so every
/// stored record satisfies the validation rules. Iteration follows insertion
/// order; lookups by id go through a hash index.
#[derive(Debug, Clone)]
pub struct Ledger {
    id: Uuid,
    records: Vec<ExpenseRecord>,
    index: HashMap<ExpenseId, usize>,
    ids: IdGenerator,
    validator: Validator,
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_validator(Validator::default())
    }

    pub fn with_validator(validator: Validator) -> Self {
        Self {
            id: Uuid::new_v4(),
            records: Vec::new(),
            index: HashMap::new(),
            ids: IdGenerator::new(),
            validator,
        }
    }

    /// Rebuilds a ledger from a persisted snapshot, keeping its order.
    ///
    /// Every record is re-validated and ids must be unique and no later than
    /// [`MAX_TIMESTAMP_MILLIS`](super::id::MAX_TIMESTAMP_MILLIS); new ids are
    /// issued after the greatest stored one.
    pub fn hydrate(
        validator: Validator,
        records: impl IntoIterator<Item = ExpenseRecord>,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::with_validator(validator);
        for record in records {
            if ledger.index.contains_key(&record.id) {
                return Err(LedgerError::DuplicateId(record.id));
            }
            ledger
                .validator
                .revalidate(&record)
                .map_err(|errors| LedgerError::InvalidRecord {
                    id: record.id,
                    errors,
                })?;
            ledger
                .ids
                .resume_after(record.id)
                .map_err(|_| LedgerError::IdOutOfRange(record.id))?;
            ledger.index.insert(record.id, ledger.records.len());
            ledger.records.push(record);
        }
        info!(
            ledger = %ledger.id,
            records = ledger.records.len(),
            "hydrated ledger from snapshot"
        );
        Ok(ledger)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Validates `candidate` and commits it under a fresh id.
    ///
    /// On failure the ledger is left untouched.
    pub fn add(
        &mut self,
        candidate: &ExpenseCandidate,
    ) -> Result<ExpenseRecord, ValidationErrors> {
        let normalized = self.validator.validate(candidate).map_err(|errors| {
            warn!(ledger = %self.id, %errors, "rejected expense candidate");
            errors
        })?;
        let record = normalized.into_record(self.ids.next_id());
        self.index.insert(record.id, self.records.len());
        self.records.push(record.clone());
        debug!(ledger = %self.id, expense = %record.id, "added expense");
        Ok(record)
    }

    /// Applies `patch` to the record with `id`, validating the merged result
    /// as a whole. Either the full replacement is stored or nothing changes.
    pub fn update(
        &mut self,
        id: ExpenseId,
        patch: &ExpensePatch,
    ) -> Result<ExpenseRecord, LedgerError> {
        let position = *self.index.get(&id).ok_or(LedgerError::NotFound(id))?;
        let merged = patch.merge_into(&self.records[position]);
        let normalized = self.validator.validate(&merged).map_err(|errors| {
            warn!(ledger = %self.id, expense = %id, %errors, "rejected expense update");
            errors
        })?;
        let record = normalized.into_record(id);
        self.records[position] = record.clone();
        debug!(ledger = %self.id, expense = %id, "updated expense");
        Ok(record)
    }

    /// Removes and returns the record with `id`.
    pub fn remove(&mut self, id: ExpenseId) -> Result<ExpenseRecord, LedgerError> {
        let position = self.index.remove(&id).ok_or(LedgerError::NotFound(id))?;
        let record = self.records.remove(position);
        for (offset, shifted) in self.records[position..].iter().enumerate() {
            self.index.insert(shifted.id, position + offset);
        }
        debug!(ledger = %self.id, expense = %id, "removed expense");
        Ok(record)
    }

    pub fn get(&self, id: ExpenseId) -> Option<&ExpenseRecord> {
        self.index.get(&id).map(|&position| &self.records[position])
    }

    pub fn contains(&self, id: ExpenseId) -> bool {
        self.index.contains_key(&id)
    }

    /// Every record, in insertion order.
    pub fn all(&self) -> &[ExpenseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    /// Records matching `predicate`, in insertion order.
    pub fn query<P>(&self, mut predicate: P) -> Vec<&ExpenseRecord>
    where
        P: FnMut(&ExpenseRecord) -> bool,
    {
        self.records.iter().filter(|record| predicate(record)).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ReasonCode;
    use crate::ledger::Category;
    use crate::validation::ValidationRules;
    use rust_decimal_macros::dec;

    fn candidate(amount: f64, description: &str, category: &str, date: &str) -> ExpenseCandidate {
        ExpenseCandidate::new(amount, description, category, date)
    }

    fn stocked_ledger() -> (Ledger, Vec<ExpenseId>) {
        let mut ledger = Ledger::new();
        let ids = [
            candidate(50.0, "Lunch", "Food", "2024-03-01"),
            candidate(25.5, "Bus pass", "Transport", "2024-03-02"),
            candidate(12.0, "Cinema", "Entertainment", "2024-03-03"),
        ]
        .iter()
        .map(|c| ledger.add(c).expect("valid candidate").id)
        .collect();
        (ledger, ids)
    }

    #[test]
    fn add_assigns_increasing_ids_and_keeps_order() {
        let (ledger, ids) = stocked_ledger();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        let stored: Vec<_> = ledger.all().iter().map(|record| record.id).collect();
        assert_eq!(stored, ids);
    }

    #[test]
    fn rejected_add_leaves_ledger_unchanged() {
        let (mut ledger, _) = stocked_ledger();
        let before = ledger.all().to_vec();
        let errors = ledger
            .add(&candidate(0.0, "x", "Food", "2024-01-01"))
            .unwrap_err();
        assert_eq!(errors.reasons(), vec![ReasonCode::NonPositiveAmount]);
        assert_eq!(ledger.all(), before.as_slice());
    }

    #[test]
    fn update_replaces_record_in_place() {
        let (mut ledger, ids) = stocked_ledger();
        let updated = ledger
            .update(ids[1], &ExpensePatch::new().amount(30.0).category("Other"))
            .unwrap();
        assert_eq!(updated.id, ids[1]);
        assert_eq!(updated.amount.value(), dec!(30));
        assert_eq!(updated.category, Category::Other);
        assert_eq!(updated.description.as_str(), "Bus pass");
        assert_eq!(ledger.get(ids[1]), Some(&updated));
        assert_eq!(ledger.all()[1], updated);
    }

    #[test]
    fn invalid_update_is_all_or_nothing() {
        let (mut ledger, ids) = stocked_ledger();
        let original = ledger.get(ids[0]).cloned().unwrap();
        let err = ledger
            .update(ids[0], &ExpensePatch::new().amount(99.0).description("   "))
            .unwrap_err();
        match err {
            LedgerError::Invalid(errors) => {
                assert_eq!(errors.reasons(), vec![ReasonCode::EmptyDescription])
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(ledger.get(ids[0]), Some(&original));
    }

    #[test]
    fn update_and_remove_report_missing_ids() {
        let (mut ledger, _) = stocked_ledger();
        let missing: ExpenseId = "1-0".parse().unwrap();
        assert_eq!(
            ledger.update(missing, &ExpensePatch::new().amount(10.0)),
            Err(LedgerError::NotFound(missing))
        );
        assert_eq!(ledger.remove(missing), Err(LedgerError::NotFound(missing)));
    }

    #[test]
    fn remove_reindexes_later_records() {
        let (mut ledger, ids) = stocked_ledger();
        let removed = ledger.remove(ids[0]).unwrap();
        assert_eq!(removed.id, ids[0]);
        assert!(ledger.get(ids[0]).is_none());
        assert_eq!(ledger.get(ids[2]).map(|record| record.id), Some(ids[2]));
        assert_eq!(ledger.len(), 2);

        ledger
            .update(ids[2], &ExpensePatch::new().description("Theatre"))
            .unwrap();
        assert_eq!(ledger.all()[1].description.as_str(), "Theatre");
    }

    #[test]
    fn query_filters_in_insertion_order() {
        let (mut ledger, _) = stocked_ledger();
        ledger
            .add(&candidate(8.0, "Snack", "Food", "2024-02-01"))
            .unwrap();
        let food: Vec<_> = ledger
            .query(|record| record.category == Category::Food)
            .into_iter()
            .map(|record| record.description.as_str())
            .collect();
        assert_eq!(food, vec!["Lunch", "Snack"]);
    }

    #[test]
    fn hydrate_rejects_duplicates_and_invalid_records() {
        let (ledger, ids) = stocked_ledger();
        let mut records = ledger.all().to_vec();
        records.push(records[0].clone());
        assert_eq!(
            Ledger::hydrate(Validator::default(), records).unwrap_err(),
            LedgerError::DuplicateId(ids[0])
        );

        let strict = Validator::new(ValidationRules::default().with_max_description_chars(6));
        let err = Ledger::hydrate(strict, ledger.all().to_vec()).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRecord { id, .. } if id == ids[1]));
    }

    #[test]
    fn hydrate_refuses_ids_with_no_successor() {
        let (ledger, _) = stocked_ledger();
        let mut records = ledger.all().to_vec();
        let end: ExpenseId = "9223372036854775807-4294967295".parse().unwrap();
        records[2].id = end;
        assert_eq!(
            Ledger::hydrate(Validator::default(), records).unwrap_err(),
            LedgerError::IdOutOfRange(end)
        );
    }

    #[test]
    fn hydrated_ledger_issues_ids_after_stored_ones() {
        let (ledger, ids) = stocked_ledger();
        let mut restored = Ledger::hydrate(Validator::default(), ledger.all().to_vec()).unwrap();
        assert_eq!(restored.all(), ledger.all());
        let fresh = restored
            .add(&candidate(1.0, "Gum", "Food", "2024-03-04"))
            .unwrap();
        assert!(ids.iter().all(|id| *id < fresh.id));
    }
}
