use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    amount::{Amount, RawAmount},
    category::Category,
    date::ExpenseDate,
    id::ExpenseId,
};
use crate::errors::ReasonCode;

/// Free-text label of an expense, stored trimmed and never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Description(String);

impl Description {
    pub fn new(raw: &str) -> Result<Self, ReasonCode> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ReasonCode::EmptyDescription);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters, the unit the maximum-length rule counts in.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Description {
    type Error = ReasonCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Description> for String {
    fn from(description: Description) -> Self {
        description.0
    }
}

/// An expense as entered, before validation and id assignment.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExpenseCandidate {
    pub amount: RawAmount,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub date: String,
}

impl ExpenseCandidate {
    pub fn new(
        amount: impl Into<RawAmount>,
        description: impl Into<String>,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self {
            amount: amount.into(),
            description: description.into(),
            category: Some(category.into()),
            date: date.into(),
        }
    }

    /// Replaces the category with a missing value.
    pub fn without_category(mut self) -> Self {
        self.category = None;
        self
    }
}

/// Field-wise changes applied to a committed record by `Ledger::update`.
///
/// Unset fields keep the stored value; the merged record is validated as a
/// whole before anything is written.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExpensePatch {
    pub amount: Option<RawAmount>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl ExpensePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(mut self, amount: impl Into<RawAmount>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.date.is_none()
    }

    /// Builds the candidate that results from applying this patch to `record`.
    pub fn merge_into(&self, record: &ExpenseRecord) -> ExpenseCandidate {
        let base = record.to_candidate();
        ExpenseCandidate {
            amount: self.amount.unwrap_or(base.amount),
            description: self.description.clone().unwrap_or(base.description),
            category: self.category.clone().or(base.category),
            date: self.date.clone().unwrap_or(base.date),
        }
    }
}

/// A candidate that passed validation and carries normalized values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExpense {
    pub amount: Amount,
    pub description: Description,
    pub category: Category,
    pub date: ExpenseDate,
}

impl NormalizedExpense {
    pub fn into_record(self, id: ExpenseId) -> ExpenseRecord {
        ExpenseRecord {
            id,
            amount: self.amount,
            description: self.description,
            category: self.category,
            date: self.date,
        }
    }
}

/// A validated expense committed to a ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub amount: Amount,
    pub description: Description,
    pub category: Category,
    pub date: ExpenseDate,
}

impl ExpenseRecord {
    /// Re-expresses the record as a candidate so it can be validated again.
    pub fn to_candidate(&self) -> ExpenseCandidate {
        ExpenseCandidate {
            amount: RawAmount::from(self.amount),
            description: self.description.as_str().to_string(),
            category: Some(self.category.as_str().to_string()),
            date: self.date.to_string(),
        }
    }
}
