use std::fmt;

use thiserror::Error;

use crate::ledger::ExpenseId;

/// Candidate fields checked by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Amount,
    Description,
    Category,
    Date,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Amount => "amount",
            Field::Description => "description",
            Field::Category => "category",
            Field::Date => "date",
        };
        f.write_str(label)
    }
}

/// Machine-readable reason attached to every validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ReasonCode {
    #[error("amount must be a finite number greater than zero")]
    NonPositiveAmount,
    #[error("amount cannot be represented as a positive decimal")]
    AmountOutOfRange,
    #[error("description must not be blank")]
    EmptyDescription,
    #[error("description exceeds the maximum length")]
    TooLongDescription,
    #[error("category is not one of the supported categories")]
    UnknownCategory,
    #[error("date must be a real calendar date in YYYY-MM-DD form")]
    InvalidDate,
    #[error("date lies after the latest accepted date")]
    FutureDate,
}

/// A single failed rule, tagged with the field it applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: ReasonCode,
}

impl ValidationError {
    pub fn new(field: Field, reason: ReasonCode) -> Self {
        Self { field, reason }
    }
}

/// Every rule a candidate violated, in field order.
///
/// Never empty: a candidate with no violations validates successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(pub(crate) Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps the collected errors, returning `None` when nothing failed.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reasons(&self) -> Vec<ReasonCode> {
        self.0.iter().map(|error| error.reason).collect()
    }

    pub fn contains(&self, reason: ReasonCode) -> bool {
        self.0.iter().any(|error| error.reason == reason)
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &ValidationError> {
        self.0.iter().filter(move |error| error.field == field)
    }

    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Error type that captures ledger mutation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Expense not found: {0}")]
    NotFound(ExpenseId),
    #[error("Validation failed: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("Duplicate expense id in snapshot: {0}")]
    DuplicateId(ExpenseId),
    #[error("Stored expense id {0} is past the latest issuable timestamp")]
    IdOutOfRange(ExpenseId),
    #[error("Stored expense {id} is invalid: {errors}")]
    InvalidRecord {
        id: ExpenseId,
        errors: ValidationErrors,
    },
}

/// Failures raised by persistence adapters.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Unsupported snapshot schema version: {0}")]
    UnsupportedSchema(u8),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// Failures raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
