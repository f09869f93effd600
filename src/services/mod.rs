pub mod summary_service;

pub use summary_service::{CategoryTotal, ExpenseSummary, SummaryService};

use crate::ledger::ExpenseDate;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error("date range is inverted: {from} is after {to}")]
    InvertedRange { from: ExpenseDate, to: ExpenseDate },
}
