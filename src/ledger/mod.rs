//! Expense domain types, the identifier generator, and the ledger itself.

pub mod amount;
pub mod category;
pub mod date;
pub mod expense;
pub mod id;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod shared;

pub use amount::{Amount, RawAmount};
pub use category::Category;
pub use date::{DateRange, ExpenseDate, DATE_FORMAT};
pub use expense::{Description, ExpenseCandidate, ExpensePatch, ExpenseRecord, NormalizedExpense};
pub use id::{ExpenseId, IdGenerator, IdOutOfRange, ParseExpenseIdError, MAX_TIMESTAMP_MILLIS};
pub use ledger::Ledger;
pub use shared::SharedLedger;
