use std::{fmt, str::FromStr};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Latest timestamp a stored or issued id may carry: 9999-12-31T23:59:59.999Z.
pub const MAX_TIMESTAMP_MILLIS: i64 = 253_402_300_799_999;

/// Identifier assigned to a record when it is committed to a ledger.
///
/// Ordered by `(timestamp, sequence)`, so ids from one generator compare in
/// creation order. Rendered as `<millis>-<sequence>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ExpenseId {
    millis: i64,
    sequence: u32,
}

impl ExpenseId {
    pub fn timestamp_millis(self) -> i64 {
        self.millis
    }

    pub fn sequence(self) -> u32 {
        self.sequence
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.millis, self.sequence)
    }
}

/// Raised when text is not a rendered [`ExpenseId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed expense id `{0}`")]
pub struct ParseExpenseIdError(String);

impl FromStr for ExpenseId {
    type Err = ParseExpenseIdError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || ParseExpenseIdError(value.to_string());
        let (millis, sequence) = value.rsplit_once('-').ok_or_else(malformed)?;
        let id = Self {
            millis: millis.parse().map_err(|_| malformed())?,
            sequence: sequence.parse().map_err(|_| malformed())?,
        };
        // Only the canonical rendering is accepted, so ids survive a reload verbatim.
        if id.to_string() != value {
            return Err(malformed());
        }
        Ok(id)
    }
}

impl TryFrom<String> for ExpenseId {
    type Error = ParseExpenseIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ExpenseId> for String {
    fn from(id: ExpenseId) -> Self {
        id.to_string()
    }
}

/// Raised when an id leaves no room for later ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("expense id {0} lies past the latest issuable timestamp")]
pub struct IdOutOfRange(pub ExpenseId);

/// Hands out strictly increasing [`ExpenseId`]s.
///
/// The wall clock only seeds the timestamp half; whenever it fails to move
/// forward the previous timestamp is reused with the next sequence number.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<ExpenseId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> ExpenseId {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Guarantees every later id compares greater than `id`.
    ///
    /// Ids stamped after [`MAX_TIMESTAMP_MILLIS`] are refused.
    pub fn resume_after(&mut self, id: ExpenseId) -> Result<(), IdOutOfRange> {
        if id.millis > MAX_TIMESTAMP_MILLIS {
            return Err(IdOutOfRange(id));
        }
        if self.last.map_or(true, |last| last < id) {
            self.last = Some(id);
        }
        Ok(())
    }

    pub fn last_issued(&self) -> Option<ExpenseId> {
        self.last
    }

    pub(crate) fn next_at(&mut self, now_millis: i64) -> ExpenseId {
        let id = match self.last {
            Some(last) if now_millis <= last.millis => match last.sequence.checked_add(1) {
                Some(sequence) => ExpenseId {
                    millis: last.millis,
                    sequence,
                },
                // Seeds never exceed MAX_TIMESTAMP_MILLIS, so rolling over
                // one millisecond per exhausted sequence cannot reach i64::MAX.
                None => ExpenseId {
                    millis: last.millis.saturating_add(1),
                    sequence: 0,
                },
            },
            _ => ExpenseId {
                millis: now_millis,
                sequence: 0,
            },
        };
        self.last = Some(id);
        id
    }
}
