//! Pure checks and normalization applied to every candidate before it can
//! enter a ledger.

use crate::{
    errors::{Field, ReasonCode, ValidationError, ValidationErrors},
    ledger::{
        Amount, Category, Description, ExpenseCandidate, ExpenseDate, ExpenseRecord,
        NormalizedExpense, RawAmount,
    },
};

/// Default upper bound on description length, in characters.
pub const DEFAULT_MAX_DESCRIPTION_CHARS: usize = 200;

/// Tunable limits the validator enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    pub max_description_chars: usize,
    /// When set, dates after this one are refused as [`ReasonCode::FutureDate`].
    pub latest_date: Option<ExpenseDate>,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_description_chars: DEFAULT_MAX_DESCRIPTION_CHARS,
            latest_date: None,
        }
    }
}

impl ValidationRules {
    pub fn with_max_description_chars(mut self, max: usize) -> Self {
        self.max_description_chars = max;
        self
    }

    pub fn with_latest_date(mut self, latest: ExpenseDate) -> Self {
        self.latest_date = Some(latest);
        self
    }
}

/// Stateless gatekeeper for expense candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Validator {
    rules: ValidationRules,
}

impl Validator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ValidationRules {
        &self.rules
    }

    /// Checks every field independently and reports all violations at once.
    pub fn validate(
        &self,
        candidate: &ExpenseCandidate,
    ) -> Result<NormalizedExpense, ValidationErrors> {
        let mut errors = Vec::new();
        let amount = collect(&mut errors, Field::Amount, validate_amount(candidate.amount));
        let description = collect(
            &mut errors,
            Field::Description,
            validate_description(&candidate.description, &self.rules),
        );
        let category = collect(
            &mut errors,
            Field::Category,
            validate_category(candidate.category.as_deref()),
        );
        let date = collect(
            &mut errors,
            Field::Date,
            validate_date(&candidate.date, &self.rules),
        );

        if let (Some(amount), Some(description), Some(category), Some(date)) =
            (amount, description, category, date)
        {
            return Ok(NormalizedExpense {
                amount,
                description,
                category,
                date,
            });
        }
        Err(ValidationErrors(errors))
    }

    /// Runs a committed record back through the current rules.
    pub fn revalidate(&self, record: &ExpenseRecord) -> Result<(), ValidationErrors> {
        self.validate(&record.to_candidate()).map(|_| ())
    }
}

fn collect<T>(
    errors: &mut Vec<ValidationError>,
    field: Field,
    result: Result<T, ReasonCode>,
) -> Option<T> {
    result
        .map_err(|reason| errors.push(ValidationError::new(field, reason)))
        .ok()
}

pub fn validate_amount(raw: RawAmount) -> Result<Amount, ReasonCode> {
    Amount::from_raw(raw)
}

pub fn validate_description(raw: &str, rules: &ValidationRules) -> Result<Description, ReasonCode> {
    let description = Description::new(raw)?;
    if description.char_count() > rules.max_description_chars {
        return Err(ReasonCode::TooLongDescription);
    }
    Ok(description)
}

pub fn validate_category(raw: Option<&str>) -> Result<Category, ReasonCode> {
    raw.ok_or(ReasonCode::UnknownCategory)?.parse()
}

pub fn validate_date(raw: &str, rules: &ValidationRules) -> Result<ExpenseDate, ReasonCode> {
    let date = ExpenseDate::parse(raw)?;
    match rules.latest_date {
        Some(latest) if date > latest => Err(ReasonCode::FutureDate),
        _ => Ok(date),
    }
}
