//! Property test generators for expense candidates, covering both sides of
//! every validation rule.

use chrono::{Duration, NaiveDate};
use expense_ledger::ledger::{Category, ExpenseCandidate};
use proptest::prelude::*;

pub const VALID_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Entertainment",
    "Utilities",
    "Healthcare",
    "Other",
];

/// Generate one of the supported category names
pub fn category_name() -> impl Strategy<Value = String> {
    prop::sample::select(Category::ALL.to_vec()).prop_map(|category| category.to_string())
}

/// Generate amounts between one cent and just under a million
pub fn positive_amount() -> impl Strategy<Value = f64> {
    0.01f64..999_999.99
}

/// Generate descriptions of 1..=200 printable characters that are not blank
pub fn non_empty_description() -> impl Strategy<Value = String> {
    "[ -~]{1,200}".prop_filter("description must not be blank", |s| !s.trim().is_empty())
}

/// Generate canonical dates between 2000-01-01 and 2099-12-31
pub fn valid_date() -> impl Strategy<Value = String> {
    (0i64..36_525).prop_map(|offset| {
        let base = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap_or_default();
        (base + Duration::days(offset)).format("%Y-%m-%d").to_string()
    })
}

/// Generate candidates that satisfy every rule
pub fn valid_candidate() -> impl Strategy<Value = ExpenseCandidate> {
    (
        positive_amount(),
        non_empty_description(),
        category_name(),
        valid_date(),
    )
        .prop_map(|(amount, description, category, date)| {
            ExpenseCandidate::new(amount, description, category, date)
        })
}

/// Generate zero, negative zero, NaN, and negative amounts
pub fn invalid_amount() -> impl Strategy<Value = f64> {
    prop_oneof![
        Just(0.0),
        Just(-0.0),
        Just(f64::NAN),
        -1e12f64..-0.01,
    ]
}

/// Generate empty and whitespace-only descriptions
pub fn invalid_description() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        Just("\t".to_string()),
        Just("\n".to_string()),
        "[ \t\n\r]{0,10}",
    ]
}

/// Generate missing, empty, and unsupported categories
pub fn invalid_category() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        any::<String>()
            .prop_filter("must not name a real category", |s| {
                !VALID_CATEGORIES.contains(&s.as_str())
            })
            .prop_map(Some),
    ]
}
