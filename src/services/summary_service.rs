//! Read-only aggregation over ledger snapshots.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{Category, DateRange, ExpenseDate, ExpenseRecord};

use super::{ServiceError, ServiceResult};

/// Sum and record count for one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
    pub count: usize,
}

/// Totals handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseSummary {
    pub total: Decimal,
    pub count: usize,
    pub per_category: Vec<CategoryTotal>,
}

/// Derives totals and breakdowns without mutating the records it is given.
///
/// Accumulation is exact decimal addition, so the result does not depend on
/// the order of the records.
pub struct SummaryService;

impl SummaryService {
    /// Sum of every amount; zero for no records.
    pub fn total<'a, I>(records: I) -> Decimal
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        records
            .into_iter()
            .fold(Decimal::ZERO, |sum, record| accumulate(sum, record))
    }

    /// Per-category sums; categories without records are absent.
    pub fn by_category<'a, I>(records: I) -> BTreeMap<Category, Decimal>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut totals = BTreeMap::new();
        for record in records {
            let entry = totals.entry(record.category).or_insert(Decimal::ZERO);
            *entry = accumulate(*entry, record);
        }
        totals
    }

    /// Per-category sums covering every category, zero-filled.
    pub fn by_category_filled<'a, I>(records: I) -> BTreeMap<Category, Decimal>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut totals: BTreeMap<_, _> = Category::ALL
            .into_iter()
            .map(|category| (category, Decimal::ZERO))
            .collect();
        totals.extend(Self::by_category(records));
        totals
    }

    /// Records dated within `[from, to]`, oldest first.
    ///
    /// Records sharing a date keep their relative input order.
    pub fn in_date_range<'a, I>(
        records: I,
        from: ExpenseDate,
        to: ExpenseDate,
    ) -> ServiceResult<Vec<&'a ExpenseRecord>>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let range = DateRange::new(from, to).ok_or(ServiceError::InvertedRange { from, to })?;
        let mut matching: Vec<_> = records
            .into_iter()
            .filter(|record| range.contains(record.date))
            .collect();
        matching.sort_by_key(|record| record.date);
        Ok(matching)
    }

    /// Overall and per-category totals with record counts.
    pub fn summarize<'a, I>(records: I) -> ExpenseSummary
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let mut per_category: BTreeMap<Category, CategoryTotal> = BTreeMap::new();
        let mut total = Decimal::ZERO;
        let mut count = 0;
        for record in records {
            total = accumulate(total, record);
            count += 1;
            let entry = per_category
                .entry(record.category)
                .or_insert_with(|| CategoryTotal {
                    category: record.category,
                    total: Decimal::ZERO,
                    count: 0,
                });
            entry.total = accumulate(entry.total, record);
            entry.count += 1;
        }
        ExpenseSummary {
            total,
            count,
            per_category: per_category.into_values().collect(),
        }
    }
}

// Saturates at the edge of the decimal range instead of panicking.
fn accumulate(sum: Decimal, record: &ExpenseRecord) -> Decimal {
    sum.saturating_add(record.amount.value())
}
