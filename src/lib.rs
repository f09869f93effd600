#![doc(test(attr(deny(warnings))))]

//! Expense Ledger validates, stores, and aggregates personal expense records.
//!
//! Candidates flow through the [`validation::Validator`] into a
//! [`ledger::Ledger`], which assigns identifiers and keeps every committed
//! record valid. [`services::SummaryService`] derives totals from ledger
//! snapshots, and [`storage`] provides the key-value persistence adapters.

pub mod config;
pub mod errors;
pub mod ledger;
pub mod services;
pub mod storage;
pub mod utils;
pub mod validation;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Expense ledger tracing initialized.");
    });
}
