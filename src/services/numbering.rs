//! Document number generation.
//!
//! Supply and purchase orders carry a unique, human-readable number of
//! the form `{PREFIX}-{YEAR}-{NNN}` where the prefix depends on the
//! order kind. Outbound orders use their own counters (`OS-...`) plus a
//! trámite number.
//!
//! Generation never fails: when the sequential probe is exhausted a
//! timestamp-derived fallback is returned. Two concurrent writers may
//! still propose the same number; the unique index on the document
//! number column is the only safety net, and the loser surfaces a
//! database error.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::entities::OrderKind;
use crate::errors::ServiceError;

/// Exact shape of a sequential document number. Only numbers matching
/// this pattern participate in the max-sequence scan.
pub static DOCUMENT_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]{2,4})-(\d{4})-(\d{3})$").expect("valid regex"));

/// Data contract the generator needs from a document table.
#[async_trait]
pub trait DocumentStore {
    /// Highest 3-digit sequence already allocated for (prefix, year),
    /// or `None` when the table holds no such numbers.
    async fn max_sequence(&self, prefix: &str, year: i32) -> Result<Option<u32>, ServiceError>;

    /// Whether the exact document number is already taken.
    async fn number_exists(&self, number: &str) -> Result<bool, ServiceError>;
}

/// Parse the 3-digit sequence out of a document number, provided it
/// matches `{prefix}-{year}-{NNN}` exactly.
pub fn parse_sequence(number: &str, prefix: &str, year: i32) -> Option<u32> {
    let caps = DOCUMENT_NUMBER_RE.captures(number)?;
    if &caps[1] != prefix || caps[2].parse::<i32>().ok()? != year {
        return None;
    }
    caps[3].parse().ok()
}

/// Allocate the next document number for an order kind in the current
/// year.
pub async fn next_document_number<S>(store: &S, kind: OrderKind) -> Result<String, ServiceError>
where
    S: DocumentStore + ?Sized,
{
    next_document_number_for(store, kind.prefix(), Utc::now().year()).await
}

pub(crate) async fn next_document_number_for<S>(
    store: &S,
    prefix: &str,
    year: i32,
) -> Result<String, ServiceError>
where
    S: DocumentStore + ?Sized,
{
    // (a) max existing sequence + 1
    let next = store.max_sequence(prefix, year).await?.unwrap_or(0) + 1;
    if next <= 999 {
        let candidate = format!("{}-{}-{:03}", prefix, year, next);
        if !store.number_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    // (b) linear probe for the first unused sequence
    for seq in 1..=999u32 {
        let candidate = format!("{}-{}-{:03}", prefix, year, seq);
        if !store.number_exists(&candidate).await? {
            return Ok(candidate);
        }
    }

    // (c) timestamp fallback; sacrifices strict sequentiality but is
    // unique with very high probability
    Ok(fallback_number(prefix, year))
}

pub(crate) fn fallback_number(prefix: &str, year: i32) -> String {
    let millis = Utc::now().timestamp_millis();
    format!("{}-{}-{:05}", prefix, year, millis % 100_000)
}

/// Outbound order number: `OS-{NNNN}-{YEAR}` where NNNN is the total
/// outbound order count plus one.
pub fn outbound_order_number(existing_orders: u64, year: i32) -> String {
    format!("OS-{:04}-{}", existing_orders + 1, year)
}

/// Monthly dispatch number: `OS-{YYYY-MM}-{NNNN}` where NNNN counts the
/// outbound orders already dispatched in that month, plus one.
pub fn dispatch_batch_number(dispatch_date: NaiveDate, orders_in_month: u64) -> String {
    format!(
        "OS-{}-{:04}",
        dispatch_date.format("%Y-%m"),
        orders_in_month + 1
    )
}

/// Trámite (processing) number: `TRAM-{YYYYMM}-{NNN}` with a
/// millisecond-derived 3-digit suffix.
pub fn tramite_number() -> String {
    let now = Utc::now();
    let millis = now.timestamp_millis();
    format!("TRAM-{}-{:03}", now.format("%Y%m"), millis % 1000)
}
