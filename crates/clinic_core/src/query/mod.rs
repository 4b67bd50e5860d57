//! Stateless predicates evaluated over a full repository scan.
//!
//! # Responsibility
//! - Equality selection by a record field.
//! - Inclusive range selection over ordered keys (calendar dates, prices).
//!
//! # Invariants
//! - No auxiliary index is kept; every query is linear in the record count.
//! - Both range bounds are inclusive.

mod filter;

pub use filter::{date_range, field_equals, price_range, InclusiveRange};
