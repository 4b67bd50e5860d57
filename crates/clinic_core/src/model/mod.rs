//! Clinic domain model.
//!
//! # Responsibility
//! - Define the four persisted record shapes and their payloads.
//! - Own the required-field tables used by payload validation.
//!
//! # Invariants
//! - Every record is identified by a stable `RecordId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod appointment;
pub mod patient;
pub mod record;
pub mod schema;
pub mod therapist;
pub mod treatment;
