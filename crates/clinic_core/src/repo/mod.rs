//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the ordered record-store contract and its SQLite/in-memory backends.
//! - Provide the generic CRUD repository shared by every entity kind.
//!
//! # Invariants
//! - Repository writes validate payloads before any store mutation.
//! - Repository APIs return semantic errors (`Validation`, `NotFound`) in
//!   addition to DB transport errors.

pub mod error;
mod queries;
pub mod repository;
pub mod store;
