//! Identifier generator capability.
//!
//! # Invariants
//! - A generator never hands out the same id twice in its lifetime.

use crate::model::record::RecordId;
use std::cell::Cell;
use uuid::Uuid;

/// Source of fresh record identifiers.
pub trait IdGenerator {
    fn next_id(&self) -> RecordId;
}

/// Random UUID v4 identifiers in hyphenated form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> RecordId {
        Uuid::new_v4().to_string()
    }
}

/// Deterministic `<prefix>-<n>` identifiers, zero-padded so key order
/// matches allocation order.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: Cell<u64>,
}

impl SequentialIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: Cell::new(1),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_id(&self) -> RecordId {
        let current = self.next.get();
        self.next.set(current + 1);
        format!("{}-{current:06}", self.prefix)
    }
}
