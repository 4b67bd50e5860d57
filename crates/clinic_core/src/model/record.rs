//! Shared record primitives.
//!
//! # Responsibility
//! - Define identity, timestamp and kind types shared by all entity records.
//! - Define the `Entity` contract the generic repository is written against.
//!
//! # Invariants
//! - `id` and `created_at` are assigned once by the repository and never change.
//! - `UpdatedAt::Never` means the record was never updated since creation.

use crate::model::schema::Schema;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Stable record identifier.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = String;

/// Logical time in nanoseconds, as handed out by a `Clock`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(pub u64);

impl Timestamp {
    pub fn as_nanos(self) -> u64 {
        self.0
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Last-modified state of a mutable record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "at", rename_all = "snake_case")]
pub enum UpdatedAt {
    /// Record has not been updated since creation.
    #[default]
    Never,
    /// Logical time of the most recent successful update.
    At(Timestamp),
}

impl UpdatedAt {
    pub fn timestamp(self) -> Option<Timestamp> {
        match self {
            Self::Never => None,
            Self::At(at) => Some(at),
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Self::At(_))
    }
}

/// The four persisted entity kinds.
///
/// Each kind owns a disjoint table in the record store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Patient,
    Therapist,
    Treatment,
    Appointment,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Patient,
        EntityKind::Therapist,
        EntityKind::Treatment,
        EntityKind::Appointment,
    ];

    /// Backing table name. Only ever one of four fixed literals.
    pub fn table(self) -> &'static str {
        match self {
            Self::Patient => "patients",
            Self::Therapist => "therapists",
            Self::Treatment => "treatments",
            Self::Appointment => "appointments",
        }
    }

    /// Lowercase singular label used in messages and log events.
    pub fn label(self) -> &'static str {
        match self {
            Self::Patient => "patient",
            Self::Therapist => "therapist",
            Self::Treatment => "treatment",
            Self::Appointment => "appointment",
        }
    }

    /// Capitalized label for sentence starts.
    pub fn title(self) -> &'static str {
        match self {
            Self::Patient => "Patient",
            Self::Therapist => "Therapist",
            Self::Treatment => "Treatment",
            Self::Appointment => "Appointment",
        }
    }

    /// Indefinite article matching `label()`.
    pub fn article(self) -> &'static str {
        match self {
            Self::Appointment => "an",
            _ => "a",
        }
    }

    /// Whether records of this kind carry an `updatedAt` stamp.
    pub fn tracks_updates(self) -> bool {
        !matches!(self, Self::Appointment)
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Contract between a record shape and the generic repository.
///
/// Implementors only describe how a validated payload becomes a record and
/// how an update payload replaces its domain fields. Identity, timestamps
/// and persistence are owned by the repository.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Create/update payload. Update is a full replace, so both share one shape.
    type Payload: Schema;

    /// Builds a fresh record from a payload that already passed validation.
    fn compose(id: RecordId, created_at: Timestamp, payload: Self::Payload) -> Self;

    fn id(&self) -> &str;

    fn created_at(&self) -> Timestamp;

    /// Overwrites every domain field with the payload values.
    fn replace_fields(&mut self, payload: Self::Payload);

    /// Refreshes the last-modified stamp. No-op for kinds that do not track it.
    fn touch(&mut self, _at: Timestamp) {}

    fn kind() -> EntityKind {
        <Self::Payload as Schema>::KIND
    }
}
