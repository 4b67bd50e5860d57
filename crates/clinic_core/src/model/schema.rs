//! Payload schema validation.
//!
//! # Responsibility
//! - Hold the required-field table for every payload shape.
//! - Reject incomplete or malformed payloads before any store access.
//!
//! # Invariants
//! - A field is present iff it is supplied and non-blank. Strings must be
//!   non-empty after trim; numbers must be supplied and finite.
//! - Update payloads are full records: an update must satisfy the same
//!   required-field table as a create.

use crate::model::record::EntityKind;
use chrono::{DateTime, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

const CALENDAR_DATE_FORMAT: &str = "%Y-%m-%d";

/// Borrowed view of one payload field, as seen by the validator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl FieldValue<'_> {
    pub fn is_present(self) -> bool {
        match self {
            Self::Text(value) => !value.trim().is_empty(),
            Self::Number(value) => value.is_finite(),
        }
    }
}

/// Payload shape with a fixed required-field table.
pub trait Schema {
    const KIND: EntityKind;
    const REQUIRED_FIELDS: &'static [&'static str];

    /// Returns the named field, or `None` when it was not supplied.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;

    /// Kind-specific checks run after all required fields are present.
    fn check_domain(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Payload or argument rejected before touching storage.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// One or more required fields are absent or blank.
    MissingFields {
        kind: EntityKind,
        fields: Vec<&'static str>,
    },
    /// Update targeted a blank identifier.
    EmptyId { kind: EntityKind },
    /// Update payload supplied no field at all.
    EmptyPayload { kind: EntityKind },
    /// A present field holds a value outside its domain.
    InvalidField {
        kind: EntityKind,
        field: &'static str,
        reason: String,
    },
    /// A query bound is not a calendar date.
    InvalidDate { value: String },
    /// A numeric query bound is unusable.
    InvalidRange { reason: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields { kind, fields } => write!(
                f,
                "Invalid {kind} payload. All fields are required (missing: {}).",
                fields.join(", ")
            ),
            Self::EmptyId { kind } => write!(f, "Invalid {kind} ID."),
            Self::EmptyPayload { kind } => write!(
                f,
                "Invalid {kind} payload. Update replaces the whole record, got an empty payload."
            ),
            Self::InvalidField {
                kind,
                field,
                reason,
            } => write!(f, "Invalid {kind} payload. Field `{field}` {reason}."),
            Self::InvalidDate { value } => {
                write!(f, "invalid calendar date `{value}`; expected YYYY-MM-DD")
            }
            Self::InvalidRange { reason } => write!(f, "invalid range: {reason}"),
        }
    }
}

impl Error for ValidationError {}

/// Validates a create payload against its required-field table and domain checks.
pub fn validate_payload<P: Schema>(payload: &P) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = P::REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|name| !is_field_present(payload, name))
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields {
            kind: P::KIND,
            fields: missing,
        });
    }

    payload.check_domain()
}

/// Validates update arguments.
///
/// Blank id and empty payload are reported first, independent of whether
/// the target record exists. The payload must then pass `validate_payload`.
pub fn validate_update<P: Schema>(id: &str, payload: &P) -> Result<(), ValidationError> {
    if id.trim().is_empty() {
        return Err(ValidationError::EmptyId { kind: P::KIND });
    }

    if P::REQUIRED_FIELDS
        .iter()
        .all(|name| !is_field_present(payload, name))
    {
        return Err(ValidationError::EmptyPayload { kind: P::KIND });
    }

    validate_payload(payload)
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, or an RFC 3339 timestamp whose date part is used.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    NaiveDate::parse_from_str(trimmed, CALENDAR_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|at| at.date_naive())
        })
}

/// Domain check helper for date-typed text fields.
pub(crate) fn require_calendar_date(
    kind: EntityKind,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    match parse_calendar_date(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::InvalidField {
            kind,
            field,
            reason: format!("must be a calendar date (YYYY-MM-DD), got `{}`", value.trim()),
        }),
    }
}

fn is_field_present<P: Schema>(payload: &P, name: &str) -> bool {
    payload.field(name).is_some_and(FieldValue::is_present)
}
