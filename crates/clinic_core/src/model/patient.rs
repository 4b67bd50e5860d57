//! Patient record and payload.
//!
//! # Invariants
//! - `dob` is free text; any non-blank value is kept as given.
//! - `updated_at` starts as `UpdatedAt::Never`.

use crate::model::record::{Entity, EntityKind, RecordId, Timestamp, UpdatedAt};
use crate::model::schema::{FieldValue, Schema};
use serde::{Deserialize, Serialize};

/// Persisted patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: RecordId,
    pub name: String,
    /// Date of birth as entered.
    pub dob: String,
    pub gender: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: UpdatedAt,
}

/// Create/update payload for patients.
///
/// Missing wire fields deserialize to empty strings and are then reported
/// by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PatientPayload {
    pub name: String,
    pub dob: String,
    pub gender: String,
    pub phone: String,
}

impl Schema for PatientPayload {
    const KIND: EntityKind = EntityKind::Patient;
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "dob", "gender", "phone"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "dob" => Some(FieldValue::Text(&self.dob)),
            "gender" => Some(FieldValue::Text(&self.gender)),
            "phone" => Some(FieldValue::Text(&self.phone)),
            _ => None,
        }
    }
}

impl Entity for Patient {
    type Payload = PatientPayload;

    fn compose(id: RecordId, created_at: Timestamp, payload: PatientPayload) -> Self {
        Self {
            id,
            name: payload.name,
            dob: payload.dob,
            gender: payload.gender,
            phone: payload.phone,
            created_at,
            updated_at: UpdatedAt::Never,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn replace_fields(&mut self, payload: PatientPayload) {
        self.name = payload.name;
        self.dob = payload.dob;
        self.gender = payload.gender;
        self.phone = payload.phone;
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = UpdatedAt::At(at);
    }
}
