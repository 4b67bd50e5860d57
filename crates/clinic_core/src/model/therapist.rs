//! Therapist record and payload.

use crate::model::record::{Entity, EntityKind, RecordId, Timestamp, UpdatedAt};
use crate::model::schema::{FieldValue, Schema};
use serde::{Deserialize, Serialize};

/// Persisted therapist record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Therapist {
    pub id: RecordId,
    pub name: String,
    pub specialization: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: UpdatedAt,
}

/// Create/update payload for therapists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TherapistPayload {
    pub name: String,
    pub specialization: String,
    pub phone: String,
}

impl Schema for TherapistPayload {
    const KIND: EntityKind = EntityKind::Therapist;
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "specialization", "phone"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "specialization" => Some(FieldValue::Text(&self.specialization)),
            "phone" => Some(FieldValue::Text(&self.phone)),
            _ => None,
        }
    }
}

impl Entity for Therapist {
    type Payload = TherapistPayload;

    fn compose(id: RecordId, created_at: Timestamp, payload: TherapistPayload) -> Self {
        Self {
            id,
            name: payload.name,
            specialization: payload.specialization,
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

    fn replace_fields(&mut self, payload: TherapistPayload) {
        self.name = payload.name;
        self.specialization = payload.specialization;
        self.phone = payload.phone;
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = UpdatedAt::At(at);
    }
}
