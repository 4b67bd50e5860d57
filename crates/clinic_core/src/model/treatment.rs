//! Treatment record and payload.
//!
//! # Invariants
//! - `price` is finite and non-negative. Zero is a valid (free) price.
//! - The payload keeps `price` optional so "not supplied" stays distinct
//!   from zero.

use crate::model::record::{Entity, EntityKind, RecordId, Timestamp, UpdatedAt};
use crate::model::schema::{FieldValue, Schema, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted treatment record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: Timestamp,
    pub updated_at: UpdatedAt,
}

/// Create/update payload for treatments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TreatmentPayload {
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
}

impl Schema for TreatmentPayload {
    const KIND: EntityKind = EntityKind::Treatment;
    const REQUIRED_FIELDS: &'static [&'static str] = &["name", "description", "price"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "name" => Some(FieldValue::Text(&self.name)),
            "description" => Some(FieldValue::Text(&self.description)),
            "price" => self.price.map(FieldValue::Number),
            _ => None,
        }
    }

    fn check_domain(&self) -> Result<(), ValidationError> {
        match self.price {
            Some(price) if price < 0.0 => Err(ValidationError::InvalidField {
                kind: Self::KIND,
                field: "price",
                reason: format!("must not be negative, got {price}"),
            }),
            _ => Ok(()),
        }
    }
}

impl Entity for Treatment {
    type Payload = TreatmentPayload;

    fn compose(id: RecordId, created_at: Timestamp, payload: TreatmentPayload) -> Self {
        Self {
            id,
            name: payload.name,
            description: payload.description,
            // Presence is enforced by validation before compose.
            price: payload.price.unwrap_or_default(),
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

    fn replace_fields(&mut self, payload: TreatmentPayload) {
        self.name = payload.name;
        self.description = payload.description;
        self.price = payload.price.unwrap_or(self.price);
    }

    fn touch(&mut self, at: Timestamp) {
        self.updated_at = UpdatedAt::At(at);
    }
}
