//! Appointment record and payload.
//!
//! # Invariants
//! - `patient_id` and `therapist_id` are opaque references; they are not
//!   checked against the patient/therapist tables.
//! - `date` is a calendar date.
//! - Appointments carry no last-modified stamp.

use crate::model::record::{Entity, EntityKind, RecordId, Timestamp};
use crate::model::schema::{require_calendar_date, FieldValue, Schema, ValidationError};
use serde::{Deserialize, Serialize};

/// Persisted appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: RecordId,
    pub patient_id: RecordId,
    pub therapist_id: RecordId,
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub created_at: Timestamp,
}

/// Create/update payload for appointments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppointmentPayload {
    pub patient_id: RecordId,
    pub therapist_id: RecordId,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
}

impl Schema for AppointmentPayload {
    const KIND: EntityKind = EntityKind::Appointment;
    const REQUIRED_FIELDS: &'static [&'static str] =
        &["patientId", "therapistId", "date", "startTime", "endTime"];

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        match name {
            "patientId" => Some(FieldValue::Text(&self.patient_id)),
            "therapistId" => Some(FieldValue::Text(&self.therapist_id)),
            "date" => Some(FieldValue::Text(&self.date)),
            "startTime" => Some(FieldValue::Text(&self.start_time)),
            "endTime" => Some(FieldValue::Text(&self.end_time)),
            _ => None,
        }
    }

    fn check_domain(&self) -> Result<(), ValidationError> {
        require_calendar_date(Self::KIND, "date", &self.date)
    }
}

impl Entity for Appointment {
    type Payload = AppointmentPayload;

    fn compose(id: RecordId, created_at: Timestamp, payload: AppointmentPayload) -> Self {
        Self {
            id,
            patient_id: payload.patient_id,
            therapist_id: payload.therapist_id,
            date: payload.date,
            start_time: payload.start_time,
            end_time: payload.end_time,
            created_at,
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }

    fn replace_fields(&mut self, payload: AppointmentPayload) {
        self.patient_id = payload.patient_id;
        self.therapist_id = payload.therapist_id;
        self.date = payload.date;
        self.start_time = payload.start_time;
        self.end_time = payload.end_time;
    }
}
