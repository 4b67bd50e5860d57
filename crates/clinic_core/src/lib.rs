//! Core domain logic for the clinic records store.
//! This crate is the single source of truth for record invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod runtime;
pub mod service;

pub use config::ClinicConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::appointment::{Appointment, AppointmentPayload};
pub use model::patient::{Patient, PatientPayload};
pub use model::record::{Entity, EntityKind, RecordId, Timestamp, UpdatedAt};
pub use model::schema::{Schema, ValidationError};
pub use model::therapist::{Therapist, TherapistPayload};
pub use model::treatment::{Treatment, TreatmentPayload};
pub use repo::error::{RepoAction, RepoError, RepoResult};
pub use repo::repository::Repository;
pub use repo::store::{MemoryRecordStore, RecordStore, SqliteRecordStore};
pub use runtime::{
    Clock, IdGenerator, ManualClock, SequentialIdGenerator, SystemClock, UuidGenerator,
};
pub use service::clinic_service::ClinicService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
