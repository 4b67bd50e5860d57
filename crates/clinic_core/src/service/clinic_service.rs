//! Clinic use-case service.
//!
//! # Responsibility
//! - Expose one entry point per externally callable clinic operation.
//! - Wire the shared connection, clock and id generator into per-kind
//!   repositories.
//!
//! # Invariants
//! - Every call touches exactly one entity kind; there is no cross-kind
//!   orchestration or referential check.
//! - The service holds no record state of its own.

use crate::model::appointment::{Appointment, AppointmentPayload};
use crate::model::patient::{Patient, PatientPayload};
use crate::model::record::{Entity, EntityKind};
use crate::model::therapist::{Therapist, TherapistPayload};
use crate::model::treatment::{Treatment, TreatmentPayload};
use crate::repo::error::RepoResult;
use crate::repo::repository::Repository;
use crate::repo::store::SqliteRecordStore;
use crate::runtime::{Clock, IdGenerator};
use rusqlite::Connection;

/// Repository type produced by the service for entity `T`.
pub type SqliteRepository<'a, T> = Repository<'a, T, SqliteRecordStore<'a>>;

/// Use-case facade over the four clinic repositories.
pub struct ClinicService<'a> {
    conn: &'a Connection,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
}

impl<'a> ClinicService<'a> {
    /// Creates a service after checking every entity table is present.
    pub fn try_new(
        conn: &'a Connection,
        clock: &'a dyn Clock,
        ids: &'a dyn IdGenerator,
    ) -> RepoResult<Self> {
        for kind in EntityKind::ALL {
            SqliteRecordStore::try_new(conn, kind)?;
        }
        Ok(Self { conn, clock, ids })
    }

    /// Repository for entity `T` bound to this service's connection.
    pub fn repository<T: Entity>(&self) -> SqliteRepository<'a, T> {
        Repository::new(
            SqliteRecordStore::attach(self.conn, T::kind()),
            self.clock,
            self.ids,
        )
    }

    /// Number of stored records per entity kind.
    pub fn record_counts(&self) -> RepoResult<Vec<(EntityKind, usize)>> {
        Ok(vec![
            (EntityKind::Patient, self.get_patients()?.len()),
            (EntityKind::Therapist, self.get_therapists()?.len()),
            (EntityKind::Treatment, self.get_treatments()?.len()),
            (EntityKind::Appointment, self.get_appointments()?.len()),
        ])
    }

    pub fn add_patient(&self, payload: PatientPayload) -> RepoResult<Patient> {
        self.repository::<Patient>().create(payload)
    }

    pub fn get_patients(&self) -> RepoResult<Vec<Patient>> {
        self.repository::<Patient>().list()
    }

    pub fn get_patient(&self, id: &str) -> RepoResult<Patient> {
        self.repository::<Patient>().get(id)
    }

    pub fn update_patient(&self, id: &str, payload: PatientPayload) -> RepoResult<Patient> {
        self.repository::<Patient>().update(id, payload)
    }

    pub fn delete_patient(&self, id: &str) -> RepoResult<Patient> {
        self.repository::<Patient>().delete(id)
    }

    pub fn add_therapist(&self, payload: TherapistPayload) -> RepoResult<Therapist> {
        self.repository::<Therapist>().create(payload)
    }

    pub fn get_therapists(&self) -> RepoResult<Vec<Therapist>> {
        self.repository::<Therapist>().list()
    }

    pub fn get_therapist(&self, id: &str) -> RepoResult<Therapist> {
        self.repository::<Therapist>().get(id)
    }

    pub fn update_therapist(&self, id: &str, payload: TherapistPayload) -> RepoResult<Therapist> {
        self.repository::<Therapist>().update(id, payload)
    }

    pub fn delete_therapist(&self, id: &str) -> RepoResult<Therapist> {
        self.repository::<Therapist>().delete(id)
    }

    pub fn add_treatment(&self, payload: TreatmentPayload) -> RepoResult<Treatment> {
        self.repository::<Treatment>().create(payload)
    }

    pub fn get_treatments(&self) -> RepoResult<Vec<Treatment>> {
        self.repository::<Treatment>().list()
    }

    pub fn get_treatment(&self, id: &str) -> RepoResult<Treatment> {
        self.repository::<Treatment>().get(id)
    }

    pub fn update_treatment(&self, id: &str, payload: TreatmentPayload) -> RepoResult<Treatment> {
        self.repository::<Treatment>().update(id, payload)
    }

    pub fn delete_treatment(&self, id: &str) -> RepoResult<Treatment> {
        self.repository::<Treatment>().delete(id)
    }

    /// Treatments priced within `[min_price, max_price]`, both inclusive.
    pub fn get_treatments_by_price_range(
        &self,
        min_price: f64,
        max_price: f64,
    ) -> RepoResult<Vec<Treatment>> {
        self.repository::<Treatment>()
            .by_price_range(min_price, max_price)
    }

    pub fn add_appointment(&self, payload: AppointmentPayload) -> RepoResult<Appointment> {
        self.repository::<Appointment>().create(payload)
    }

    pub fn get_appointments(&self) -> RepoResult<Vec<Appointment>> {
        self.repository::<Appointment>().list()
    }

    pub fn get_appointment(&self, id: &str) -> RepoResult<Appointment> {
        self.repository::<Appointment>().get(id)
    }

    pub fn update_appointment(
        &self,
        id: &str,
        payload: AppointmentPayload,
    ) -> RepoResult<Appointment> {
        self.repository::<Appointment>().update(id, payload)
    }

    pub fn delete_appointment(&self, id: &str) -> RepoResult<Appointment> {
        self.repository::<Appointment>().delete(id)
    }

    pub fn get_appointments_by_patient(&self, patient_id: &str) -> RepoResult<Vec<Appointment>> {
        self.repository::<Appointment>().by_patient(patient_id)
    }

    pub fn get_appointments_by_therapist(
        &self,
        therapist_id: &str,
    ) -> RepoResult<Vec<Appointment>> {
        self.repository::<Appointment>().by_therapist(therapist_id)
    }

    /// Appointments dated within `[start_date, end_date]`, both inclusive.
    pub fn get_appointments_by_date_range(
        &self,
        start_date: &str,
        end_date: &str,
    ) -> RepoResult<Vec<Appointment>> {
        self.repository::<Appointment>()
            .by_date_range(start_date, end_date)
    }
}
