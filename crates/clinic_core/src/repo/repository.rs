//! Generic repository over one entity kind.
//!
//! # Responsibility
//! - Compose record store, payload validation, clock and id generator into
//!   the CRUD contract shared by every entity kind.
//!
//! # Invariants
//! - Validation runs before any store access; a rejected call leaves the
//!   store untouched.
//! - `id` and `created_at` are assigned once at create and preserved by update.
//! - Update is a full replace of domain fields and refreshes `updated_at`
//!   for kinds that track it.
//! - Delete is a hard delete; a second delete of the same id is `NotFound`.

use crate::model::record::{Entity, EntityKind};
use crate::model::schema::{validate_payload, validate_update};
use crate::repo::error::{RepoAction, RepoError, RepoResult};
use crate::repo::store::RecordStore;
use crate::runtime::{Clock, IdGenerator};
use log::{info, warn};
use std::marker::PhantomData;

/// CRUD repository for records of type `T` persisted in store `S`.
pub struct Repository<'a, T, S> {
    store: S,
    clock: &'a dyn Clock,
    ids: &'a dyn IdGenerator,
    _entity: PhantomData<fn() -> T>,
}

impl<'a, T: Entity, S: RecordStore> Repository<'a, T, S> {
    pub fn new(store: S, clock: &'a dyn Clock, ids: &'a dyn IdGenerator) -> Self {
        Self {
            store,
            clock,
            ids,
            _entity: PhantomData,
        }
    }

    /// Validates `payload`, assigns identity and creation time, and stores it.
    pub fn create(&self, payload: T::Payload) -> RepoResult<T> {
        let kind = T::kind();
        if let Err(err) = validate_payload(&payload) {
            warn!("event=record_create module=repo status=rejected kind={kind} error_code=validation");
            return Err(err.into());
        }

        let id = self.ids.next_id();
        if self.store.contains_key(&id)? {
            warn!("event=record_create module=repo status=error kind={kind} id={id} error_code=id_collision");
            return Err(RepoError::IdCollision { kind, id });
        }

        let record = T::compose(id, self.clock.now(), payload);
        self.store.insert(record.id(), &encode(&record)?)?;

        info!(
            "event=record_create module=repo status=ok kind={kind} id={}",
            record.id()
        );
        Ok(record)
    }

    pub fn get(&self, id: &str) -> RepoResult<T> {
        self.load(id)?
            .ok_or_else(|| not_found(T::kind(), id, RepoAction::Get))
    }

    /// Returns every record of this kind in key order.
    pub fn list(&self) -> RepoResult<Vec<T>> {
        self.store
            .values()?
            .iter()
            .map(|body| decode(body))
            .collect()
    }

    /// Replaces the domain fields of an existing record. Identity and
    /// `created_at` are kept.
    ///
    /// Argument validation wins over lookup: a blank id or empty payload is a
    /// validation error even when no record with `id` exists.
    pub fn update(&self, id: &str, payload: T::Payload) -> RepoResult<T> {
        let kind = T::kind();
        if let Err(err) = validate_update(id, &payload) {
            warn!("event=record_update module=repo status=rejected kind={kind} error_code=validation");
            return Err(err.into());
        }

        let Some(mut record) = self.load(id)? else {
            return Err(not_found(kind, id, RepoAction::Update));
        };

        let created_at = record.created_at();
        record.replace_fields(payload);
        record.touch(self.clock.now());
        debug_assert_eq!(record.created_at(), created_at, "update restamped created_at");
        self.store.insert(record.id(), &encode(&record)?)?;

        info!("event=record_update module=repo status=ok kind={kind} id={id}");
        Ok(record)
    }

    /// Removes a record and returns it as it was stored.
    pub fn delete(&self, id: &str) -> RepoResult<T> {
        let kind = T::kind();
        let body = self
            .store
            .remove(id)?
            .ok_or_else(|| not_found(kind, id, RepoAction::Delete))?;

        info!("event=record_delete module=repo status=ok kind={kind} id={id}");
        decode(&body)
    }

    /// Full scan filtered by `predicate`, preserving key order.
    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> RepoResult<Vec<T>> {
        let mut records = self.list()?;
        records.retain(|record| predicate(record));
        Ok(records)
    }

    fn load(&self, id: &str) -> RepoResult<Option<T>> {
        self.store.get(id)?.map(|body| decode(&body)).transpose()
    }
}

fn not_found(kind: EntityKind, id: &str, action: RepoAction) -> RepoError {
    RepoError::NotFound {
        kind,
        id: id.to_string(),
        action,
    }
}

fn encode<T: Entity>(record: &T) -> RepoResult<String> {
    Ok(serde_json::to_string(record)?)
}

fn decode<T: Entity>(body: &str) -> RepoResult<T> {
    serde_json::from_str(body).map_err(|err| {
        RepoError::InvalidData(format!("cannot decode {} record: {err}", T::kind()))
    })
}

#[cfg(test)]
mod tests {
    use super::Repository;
    use crate::model::patient::{Patient, PatientPayload};
    use crate::model::record::UpdatedAt;
    use crate::model::schema::ValidationError;
    use crate::model::therapist::{Therapist, TherapistPayload};
    use crate::repo::error::RepoError;
    use crate::repo::store::{MemoryRecordStore, RecordStore};
    use crate::runtime::{ManualClock, SequentialIdGenerator};

    fn payload(name: &str) -> PatientPayload {
        PatientPayload {
            name: name.to_string(),
            dob: "1990-01-01".to_string(),
            gender: "F".to_string(),
            phone: "123".to_string(),
        }
    }

    #[test]
    fn create_assigns_identity_and_creation_time() {
        let clock = ManualClock::starting_at(1_000);
        let ids = SequentialIdGenerator::new("p");
        let repo: Repository<'_, Patient, _> =
            Repository::new(MemoryRecordStore::new(), &clock, &ids);

        let created = repo.create(payload("A")).unwrap();
        assert_eq!(created.id, "p-000001");
        assert_eq!(created.created_at.as_nanos(), 1_000);
        assert_eq!(created.updated_at, UpdatedAt::Never);
        assert_eq!(repo.get(&created.id).unwrap(), created);
    }

    #[test]
    fn rejected_create_leaves_store_untouched() {
        let clock = ManualClock::default();
        let ids = SequentialIdGenerator::new("p");
        let store = MemoryRecordStore::new();
        let repo: Repository<'_, Patient, _> = Repository::new(&store, &clock, &ids);

        let err = repo.create(payload("")).unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::MissingFields { ref fields, .. })
                if fields == &vec!["name"]
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn update_refreshes_updated_at_and_keeps_created_at() {
        let clock = ManualClock::starting_at(10);
        let ids = SequentialIdGenerator::new("p");
        let repo: Repository<'_, Patient, _> =
            Repository::new(MemoryRecordStore::new(), &clock, &ids);
        let created = repo.create(payload("A")).unwrap();

        clock.advance(5);
        let first = repo.update(&created.id, payload("B")).unwrap();
        clock.advance(5);
        let second = repo.update(&created.id, payload("C")).unwrap();

        assert_eq!(first.name, "B");
        assert_eq!(second.name, "C");
        assert_eq!(second.created_at, created.created_at);
        assert!(second.updated_at.timestamp() >= first.updated_at.timestamp());
        assert_eq!(second.updated_at.timestamp().map(|at| at.as_nanos()), Some(20));
    }

    #[test]
    fn update_rewrites_stored_body_with_original_creation_time() {
        let clock = ManualClock::starting_at(100);
        let ids = SequentialIdGenerator::new("p");
        let store = MemoryRecordStore::new();
        let repo: Repository<'_, Patient, _> = Repository::new(&store, &clock, &ids);
        let created = repo.create(payload("A")).unwrap();

        clock.advance(900);
        repo.update(&created.id, payload("B")).unwrap();

        let body = store.get(&created.id).unwrap().unwrap();
        let stored: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(stored["createdAt"], 100);
        assert_eq!(stored["updatedAt"]["at"], 1_000);
        assert_eq!(stored["name"], "B");
    }

    #[test]
    fn id_collision_is_rejected_without_overwrite() {
        let clock = ManualClock::default();
        let first_ids = SequentialIdGenerator::new("t");
        let store = MemoryRecordStore::new();
        let therapist = TherapistPayload {
            name: "Dr. X".to_string(),
            specialization: "physio".to_string(),
            phone: "555".to_string(),
        };

        let first: Repository<'_, Therapist, _> = Repository::new(&store, &clock, &first_ids);
        let original = first.create(therapist.clone()).unwrap();

        let replayed_ids = SequentialIdGenerator::new("t");
        let repo: Repository<'_, Therapist, _> = Repository::new(&store, &clock, &replayed_ids);
        let err = repo.create(therapist).unwrap_err();
        assert!(matches!(err, RepoError::IdCollision { ref id, .. } if id == &original.id));
        assert_eq!(store.len(), 1);
        assert_eq!(repo.get(&original.id).unwrap(), original);
    }

    #[test]
    fn corrupted_body_surfaces_as_invalid_data() {
        let clock = ManualClock::default();
        let ids = SequentialIdGenerator::new("p");
        let store = MemoryRecordStore::new();
        store.insert("p-broken", "{not json").unwrap();
        let repo: Repository<'_, Patient, _> = Repository::new(&store, &clock, &ids);

        assert!(matches!(repo.get("p-broken"), Err(RepoError::InvalidData(_))));
        assert!(matches!(repo.list(), Err(RepoError::InvalidData(_))));
    }
}
