use crate::db::DbError;
use crate::model::record::{EntityKind, RecordId};
use crate::model::schema::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository operation that failed to resolve its target id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoAction {
    Get,
    Update,
    Delete,
}

/// Error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Payload or argument rejected before any store access.
    Validation(ValidationError),
    /// Target id does not resolve to a stored record.
    NotFound {
        kind: EntityKind,
        id: RecordId,
        action: RepoAction,
    },
    /// Identifier generator produced an id that is already stored.
    IdCollision { kind: EntityKind, id: RecordId },
    Db(DbError),
    /// Stored record body cannot be decoded or encoded.
    InvalidData(String),
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Backing table for an entity kind is missing.
    MissingRequiredTable(&'static str),
}

impl RepoError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound { kind, id, action } => match action {
                RepoAction::Get => write!(f, "{} with id={id} not found", kind.title()),
                RepoAction::Update => write!(
                    f,
                    "Couldn't update {} {kind} with id={id}. {} not found",
                    kind.article(),
                    kind.title()
                ),
                RepoAction::Delete => write!(
                    f,
                    "Couldn't delete {} {kind} with id={id}. {} not found.",
                    kind.article(),
                    kind.title()
                ),
            },
            Self::IdCollision { kind, id } => {
                write!(f, "generated {kind} id `{id}` is already in use")
            }
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted record data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "record store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "record store requires table `{table}`")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound { .. }
            | Self::IdCollision { .. }
            | Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{RepoAction, RepoError};
    use crate::model::record::EntityKind;

    #[test]
    fn not_found_messages_name_action_and_id() {
        let get = RepoError::NotFound {
            kind: EntityKind::Patient,
            id: "abc".to_string(),
            action: RepoAction::Get,
        };
        assert_eq!(get.to_string(), "Patient with id=abc not found");

        let update = RepoError::NotFound {
            kind: EntityKind::Appointment,
            id: "abc".to_string(),
            action: RepoAction::Update,
        };
        assert_eq!(
            update.to_string(),
            "Couldn't update an appointment with id=abc. Appointment not found"
        );

        let delete = RepoError::NotFound {
            kind: EntityKind::Therapist,
            id: "abc".to_string(),
            action: RepoAction::Delete,
        };
        assert_eq!(
            delete.to_string(),
            "Couldn't delete a therapist with id=abc. Therapist not found."
        );
    }
}
