//! Repository layer: classified errors and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Keep SQL details inside the persistence boundary.
//! - Classify storage failures into the core error taxonomy.
//!
//! # Invariants
//! - Write paths validate business rules before any SQL mutation.
//! - Composite writes are transactional: every failure path rolls back.
//! - Constraint violations surface classified, never as raw storage errors.

use crate::db::DbError;
use crate::model::person::PersonFields;
use crate::model::phone::{PhoneKind, PhoneOwner};
use crate::model::{fmt_date, ValidationError};
use rusqlite::{ffi, params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod class_repo;
pub mod member_repo;
pub mod trainer_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Classified repository error for all gym persistence operations.
#[derive(Debug)]
pub enum RepoError {
    /// Business rule violated before any write.
    Validation(ValidationError),
    /// Uniqueness constraint violated; names the conflicting entity.
    Duplicate {
        entity: &'static str,
        detail: String,
    },
    /// Foreign-key constraint violated; names the offending entity.
    ReferentialIntegrity {
        entity: &'static str,
        detail: String,
    },
    /// Update/delete target row does not exist.
    NotFound { entity: &'static str, id: i64 },
    /// Projection requested for an entity name the schema does not know.
    UnknownEntity(String),
    /// Persisted value that cannot be parsed back into its domain type.
    InvalidData(String),
    /// Any other storage failure; the in-progress transaction is rolled back.
    Storage(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Duplicate { entity, detail } => {
                write!(f, "duplicate {entity}: {detail}")
            }
            Self::ReferentialIntegrity { entity, detail } => {
                write!(f, "referential integrity violation on {entity}: {detail}")
            }
            Self::NotFound { entity, id } => write!(f, "{entity} not found: {id}"),
            Self::UnknownEntity(name) => write!(f, "unknown entity `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
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
        Self::Storage(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Storage(DbError::Sqlite(value))
    }
}

/// Maps a SQLite failure onto the taxonomy, attributing it to `entity`.
///
/// Unique and primary-key violations become [`RepoError::Duplicate`],
/// foreign-key violations become [`RepoError::ReferentialIntegrity`], and
/// everything else stays a storage error with its message preserved.
pub(crate) fn classify_sqlite(entity: &'static str, err: rusqlite::Error) -> RepoError {
    if let rusqlite::Error::SqliteFailure(code, ref message) = err {
        let detail = message.clone().unwrap_or_else(|| code.to_string());
        match code.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return RepoError::Duplicate { entity, detail };
            }
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return RepoError::ReferentialIntegrity { entity, detail };
            }
            _ => {}
        }
    }
    RepoError::Storage(DbError::Sqlite(err))
}

/// Inserts a Person row and returns its generated id.
///
/// Shared by member and trainer registration; always called inside the
/// caller's transaction.
pub(crate) fn insert_person(conn: &Connection, fields: &PersonFields) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO Person (first_name, last_name, birth_date, email, city, street, zip)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
        params![
            fields.first_name.trim(),
            fields.last_name.trim(),
            fmt_date(fields.birth_date),
            fields.email.trim(),
            fields.city.trim(),
            fields.street.trim(),
            fields.zip.trim(),
        ],
    )
    .map_err(|err| classify_sqlite("Person", err))?;

    Ok(conn.last_insert_rowid())
}

/// Inserts a Phone row for the given polymorphic owner.
pub(crate) fn insert_phone(
    conn: &Connection,
    owner: PhoneOwner,
    phone_number: &str,
    kind: PhoneKind,
) -> RepoResult<i64> {
    conn.execute(
        "INSERT INTO Phone (owner_type, owner_id, phone_number, type)
         VALUES (?1, ?2, ?3, ?4);",
        params![owner.owner_type(), owner.owner_id(), phone_number.trim(), kind.as_db()],
    )
    .map_err(|err| classify_sqlite("Phone", err))?;

    Ok(conn.last_insert_rowid())
}
