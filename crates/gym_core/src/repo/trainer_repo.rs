//! Trainer repository contract and SQLite implementation.
//!
//! # Invariants
//! - Specializations are normalized: writes go through `Specialization`
//!   and `Trainer_Specialization`, never a free-text column.
//! - `force_delete_trainer` removes Teaches and specialization links
//!   before the Trainer row; the Person row is never touched.

use super::{classify_sqlite, insert_person, insert_phone, RepoError, RepoResult};
use crate::model::person::is_blank;
use crate::model::phone::{PhoneKind, PhoneOwner};
use crate::model::trainer::{TrainerRegistration, TrainerStatus};
use crate::model::{fmt_date, ValidationError};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for trainer-rooted mutations.
pub trait TrainerRepository {
    fn register_trainer(&self, registration: &TrainerRegistration) -> RepoResult<i64>;
    fn update_trainer_profile(
        &self,
        trainer_id: i64,
        email: &str,
        specialization: &str,
        status: TrainerStatus,
    ) -> RepoResult<()>;
    fn add_specialization(&self, name: &str) -> RepoResult<i64>;
    fn assign_specialization(&self, trainer_id: i64, specialization_id: i64) -> RepoResult<()>;
    fn teach_session(&self, trainer_id: i64, class_session_id: i64) -> RepoResult<()>;
    fn force_delete_trainer(&self, trainer_id: i64) -> RepoResult<()>;
}

/// SQLite-backed trainer repository.
pub struct SqliteTrainerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTrainerRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn person_id_of(&self, trainer_id: i64) -> RepoResult<i64> {
        self.conn
            .query_row(
                "SELECT person_id FROM Trainer WHERE trainer_id = ?1;",
                [trainer_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(RepoError::NotFound {
                entity: "Trainer",
                id: trainer_id,
            })
    }
}

impl TrainerRepository for SqliteTrainerRepository<'_> {
    fn register_trainer(&self, registration: &TrainerRegistration) -> RepoResult<i64> {
        registration.validate()?;

        let tx = self.conn.unchecked_transaction()?;

        let person_id = insert_person(&tx, &registration.person)?;
        insert_phone(
            &tx,
            PhoneOwner::Person(person_id),
            &registration.phone,
            PhoneKind::Mobile,
        )?;

        tx.execute(
            "INSERT INTO Trainer (person_id, hire_date, trainer_status) VALUES (?1, ?2, ?3);",
            params![
                person_id,
                fmt_date(registration.hire_date),
                registration.status.as_db(),
            ],
        )
        .map_err(|err| classify_sqlite("Trainer", err))?;
        let trainer_id = tx.last_insert_rowid();

        let specialization_id = ensure_specialization(&tx, &registration.specialization)?;
        link_specialization(&tx, trainer_id, specialization_id)?;

        tx.commit()?;
        Ok(trainer_id)
    }

    fn update_trainer_profile(
        &self,
        trainer_id: i64,
        email: &str,
        specialization: &str,
        status: TrainerStatus,
    ) -> RepoResult<()> {
        if is_blank(specialization) {
            return Err(ValidationError::BlankField {
                action: "update_trainer_profile",
                field: "specialization",
            }
            .into());
        }
        if is_blank(email) {
            return Err(ValidationError::BlankField {
                action: "update_trainer_profile",
                field: "email",
            }
            .into());
        }

        let person_id = self.person_id_of(trainer_id)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE Person SET email = ?1 WHERE id = ?2;",
            params![email.trim(), person_id],
        )
        .map_err(|err| classify_sqlite("Person", err))?;
        tx.execute(
            "UPDATE Trainer SET trainer_status = ?1 WHERE trainer_id = ?2;",
            params![status.as_db(), trainer_id],
        )
        .map_err(|err| classify_sqlite("Trainer", err))?;

        let specialization_id = ensure_specialization(&tx, specialization)?;
        link_specialization(&tx, trainer_id, specialization_id)?;

        tx.commit()?;
        Ok(())
    }

    fn add_specialization(&self, name: &str) -> RepoResult<i64> {
        if is_blank(name) {
            return Err(ValidationError::BlankField {
                action: "add_specialization",
                field: "name",
            }
            .into());
        }

        self.conn
            .execute(
                "INSERT INTO Specialization (name) VALUES (?1);",
                [name.trim()],
            )
            .map_err(|err| classify_sqlite("Specialization", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn assign_specialization(&self, trainer_id: i64, specialization_id: i64) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO Trainer_Specialization (trainer_id, specialization_id)
                 VALUES (?1, ?2);",
                params![trainer_id, specialization_id],
            )
            .map_err(|err| classify_sqlite("Trainer_Specialization", err))?;
        Ok(())
    }

    fn teach_session(&self, trainer_id: i64, class_session_id: i64) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO Teaches (trainer_id, class_session_id) VALUES (?1, ?2);",
                params![trainer_id, class_session_id],
            )
            .map_err(|err| classify_sqlite("Teaches", err))?;
        Ok(())
    }

    fn force_delete_trainer(&self, trainer_id: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM Teaches WHERE trainer_id = ?1;", [trainer_id])
            .map_err(|err| classify_sqlite("Teaches", err))?;
        tx.execute(
            "DELETE FROM Trainer_Specialization WHERE trainer_id = ?1;",
            [trainer_id],
        )
        .map_err(|err| classify_sqlite("Trainer_Specialization", err))?;

        let changed = tx
            .execute("DELETE FROM Trainer WHERE trainer_id = ?1;", [trainer_id])
            .map_err(|err| classify_sqlite("Trainer", err))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Trainer",
                id: trainer_id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}

/// Looks up the specialization by name, inserting it when absent.
fn ensure_specialization(conn: &Connection, name: &str) -> RepoResult<i64> {
    let name = name.trim();
    conn.execute(
        "INSERT OR IGNORE INTO Specialization (name) VALUES (?1);",
        [name],
    )
    .map_err(|err| classify_sqlite("Specialization", err))?;

    let id = conn.query_row(
        "SELECT specialization_id FROM Specialization WHERE name = ?1;",
        [name],
        |row| row.get(0),
    )?;
    Ok(id)
}

/// Links the trainer to a specialization; an existing link is left as-is.
fn link_specialization(conn: &Connection, trainer_id: i64, specialization_id: i64) -> RepoResult<()> {
    conn.execute(
        "INSERT OR IGNORE INTO Trainer_Specialization (trainer_id, specialization_id)
         VALUES (?1, ?2);",
        params![trainer_id, specialization_id],
    )
    .map_err(|err| classify_sqlite("Trainer_Specialization", err))?;
    Ok(())
}
