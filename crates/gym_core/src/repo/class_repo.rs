//! Class and session repository contract and SQLite implementation.
//!
//! # Invariants
//! - `end_time` is always derived from `start_time` + duration; it is
//!   never accepted as free-standing caller input on insert.
//! - `cancel_session` removes Check_in, Attends and Teaches rows before
//!   the session row, all-or-nothing.

use super::{classify_sqlite, RepoError, RepoResult};
use crate::model::person::is_blank;
use crate::model::{fmt_datetime, ValidationError};
use chrono::{Duration, NaiveDate, NaiveTime};
use rusqlite::{params, Connection};

/// Repository interface for classes and scheduled sessions.
pub trait ClassRepository {
    fn create_class(&self, name: &str, description: &str) -> RepoResult<i64>;
    fn schedule_session(
        &self,
        class_id: i64,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: i64,
        capacity: i64,
    ) -> RepoResult<i64>;
    fn reschedule_session(
        &self,
        class_session_id: i64,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        capacity: i64,
    ) -> RepoResult<()>;
    fn cancel_session(&self, class_session_id: i64) -> RepoResult<()>;
}

/// SQLite-backed class repository.
pub struct SqliteClassRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteClassRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ClassRepository for SqliteClassRepository<'_> {
    fn create_class(&self, name: &str, description: &str) -> RepoResult<i64> {
        if is_blank(name) {
            return Err(ValidationError::BlankField {
                action: "create_class",
                field: "class_name",
            }
            .into());
        }
        if is_blank(description) {
            return Err(ValidationError::BlankField {
                action: "create_class",
                field: "description",
            }
            .into());
        }

        self.conn
            .execute(
                "INSERT INTO Class (class_name, description) VALUES (?1, ?2);",
                params![name.trim(), description.trim()],
            )
            .map_err(|err| classify_sqlite("Class", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn schedule_session(
        &self,
        class_id: i64,
        date: NaiveDate,
        start: NaiveTime,
        duration_minutes: i64,
        capacity: i64,
    ) -> RepoResult<i64> {
        if duration_minutes <= 0 {
            return Err(ValidationError::NonPositive {
                field: "duration",
                value: duration_minutes,
            }
            .into());
        }
        if capacity <= 0 {
            return Err(ValidationError::NonPositive {
                field: "capacity",
                value: capacity,
            }
            .into());
        }

        let start_dt = date.and_time(start);
        let end_dt = start_dt + Duration::minutes(duration_minutes);

        self.conn
            .execute(
                "INSERT INTO Class_Session (class_id, start_time, end_time, capacity, duration)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    class_id,
                    fmt_datetime(start_dt),
                    fmt_datetime(end_dt),
                    capacity,
                    duration_minutes,
                ],
            )
            .map_err(|err| classify_sqlite("Class_Session", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn reschedule_session(
        &self,
        class_session_id: i64,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        capacity: i64,
    ) -> RepoResult<()> {
        if end <= start {
            return Err(ValidationError::EndNotAfterStart { start, end }.into());
        }
        if capacity <= 0 {
            return Err(ValidationError::NonPositive {
                field: "capacity",
                value: capacity,
            }
            .into());
        }

        let start_dt = date.and_time(start);
        let end_dt = date.and_time(end);
        let duration_minutes = (end_dt - start_dt).num_minutes();

        let changed = self
            .conn
            .execute(
                "UPDATE Class_Session
                 SET start_time = ?1, end_time = ?2, capacity = ?3, duration = ?4
                 WHERE class_session_id = ?5;",
                params![
                    fmt_datetime(start_dt),
                    fmt_datetime(end_dt),
                    capacity,
                    duration_minutes,
                    class_session_id,
                ],
            )
            .map_err(|err| classify_sqlite("Class_Session", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Class_Session",
                id: class_session_id,
            });
        }
        Ok(())
    }

    fn cancel_session(&self, class_session_id: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute(
            "DELETE FROM Check_in WHERE class_session_id = ?1;",
            [class_session_id],
        )
        .map_err(|err| classify_sqlite("Check_in", err))?;
        tx.execute(
            "DELETE FROM Attends WHERE class_session_id = ?1;",
            [class_session_id],
        )
        .map_err(|err| classify_sqlite("Attends", err))?;
        tx.execute(
            "DELETE FROM Teaches WHERE class_session_id = ?1;",
            [class_session_id],
        )
        .map_err(|err| classify_sqlite("Teaches", err))?;

        let changed = tx
            .execute(
                "DELETE FROM Class_Session WHERE class_session_id = ?1;",
                [class_session_id],
            )
            .map_err(|err| classify_sqlite("Class_Session", err))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Class_Session",
                id: class_session_id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}
