//! Member repository contract and SQLite implementation.
//!
//! # Invariants
//! - `register_member` writes Person, Phone, Member, Contact and the
//!   contact's Phone in that order, all-or-nothing.
//! - `force_delete_member` removes children before the Member row; the
//!   Person row is never touched.

use super::{classify_sqlite, insert_person, insert_phone, RepoError, RepoResult};
use crate::model::member::{MemberRegistration, MemberStatus};
use crate::model::payment::PaymentMethod;
use crate::model::person::is_blank;
use crate::model::phone::{PhoneKind, PhoneOwner};
use crate::model::{fmt_date, fmt_datetime, parse_date, ValidationError};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection, OptionalExtension};

/// Repository interface for member-rooted mutations.
pub trait MemberRepository {
    fn register_member(&self, registration: &MemberRegistration) -> RepoResult<i64>;
    fn update_member_profile(
        &self,
        member_id: i64,
        email: &str,
        city: &str,
        street: &str,
        zip: &str,
        status: MemberStatus,
    ) -> RepoResult<()>;
    fn assign_membership(
        &self,
        member_id: i64,
        membership_type_id: i64,
        is_active: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<i64>;
    fn update_membership(
        &self,
        membership_id: i64,
        new_end_date: NaiveDate,
        is_active: bool,
    ) -> RepoResult<()>;
    fn delete_membership(&self, membership_id: i64) -> RepoResult<()>;
    fn create_membership_type(&self, name: &str, price: f64) -> RepoResult<i64>;
    fn record_payment(
        &self,
        member_id: i64,
        amount: f64,
        method: PaymentMethod,
        payment_date: NaiveDate,
    ) -> RepoResult<i64>;
    fn check_in(
        &self,
        member_id: i64,
        class_session_id: i64,
        checkin_time: NaiveDateTime,
    ) -> RepoResult<i64>;
    fn check_out(&self, checkin_id: i64, checkout_time: NaiveDateTime) -> RepoResult<()>;
    fn enroll_in_session(&self, member_id: i64, class_session_id: i64) -> RepoResult<()>;
    fn force_delete_member(&self, member_id: i64) -> RepoResult<()>;
}

/// SQLite-backed member repository.
pub struct SqliteMemberRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMemberRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn person_id_of(&self, member_id: i64) -> RepoResult<i64> {
        self.conn
            .query_row(
                "SELECT person_id FROM Member WHERE member_id = ?1;",
                [member_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(RepoError::NotFound {
                entity: "Member",
                id: member_id,
            })
    }
}

impl MemberRepository for SqliteMemberRepository<'_> {
    fn register_member(&self, registration: &MemberRegistration) -> RepoResult<i64> {
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
            "INSERT INTO Member (person_id, member_status) VALUES (?1, ?2);",
            params![person_id, registration.status.as_db()],
        )
        .map_err(|err| classify_sqlite("Member", err))?;
        let member_id = tx.last_insert_rowid();

        tx.execute(
            "INSERT INTO Contact (person_id, contact_name, relationship) VALUES (?1, ?2, ?3);",
            params![
                person_id,
                registration.contact_name.trim(),
                registration.relationship.trim(),
            ],
        )
        .map_err(|err| classify_sqlite("Contact", err))?;
        let contact_id = tx.last_insert_rowid();

        insert_phone(
            &tx,
            PhoneOwner::Contact(contact_id),
            &registration.contact_phone,
            PhoneKind::Mobile,
        )?;

        tx.commit()?;
        Ok(member_id)
    }

    fn update_member_profile(
        &self,
        member_id: i64,
        email: &str,
        city: &str,
        street: &str,
        zip: &str,
        status: MemberStatus,
    ) -> RepoResult<()> {
        let fields = [("email", email), ("city", city), ("street", street), ("zip", zip)];
        for (name, value) in fields {
            if is_blank(value) {
                return Err(ValidationError::BlankField {
                    action: "update_member_profile",
                    field: name,
                }
                .into());
            }
        }

        let person_id = self.person_id_of(member_id)?;

        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "UPDATE Person SET email = ?1, city = ?2, street = ?3, zip = ?4 WHERE id = ?5;",
            params![email.trim(), city.trim(), street.trim(), zip.trim(), person_id],
        )
        .map_err(|err| classify_sqlite("Person", err))?;
        tx.execute(
            "UPDATE Member SET member_status = ?1 WHERE member_id = ?2;",
            params![status.as_db(), member_id],
        )
        .map_err(|err| classify_sqlite("Member", err))?;
        tx.commit()?;

        Ok(())
    }

    fn assign_membership(
        &self,
        member_id: i64,
        membership_type_id: i64,
        is_active: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<i64> {
        if end_date < start_date {
            return Err(ValidationError::EndBeforeStart {
                start: start_date,
                end: end_date,
            }
            .into());
        }

        self.conn
            .execute(
                "INSERT INTO Membership (member_id, membership_type_id, is_active, start_date, end_date)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    member_id,
                    membership_type_id,
                    i64::from(is_active),
                    fmt_date(start_date),
                    fmt_date(end_date),
                ],
            )
            .map_err(|err| classify_sqlite("Membership", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_membership(
        &self,
        membership_id: i64,
        new_end_date: NaiveDate,
        is_active: bool,
    ) -> RepoResult<()> {
        let stored_start: String = self
            .conn
            .query_row(
                "SELECT start_date FROM Membership WHERE membership_id = ?1;",
                [membership_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(RepoError::NotFound {
                entity: "Membership",
                id: membership_id,
            })?;

        let start_date = parse_date(&stored_start).ok_or_else(|| {
            RepoError::InvalidData(format!(
                "invalid date `{stored_start}` in Membership.start_date"
            ))
        })?;

        if new_end_date < start_date {
            return Err(ValidationError::EndBeforeStart {
                start: start_date,
                end: new_end_date,
            }
            .into());
        }

        self.conn
            .execute(
                "UPDATE Membership SET end_date = ?1, is_active = ?2 WHERE membership_id = ?3;",
                params![fmt_date(new_end_date), i64::from(is_active), membership_id],
            )
            .map_err(|err| classify_sqlite("Membership", err))?;

        Ok(())
    }

    fn delete_membership(&self, membership_id: i64) -> RepoResult<()> {
        // Membership has no children; unconditional single-row delete.
        let changed = self
            .conn
            .execute(
                "DELETE FROM Membership WHERE membership_id = ?1;",
                [membership_id],
            )
            .map_err(|err| classify_sqlite("Membership", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Membership",
                id: membership_id,
            });
        }
        Ok(())
    }

    fn create_membership_type(&self, name: &str, price: f64) -> RepoResult<i64> {
        if is_blank(name) {
            return Err(ValidationError::BlankField {
                action: "create_membership_type",
                field: "name",
            }
            .into());
        }

        self.conn
            .execute(
                "INSERT INTO Membership_Type (name, price) VALUES (?1, ?2);",
                params![name.trim(), price],
            )
            .map_err(|err| classify_sqlite("Membership_Type", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn record_payment(
        &self,
        member_id: i64,
        amount: f64,
        method: PaymentMethod,
        payment_date: NaiveDate,
    ) -> RepoResult<i64> {
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount { amount }.into());
        }

        self.conn
            .execute(
                "INSERT INTO Payment (member_id, payment_date, method, amount)
                 VALUES (?1, ?2, ?3, ?4);",
                params![member_id, fmt_date(payment_date), method.as_db(), amount],
            )
            .map_err(|err| classify_sqlite("Payment", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn check_in(
        &self,
        member_id: i64,
        class_session_id: i64,
        checkin_time: NaiveDateTime,
    ) -> RepoResult<i64> {
        self.conn
            .execute(
                "INSERT INTO Check_in (member_id, class_session_id, checkin_time, checkout_time)
                 VALUES (?1, ?2, ?3, NULL);",
                params![member_id, class_session_id, fmt_datetime(checkin_time)],
            )
            .map_err(|err| classify_sqlite("Check_in", err))?;

        Ok(self.conn.last_insert_rowid())
    }

    fn check_out(&self, checkin_id: i64, checkout_time: NaiveDateTime) -> RepoResult<()> {
        let changed = self
            .conn
            .execute(
                "UPDATE Check_in SET checkout_time = ?1 WHERE checkin_id = ?2;",
                params![fmt_datetime(checkout_time), checkin_id],
            )
            .map_err(|err| classify_sqlite("Check_in", err))?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Check_in",
                id: checkin_id,
            });
        }
        Ok(())
    }

    fn enroll_in_session(&self, member_id: i64, class_session_id: i64) -> RepoResult<()> {
        self.conn
            .execute(
                "INSERT INTO Attends (member_id, class_session_id) VALUES (?1, ?2);",
                params![member_id, class_session_id],
            )
            .map_err(|err| classify_sqlite("Attends", err))?;
        Ok(())
    }

    fn force_delete_member(&self, member_id: i64) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        // Children before parent, all-or-nothing. Person survives.
        tx.execute("DELETE FROM Check_in WHERE member_id = ?1;", [member_id])
            .map_err(|err| classify_sqlite("Check_in", err))?;
        tx.execute("DELETE FROM Attends WHERE member_id = ?1;", [member_id])
            .map_err(|err| classify_sqlite("Attends", err))?;
        tx.execute("DELETE FROM Payment WHERE member_id = ?1;", [member_id])
            .map_err(|err| classify_sqlite("Payment", err))?;
        tx.execute("DELETE FROM Membership WHERE member_id = ?1;", [member_id])
            .map_err(|err| classify_sqlite("Membership", err))?;

        let changed = tx
            .execute("DELETE FROM Member WHERE member_id = ?1;", [member_id])
            .map_err(|err| classify_sqlite("Member", err))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "Member",
                id: member_id,
            });
        }

        tx.commit()?;
        Ok(())
    }
}
