//! Read-only joined projections for display.
//!
//! # Responsibility
//! - Produce per-entity tabular projections joining human-readable
//!   references (names, prices, phone numbers).
//! - Produce label/id option lists for selection widgets.
//!
//! # Invariants
//! - Pure reads, no side effects; zero rows yields an empty projection.
//! - Entity names are resolved against a fixed whitelist; nothing is
//!   interpolated into SQL from caller input.

use crate::repo::{RepoError, RepoResult};
use rusqlite::types::ValueRef;
use rusqlite::Connection;
use serde::Serialize;
use std::borrow::Cow;

/// Base tables that may be projected verbatim when no joined projection
/// is defined for them.
const BASE_TABLES: &[&str] = &[
    "Person",
    "Member",
    "Trainer",
    "Specialization",
    "Trainer_Specialization",
    "Contact",
    "Class",
    "Class_Session",
    "Membership_Type",
    "Membership",
    "Payment",
    "Check_in",
    "Attends",
    "Teaches",
    "Phone",
];

const MEMBER_SQL: &str = "SELECT
    m.member_id,
    p.first_name,
    p.last_name,
    p.email,
    GROUP_CONCAT(ph.phone_number, ', ') AS phone_number,
    m.member_status
FROM Member m
JOIN Person p ON m.person_id = p.id
LEFT JOIN Phone ph ON p.id = ph.owner_id AND ph.owner_type = 'person'
GROUP BY m.member_id";

const TRAINER_SQL: &str = "SELECT
    t.trainer_id,
    p.first_name || ' ' || p.last_name AS trainer_name,
    GROUP_CONCAT(DISTINCT ph.phone_number) AS phone_number,
    GROUP_CONCAT(DISTINCT s.name) AS specializations,
    t.hire_date,
    t.trainer_status
FROM Trainer t
JOIN Person p ON t.person_id = p.id
LEFT JOIN Phone ph ON p.id = ph.owner_id AND ph.owner_type = 'person'
LEFT JOIN Trainer_Specialization ts ON t.trainer_id = ts.trainer_id
LEFT JOIN Specialization s ON ts.specialization_id = s.specialization_id
GROUP BY t.trainer_id";

const MEMBERSHIP_SQL: &str = "SELECT
    ms.membership_id,
    p.first_name || ' ' || p.last_name AS member_name,
    mt.name AS membership_type,
    mt.price,
    ms.is_active,
    ms.start_date,
    ms.end_date
FROM Membership ms
JOIN Member m ON ms.member_id = m.member_id
JOIN Person p ON m.person_id = p.id
JOIN Membership_Type mt ON ms.membership_type_id = mt.membership_type_id";

const CLASS_SESSION_SQL: &str = "SELECT
    cs.class_session_id,
    c.class_name,
    c.description,
    cs.start_time,
    cs.end_time,
    cs.capacity,
    cs.duration
FROM Class_Session cs
JOIN Class c ON cs.class_id = c.class_id";

const PAYMENT_SQL: &str = "SELECT
    pay.payment_id,
    p.first_name || ' ' || p.last_name AS member_name,
    pay.amount,
    pay.method,
    pay.payment_date
FROM Payment pay
JOIN Member m ON pay.member_id = m.member_id
JOIN Person p ON m.person_id = p.id";

const PHONE_SQL: &str = "SELECT
    ph.phone_id,
    p.first_name || ' ' || p.last_name AS owner_name,
    ph.phone_number,
    ph.type AS phone_type
FROM Phone ph
LEFT JOIN Person p ON ph.owner_id = p.id
WHERE ph.owner_type = 'person'";

const TRAINER_SPECIALIZATION_SQL: &str = "SELECT
    p.first_name || ' ' || p.last_name AS trainer_name,
    s.name AS specialization_area
FROM Trainer_Specialization ts
JOIN Trainer t ON ts.trainer_id = t.trainer_id
JOIN Person p ON t.person_id = p.id
JOIN Specialization s ON ts.specialization_id = s.specialization_id";

const CONTACT_SQL: &str = "SELECT
    c.contact_id,
    p.first_name || ' ' || p.last_name AS member_name,
    c.contact_name AS emergency_contact,
    c.relationship,
    GROUP_CONCAT(ph.phone_number, ', ') AS contact_phones
FROM Contact c
JOIN Person p ON c.person_id = p.id
LEFT JOIN Phone ph ON c.contact_id = ph.owner_id AND ph.owner_type = 'contact'
GROUP BY c.contact_id";

const ATTENDS_SQL: &str = "SELECT
    p.first_name || ' ' || p.last_name AS member_name,
    c.class_name AS class,
    cs.start_time AS session_time,
    cs.duration || ' min' AS duration
FROM Attends a
JOIN Member m ON a.member_id = m.member_id
JOIN Person p ON m.person_id = p.id
JOIN Class_Session cs ON a.class_session_id = cs.class_session_id
JOIN Class c ON cs.class_id = c.class_id";

const TEACHES_SQL: &str = "SELECT
    p.first_name || ' ' || p.last_name AS trainer_name,
    c.class_name AS class,
    cs.start_time AS session_time,
    cs.duration || ' min' AS duration
FROM Teaches te
JOIN Trainer tr ON te.trainer_id = tr.trainer_id
JOIN Person p ON tr.person_id = p.id
JOIN Class_Session cs ON te.class_session_id = cs.class_session_id
JOIN Class c ON cs.class_id = c.class_id";

const CHECK_IN_SQL: &str = "SELECT
    ci.checkin_id,
    p.first_name || ' ' || p.last_name AS member_name,
    c.class_name AS class,
    cs.start_time AS session_scheduled,
    ci.checkin_time,
    ci.checkout_time
FROM Check_in ci
JOIN Member m ON ci.member_id = m.member_id
JOIN Person p ON m.person_id = p.id
JOIN Class_Session cs ON ci.class_session_id = cs.class_session_id
JOIN Class c ON cs.class_id = c.class_id
ORDER BY ci.checkin_time DESC";

/// One cell of a projection row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

/// A rendered, read-only tabular projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Field>>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A label/id pair for populating a selection widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionRow {
    pub label: String,
    pub id: i64,
}

/// Selection lists offered to the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Members,
    Trainers,
    Classes,
    Sessions,
    MembershipTypes,
    Memberships,
    Specializations,
}

impl OptionKind {
    fn sql(self) -> &'static str {
        match self {
            Self::Members => {
                "SELECT p.first_name || ' ' || p.last_name || ' (ID: ' || m.member_id || ')',
                        m.member_id
                 FROM Member m JOIN Person p ON m.person_id = p.id"
            }
            Self::Trainers => {
                "SELECT p.first_name || ' ' || p.last_name, t.trainer_id
                 FROM Trainer t JOIN Person p ON t.person_id = p.id"
            }
            Self::Classes => "SELECT class_name, class_id FROM Class",
            Self::Sessions => {
                "SELECT c.class_name || ' (' || cs.start_time || ')', cs.class_session_id
                 FROM Class_Session cs
                 JOIN Class c ON cs.class_id = c.class_id
                 ORDER BY cs.start_time DESC"
            }
            Self::MembershipTypes => {
                "SELECT name || ' - ' || price, membership_type_id FROM Membership_Type"
            }
            Self::Memberships => {
                "SELECT p.first_name || ' ' || p.last_name || ' - ' || mt.name ||
                        ' (End: ' || ms.end_date || ')',
                        ms.membership_id
                 FROM Membership ms
                 JOIN Member m ON ms.member_id = m.member_id
                 JOIN Person p ON m.person_id = p.id
                 JOIN Membership_Type mt ON ms.membership_type_id = mt.membership_type_id"
            }
            Self::Specializations => "SELECT name, specialization_id FROM Specialization",
        }
    }
}

fn projection_sql(entity: &str) -> Option<&'static str> {
    match entity {
        "Member" => Some(MEMBER_SQL),
        "Trainer" => Some(TRAINER_SQL),
        "Membership" => Some(MEMBERSHIP_SQL),
        "Class_Session" => Some(CLASS_SESSION_SQL),
        "Payment" => Some(PAYMENT_SQL),
        "Phone" => Some(PHONE_SQL),
        "Trainer_Specialization" => Some(TRAINER_SPECIALIZATION_SQL),
        "Contact" => Some(CONTACT_SQL),
        "Attends" => Some(ATTENDS_SQL),
        "Teaches" => Some(TEACHES_SQL),
        "Check_in" => Some(CHECK_IN_SQL),
        _ => None,
    }
}

/// Builds the display projection for `entity`.
///
/// Entities without a joined projection fall back to an unfiltered
/// full-row read of their base table; entity names outside the schema
/// whitelist are rejected.
pub fn project(conn: &Connection, entity: &str) -> RepoResult<Projection> {
    let sql: Cow<'static, str> = match projection_sql(entity) {
        Some(sql) => Cow::Borrowed(sql),
        None if BASE_TABLES.contains(&entity) => Cow::Owned(format!("SELECT * FROM {entity}")),
        None => return Err(RepoError::UnknownEntity(entity.to_string())),
    };

    let mut stmt = conn.prepare(&sql)?;
    let columns: Vec<String> = stmt
        .column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    let mut rows = stmt.query([])?;
    let mut collected = Vec::new();
    while let Some(row) = rows.next()? {
        let mut fields = Vec::with_capacity(columns.len());
        for index in 0..columns.len() {
            fields.push(field_from_ref(row.get_ref(index)?));
        }
        collected.push(fields);
    }

    Ok(Projection {
        columns,
        rows: collected,
    })
}

/// Returns label/id pairs for the requested selection list.
pub fn options(conn: &Connection, kind: OptionKind) -> RepoResult<Vec<OptionRow>> {
    let mut stmt = conn.prepare(kind.sql())?;
    let rows = stmt.query_map([], |row| {
        Ok(OptionRow {
            label: row.get(0)?,
            id: row.get(1)?,
        })
    })?;

    let mut collected = Vec::new();
    for row in rows {
        collected.push(row?);
    }
    Ok(collected)
}

fn field_from_ref(value: ValueRef<'_>) -> Field {
    match value {
        ValueRef::Null => Field::Null,
        ValueRef::Integer(value) => Field::Integer(value),
        ValueRef::Real(value) => Field::Real(value),
        ValueRef::Text(value) => Field::Text(String::from_utf8_lossy(value).into_owned()),
        ValueRef::Blob(value) => Field::Blob(value.to_vec()),
    }
}
