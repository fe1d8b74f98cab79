use chrono::NaiveDate;
use gym_core::db::open_db_in_memory;
use gym_core::{
    MemberRegistration, MemberRepository, MemberStatus, PaymentMethod, PersonFields, RepoError,
    SqliteMemberRepository, ValidationError,
};
use rusqlite::Connection;

fn register_sample_member(repo: &SqliteMemberRepository<'_>) -> i64 {
    repo.register_member(&MemberRegistration {
        person: PersonFields {
            first_name: "Mika".to_string(),
            last_name: "Aalto".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1988, 9, 2).unwrap(),
            email: "mika.aalto@example.com".to_string(),
            city: "Espoo".to_string(),
            street: "Rantatie 8".to_string(),
            zip: "02100".to_string(),
        },
        phone: "0409876543".to_string(),
        status: MemberStatus::Active,
        contact_name: "Satu Aalto".to_string(),
        relationship: "sibling".to_string(),
        contact_phone: "0401112233".to_string(),
    })
    .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn assign_membership_rejects_end_before_start() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);
    let type_id = repo.create_membership_type("Monthly", 49.0).unwrap();

    let err = repo
        .assign_membership(member_id, type_id, true, date(2025, 6, 1), date(2025, 5, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EndBeforeStart { .. })
    ));
    assert_eq!(count(&conn, "Membership"), 0);
}

#[test]
fn assign_membership_inserts_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);
    let type_id = repo.create_membership_type("Annual", 399.0).unwrap();

    let membership_id = repo
        .assign_membership(member_id, type_id, true, date(2025, 1, 1), date(2025, 12, 31))
        .unwrap();

    let (is_active, start, end): (i64, String, String) = conn
        .query_row(
            "SELECT is_active, start_date, end_date FROM Membership WHERE membership_id = ?1;",
            [membership_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(is_active, 1);
    assert_eq!(start, "2025-01-01");
    assert_eq!(end, "2025-12-31");
}

#[test]
fn assign_membership_unknown_member_is_referential_integrity_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let type_id = repo.create_membership_type("Monthly", 49.0).unwrap();

    let err = repo
        .assign_membership(999, type_id, true, date(2025, 1, 1), date(2025, 2, 1))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ReferentialIntegrity {
            entity: "Membership",
            ..
        }
    ));
    assert_eq!(count(&conn, "Membership"), 0);
}

#[test]
fn update_membership_rejects_end_before_stored_start() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);
    let type_id = repo.create_membership_type("Annual", 399.0).unwrap();
    let membership_id = repo
        .assign_membership(member_id, type_id, true, date(2025, 3, 1), date(2025, 9, 1))
        .unwrap();

    let err = repo
        .update_membership(membership_id, date(2025, 2, 1), true)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::EndBeforeStart { .. })
    ));

    let end: String = conn
        .query_row(
            "SELECT end_date FROM Membership WHERE membership_id = ?1;",
            [membership_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(end, "2025-09-01");
}

#[test]
fn update_membership_extends_end_date_and_active_flag() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);
    let type_id = repo.create_membership_type("Annual", 399.0).unwrap();
    let membership_id = repo
        .assign_membership(member_id, type_id, true, date(2025, 3, 1), date(2025, 9, 1))
        .unwrap();

    repo.update_membership(membership_id, date(2026, 3, 1), false)
        .unwrap();

    let (end, is_active): (String, i64) = conn
        .query_row(
            "SELECT end_date, is_active FROM Membership WHERE membership_id = ?1;",
            [membership_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(end, "2026-03-01");
    assert_eq!(is_active, 0);
}

#[test]
fn delete_membership_removes_single_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);
    let type_id = repo.create_membership_type("Monthly", 49.0).unwrap();
    let membership_id = repo
        .assign_membership(member_id, type_id, true, date(2025, 1, 1), date(2025, 2, 1))
        .unwrap();

    repo.delete_membership(membership_id).unwrap();
    assert_eq!(count(&conn, "Membership"), 0);

    let err = repo.delete_membership(membership_id).unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "Membership",
            ..
        }
    ));
}

#[test]
fn record_payment_rejects_non_positive_amounts() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);

    for amount in [0.0, -25.0] {
        let err = repo
            .record_payment(member_id, amount, PaymentMethod::Cash, date(2025, 5, 5))
            .unwrap_err();
        assert!(matches!(
            err,
            RepoError::Validation(ValidationError::NonPositiveAmount { .. })
        ));
    }
    assert_eq!(count(&conn, "Payment"), 0);
}

#[test]
fn record_payment_inserts_row() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = register_sample_member(&repo);

    repo.record_payment(member_id, 49.0, PaymentMethod::CreditCard, date(2025, 5, 5))
        .unwrap();

    let (method, amount): (String, f64) = conn
        .query_row(
            "SELECT method, amount FROM Payment WHERE member_id = ?1;",
            [member_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(method, "credit_card");
    assert!((amount - 49.0).abs() < f64::EPSILON);
}
