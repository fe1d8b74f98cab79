use chrono::NaiveDate;
use gym_core::db::open_db_in_memory;
use gym_core::{
    MemberRegistration, MemberRepository, MemberStatus, PersonFields, RepoError,
    SqliteMemberRepository, ValidationError,
};
use rusqlite::Connection;

fn sample_registration() -> MemberRegistration {
    MemberRegistration {
        person: PersonFields {
            first_name: "Ana".to_string(),
            last_name: "Ström".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
            email: "ana.strom@example.com".to_string(),
            city: "Uppsala".to_string(),
            street: "Storgatan 1".to_string(),
            zip: "75310".to_string(),
        },
        phone: "0701234567".to_string(),
        status: MemberStatus::Active,
        contact_name: "Lars Ström".to_string(),
        relationship: "spouse".to_string(),
        contact_phone: "0707654321".to_string(),
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn register_member_writes_full_composite() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let member_id = repo.register_member(&sample_registration()).unwrap();
    assert_eq!(member_id, 1);

    assert_eq!(count(&conn, "Person"), 1);
    assert_eq!(count(&conn, "Member"), 1);
    assert_eq!(count(&conn, "Contact"), 1);
    // One phone for the person, one for the emergency contact.
    assert_eq!(count(&conn, "Phone"), 2);

    let contact_phones: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM Phone WHERE owner_type = 'contact';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(contact_phones, 1);
}

#[test]
fn register_member_rejects_blank_required_field() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let mut registration = sample_registration();
    registration.person.city = "   ".to_string();

    let err = repo.register_member(&registration).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingFields {
            action: "register_member"
        })
    ));
    assert!(err.to_string().contains("all fields required"));

    assert_eq!(count(&conn, "Person"), 0);
    assert_eq!(count(&conn, "Phone"), 0);
    assert_eq!(count(&conn, "Member"), 0);
    assert_eq!(count(&conn, "Contact"), 0);
}

#[test]
fn registration_rolls_back_when_contact_write_fails() {
    let conn = open_db_in_memory().unwrap();

    // Simulated storage fault at the Contact step of the composite insert.
    conn.execute_batch(
        "CREATE TRIGGER contact_fault BEFORE INSERT ON Contact
         BEGIN SELECT RAISE(ABORT, 'simulated storage fault'); END;",
    )
    .unwrap();

    let repo = SqliteMemberRepository::new(&conn);
    let err = repo.register_member(&sample_registration()).unwrap_err();
    assert!(err.to_string().contains("simulated storage fault"));

    assert_eq!(count(&conn, "Person"), 0);
    assert_eq!(count(&conn, "Phone"), 0);
    assert_eq!(count(&conn, "Member"), 0);
    assert_eq!(count(&conn, "Contact"), 0);
}

#[test]
fn update_member_profile_updates_person_and_member_together() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = repo.register_member(&sample_registration()).unwrap();

    repo.update_member_profile(
        member_id,
        "ana@new.example.com",
        "Stockholm",
        "Kungsgatan 2",
        "11122",
        MemberStatus::Inactive,
    )
    .unwrap();

    let (email, city, status): (String, String, String) = conn
        .query_row(
            "SELECT p.email, p.city, m.member_status
             FROM Member m JOIN Person p ON m.person_id = p.id
             WHERE m.member_id = ?1;",
            [member_id],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )
        .unwrap();
    assert_eq!(email, "ana@new.example.com");
    assert_eq!(city, "Stockholm");
    assert_eq!(status, "inactive");
}

#[test]
fn update_member_profile_rejects_blank_email() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);
    let member_id = repo.register_member(&sample_registration()).unwrap();

    let err = repo
        .update_member_profile(member_id, "  ", "Uppsala", "Storgatan 1", "75310", MemberStatus::Active)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankField { field: "email", .. })
    ));

    let email: String = conn
        .query_row("SELECT email FROM Person WHERE id = 1;", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(email, "ana.strom@example.com");
}

#[test]
fn update_member_profile_unknown_member_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMemberRepository::new(&conn);

    let err = repo
        .update_member_profile(42, "a@b.c", "X", "Y", "Z", MemberStatus::Active)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "Member",
            id: 42
        }
    ));
}
