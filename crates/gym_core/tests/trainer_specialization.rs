use chrono::NaiveDate;
use gym_core::db::open_db_in_memory;
use gym_core::{
    PersonFields, RepoError, SqliteTrainerRepository, TrainerRegistration, TrainerRepository,
    TrainerStatus, ValidationError,
};
use rusqlite::Connection;

fn sample_registration() -> TrainerRegistration {
    TrainerRegistration {
        person: PersonFields {
            first_name: "Jonas".to_string(),
            last_name: "Berg".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1985, 1, 20).unwrap(),
            email: "jonas.berg@example.com".to_string(),
            city: "Malmö".to_string(),
            street: "Södra vägen 3".to_string(),
            zip: "21145".to_string(),
        },
        phone: "0733334444".to_string(),
        specialization: "Strength".to_string(),
        hire_date: NaiveDate::from_ymd_opt(2022, 8, 1).unwrap(),
        status: TrainerStatus::Active,
    }
}

fn count(conn: &Connection, table: &str) -> i64 {
    conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
        row.get(0)
    })
    .unwrap()
}

#[test]
fn register_trainer_links_normalized_specialization() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);

    let trainer_id = repo.register_trainer(&sample_registration()).unwrap();
    assert_eq!(trainer_id, 1);

    assert_eq!(count(&conn, "Person"), 1);
    assert_eq!(count(&conn, "Phone"), 1);
    assert_eq!(count(&conn, "Trainer"), 1);
    assert_eq!(count(&conn, "Specialization"), 1);
    assert_eq!(count(&conn, "Trainer_Specialization"), 1);

    let name: String = conn
        .query_row(
            "SELECT s.name
             FROM Trainer_Specialization ts
             JOIN Specialization s ON ts.specialization_id = s.specialization_id
             WHERE ts.trainer_id = ?1;",
            [trainer_id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(name, "Strength");
}

#[test]
fn register_trainer_rejects_blank_specialization() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);

    let mut registration = sample_registration();
    registration.specialization = " ".to_string();

    let err = repo.register_trainer(&registration).unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::MissingFields {
            action: "register_trainer"
        })
    ));
    assert_eq!(count(&conn, "Person"), 0);
    assert_eq!(count(&conn, "Trainer"), 0);
}

#[test]
fn add_specialization_duplicate_name_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);

    repo.add_specialization("Yoga").unwrap();
    let err = repo.add_specialization("Yoga").unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: "Specialization",
            ..
        }
    ));
    assert_eq!(count(&conn, "Specialization"), 1);
}

#[test]
fn assign_specialization_duplicate_pair_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);
    let trainer_id = repo.register_trainer(&sample_registration()).unwrap();
    let specialization_id = repo.add_specialization("Cardio").unwrap();

    repo.assign_specialization(trainer_id, specialization_id)
        .unwrap();
    let err = repo
        .assign_specialization(trainer_id, specialization_id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Duplicate {
            entity: "Trainer_Specialization",
            ..
        }
    ));
    assert_eq!(count(&conn, "Trainer_Specialization"), 2);
}

#[test]
fn assign_specialization_unknown_trainer_is_referential_integrity_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);
    let specialization_id = repo.add_specialization("Pilates").unwrap();

    let err = repo
        .assign_specialization(77, specialization_id)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::ReferentialIntegrity {
            entity: "Trainer_Specialization",
            ..
        }
    ));
}

#[test]
fn update_trainer_profile_rejects_blank_email() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);
    let trainer_id = repo.register_trainer(&sample_registration()).unwrap();

    let err = repo
        .update_trainer_profile(trainer_id, "", "Strength", TrainerStatus::Active)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Validation(ValidationError::BlankField { field: "email", .. })
    ));
}

#[test]
fn update_trainer_profile_updates_email_status_and_links_specialization() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);
    let trainer_id = repo.register_trainer(&sample_registration()).unwrap();

    repo.update_trainer_profile(
        trainer_id,
        "jonas@new.example.com",
        "Mobility",
        TrainerStatus::OnLeave,
    )
    .unwrap();

    let (email, status): (String, String) = conn
        .query_row(
            "SELECT p.email, t.trainer_status
             FROM Trainer t JOIN Person p ON t.person_id = p.id
             WHERE t.trainer_id = ?1;",
            [trainer_id],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(email, "jonas@new.example.com");
    assert_eq!(status, "on_leave");

    // Original link plus the newly ensured one.
    assert_eq!(count(&conn, "Trainer_Specialization"), 2);
}

#[test]
fn update_trainer_profile_unknown_trainer_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTrainerRepository::new(&conn);

    let err = repo
        .update_trainer_profile(9, "a@b.c", "Strength", TrainerStatus::Active)
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::NotFound {
            entity: "Trainer",
            id: 9
        }
    ));
}
