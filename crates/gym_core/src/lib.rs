//! Core domain logic for the gym administration panel.
//! This crate is the single source of truth for business invariants:
//! schema, referential-integrity rules, and cascade-deletion order.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod service;

pub use db::{open_db, open_db_in_memory, DbError};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{MemberRegistration, MemberStatus};
pub use model::payment::PaymentMethod;
pub use model::person::PersonFields;
pub use model::phone::{PhoneKind, PhoneOwner};
pub use model::trainer::{TrainerRegistration, TrainerStatus};
pub use model::ValidationError;
pub use projection::{options, project, Field, OptionKind, OptionRow, Projection};
pub use repo::class_repo::{ClassRepository, SqliteClassRepository};
pub use repo::member_repo::{MemberRepository, SqliteMemberRepository};
pub use repo::trainer_repo::{SqliteTrainerRepository, TrainerRepository};
pub use repo::{RepoError, RepoResult};
pub use service::actions::{dispatch, run_action, ActionOutcome, AdminAction};
pub use service::class_service::{ClassService, RescheduleSessionRequest, ScheduleSessionRequest};
pub use service::member_service::{MemberService, UpdateMemberProfileRequest};
pub use service::trainer_service::TrainerService;

/// Default database file name known to the process at start.
pub const DATABASE_NAME: &str = "gym.db";

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, DATABASE_NAME};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn database_name_is_stable() {
        assert_eq!(DATABASE_NAME, "gym.db");
    }
}
