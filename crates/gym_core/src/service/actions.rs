//! Action dispatch boundary for the UI layer.
//!
//! The UI collects typed field values, selects one [`AdminAction`], and
//! receives back either an [`ActionOutcome`] or a classified
//! [`RepoError`](crate::repo::RepoError). One action maps to exactly one
//! repository operation and runs inside that operation's transaction
//! scope.

use crate::db::open_db;
use crate::model::member::MemberRegistration;
use crate::model::payment::PaymentMethod;
use crate::model::trainer::{TrainerRegistration, TrainerStatus};
use crate::repo::class_repo::{ClassRepository, SqliteClassRepository};
use crate::repo::member_repo::{MemberRepository, SqliteMemberRepository};
use crate::repo::trainer_repo::{SqliteTrainerRepository, TrainerRepository};
use crate::repo::RepoResult;
use crate::service::class_service::{RescheduleSessionRequest, ScheduleSessionRequest};
use crate::service::member_service::UpdateMemberProfileRequest;
use chrono::{NaiveDate, NaiveDateTime};
use log::{error, info};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One administrative action, selected by the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum AdminAction {
    RegisterMember(MemberRegistration),
    RegisterTrainer(TrainerRegistration),
    CreateClass {
        name: String,
        description: String,
    },
    ScheduleSession(ScheduleSessionRequest),
    AssignMembership {
        member_id: i64,
        membership_type_id: i64,
        is_active: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
    RecordPayment {
        member_id: i64,
        amount: f64,
        method: PaymentMethod,
        payment_date: NaiveDate,
    },
    AddSpecialization {
        name: String,
    },
    AssignSpecialization {
        trainer_id: i64,
        specialization_id: i64,
    },
    CreateMembershipType {
        name: String,
        price: f64,
    },
    UpdateMemberProfile(UpdateMemberProfileRequest),
    UpdateTrainerProfile {
        trainer_id: i64,
        email: String,
        specialization: String,
        status: TrainerStatus,
    },
    RescheduleSession(RescheduleSessionRequest),
    UpdateMembership {
        membership_id: i64,
        new_end_date: NaiveDate,
        is_active: bool,
    },
    CheckIn {
        member_id: i64,
        class_session_id: i64,
        checkin_time: NaiveDateTime,
    },
    CheckOut {
        checkin_id: i64,
        checkout_time: NaiveDateTime,
    },
    EnrollInSession {
        member_id: i64,
        class_session_id: i64,
    },
    TeachSession {
        trainer_id: i64,
        class_session_id: i64,
    },
    DeleteMember {
        member_id: i64,
    },
    DeleteTrainer {
        trainer_id: i64,
    },
    CancelSession {
        class_session_id: i64,
    },
    DeleteMembership {
        membership_id: i64,
    },
}

impl AdminAction {
    /// Stable action name for logging and error display.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RegisterMember(_) => "register_member",
            Self::RegisterTrainer(_) => "register_trainer",
            Self::CreateClass { .. } => "create_class",
            Self::ScheduleSession(_) => "schedule_session",
            Self::AssignMembership { .. } => "assign_membership",
            Self::RecordPayment { .. } => "record_payment",
            Self::AddSpecialization { .. } => "add_specialization",
            Self::AssignSpecialization { .. } => "assign_specialization",
            Self::CreateMembershipType { .. } => "create_membership_type",
            Self::UpdateMemberProfile(_) => "update_member_profile",
            Self::UpdateTrainerProfile { .. } => "update_trainer_profile",
            Self::RescheduleSession(_) => "reschedule_session",
            Self::UpdateMembership { .. } => "update_membership",
            Self::CheckIn { .. } => "check_in",
            Self::CheckOut { .. } => "check_out",
            Self::EnrollInSession { .. } => "enroll_in_session",
            Self::TeachSession { .. } => "teach_session",
            Self::DeleteMember { .. } => "delete_member",
            Self::DeleteTrainer { .. } => "delete_trainer",
            Self::CancelSession { .. } => "cancel_session",
            Self::DeleteMembership { .. } => "delete_membership",
        }
    }
}

/// Result of a successfully dispatched action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// Generated surrogate key, for insert-style actions.
    pub created_id: Option<i64>,
}

impl ActionOutcome {
    fn created(id: i64) -> Self {
        Self {
            created_id: Some(id),
        }
    }

    fn done() -> Self {
        Self { created_id: None }
    }
}

/// Dispatches one action against an open connection.
pub fn dispatch(conn: &Connection, action: &AdminAction) -> RepoResult<ActionOutcome> {
    info!(
        "event=action module=service status=start action={}",
        action.name()
    );

    let outcome = run_on(conn, action);
    match &outcome {
        Ok(_) => info!(
            "event=action module=service status=ok action={}",
            action.name()
        ),
        Err(err) => error!(
            "event=action module=service status=error action={} error={err}",
            action.name()
        ),
    }
    outcome
}

/// Request-per-interaction entry point: opens the database, dispatches the
/// action, and drops the connection on every exit path.
pub fn run_action(db_path: impl AsRef<Path>, action: &AdminAction) -> RepoResult<ActionOutcome> {
    let conn = open_db(db_path)?;
    dispatch(&conn, action)
}

fn run_on(conn: &Connection, action: &AdminAction) -> RepoResult<ActionOutcome> {
    let members = SqliteMemberRepository::new(conn);
    let trainers = SqliteTrainerRepository::new(conn);
    let classes = SqliteClassRepository::new(conn);

    match action {
        AdminAction::RegisterMember(registration) => {
            members.register_member(registration).map(ActionOutcome::created)
        }
        AdminAction::RegisterTrainer(registration) => {
            trainers.register_trainer(registration).map(ActionOutcome::created)
        }
        AdminAction::CreateClass { name, description } => {
            classes.create_class(name, description).map(ActionOutcome::created)
        }
        AdminAction::ScheduleSession(request) => classes
            .schedule_session(
                request.class_id,
                request.date,
                request.start,
                request.duration_minutes,
                request.capacity,
            )
            .map(ActionOutcome::created),
        AdminAction::AssignMembership {
            member_id,
            membership_type_id,
            is_active,
            start_date,
            end_date,
        } => members
            .assign_membership(*member_id, *membership_type_id, *is_active, *start_date, *end_date)
            .map(ActionOutcome::created),
        AdminAction::RecordPayment {
            member_id,
            amount,
            method,
            payment_date,
        } => members
            .record_payment(*member_id, *amount, *method, *payment_date)
            .map(ActionOutcome::created),
        AdminAction::AddSpecialization { name } => {
            trainers.add_specialization(name).map(ActionOutcome::created)
        }
        AdminAction::AssignSpecialization {
            trainer_id,
            specialization_id,
        } => trainers
            .assign_specialization(*trainer_id, *specialization_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::CreateMembershipType { name, price } => members
            .create_membership_type(name, *price)
            .map(ActionOutcome::created),
        AdminAction::UpdateMemberProfile(request) => members
            .update_member_profile(
                request.member_id,
                &request.email,
                &request.city,
                &request.street,
                &request.zip,
                request.status,
            )
            .map(|()| ActionOutcome::done()),
        AdminAction::UpdateTrainerProfile {
            trainer_id,
            email,
            specialization,
            status,
        } => trainers
            .update_trainer_profile(*trainer_id, email, specialization, *status)
            .map(|()| ActionOutcome::done()),
        AdminAction::RescheduleSession(request) => classes
            .reschedule_session(
                request.class_session_id,
                request.date,
                request.start,
                request.end,
                request.capacity,
            )
            .map(|()| ActionOutcome::done()),
        AdminAction::UpdateMembership {
            membership_id,
            new_end_date,
            is_active,
        } => members
            .update_membership(*membership_id, *new_end_date, *is_active)
            .map(|()| ActionOutcome::done()),
        AdminAction::CheckIn {
            member_id,
            class_session_id,
            checkin_time,
        } => members
            .check_in(*member_id, *class_session_id, *checkin_time)
            .map(ActionOutcome::created),
        AdminAction::CheckOut {
            checkin_id,
            checkout_time,
        } => members
            .check_out(*checkin_id, *checkout_time)
            .map(|()| ActionOutcome::done()),
        AdminAction::EnrollInSession {
            member_id,
            class_session_id,
        } => members
            .enroll_in_session(*member_id, *class_session_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::TeachSession {
            trainer_id,
            class_session_id,
        } => trainers
            .teach_session(*trainer_id, *class_session_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::DeleteMember { member_id } => members
            .force_delete_member(*member_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::DeleteTrainer { trainer_id } => trainers
            .force_delete_trainer(*trainer_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::CancelSession { class_session_id } => classes
            .cancel_session(*class_session_id)
            .map(|()| ActionOutcome::done()),
        AdminAction::DeleteMembership { membership_id } => members
            .delete_membership(*membership_id)
            .map(|()| ActionOutcome::done()),
    }
}
