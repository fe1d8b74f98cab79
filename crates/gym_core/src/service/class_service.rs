//! Class and session use-case service.

use crate::repo::class_repo::ClassRepository;
use crate::repo::RepoResult;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Use-case wrapper over class and session repository operations.
pub struct ClassService<R: ClassRepository> {
    repo: R,
}

/// Request model for scheduling one occurrence of a class.
///
/// The session's end time is derived from start + duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSessionRequest {
    pub class_id: i64,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: i64,
    pub capacity: i64,
}

/// Request model for moving or resizing an existing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RescheduleSessionRequest {
    pub class_session_id: i64,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub capacity: i64,
}

impl<R: ClassRepository> ClassService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn create_class(&self, name: &str, description: &str) -> RepoResult<i64> {
        self.repo.create_class(name, description)
    }

    pub fn schedule_session(&self, request: &ScheduleSessionRequest) -> RepoResult<i64> {
        self.repo.schedule_session(
            request.class_id,
            request.date,
            request.start,
            request.duration_minutes,
            request.capacity,
        )
    }

    pub fn reschedule_session(&self, request: &RescheduleSessionRequest) -> RepoResult<()> {
        self.repo.reschedule_session(
            request.class_session_id,
            request.date,
            request.start,
            request.end,
            request.capacity,
        )
    }

    /// Cancels the session and removes its check-ins, attendance and
    /// teaching assignments in one transaction.
    pub fn cancel_session(&self, class_session_id: i64) -> RepoResult<()> {
        self.repo.cancel_session(class_session_id)
    }
}
