//! Member use-case service.
//!
//! # Invariants
//! - Service APIs never bypass repository validation or transaction
//!   contracts.
//! - The service layer remains storage-agnostic.

use crate::model::member::{MemberRegistration, MemberStatus};
use crate::model::payment::PaymentMethod;
use crate::repo::member_repo::MemberRepository;
use crate::repo::RepoResult;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Use-case wrapper over member-rooted repository operations.
pub struct MemberService<R: MemberRepository> {
    repo: R,
}

/// Request model for updating a member's contact details and status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateMemberProfileRequest {
    pub member_id: i64,
    pub email: String,
    pub city: String,
    pub street: String,
    pub zip: String,
    pub status: MemberStatus,
}

impl<R: MemberRepository> MemberService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a member with their phone and emergency contact in one
    /// transaction. Returns the new member id.
    pub fn register_member(&self, registration: &MemberRegistration) -> RepoResult<i64> {
        self.repo.register_member(registration)
    }

    pub fn update_profile(&self, request: &UpdateMemberProfileRequest) -> RepoResult<()> {
        self.repo.update_member_profile(
            request.member_id,
            &request.email,
            &request.city,
            &request.street,
            &request.zip,
            request.status,
        )
    }

    pub fn assign_membership(
        &self,
        member_id: i64,
        membership_type_id: i64,
        is_active: bool,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> RepoResult<i64> {
        self.repo
            .assign_membership(member_id, membership_type_id, is_active, start_date, end_date)
    }

    pub fn update_membership(
        &self,
        membership_id: i64,
        new_end_date: NaiveDate,
        is_active: bool,
    ) -> RepoResult<()> {
        self.repo
            .update_membership(membership_id, new_end_date, is_active)
    }

    pub fn delete_membership(&self, membership_id: i64) -> RepoResult<()> {
        self.repo.delete_membership(membership_id)
    }

    pub fn create_membership_type(&self, name: &str, price: f64) -> RepoResult<i64> {
        self.repo.create_membership_type(name, price)
    }

    pub fn record_payment(
        &self,
        member_id: i64,
        amount: f64,
        method: PaymentMethod,
        payment_date: NaiveDate,
    ) -> RepoResult<i64> {
        self.repo
            .record_payment(member_id, amount, method, payment_date)
    }

    pub fn check_in(
        &self,
        member_id: i64,
        class_session_id: i64,
        checkin_time: NaiveDateTime,
    ) -> RepoResult<i64> {
        self.repo.check_in(member_id, class_session_id, checkin_time)
    }

    pub fn check_out(&self, checkin_id: i64, checkout_time: NaiveDateTime) -> RepoResult<()> {
        self.repo.check_out(checkin_id, checkout_time)
    }

    pub fn enroll_in_session(&self, member_id: i64, class_session_id: i64) -> RepoResult<()> {
        self.repo.enroll_in_session(member_id, class_session_id)
    }

    /// Deletes the member together with their check-ins, attendance,
    /// payments and memberships. The Person row survives.
    pub fn force_delete_member(&self, member_id: i64) -> RepoResult<()> {
        self.repo.force_delete_member(member_id)
    }
}
