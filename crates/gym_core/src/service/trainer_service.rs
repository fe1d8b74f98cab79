//! Trainer use-case service.

use crate::model::trainer::{TrainerRegistration, TrainerStatus};
use crate::repo::trainer_repo::TrainerRepository;
use crate::repo::RepoResult;

/// Use-case wrapper over trainer-rooted repository operations.
pub struct TrainerService<R: TrainerRepository> {
    repo: R,
}

impl<R: TrainerRepository> TrainerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a trainer and links their main specialization in one
    /// transaction. Returns the new trainer id.
    pub fn register_trainer(&self, registration: &TrainerRegistration) -> RepoResult<i64> {
        self.repo.register_trainer(registration)
    }

    pub fn update_profile(
        &self,
        trainer_id: i64,
        email: &str,
        specialization: &str,
        status: TrainerStatus,
    ) -> RepoResult<()> {
        self.repo
            .update_trainer_profile(trainer_id, email, specialization, status)
    }

    pub fn add_specialization(&self, name: &str) -> RepoResult<i64> {
        self.repo.add_specialization(name)
    }

    pub fn assign_specialization(&self, trainer_id: i64, specialization_id: i64) -> RepoResult<()> {
        self.repo.assign_specialization(trainer_id, specialization_id)
    }

    pub fn teach_session(&self, trainer_id: i64, class_session_id: i64) -> RepoResult<()> {
        self.repo.teach_session(trainer_id, class_session_id)
    }

    /// Deletes the trainer together with their teaching assignments and
    /// specialization links. The Person row survives.
    pub fn force_delete_trainer(&self, trainer_id: i64) -> RepoResult<()> {
        self.repo.force_delete_trainer(trainer_id)
    }
}
