//! Ports for job postings and caregiver applications.

use async_trait::async_trait;

use crate::domain::{Job, JobApplication, JobApplicationDraft, JobDraft, JobId, UserId};

use super::StoreError;

/// Persistence primitives over the jobs table.
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Post a new job for an existing member.
    async fn create(&self, draft: &JobDraft) -> Result<Job, StoreError>;

    /// Fetch a job by identifier.
    async fn get(&self, id: JobId) -> Result<Job, StoreError>;

    /// Replace every writable field of an existing job.
    async fn update(&self, id: JobId, draft: &JobDraft) -> Result<Job, StoreError>;

    /// Delete a job, cascading to its applications.
    async fn delete(&self, id: JobId) -> Result<(), StoreError>;

    /// List all jobs ordered by identifier.
    async fn list(&self) -> Result<Vec<Job>, StoreError>;
}

/// Persistence primitives over the job_applications table.
///
/// The (caregiver, job) pair is the key; a second application by the same
/// caregiver to the same job surfaces [`StoreError::Conflict`].
#[async_trait]
pub trait JobApplicationRepository: Send + Sync {
    /// File an application for an existing caregiver/job pair.
    async fn create(&self, draft: &JobApplicationDraft) -> Result<JobApplication, StoreError>;

    /// Fetch an application by its composite key.
    async fn get(
        &self,
        caregiver_user_id: UserId,
        job_id: JobId,
    ) -> Result<JobApplication, StoreError>;

    /// Replace the writable fields of an existing application.
    async fn update(
        &self,
        caregiver_user_id: UserId,
        job_id: JobId,
        draft: &JobApplicationDraft,
    ) -> Result<JobApplication, StoreError>;

    /// Withdraw an application.
    async fn delete(&self, caregiver_user_id: UserId, job_id: JobId) -> Result<(), StoreError>;

    /// List all applications ordered by (job, caregiver).
    async fn list(&self) -> Result<Vec<JobApplication>, StoreError>;
}
