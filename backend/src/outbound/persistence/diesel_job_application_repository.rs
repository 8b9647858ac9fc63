//! PostgreSQL-backed `JobApplicationRepository` implementation.
//!
//! The table carries a composite key, so lookups address rows by the
//! (caregiver, job) pair and a repeat insert for the same pair surfaces the
//! uniqueness conflict from the primary key itself.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobApplicationRepository, StoreError};
use crate::domain::{JobApplication, JobApplicationDraft, JobId, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error};
use super::models::{JobApplicationRow, NewJobApplicationRow};
use super::pool::DbPool;
use super::schema::job_applications;

const ENTITY: &str = "job application";

/// Diesel-backed implementation of the job application repository port.
#[derive(Clone)]
pub struct DieselJobApplicationRepository {
    pool: DbPool,
}

impl DieselJobApplicationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_application(row: JobApplicationRow) -> JobApplication {
    JobApplication {
        caregiver_user_id: UserId::new(row.caregiver_user_id),
        job_id: JobId::new(row.job_id),
        date_applied: row.date_applied,
    }
}

#[async_trait]
impl JobApplicationRepository for DieselJobApplicationRepository {
    async fn create(&self, draft: &JobApplicationDraft) -> Result<JobApplication, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobApplicationRow = diesel::insert_into(job_applications::table)
            .values(NewJobApplicationRow {
                caregiver_user_id: draft.caregiver_user_id.get(),
                job_id: draft.job_id.get(),
                date_applied: draft.date_applied,
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_application(row))
    }

    async fn get(
        &self,
        caregiver_user_id: UserId,
        job_id: JobId,
    ) -> Result<JobApplication, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobApplicationRow = job_applications::table
            .find((caregiver_user_id.get(), job_id.get()))
            .select(JobApplicationRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_application(row))
    }

    async fn update(
        &self,
        caregiver_user_id: UserId,
        job_id: JobId,
        draft: &JobApplicationDraft,
    ) -> Result<JobApplication, StoreError> {
        // The filing date is the only writable column; without one the
        // update degenerates to a keyed read.
        let Some(date_applied) = draft.date_applied else {
            return self.get(caregiver_user_id, job_id).await;
        };

        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobApplicationRow = diesel::update(
            job_applications::table.find((caregiver_user_id.get(), job_id.get())),
        )
        .set(job_applications::date_applied.eq(date_applied))
        .get_result(&mut conn)
        .await
        .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_application(row))
    }

    async fn delete(&self, caregiver_user_id: UserId, job_id: JobId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            job_applications::table.find((caregiver_user_id.get(), job_id.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<JobApplication>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobApplicationRow> = job_applications::table
            .select(JobApplicationRow::as_select())
            .order_by((
                job_applications::job_id.asc(),
                job_applications::caregiver_user_id.asc(),
            ))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(rows.into_iter().map(row_to_application).collect())
    }
}
