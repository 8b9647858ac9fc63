//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{JobRepository, StoreError};
use crate::domain::{Job, JobDraft, JobId, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error, parse_stored};
use super::models::{JobChangeset, JobRow, NewJobRow};
use super::pool::DbPool;
use super::schema::jobs;

const ENTITY: &str = "job";

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_job(row: JobRow) -> Result<Job, StoreError> {
    Ok(Job {
        id: JobId::new(row.job_id),
        member_user_id: UserId::new(row.member_user_id),
        required_caregiving_type: parse_stored(&row.required_caregiving_type)?,
        other_requirements: row.other_requirements,
        date_posted: row.date_posted,
    })
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create(&self, draft: &JobDraft) -> Result<Job, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobRow = diesel::insert_into(jobs::table)
            .values(NewJobRow {
                member_user_id: draft.member_user_id.get(),
                required_caregiving_type: draft.required_caregiving_type.as_str(),
                other_requirements: draft.other_requirements.as_deref(),
                date_posted: draft.date_posted,
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_job(row)
    }

    async fn get(&self, id: JobId) -> Result<Job, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobRow = jobs::table
            .find(id.get())
            .select(JobRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_job(row)
    }

    async fn update(&self, id: JobId, draft: &JobDraft) -> Result<Job, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: JobRow = diesel::update(jobs::table.find(id.get()))
            .set(JobChangeset {
                member_user_id: draft.member_user_id.get(),
                required_caregiving_type: draft.required_caregiving_type.as_str(),
                other_requirements: draft.other_requirements.as_deref(),
                date_posted: draft.date_posted,
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_job(row)
    }

    async fn delete(&self, id: JobId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(jobs::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<Job>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<JobRow> = jobs::table
            .select(JobRow::as_select())
            .order_by(jobs::job_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        rows.into_iter().map(row_to_job).collect()
    }
}
