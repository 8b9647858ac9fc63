//! PostgreSQL-backed `CaregiverRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CaregiverRepository, StoreError};
use crate::domain::{CaregiverDraft, CaregiverProfile, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error, parse_stored};
use super::models::{CaregiverChangeset, CaregiverRow, NewCaregiverRow};
use super::pool::DbPool;
use super::schema::caregivers;

const ENTITY: &str = "caregiver";

/// Diesel-backed implementation of the caregiver repository port.
#[derive(Clone)]
pub struct DieselCaregiverRepository {
    pool: DbPool,
}

impl DieselCaregiverRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_profile(row: CaregiverRow) -> Result<CaregiverProfile, StoreError> {
    Ok(CaregiverProfile {
        user_id: UserId::new(row.caregiver_user_id),
        photo: row.photo,
        gender: parse_stored(&row.gender)?,
        caregiving_type: parse_stored(&row.caregiving_type)?,
        hourly_rate: row.hourly_rate,
    })
}

fn changeset(draft: &CaregiverDraft) -> CaregiverChangeset<'_> {
    CaregiverChangeset {
        photo: draft.photo.as_deref(),
        gender: draft.gender.as_str(),
        caregiving_type: draft.caregiving_type.as_str(),
        hourly_rate: &draft.hourly_rate,
    }
}

#[async_trait]
impl CaregiverRepository for DieselCaregiverRepository {
    async fn create(
        &self,
        user_id: UserId,
        draft: &CaregiverDraft,
    ) -> Result<CaregiverProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CaregiverRow = diesel::insert_into(caregivers::table)
            .values(NewCaregiverRow {
                caregiver_user_id: user_id.get(),
                photo: draft.photo.as_deref(),
                gender: draft.gender.as_str(),
                caregiving_type: draft.caregiving_type.as_str(),
                hourly_rate: &draft.hourly_rate,
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_profile(row)
    }

    async fn get(&self, user_id: UserId) -> Result<CaregiverProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CaregiverRow = caregivers::table
            .find(user_id.get())
            .select(CaregiverRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_profile(row)
    }

    async fn update(
        &self,
        user_id: UserId,
        draft: &CaregiverDraft,
    ) -> Result<CaregiverProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: CaregiverRow = diesel::update(caregivers::table.find(user_id.get()))
            .set(changeset(draft))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_profile(row)
    }

    async fn delete(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(caregivers::table.find(user_id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<CaregiverProfile>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CaregiverRow> = caregivers::table
            .select(CaregiverRow::as_select())
            .order_by(caregivers::caregiver_user_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        rows.into_iter().map(row_to_profile).collect()
    }
}
