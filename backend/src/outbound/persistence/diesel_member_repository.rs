//! PostgreSQL-backed `MemberRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{MemberRepository, StoreError};
use crate::domain::{MemberDraft, MemberProfile, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error};
use super::models::{MemberChangeset, MemberRow, NewMemberRow};
use super::pool::DbPool;
use super::schema::members;

const ENTITY: &str = "member";

/// Diesel-backed implementation of the member repository port.
#[derive(Clone)]
pub struct DieselMemberRepository {
    pool: DbPool,
}

impl DieselMemberRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_profile(row: MemberRow) -> MemberProfile {
    MemberProfile {
        user_id: UserId::new(row.member_user_id),
        house_rules: row.house_rules,
        dependent_description: row.dependent_description,
    }
}

#[async_trait]
impl MemberRepository for DieselMemberRepository {
    async fn create(
        &self,
        user_id: UserId,
        draft: &MemberDraft,
    ) -> Result<MemberProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: MemberRow = diesel::insert_into(members::table)
            .values(NewMemberRow {
                member_user_id: user_id.get(),
                house_rules: draft.house_rules.as_deref(),
                dependent_description: draft.dependent_description.as_deref(),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_profile(row))
    }

    async fn get(&self, user_id: UserId) -> Result<MemberProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: MemberRow = members::table
            .find(user_id.get())
            .select(MemberRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_profile(row))
    }

    async fn update(
        &self,
        user_id: UserId,
        draft: &MemberDraft,
    ) -> Result<MemberProfile, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: MemberRow = diesel::update(members::table.find(user_id.get()))
            .set(MemberChangeset {
                house_rules: draft.house_rules.as_deref(),
                dependent_description: draft.dependent_description.as_deref(),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_profile(row))
    }

    async fn delete(&self, user_id: UserId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(members::table.find(user_id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<MemberProfile>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<MemberRow> = members::table
            .select(MemberRow::as_select())
            .order_by(members::member_user_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(rows.into_iter().map(row_to_profile).collect())
    }
}
