//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{StoreError, UserRepository};
use crate::domain::{User, UserDraft, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

const ENTITY: &str = "user";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> User {
    User {
        id: UserId::new(row.user_id),
        email: row.email,
        given_name: row.given_name,
        surname: row.surname,
        city: row.city,
        phone_number: row.phone_number,
        profile_description: row.profile_description,
        password: row.password,
    }
}

fn insert_row(draft: &UserDraft) -> NewUserRow<'_> {
    NewUserRow {
        email: &draft.email,
        given_name: &draft.given_name,
        surname: &draft.surname,
        city: &draft.city,
        phone_number: &draft.phone_number,
        profile_description: draft.profile_description.as_deref(),
        password: &draft.password,
    }
}

fn changeset(draft: &UserDraft) -> UserChangeset<'_> {
    UserChangeset {
        email: &draft.email,
        given_name: &draft.given_name,
        surname: &draft.surname,
        city: &draft.city,
        phone_number: &draft.phone_number,
        profile_description: draft.profile_description.as_deref(),
        password: &draft.password,
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn create(&self, draft: &UserDraft) -> Result<User, StoreError> {
        draft.validate()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::insert_into(users::table)
            .values(insert_row(draft))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_user(row))
    }

    async fn get(&self, id: UserId) -> Result<User, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = users::table
            .find(id.get())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_user(row))
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, StoreError> {
        draft.validate()?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UserRow = diesel::update(users::table.find(id.get()))
            .set(changeset(draft))
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_user(row))
    }

    async fn delete(&self, id: UserId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(users::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order_by(users::user_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(rows.into_iter().map(row_to_user).collect())
    }
}
