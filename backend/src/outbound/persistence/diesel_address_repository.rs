//! PostgreSQL-backed `AddressRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AddressRepository, StoreError};
use crate::domain::{Address, AddressDraft, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error};
use super::models::{AddressChangeset, AddressRow, NewAddressRow};
use super::pool::DbPool;
use super::schema::addresses;

const ENTITY: &str = "address";

/// Diesel-backed implementation of the address repository port.
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_address(row: AddressRow) -> Address {
    Address {
        member_user_id: UserId::new(row.member_user_id),
        house_number: row.house_number,
        street: row.street,
        town: row.town,
    }
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn create(
        &self,
        member_user_id: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AddressRow = diesel::insert_into(addresses::table)
            .values(NewAddressRow {
                member_user_id: member_user_id.get(),
                house_number: draft.house_number.as_deref(),
                street: draft.street.as_deref(),
                town: draft.town.as_deref(),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_address(row))
    }

    async fn get(&self, member_user_id: UserId) -> Result<Address, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AddressRow = addresses::table
            .find(member_user_id.get())
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_address(row))
    }

    async fn update(
        &self,
        member_user_id: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AddressRow = diesel::update(addresses::table.find(member_user_id.get()))
            .set(AddressChangeset {
                house_number: draft.house_number.as_deref(),
                street: draft.street.as_deref(),
                town: draft.town.as_deref(),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(row_to_address(row))
    }

    async fn delete(&self, member_user_id: UserId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(addresses::table.find(member_user_id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<Address>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AddressRow> = addresses::table
            .select(AddressRow::as_select())
            .order_by(addresses::member_user_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        Ok(rows.into_iter().map(row_to_address).collect())
    }
}
