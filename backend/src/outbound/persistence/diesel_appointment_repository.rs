//! PostgreSQL-backed `AppointmentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppointmentRepository, StoreError};
use crate::domain::{Appointment, AppointmentDraft, AppointmentId, AppointmentStatus, UserId};

use super::diesel_error::{expect_affected, map_diesel_error, map_pool_error, parse_stored};
use super::models::{AppointmentChangeset, AppointmentRow, NewAppointmentRow};
use super::pool::DbPool;
use super::schema::appointments;

const ENTITY: &str = "appointment";

/// Diesel-backed implementation of the appointment repository port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_appointment(row: AppointmentRow) -> Result<Appointment, StoreError> {
    Ok(Appointment {
        id: AppointmentId::new(row.appointment_id),
        caregiver_user_id: UserId::new(row.caregiver_user_id),
        member_user_id: UserId::new(row.member_user_id),
        date: row.appointment_date,
        time: row.appointment_time,
        work_hours: row.work_hours,
        status: parse_stored(&row.status)?,
    })
}

fn status_column(status: Option<AppointmentStatus>) -> Option<&'static str> {
    status.map(AppointmentStatus::as_str)
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AppointmentRow = diesel::insert_into(appointments::table)
            .values(NewAppointmentRow {
                caregiver_user_id: draft.caregiver_user_id.get(),
                member_user_id: draft.member_user_id.get(),
                appointment_date: draft.date,
                appointment_time: draft.time,
                work_hours: draft.work_hours,
                status: status_column(draft.status),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_appointment(row)
    }

    async fn get(&self, id: AppointmentId) -> Result<Appointment, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AppointmentRow = appointments::table
            .find(id.get())
            .select(AppointmentRow::as_select())
            .first(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_appointment(row)
    }

    async fn update(
        &self,
        id: AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: AppointmentRow = diesel::update(appointments::table.find(id.get()))
            .set(AppointmentChangeset {
                caregiver_user_id: draft.caregiver_user_id.get(),
                member_user_id: draft.member_user_id.get(),
                appointment_date: draft.date,
                appointment_time: draft.time,
                work_hours: draft.work_hours,
                status: status_column(draft.status),
            })
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        row_to_appointment(row)
    }

    async fn delete(&self, id: AppointmentId) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(appointments::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        expect_affected(ENTITY, deleted)
    }

    async fn list(&self) -> Result<Vec<Appointment>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<AppointmentRow> = appointments::table
            .select(AppointmentRow::as_select())
            .order_by(appointments::appointment_id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(ENTITY, err))?;

        rows.into_iter().map(row_to_appointment).collect()
    }
}
