//! Port for scheduled appointment persistence.

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentDraft, AppointmentId};

use super::StoreError;

/// Persistence primitives over the appointments table.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// Schedule an appointment between an existing caregiver and member.
    async fn create(&self, draft: &AppointmentDraft) -> Result<Appointment, StoreError>;

    /// Fetch an appointment by identifier.
    async fn get(&self, id: AppointmentId) -> Result<Appointment, StoreError>;

    /// Replace every writable field of an existing appointment.
    async fn update(
        &self,
        id: AppointmentId,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError>;

    /// Delete an appointment.
    async fn delete(&self, id: AppointmentId) -> Result<(), StoreError>;

    /// List all appointments ordered by identifier.
    async fn list(&self) -> Result<Vec<Appointment>, StoreError>;
}
