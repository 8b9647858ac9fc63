//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::{User, UserDraft, UserId};

use super::StoreError;

/// Persistence primitives over the users table.
///
/// Deleting a user cascades to its caregiver/member profile rows and,
/// transitively, to everything those own (address, jobs, applications,
/// appointments). The cascade is enforced at the storage boundary.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user and return the stored record.
    async fn create(&self, draft: &UserDraft) -> Result<User, StoreError>;

    /// Fetch a user by identifier.
    async fn get(&self, id: UserId) -> Result<User, StoreError>;

    /// Replace every writable field of an existing user.
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<User, StoreError>;

    /// Delete a user and everything that depends on it.
    async fn delete(&self, id: UserId) -> Result<(), StoreError>;

    /// List all users ordered by identifier.
    async fn list(&self) -> Result<Vec<User>, StoreError>;
}
