//! Ports for the two user specialisations and the member address.

use async_trait::async_trait;

use crate::domain::{
    Address, AddressDraft, CaregiverDraft, CaregiverProfile, MemberDraft, MemberProfile,
    UserId,
};

use super::StoreError;

/// Persistence primitives over the caregivers table.
///
/// Profiles are keyed by the backing user id; creating one for a
/// nonexistent user surfaces [`StoreError::InvalidReference`].
#[async_trait]
pub trait CaregiverRepository: Send + Sync {
    /// Attach a caregiver profile to an existing user.
    async fn create(
        &self,
        user_id: UserId,
        draft: &CaregiverDraft,
    ) -> Result<CaregiverProfile, StoreError>;

    /// Fetch a caregiver profile by its user id.
    async fn get(&self, user_id: UserId) -> Result<CaregiverProfile, StoreError>;

    /// Replace every writable field of an existing profile.
    async fn update(
        &self,
        user_id: UserId,
        draft: &CaregiverDraft,
    ) -> Result<CaregiverProfile, StoreError>;

    /// Delete a caregiver profile, cascading to its applications and
    /// appointments.
    async fn delete(&self, user_id: UserId) -> Result<(), StoreError>;

    /// List all caregiver profiles ordered by user id.
    async fn list(&self) -> Result<Vec<CaregiverProfile>, StoreError>;
}

/// Persistence primitives over the members table.
#[async_trait]
pub trait MemberRepository: Send + Sync {
    /// Attach a member profile to an existing user.
    async fn create(
        &self,
        user_id: UserId,
        draft: &MemberDraft,
    ) -> Result<MemberProfile, StoreError>;

    /// Fetch a member profile by its user id.
    async fn get(&self, user_id: UserId) -> Result<MemberProfile, StoreError>;

    /// Replace every writable field of an existing profile.
    async fn update(
        &self,
        user_id: UserId,
        draft: &MemberDraft,
    ) -> Result<MemberProfile, StoreError>;

    /// Delete a member profile, cascading to its address, jobs, and
    /// appointments.
    async fn delete(&self, user_id: UserId) -> Result<(), StoreError>;

    /// List all member profiles ordered by user id.
    async fn list(&self) -> Result<Vec<MemberProfile>, StoreError>;
}

/// Persistence primitives over the addresses table (at most one row per
/// member).
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Record the address of an existing member.
    async fn create(
        &self,
        member_user_id: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, StoreError>;

    /// Fetch a member's address.
    async fn get(&self, member_user_id: UserId) -> Result<Address, StoreError>;

    /// Replace every field of an existing address.
    async fn update(
        &self,
        member_user_id: UserId,
        draft: &AddressDraft,
    ) -> Result<Address, StoreError>;

    /// Delete a member's address.
    async fn delete(&self, member_user_id: UserId) -> Result<(), StoreError>;

    /// List all addresses ordered by member id.
    async fn list(&self) -> Result<Vec<Address>, StoreError>;
}
