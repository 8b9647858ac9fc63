//! Member profile and home address: the care-requesting side of a user.

use serde::{Deserialize, Serialize};

use super::user::UserId;

/// A stored member profile, keyed by the backing user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Key shared with the backing user record.
    pub user_id: UserId,
    /// Optional rules applying at the member's home.
    pub house_rules: Option<String>,
    /// Optional description of the person needing care.
    pub dependent_description: Option<String>,
}

/// Writable member fields for create and full-replacement update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub house_rules: Option<String>,
    pub dependent_description: Option<String>,
}

/// A member's home address. At most one per member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Key shared with the owning member profile.
    pub member_user_id: UserId,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub town: Option<String>,
}

/// Writable address fields for create and full-replacement update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub town: Option<String>,
}
