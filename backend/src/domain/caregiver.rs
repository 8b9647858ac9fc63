//! Caregiver profile: the service-offering specialisation of a user.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use super::fields::ClosedSetError;
use super::user::UserId;

/// Caregiver gender, restricted to the stored closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Allowed values, as rendered in validation errors.
    pub const ALLOWED: &'static str = "male, female";

    /// The stored column value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = ClosedSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            other => Err(ClosedSetError {
                field: "gender",
                allowed: Self::ALLOWED,
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of care a caregiver offers and a job demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaregivingType {
    Babysitter,
    ElderlyCaregiver,
    Playmate,
}

impl CaregivingType {
    /// Allowed values, as rendered in validation errors.
    pub const ALLOWED: &'static str = "babysitter, elderly_caregiver, playmate";

    /// The stored column value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Babysitter => "babysitter",
            Self::ElderlyCaregiver => "elderly_caregiver",
            Self::Playmate => "playmate",
        }
    }
}

impl FromStr for CaregivingType {
    type Err = ClosedSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "babysitter" => Ok(Self::Babysitter),
            "elderly_caregiver" => Ok(Self::ElderlyCaregiver),
            "playmate" => Ok(Self::Playmate),
            other => Err(ClosedSetError {
                field: "caregiving_type",
                allowed: Self::ALLOWED,
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for CaregivingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored caregiver profile, keyed by the backing user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaregiverProfile {
    /// Key shared with the backing user record.
    pub user_id: UserId,
    /// Optional photo reference.
    pub photo: Option<String>,
    pub gender: Gender,
    pub caregiving_type: CaregivingType,
    /// Offered rate with two decimal places.
    pub hourly_rate: BigDecimal,
}

/// Writable caregiver fields for create and full-replacement update.
///
/// The key is supplied separately: a profile is always created for an
/// existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverDraft {
    pub photo: Option<String>,
    pub gender: Gender,
    pub caregiving_type: CaregivingType,
    pub hourly_rate: BigDecimal,
}
