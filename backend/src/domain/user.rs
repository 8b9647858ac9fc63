//! Core user identity shared by caregiver and member profiles.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fields::{MissingFieldError, require_present};

/// Integer key of a row in the users table.
///
/// Caregiver and member profiles reuse this identifier as their own key,
/// so one id addresses the user and either of its optional specialisations.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Unwrap to the raw database identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Primary key.
    pub id: UserId,
    /// Unique contact email.
    pub email: String,
    /// First name.
    pub given_name: String,
    /// Family name.
    pub surname: String,
    /// City of residence.
    pub city: String,
    /// Unique contact phone number.
    pub phone_number: String,
    /// Optional free-form self description.
    pub profile_description: Option<String>,
    /// Stored credential; opaque to this layer.
    pub password: String,
}

/// Writable user fields for create and full-replacement update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub city: String,
    pub phone_number: String,
    pub profile_description: Option<String>,
    pub password: String,
}

impl UserDraft {
    /// Check that every required field carries a value.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFieldError`] for the first blank required field.
    pub fn validate(&self) -> Result<(), MissingFieldError> {
        require_present("email", &self.email)?;
        require_present("given_name", &self.given_name)?;
        require_present("surname", &self.surname)?;
        require_present("city", &self.city)?;
        require_present("phone_number", &self.phone_number)?;
        require_present("password", &self.password)
    }
}
