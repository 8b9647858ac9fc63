//! Scheduled engagements between a caregiver and a member.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::fields::ClosedSetError;
use super::user::UserId;

/// Integer key of a row in the appointments table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct AppointmentId(i32);

impl AppointmentId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Unwrap to the raw database identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for AppointmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Appointment lifecycle status, restricted to the stored closed set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Awaiting a decision; the stored default.
    #[default]
    Pending,
    Confirmed,
    Declined,
}

impl AppointmentStatus {
    /// Allowed values, as rendered in validation errors.
    pub const ALLOWED: &'static str = "pending, confirmed, declined";

    /// The stored column value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Declined => "declined",
        }
    }
}

impl FromStr for AppointmentStatus {
    type Err = ClosedSetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "declined" => Ok(Self::Declined),
            other => Err(ClosedSetError {
                field: "status",
                allowed: Self::ALLOWED,
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Primary key.
    pub id: AppointmentId,
    pub caregiver_user_id: UserId,
    pub member_user_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    /// Engagement length in whole hours.
    pub work_hours: i32,
    pub status: AppointmentStatus,
}

/// Writable appointment fields for create and full-replacement update.
///
/// An absent `status` defers to the database default (`pending`) on create
/// and leaves the stored value untouched on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppointmentDraft {
    pub caregiver_user_id: UserId,
    pub member_user_id: UserId,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub work_hours: i32,
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("pending", AppointmentStatus::Pending)]
    #[case("confirmed", AppointmentStatus::Confirmed)]
    #[case("declined", AppointmentStatus::Declined)]
    fn status_parses_stored_values(#[case] raw: &str, #[case] expected: AppointmentStatus) {
        assert_eq!(raw.parse::<AppointmentStatus>().expect("stored value"), expected);
        assert_eq!(expected.as_str(), raw);
    }

    #[rstest]
    #[case("cancelled")]
    #[case("Confirmed")]
    fn status_rejects_values_outside_set(#[case] raw: &str) {
        let err = raw.parse::<AppointmentStatus>().expect_err("must be rejected");
        assert_eq!(err.field, "status");
        assert_eq!(err.allowed, AppointmentStatus::ALLOWED);
    }

    #[rstest]
    fn status_defaults_to_pending() {
        assert_eq!(AppointmentStatus::default(), AppointmentStatus::Pending);
    }
}
