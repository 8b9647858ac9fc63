//! Care requests posted by members and caregiver applications to them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::caregiver::CaregivingType;
use super::user::UserId;

/// Integer key of a row in the jobs table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct JobId(i32);

impl JobId {
    /// Wrap a raw database identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Unwrap to the raw database identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored care request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Primary key.
    pub id: JobId,
    /// The posting member.
    pub member_user_id: UserId,
    /// Kind of caregiver the job demands.
    pub required_caregiving_type: CaregivingType,
    /// Optional free-form requirements.
    pub other_requirements: Option<String>,
    /// When the job was posted.
    pub date_posted: DateTime<Utc>,
}

/// Writable job fields for create and full-replacement update.
///
/// An absent `date_posted` defers to the database default (`now()`) on
/// create and leaves the stored value untouched on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub member_user_id: UserId,
    pub required_caregiving_type: CaregivingType,
    pub other_requirements: Option<String>,
    pub date_posted: Option<DateTime<Utc>>,
}

/// A caregiver's expression of interest in a job.
///
/// The (caregiver, job) pair is the key; a caregiver applies to a given job
/// at most once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobApplication {
    pub caregiver_user_id: UserId,
    pub job_id: JobId,
    /// When the application was filed.
    pub date_applied: DateTime<Utc>,
}

/// Writable application fields for create and full-replacement update.
///
/// An absent `date_applied` defers to the database default (`now()`) on
/// create and leaves the stored value untouched on update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplicationDraft {
    pub caregiver_user_id: UserId,
    pub job_id: JobId,
    pub date_applied: Option<DateTime<Utc>>,
}
