//! Port for the fixed catalog of analytical operations.
//!
//! Each method maps to exactly one SQL statement. Literal values the
//! operations filter on (names, street, search phrases, city, the new phone
//! number) arrive as parameters and are bound, never interpolated; the
//! numeric constants of the rate adjustment are fixed in the adapter.

use async_trait::async_trait;
use bigdecimal::BigDecimal;

use crate::domain::{AppointmentId, JobId, UserId};

use super::StoreError;

/// Parties of a confirmed appointment, resolved to user names on both
/// sides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmedAppointmentParties {
    pub appointment_id: AppointmentId,
    pub caregiver_given_name: String,
    pub caregiver_surname: String,
    pub member_given_name: String,
    pub member_surname: String,
}

/// Appointment id with its booked hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppointmentWorkHours {
    pub appointment_id: AppointmentId,
    pub work_hours: i32,
}

/// A member surfaced by name only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberName {
    pub given_name: String,
    pub surname: String,
}

/// Application tally for one job; zero when nobody applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobApplicantCount {
    pub job_id: JobId,
    pub applicants: i64,
}

/// Confirmed hours total for one caregiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverHoursTotal {
    pub given_name: String,
    pub surname: String,
    pub total_hours: i64,
}

/// Average pay per confirmed appointment for one caregiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverPayAverage {
    pub given_name: String,
    pub surname: String,
    pub average_pay: BigDecimal,
}

/// Summed pay across confirmed appointments for one caregiver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaregiverPayTotal {
    pub given_name: String,
    pub surname: String,
    pub total_pay: BigDecimal,
}

/// One row of the persisted job applications view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobApplicationViewRow {
    pub job_id: JobId,
    pub other_requirements: Option<String>,
    pub caregiver_user_id: UserId,
    pub caregiver_name: String,
    pub caregiver_surname: String,
}

/// The fixed catalog of analytical statements.
///
/// Mutations report their affected-row count; zero matches is a no-op, not
/// an error. Every method commits (or reads) independently — there is no
/// transaction spanning catalog calls.
#[async_trait]
pub trait ReportCatalog: Send + Sync {
    /// Set the phone number of the user matching the exact name pair.
    async fn update_phone_number(
        &self,
        given_name: &str,
        surname: &str,
        phone_number: &str,
    ) -> Result<usize, StoreError>;

    /// Bulk-adjust every caregiver's rate in one conditional statement:
    /// rates under 10 gain 0.3, the rest are raised by 10%.
    async fn adjust_hourly_rates(&self) -> Result<usize, StoreError>;

    /// Delete all jobs posted by members whose user matches the exact name
    /// pair; cascades to the jobs' applications.
    async fn delete_jobs_posted_by(
        &self,
        given_name: &str,
        surname: &str,
    ) -> Result<usize, StoreError>;

    /// Delete all members whose address is on the given street; cascades to
    /// their addresses, jobs, and appointments.
    async fn delete_members_on_street(&self, street: &str) -> Result<usize, StoreError>;

    /// Names of both parties for every confirmed appointment.
    async fn confirmed_appointment_parties(
        &self,
    ) -> Result<Vec<ConfirmedAppointmentParties>, StoreError>;

    /// Ids of jobs whose requirements contain the phrase,
    /// case-insensitively.
    async fn jobs_requiring(&self, phrase: &str) -> Result<Vec<JobId>, StoreError>;

    /// Booked hours of appointments held by babysitters.
    async fn babysitting_work_hours(&self) -> Result<Vec<AppointmentWorkHours>, StoreError>;

    /// Distinct names of members in the given city who posted an
    /// elderly-care job and whose house rules contain the phrase,
    /// case-insensitively.
    async fn members_seeking_elderly_care(
        &self,
        city: &str,
        house_rules_phrase: &str,
    ) -> Result<Vec<MemberName>, StoreError>;

    /// Application count per job, including jobs nobody applied to.
    async fn applicants_per_job(&self) -> Result<Vec<JobApplicantCount>, StoreError>;

    /// Total confirmed hours per caregiver, ordered by surname then given
    /// name.
    async fn confirmed_hours_per_caregiver(
        &self,
    ) -> Result<Vec<CaregiverHoursTotal>, StoreError>;

    /// Average of rate × hours over confirmed appointments per caregiver.
    async fn average_pay_per_caregiver(&self)
    -> Result<Vec<CaregiverPayAverage>, StoreError>;

    /// Caregivers whose summed confirmed pay exceeds the average of all
    /// caregivers' summed pay, highest earners first.
    async fn caregivers_paid_above_average(
        &self,
    ) -> Result<Vec<CaregiverPayTotal>, StoreError>;

    /// Summed rate × hours over confirmed appointments per caregiver.
    async fn total_cost_per_caregiver(&self) -> Result<Vec<CaregiverPayTotal>, StoreError>;

    /// Create or replace the persisted view over applications, jobs,
    /// caregivers, and their user names.
    async fn rebuild_job_applications_view(&self) -> Result<(), StoreError>;

    /// Read every view row ordered by (job, caregiver).
    async fn job_applications_view(&self) -> Result<Vec<JobApplicationViewRow>, StoreError>;
}
