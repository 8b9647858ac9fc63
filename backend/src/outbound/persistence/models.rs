//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations; field order follows the
//! table definitions.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

use super::schema::{
    addresses, appointments, caregivers, job_applications, jobs, members, users,
};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub user_id: i32,
    pub email: String,
    pub given_name: String,
    pub surname: String,
    pub city: String,
    pub phone_number: String,
    pub profile_description: Option<String>,
    pub password: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub given_name: &'a str,
    pub surname: &'a str,
    pub city: &'a str,
    pub phone_number: &'a str,
    pub profile_description: Option<&'a str>,
    pub password: &'a str,
}

/// Full-replacement changeset for user records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserChangeset<'a> {
    pub email: &'a str,
    pub given_name: &'a str,
    pub surname: &'a str,
    pub city: &'a str,
    pub phone_number: &'a str,
    pub profile_description: Option<&'a str>,
    pub password: &'a str,
}

/// Row struct for reading from the caregivers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = caregivers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CaregiverRow {
    pub caregiver_user_id: i32,
    pub photo: Option<String>,
    pub gender: String,
    pub caregiving_type: String,
    pub hourly_rate: BigDecimal,
}

/// Insertable struct for creating new caregiver records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = caregivers)]
pub(crate) struct NewCaregiverRow<'a> {
    pub caregiver_user_id: i32,
    pub photo: Option<&'a str>,
    pub gender: &'a str,
    pub caregiving_type: &'a str,
    pub hourly_rate: &'a BigDecimal,
}

/// Full-replacement changeset for caregiver records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = caregivers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CaregiverChangeset<'a> {
    pub photo: Option<&'a str>,
    pub gender: &'a str,
    pub caregiving_type: &'a str,
    pub hourly_rate: &'a BigDecimal,
}

/// Row struct for reading from the members table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct MemberRow {
    pub member_user_id: i32,
    pub house_rules: Option<String>,
    pub dependent_description: Option<String>,
}

/// Insertable struct for creating new member records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = members)]
pub(crate) struct NewMemberRow<'a> {
    pub member_user_id: i32,
    pub house_rules: Option<&'a str>,
    pub dependent_description: Option<&'a str>,
}

/// Full-replacement changeset for member records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = members)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct MemberChangeset<'a> {
    pub house_rules: Option<&'a str>,
    pub dependent_description: Option<&'a str>,
}

/// Row struct for reading from the addresses table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub member_user_id: i32,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub town: Option<String>,
}

/// Insertable struct for creating new address records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub member_user_id: i32,
    pub house_number: Option<&'a str>,
    pub street: Option<&'a str>,
    pub town: Option<&'a str>,
}

/// Full-replacement changeset for address records.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = addresses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AddressChangeset<'a> {
    pub house_number: Option<&'a str>,
    pub street: Option<&'a str>,
    pub town: Option<&'a str>,
}

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub job_id: i32,
    pub member_user_id: i32,
    pub required_caregiving_type: String,
    pub other_requirements: Option<String>,
    pub date_posted: DateTime<Utc>,
}

/// Insertable struct for creating new job records.
///
/// An absent `date_posted` is omitted from the statement so the column
/// default (`now()`) applies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub member_user_id: i32,
    pub required_caregiving_type: &'a str,
    pub other_requirements: Option<&'a str>,
    pub date_posted: Option<DateTime<Utc>>,
}

/// Full-replacement changeset for job records.
///
/// `other_requirements` is a nullable column and is always written;
/// `date_posted` is skipped when absent.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
pub(crate) struct JobChangeset<'a> {
    pub member_user_id: i32,
    pub required_caregiving_type: &'a str,
    #[diesel(treat_none_as_null = true)]
    pub other_requirements: Option<&'a str>,
    pub date_posted: Option<DateTime<Utc>>,
}

/// Row struct for reading from the job_applications table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = job_applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobApplicationRow {
    pub caregiver_user_id: i32,
    pub job_id: i32,
    pub date_applied: DateTime<Utc>,
}

/// Insertable struct for filing new applications.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_applications)]
pub(crate) struct NewJobApplicationRow {
    pub caregiver_user_id: i32,
    pub job_id: i32,
    pub date_applied: Option<DateTime<Utc>>,
}

/// Row struct for reading from the appointments table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = appointments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AppointmentRow {
    pub appointment_id: i32,
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub work_hours: i32,
    pub status: String,
}

/// Insertable struct for creating new appointment records.
///
/// An absent `status` is omitted so the column default (`pending`) applies.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = appointments)]
pub(crate) struct NewAppointmentRow<'a> {
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub work_hours: i32,
    pub status: Option<&'a str>,
}

/// Full-replacement changeset for appointment records.
///
/// `status` is skipped when absent; every column here is NOT NULL.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = appointments)]
pub(crate) struct AppointmentChangeset<'a> {
    pub caregiver_user_id: i32,
    pub member_user_id: i32,
    pub appointment_date: NaiveDate,
    pub appointment_time: NaiveTime,
    pub work_hours: i32,
    pub status: Option<&'a str>,
}
