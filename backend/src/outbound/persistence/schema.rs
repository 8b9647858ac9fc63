//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are
//! used by Diesel for compile-time query validation and type-safe SQL
//! generation; `diesel print-schema` can regenerate them from a live
//! database when migrations change.

diesel::table! {
    /// Core identity record.
    ///
    /// Caregiver and member profiles specialise a user under the same id,
    /// so this table anchors every cascade chain.
    users (user_id) {
        /// Primary key, database-assigned.
        user_id -> Int4,
        /// Unique contact email.
        #[max_length = 255]
        email -> Varchar,
        #[max_length = 100]
        given_name -> Varchar,
        #[max_length = 100]
        surname -> Varchar,
        #[max_length = 100]
        city -> Varchar,
        /// Unique contact phone number.
        #[max_length = 30]
        phone_number -> Varchar,
        profile_description -> Nullable<Text>,
        #[max_length = 255]
        password -> Varchar,
    }
}

diesel::table! {
    /// Care-offering specialisation, keyed by the backing user.
    caregivers (caregiver_user_id) {
        caregiver_user_id -> Int4,
        photo -> Nullable<Text>,
        #[max_length = 10]
        gender -> Varchar,
        #[max_length = 20]
        caregiving_type -> Varchar,
        hourly_rate -> Numeric,
    }
}

diesel::table! {
    /// Care-requesting specialisation, keyed by the backing user.
    members (member_user_id) {
        member_user_id -> Int4,
        house_rules -> Nullable<Text>,
        dependent_description -> Nullable<Text>,
    }
}

diesel::table! {
    /// At most one home address per member.
    addresses (member_user_id) {
        member_user_id -> Int4,
        #[max_length = 50]
        house_number -> Nullable<Varchar>,
        #[max_length = 255]
        street -> Nullable<Varchar>,
        #[max_length = 100]
        town -> Nullable<Varchar>,
    }
}

diesel::table! {
    /// Care requests posted by members.
    jobs (job_id) {
        job_id -> Int4,
        member_user_id -> Int4,
        #[max_length = 20]
        required_caregiving_type -> Varchar,
        other_requirements -> Nullable<Text>,
        date_posted -> Timestamptz,
    }
}

diesel::table! {
    /// Caregiver interest in a job; one row per (caregiver, job) pair.
    job_applications (caregiver_user_id, job_id) {
        caregiver_user_id -> Int4,
        job_id -> Int4,
        date_applied -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled engagements between a caregiver and a member.
    appointments (appointment_id) {
        appointment_id -> Int4,
        caregiver_user_id -> Int4,
        member_user_id -> Int4,
        appointment_date -> Date,
        appointment_time -> Time,
        work_hours -> Int4,
        #[max_length = 10]
        status -> Varchar,
    }
}

diesel::joinable!(caregivers -> users (caregiver_user_id));
diesel::joinable!(members -> users (member_user_id));
diesel::joinable!(addresses -> members (member_user_id));
diesel::joinable!(jobs -> members (member_user_id));
diesel::joinable!(job_applications -> caregivers (caregiver_user_id));
diesel::joinable!(job_applications -> jobs (job_id));
diesel::joinable!(appointments -> caregivers (caregiver_user_id));
diesel::joinable!(appointments -> members (member_user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    caregivers,
    members,
    addresses,
    jobs,
    job_applications,
    appointments,
);
