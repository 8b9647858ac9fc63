//! Domain entities, ports, and the analytical report batch.
//!
//! The user is the base identity; caregiver and member profiles are
//! optional 1:1 specialisations composed around the same [`UserId`] rather
//! than modelled as inheritance. Everything the persistence adapters and
//! the excluded CRUD surface exchange crosses this module.

pub mod appointment;
pub mod caregiver;
pub mod fields;
pub mod job;
pub mod member;
pub mod ports;
pub mod report_batch;
pub mod user;

pub use self::appointment::{Appointment, AppointmentDraft, AppointmentId, AppointmentStatus};
pub use self::caregiver::{CaregiverDraft, CaregiverProfile, CaregivingType, Gender};
pub use self::job::{Job, JobApplication, JobApplicationDraft, JobDraft, JobId};
pub use self::member::{Address, AddressDraft, MemberDraft, MemberProfile};
pub use self::user::{User, UserDraft, UserId};
