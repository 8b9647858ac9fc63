//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters.
//! Each trait surfaces the shared [`StoreError`] taxonomy so adapters map
//! engine failures into predictable variants instead of opaque strings.

mod store_error;

mod appointment_repository;
mod job_repositories;
mod profile_repositories;
mod report_catalog;
mod user_repository;

pub use appointment_repository::AppointmentRepository;
pub use job_repositories::{JobApplicationRepository, JobRepository};
pub use profile_repositories::{AddressRepository, CaregiverRepository, MemberRepository};
pub use report_catalog::{
    AppointmentWorkHours, CaregiverHoursTotal, CaregiverPayAverage, CaregiverPayTotal,
    ConfirmedAppointmentParties, JobApplicantCount, JobApplicationViewRow, MemberName,
    ReportCatalog,
};
pub use store_error::StoreError;
pub use user_repository::UserRepository;
