//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports and the report
//! catalog, backed by PostgreSQL via Diesel with async support through
//! `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) are implementation details, never exposed to the domain.
//! - **Strongly typed errors**: every engine failure is mapped onto the
//!   domain [`StoreError`](crate::domain::ports::StoreError) taxonomy.

pub(crate) mod diesel_error;

mod diesel_address_repository;
mod diesel_appointment_repository;
mod diesel_caregiver_repository;
mod diesel_job_application_repository;
mod diesel_job_repository;
mod diesel_member_repository;
mod diesel_report_catalog;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_caregiver_repository::DieselCaregiverRepository;
pub use diesel_job_application_repository::DieselJobApplicationRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_member_repository::DieselMemberRepository;
pub use diesel_report_catalog::DieselReportCatalog;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
