//! Caregiver-marketplace record store.
//!
//! Domain entities and ports for users, caregiver/member profiles,
//! addresses, jobs, applications, and appointments; Diesel-backed
//! PostgreSQL adapters; and the fixed analytical report batch the
//! `run-reports` binary executes.
//!
//! The CRUD web surface is a separate collaborator: it consumes the
//! repository ports in [`domain::ports`] and never touches the analytics
//! side.

pub mod domain;
pub mod outbound;
