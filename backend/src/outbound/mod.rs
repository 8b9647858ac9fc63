//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! The only infrastructure this data layer drives is PostgreSQL; adapters
//! are thin translators between domain types and Diesel representations
//! and contain no business logic.

pub mod persistence;
