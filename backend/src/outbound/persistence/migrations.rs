//! Embedded schema migrations.

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use crate::domain::ports::StoreError;

/// All migrations bundled into the binary at compile time.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Apply any pending migrations over a short-lived synchronous connection.
///
/// Migrations run once before the async pool spins up, so a plain blocking
/// connection keeps the harness simple.
///
/// # Errors
///
/// Returns [`StoreError::Connection`] when the database is unreachable and
/// [`StoreError::Query`] when a migration fails to apply.
pub fn run_pending_migrations(database_url: &str) -> Result<(), StoreError> {
    let mut conn = PgConnection::establish(database_url)
        .map_err(|err| StoreError::connection(err.to_string()))?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|err| StoreError::query(err.to_string()))?;

    Ok(())
}
