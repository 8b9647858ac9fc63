//! Run the fixed analytical report batch against the configured database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;
use std::sync::Arc;

use backend::domain::report_batch::{ReportBatch, ReportBatchRequest, ReportSink};
use backend::outbound::persistence::{
    DbPool, DieselReportCatalog, PoolConfig, run_pending_migrations,
};
use clap::Parser;
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `run-reports` command arguments.
///
/// Every filter literal defaults to the value the batch has historically
/// run with; override them to retarget individual operations.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "run-reports",
    about = "Run the analytical report batch over the caregiver marketplace schema",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// Skip applying pending migrations before the batch.
    #[arg(long = "skip-migrations")]
    skip_migrations: bool,
    /// Given name of the user whose phone number is updated.
    #[arg(long, value_name = "name")]
    phone_given_name: Option<String>,
    /// Surname of the user whose phone number is updated.
    #[arg(long, value_name = "name")]
    phone_surname: Option<String>,
    /// Replacement phone number.
    #[arg(long, value_name = "number")]
    new_phone_number: Option<String>,
    /// Given name of the member whose jobs are purged.
    #[arg(long, value_name = "name")]
    purge_jobs_given_name: Option<String>,
    /// Surname of the member whose jobs are purged.
    #[arg(long, value_name = "name")]
    purge_jobs_surname: Option<String>,
    /// Street whose members are purged.
    #[arg(long, value_name = "street")]
    purge_street: Option<String>,
    /// Phrase searched in job requirements, case-insensitively.
    #[arg(long, value_name = "phrase")]
    requirements_phrase: Option<String>,
    /// City filter of the elderly-care member report.
    #[arg(long, value_name = "city")]
    member_city: Option<String>,
    /// Phrase searched in member house rules, case-insensitively.
    #[arg(long, value_name = "phrase")]
    house_rules_phrase: Option<String>,
}

impl CliArgs {
    fn into_request(self) -> ReportBatchRequest {
        let mut request = ReportBatchRequest::default();
        if let Some(value) = self.phone_given_name {
            request.phone_given_name = value;
        }
        if let Some(value) = self.phone_surname {
            request.phone_surname = value;
        }
        if let Some(value) = self.new_phone_number {
            request.new_phone_number = value;
        }
        if let Some(value) = self.purge_jobs_given_name {
            request.purge_jobs_given_name = value;
        }
        if let Some(value) = self.purge_jobs_surname {
            request.purge_jobs_surname = value;
        }
        if let Some(value) = self.purge_street {
            request.purge_street = value;
        }
        if let Some(value) = self.requirements_phrase {
            request.requirements_phrase = value;
        }
        if let Some(value) = self.member_city {
            request.member_city = value;
        }
        if let Some(value) = self.house_rules_phrase {
            request.house_rules_phrase = value;
        }
        request
    }
}

/// Sink that prints each rendered report line to stdout.
struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&self, line: &str) {
        println!("{line}");
    }
}

fn main() -> io::Result<()> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url.clone())?;

    if !args.skip_migrations {
        run_pending_migrations(&database_url)
            .map_err(|error| io::Error::other(format!("apply migrations: {error}")))?;
    }

    // The pool lives for exactly one batch; dropping it at the end of this
    // scope releases the session regardless of outcome.
    let pool = DbPool::new(PoolConfig::new(&database_url))
        .await
        .map_err(|error| io::Error::other(format!("create database pool: {error}")))?;

    let catalog = Arc::new(DieselReportCatalog::new(pool));
    let batch = ReportBatch::new(catalog, Arc::new(StdoutSink));

    batch
        .run(&args.into_request())
        .await
        .map_err(|error| io::Error::other(format!("report batch failed: {error}")))
}

fn resolve_database_url(arg: Option<String>) -> io::Result<String> {
    if let Some(url) = arg {
        return Ok(url);
    }
    env::var("DATABASE_URL")
        .map_err(|_| io::Error::other("pass --database-url or set DATABASE_URL"))
}
