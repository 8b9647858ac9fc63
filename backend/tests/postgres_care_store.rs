//! End-to-end checks against a disposable PostgreSQL database.
//!
//! Every test no-ops unless `TEST_DATABASE_URL` points at a database the
//! suite may freely write to. Tests share that database, so they serialise
//! on a process-wide lock and create their own uniquely tagged rows.

use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveTime};

use backend::domain::ports::{
    AddressRepository, AppointmentRepository, CaregiverRepository, JobApplicationRepository,
    JobRepository, MemberRepository, ReportCatalog, StoreError, UserRepository,
};
use backend::domain::{
    AddressDraft, AppointmentDraft, AppointmentStatus, CaregiverDraft, CaregivingType, Gender,
    JobApplicationDraft, JobDraft, JobId, MemberDraft, UserDraft, UserId,
};
use backend::outbound::persistence::{
    DbPool, DieselAddressRepository, DieselAppointmentRepository, DieselCaregiverRepository,
    DieselJobApplicationRepository, DieselJobRepository, DieselMemberRepository,
    DieselReportCatalog, DieselUserRepository, PoolConfig, run_pending_migrations,
};

static SEQ: AtomicU32 = AtomicU32::new(0);
static DB_LOCK: tokio::sync::Mutex<()> = tokio::sync::Mutex::const_new(());

/// Build a pool against `TEST_DATABASE_URL`, or `None` to skip the test.
async fn connect() -> Option<DbPool> {
    let url = std::env::var("TEST_DATABASE_URL").ok()?;
    run_pending_migrations(&url).expect("apply migrations");
    let pool = DbPool::new(PoolConfig::new(&url))
        .await
        .expect("build pool");
    Some(pool)
}

/// A tag unique across tests, runs, and processes.
fn unique_tag() -> String {
    let seq = SEQ.fetch_add(1, Ordering::Relaxed);
    let micros = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .as_micros();
    format!("{}x{micros}x{seq}", std::process::id())
}

fn user_draft(tag: &str) -> UserDraft {
    UserDraft {
        email: format!("user{tag}@example.kz"),
        given_name: format!("Given{tag}"),
        surname: format!("Surname{tag}"),
        city: "Astana".to_owned(),
        phone_number: format!("+{}", tag.replace('x', "")),
        profile_description: None,
        password: "secret".to_owned(),
    }
}

fn caregiver_draft(rate: &str) -> CaregiverDraft {
    CaregiverDraft {
        photo: None,
        gender: Gender::Female,
        caregiving_type: CaregivingType::Babysitter,
        hourly_rate: BigDecimal::from_str(rate).expect("valid rate"),
    }
}

fn appointment_draft(
    caregiver: UserId,
    member: UserId,
    work_hours: i32,
    status: AppointmentStatus,
) -> AppointmentDraft {
    AppointmentDraft {
        caregiver_user_id: caregiver,
        member_user_id: member,
        date: NaiveDate::from_ymd_opt(2026, 3, 14).expect("valid date"),
        time: NaiveTime::from_hms_opt(9, 0, 0).expect("valid time"),
        work_hours,
        status: Some(status),
    }
}

async fn create_user(pool: &DbPool) -> (UserId, UserDraft) {
    let draft = user_draft(&unique_tag());
    let user = DieselUserRepository::new(pool.clone())
        .create(&draft)
        .await
        .expect("create user");
    (user.id, draft)
}

async fn delete_users(pool: &DbPool, ids: &[UserId]) {
    let users = DieselUserRepository::new(pool.clone());
    for id in ids {
        // Cascades clean up everything the test created underneath.
        let _ = users.delete(*id).await;
    }
}

#[tokio::test]
async fn duplicate_email_and_phone_conflict() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };
    let users = DieselUserRepository::new(pool.clone());

    let (id, draft) = create_user(&pool).await;

    let mut same_email = user_draft(&unique_tag());
    same_email.email = draft.email.clone();
    let err = users.create(&same_email).await.expect_err("email is unique");
    assert!(matches!(err, StoreError::Conflict { .. }), "got {err:?}");

    let mut same_phone = user_draft(&unique_tag());
    same_phone.phone_number = draft.phone_number.clone();
    let err = users.create(&same_phone).await.expect_err("phone is unique");
    assert!(matches!(err, StoreError::Conflict { .. }), "got {err:?}");

    delete_users(&pool, &[id]).await;
}

#[tokio::test]
async fn deleting_a_user_cascades_through_every_dependent() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let users = DieselUserRepository::new(pool.clone());
    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let members = DieselMemberRepository::new(pool.clone());
    let addresses = DieselAddressRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let applications = DieselJobApplicationRepository::new(pool.clone());
    let appointments = DieselAppointmentRepository::new(pool.clone());

    let (caregiver_id, _) = create_user(&pool).await;
    let (member_id, _) = create_user(&pool).await;

    caregivers
        .create(caregiver_id, &caregiver_draft("12.50"))
        .await
        .expect("create caregiver");
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    addresses
        .create(
            member_id,
            &AddressDraft {
                street: Some("Turan Avenue".to_owned()),
                ..AddressDraft::default()
            },
        )
        .await
        .expect("create address");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Babysitter,
            other_requirements: None,
            date_posted: None,
        })
        .await
        .expect("create job");
    applications
        .create(&JobApplicationDraft {
            caregiver_user_id: caregiver_id,
            job_id: job.id,
            date_applied: None,
        })
        .await
        .expect("create application");
    let appointment = appointments
        .create(&appointment_draft(
            caregiver_id,
            member_id,
            4,
            AppointmentStatus::Pending,
        ))
        .await
        .expect("create appointment");

    users.delete(member_id).await.expect("delete member user");

    assert!(matches!(
        members.get(member_id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        addresses.get(member_id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        jobs.get(job.id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        applications.get(caregiver_id, job.id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        appointments.get(appointment.id).await,
        Err(StoreError::NotFound { .. })
    ));

    // The caregiver side survives until its own user goes.
    assert!(caregivers.get(caregiver_id).await.is_ok());
    users.delete(caregiver_id).await.expect("delete caregiver user");
    assert!(matches!(
        caregivers.get(caregiver_id).await,
        Err(StoreError::NotFound { .. })
    ));
}

#[tokio::test]
async fn a_caregiver_applies_to_a_job_at_most_once() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let members = DieselMemberRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let applications = DieselJobApplicationRepository::new(pool.clone());

    let (caregiver_id, _) = create_user(&pool).await;
    let (member_id, _) = create_user(&pool).await;
    caregivers
        .create(caregiver_id, &caregiver_draft("8.00"))
        .await
        .expect("create caregiver");
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Playmate,
            other_requirements: None,
            date_posted: None,
        })
        .await
        .expect("create job");

    let draft = JobApplicationDraft {
        caregiver_user_id: caregiver_id,
        job_id: job.id,
        date_applied: None,
    };
    applications.create(&draft).await.expect("first application");
    let err = applications
        .create(&draft)
        .await
        .expect_err("second application must conflict");
    assert!(matches!(err, StoreError::Conflict { .. }), "got {err:?}");

    delete_users(&pool, &[caregiver_id, member_id]).await;
}

#[tokio::test]
async fn profile_for_a_missing_user_is_an_invalid_reference() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let err = caregivers
        .create(UserId::new(-1), &caregiver_draft("9.00"))
        .await
        .expect_err("dangling user reference");
    assert!(matches!(err, StoreError::InvalidReference { .. }), "got {err:?}");
}

#[tokio::test]
async fn rate_adjustment_increments_low_rates_and_scales_the_rest() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (low_id, _) = create_user(&pool).await;
    let (high_id, _) = create_user(&pool).await;
    caregivers
        .create(low_id, &caregiver_draft("5.00"))
        .await
        .expect("create low-rate caregiver");
    caregivers
        .create(high_id, &caregiver_draft("20.00"))
        .await
        .expect("create high-rate caregiver");

    catalog.adjust_hourly_rates().await.expect("adjust rates");

    let low = caregivers.get(low_id).await.expect("low-rate caregiver");
    let high = caregivers.get(high_id).await.expect("high-rate caregiver");
    assert_eq!(low.hourly_rate, BigDecimal::from_str("5.30").expect("decimal"));
    assert_eq!(high.hourly_rate, BigDecimal::from_str("22.00").expect("decimal"));

    delete_users(&pool, &[low_id, high_id]).await;
}

#[tokio::test]
async fn applicant_counts_include_jobs_nobody_applied_to() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let members = DieselMemberRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::ElderlyCaregiver,
            other_requirements: None,
            date_posted: None,
        })
        .await
        .expect("create job");

    let counts = catalog.applicants_per_job().await.expect("count applicants");
    let row = counts
        .iter()
        .find(|row| row.job_id == job.id)
        .expect("unapplied job must still appear");
    assert_eq!(row.applicants, 0);

    delete_users(&pool, &[member_id]).await;
}

#[tokio::test]
async fn requirement_search_is_case_insensitive() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let members = DieselMemberRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Babysitter,
            other_requirements: Some("Needs a SOFT-SPOKEN helper".to_owned()),
            date_posted: None,
        })
        .await
        .expect("create job");

    let matches = catalog
        .jobs_requiring("soft-spoken")
        .await
        .expect("search requirements");
    assert!(matches.contains(&job.id), "case-insensitive match expected");

    delete_users(&pool, &[member_id]).await;
}

#[tokio::test]
async fn only_caregivers_above_the_average_total_are_reported() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let members = DieselMemberRepository::new(pool.clone());
    let appointments = DieselAppointmentRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");

    // Confirmed totals 100, 200, 300; the average is 200, so only the last
    // caregiver clears it.
    let mut caregiver_ids = Vec::new();
    let mut surnames = Vec::new();
    for rate in ["10.00", "20.00", "30.00"] {
        let (id, draft) = create_user(&pool).await;
        caregivers
            .create(id, &caregiver_draft(rate))
            .await
            .expect("create caregiver");
        appointments
            .create(&appointment_draft(
                id,
                member_id,
                10,
                AppointmentStatus::Confirmed,
            ))
            .await
            .expect("create confirmed appointment");
        caregiver_ids.push(id);
        surnames.push(draft.surname);
    }

    let earners = catalog
        .caregivers_paid_above_average()
        .await
        .expect("above-average report");
    let reported: Vec<&str> = earners.iter().map(|row| row.surname.as_str()).collect();

    assert!(reported.contains(&surnames[2].as_str()), "total 300 exceeds the average");
    assert!(!reported.contains(&surnames[0].as_str()), "total 100 is below the average");
    assert!(!reported.contains(&surnames[1].as_str()), "total 200 equals the average");

    let top = earners
        .iter()
        .find(|row| row.surname == surnames[2])
        .expect("top earner row");
    assert_eq!(top.total_pay, BigDecimal::from_str("300.00").expect("decimal"));

    let mut cleanup = caregiver_ids;
    cleanup.push(member_id);
    delete_users(&pool, &cleanup).await;
}

#[tokio::test]
async fn view_rows_match_the_direct_join_in_key_order() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let caregivers = DieselCaregiverRepository::new(pool.clone());
    let members = DieselMemberRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let applications = DieselJobApplicationRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Playmate,
            other_requirements: Some("weekends only".to_owned()),
            date_posted: None,
        })
        .await
        .expect("create job");

    let mut applicant_ids = Vec::new();
    for _ in 0..2 {
        let (id, _) = create_user(&pool).await;
        caregivers
            .create(id, &caregiver_draft("11.00"))
            .await
            .expect("create caregiver");
        applications
            .create(&JobApplicationDraft {
                caregiver_user_id: id,
                job_id: job.id,
                date_applied: None,
            })
            .await
            .expect("create application");
        applicant_ids.push(id);
    }

    catalog
        .rebuild_job_applications_view()
        .await
        .expect("rebuild view");
    let rows = catalog.job_applications_view().await.expect("read view");

    let ours: Vec<_> = rows.iter().filter(|row| row.job_id == job.id).collect();
    assert_eq!(ours.len(), 2, "one view row per application");

    let mut expected = applicant_ids.clone();
    expected.sort();
    let listed: Vec<UserId> = ours.iter().map(|row| row.caregiver_user_id).collect();
    assert_eq!(listed, expected, "ordered by caregiver within the job");
    for row in &ours {
        assert_eq!(row.other_requirements.as_deref(), Some("weekends only"));
    }

    let mut cleanup = applicant_ids;
    cleanup.push(member_id);
    delete_users(&pool, &cleanup).await;
}

#[tokio::test]
async fn targeted_phone_update_ignores_missing_names() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let users = DieselUserRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let (id, draft) = create_user(&pool).await;

    let updated = catalog
        .update_phone_number(&draft.given_name, &draft.surname, "+77773414141")
        .await
        .expect("targeted update");
    assert_eq!(updated, 1);
    let stored = users.get(id).await.expect("user");
    assert_eq!(stored.phone_number, "+77773414141");

    let updated = catalog
        .update_phone_number("Nobody", "Nosuchperson", "+70000000000")
        .await
        .expect("zero matches is a no-op");
    assert_eq!(updated, 0);

    delete_users(&pool, &[id]).await;
}

#[tokio::test]
async fn street_purge_removes_members_and_their_jobs() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let members = DieselMemberRepository::new(pool.clone());
    let addresses = DieselAddressRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());
    let catalog = DieselReportCatalog::new(pool.clone());

    let street = format!("Kabanbay Batyr {}", unique_tag());
    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    addresses
        .create(
            member_id,
            &AddressDraft {
                street: Some(street.clone()),
                ..AddressDraft::default()
            },
        )
        .await
        .expect("create address");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Babysitter,
            other_requirements: None,
            date_posted: None,
        })
        .await
        .expect("create job");

    let deleted = catalog
        .delete_members_on_street(&street)
        .await
        .expect("street purge");
    assert_eq!(deleted, 1);

    assert!(matches!(
        members.get(member_id).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(jobs.get(job.id).await, Err(StoreError::NotFound { .. })));

    delete_users(&pool, &[member_id]).await;
}

#[tokio::test]
async fn full_replacement_update_clears_absent_optionals() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let users = DieselUserRepository::new(pool.clone());

    let (id, mut draft) = create_user(&pool).await;
    draft.profile_description = Some("night-shift nurse".to_owned());
    users.update(id, &draft).await.expect("set description");

    draft.profile_description = None;
    let stored = users.update(id, &draft).await.expect("clear description");
    assert_eq!(stored.profile_description, None, "replacement writes NULL");

    let err = users
        .update(UserId::new(-1), &draft)
        .await
        .expect_err("updating a missing user");
    assert!(matches!(err, StoreError::NotFound { .. }), "got {err:?}");

    delete_users(&pool, &[id]).await;
}

#[tokio::test]
async fn job_ids_come_back_typed() {
    let _guard = DB_LOCK.lock().await;
    let Some(pool) = connect().await else { return };

    let members = DieselMemberRepository::new(pool.clone());
    let jobs = DieselJobRepository::new(pool.clone());

    let (member_id, _) = create_user(&pool).await;
    members
        .create(member_id, &MemberDraft::default())
        .await
        .expect("create member");
    let job = jobs
        .create(&JobDraft {
            member_user_id: member_id,
            required_caregiving_type: CaregivingType::Playmate,
            other_requirements: None,
            date_posted: None,
        })
        .await
        .expect("create job");

    let listed = jobs.list().await.expect("list jobs");
    assert!(listed.iter().any(|stored| stored.id == job.id));
    assert!(job.id > JobId::new(0));

    delete_users(&pool, &[member_id]).await;
}
