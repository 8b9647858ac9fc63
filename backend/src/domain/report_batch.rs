//! Fixed-order analytical batch over the report catalog.

use std::sync::Arc;

use tracing::info;

use super::ports::{ReportCatalog, StoreError};

/// Destination for rendered report lines.
///
/// Rows are rendered and handed over as soon as the catalog produces them;
/// nothing is retained once emitted.
pub trait ReportSink: Send + Sync {
    /// Write one rendered line.
    fn emit(&self, line: &str);
}

/// Literal parameters threaded into the targeted catalog operations.
///
/// `Default` reproduces the values the batch has historically run with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportBatchRequest {
    /// Name pair selecting the user whose phone number changes.
    pub phone_given_name: String,
    pub phone_surname: String,
    /// Replacement phone number.
    pub new_phone_number: String,
    /// Name pair selecting the member whose jobs are purged.
    pub purge_jobs_given_name: String,
    pub purge_jobs_surname: String,
    /// Street selecting the members to purge.
    pub purge_street: String,
    /// Phrase searched in job requirements.
    pub requirements_phrase: String,
    /// City filter of the elderly-care member report.
    pub member_city: String,
    /// Phrase searched in member house rules.
    pub house_rules_phrase: String,
}

impl Default for ReportBatchRequest {
    fn default() -> Self {
        Self {
            phone_given_name: "Arman".to_owned(),
            phone_surname: "Armanov".to_owned(),
            new_phone_number: "+77773414141".to_owned(),
            purge_jobs_given_name: "Amina".to_owned(),
            purge_jobs_surname: "Aminova".to_owned(),
            purge_street: "Kabanbay Batyr".to_owned(),
            requirements_phrase: "soft-spoken".to_owned(),
            member_city: "Astana".to_owned(),
            house_rules_phrase: "No pets.".to_owned(),
        }
    }
}

/// Runs the fourteen catalog operations in their fixed order.
///
/// Mutations commit statement by statement; no transaction spans the batch,
/// so a failure aborts the remaining operations while earlier mutations
/// stay applied.
pub struct ReportBatch {
    catalog: Arc<dyn ReportCatalog>,
    sink: Arc<dyn ReportSink>,
}

impl ReportBatch {
    /// Create a batch over the given catalog, rendering into the sink.
    pub fn new(catalog: Arc<dyn ReportCatalog>, sink: Arc<dyn ReportSink>) -> Self {
        Self { catalog, sink }
    }

    /// Execute the full sequence, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Propagates the first [`StoreError`] raised by the catalog.
    pub async fn run(&self, request: &ReportBatchRequest) -> Result<(), StoreError> {
        info!("updating phone number");
        let updated = self
            .catalog
            .update_phone_number(
                &request.phone_given_name,
                &request.phone_surname,
                &request.new_phone_number,
            )
            .await?;
        self.emit(format!("updated phone number for {updated} user(s)"));

        info!("adjusting hourly rates");
        let adjusted = self.catalog.adjust_hourly_rates().await?;
        self.emit(format!("adjusted hourly rate for {adjusted} caregiver(s)"));

        info!("purging jobs by owner name");
        let purged_jobs = self
            .catalog
            .delete_jobs_posted_by(&request.purge_jobs_given_name, &request.purge_jobs_surname)
            .await?;
        self.emit(format!("deleted {purged_jobs} job(s)"));

        info!("purging members by street");
        let purged_members = self
            .catalog
            .delete_members_on_street(&request.purge_street)
            .await?;
        self.emit(format!("deleted {purged_members} member(s)"));

        info!("listing confirmed appointment parties");
        for row in self.catalog.confirmed_appointment_parties().await? {
            self.emit(format!(
                "appointment {}: caregiver {} {}, member {} {}",
                row.appointment_id,
                row.caregiver_given_name,
                row.caregiver_surname,
                row.member_given_name,
                row.member_surname,
            ));
        }

        info!("searching job requirements");
        for job_id in self.catalog.jobs_requiring(&request.requirements_phrase).await? {
            self.emit(format!("job {job_id}"));
        }

        info!("listing babysitting hours");
        for row in self.catalog.babysitting_work_hours().await? {
            self.emit(format!(
                "appointment {}: {} hours",
                row.appointment_id, row.work_hours,
            ));
        }

        info!("listing members seeking elderly care");
        let members = self
            .catalog
            .members_seeking_elderly_care(&request.member_city, &request.house_rules_phrase)
            .await?;
        for row in members {
            self.emit(format!("{} {}", row.given_name, row.surname));
        }

        info!("counting applicants per job");
        for row in self.catalog.applicants_per_job().await? {
            self.emit(format!("job {}: {} applicant(s)", row.job_id, row.applicants));
        }

        info!("summing confirmed hours per caregiver");
        for row in self.catalog.confirmed_hours_per_caregiver().await? {
            self.emit(format!(
                "{} {}: {} hours",
                row.given_name, row.surname, row.total_hours,
            ));
        }

        info!("averaging pay per caregiver");
        for row in self.catalog.average_pay_per_caregiver().await? {
            self.emit(format!(
                "{} {}: average pay {}",
                row.given_name, row.surname, row.average_pay,
            ));
        }

        info!("selecting caregivers paid above average");
        for row in self.catalog.caregivers_paid_above_average().await? {
            self.emit(format!(
                "{} {}: total pay {}",
                row.given_name, row.surname, row.total_pay,
            ));
        }

        info!("summing total cost per caregiver");
        for row in self.catalog.total_cost_per_caregiver().await? {
            self.emit(format!(
                "{} {}: total cost {}",
                row.given_name, row.surname, row.total_pay,
            ));
        }

        info!("rebuilding and reading the job applications view");
        self.catalog.rebuild_job_applications_view().await?;
        for row in self.catalog.job_applications_view().await? {
            self.emit(format!(
                "job {}, caregiver {}: {} {} ({})",
                row.job_id,
                row.caregiver_user_id,
                row.caregiver_name,
                row.caregiver_surname,
                row.other_requirements.as_deref().unwrap_or("-"),
            ));
        }

        Ok(())
    }

    fn emit(&self, line: String) {
        self.sink.emit(&line);
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for batch ordering and abort behaviour.

    use std::sync::Mutex;

    use async_trait::async_trait;
    use bigdecimal::BigDecimal;
    use rstest::rstest;

    use crate::domain::ports::{
        AppointmentWorkHours, CaregiverHoursTotal, CaregiverPayAverage, CaregiverPayTotal,
        ConfirmedAppointmentParties, JobApplicantCount, JobApplicationViewRow, MemberName,
    };
    use crate::domain::{AppointmentId, JobId, UserId};

    use super::*;

    const FULL_SEQUENCE: [&str; 15] = [
        "update_phone_number",
        "adjust_hourly_rates",
        "delete_jobs_posted_by",
        "delete_members_on_street",
        "confirmed_appointment_parties",
        "jobs_requiring",
        "babysitting_work_hours",
        "members_seeking_elderly_care",
        "applicants_per_job",
        "confirmed_hours_per_caregiver",
        "average_pay_per_caregiver",
        "caregivers_paid_above_average",
        "total_cost_per_caregiver",
        "rebuild_job_applications_view",
        "job_applications_view",
    ];

    #[derive(Default)]
    struct RecordingSink {
        lines: Mutex<Vec<String>>,
    }

    impl ReportSink for RecordingSink {
        fn emit(&self, line: &str) {
            self.lines.lock().expect("sink lock").push(line.to_owned());
        }
    }

    /// Stub catalog that records call order and can fail at a chosen step.
    #[derive(Default)]
    struct StubCatalog {
        calls: Mutex<Vec<&'static str>>,
        fail_at: Option<&'static str>,
    }

    impl StubCatalog {
        fn failing_at(step: &'static str) -> Self {
            Self {
                calls: Mutex::default(),
                fail_at: Some(step),
            }
        }

        fn record(&self, step: &'static str) -> Result<(), StoreError> {
            self.calls.lock().expect("call lock").push(step);
            if self.fail_at == Some(step) {
                return Err(StoreError::query("stubbed failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ReportCatalog for StubCatalog {
        async fn update_phone_number(
            &self,
            _given_name: &str,
            _surname: &str,
            _phone_number: &str,
        ) -> Result<usize, StoreError> {
            self.record("update_phone_number")?;
            Ok(1)
        }

        async fn adjust_hourly_rates(&self) -> Result<usize, StoreError> {
            self.record("adjust_hourly_rates")?;
            Ok(3)
        }

        async fn delete_jobs_posted_by(
            &self,
            _given_name: &str,
            _surname: &str,
        ) -> Result<usize, StoreError> {
            self.record("delete_jobs_posted_by")?;
            Ok(0)
        }

        async fn delete_members_on_street(&self, _street: &str) -> Result<usize, StoreError> {
            self.record("delete_members_on_street")?;
            Ok(0)
        }

        async fn confirmed_appointment_parties(
            &self,
        ) -> Result<Vec<ConfirmedAppointmentParties>, StoreError> {
            self.record("confirmed_appointment_parties")?;
            Ok(vec![ConfirmedAppointmentParties {
                appointment_id: AppointmentId::new(7),
                caregiver_given_name: "Dana".to_owned(),
                caregiver_surname: "Dauletova".to_owned(),
                member_given_name: "Miras".to_owned(),
                member_surname: "Mirasov".to_owned(),
            }])
        }

        async fn jobs_requiring(&self, _phrase: &str) -> Result<Vec<JobId>, StoreError> {
            self.record("jobs_requiring")?;
            Ok(vec![JobId::new(2)])
        }

        async fn babysitting_work_hours(
            &self,
        ) -> Result<Vec<AppointmentWorkHours>, StoreError> {
            self.record("babysitting_work_hours")?;
            Ok(vec![AppointmentWorkHours {
                appointment_id: AppointmentId::new(7),
                work_hours: 4,
            }])
        }

        async fn members_seeking_elderly_care(
            &self,
            _city: &str,
            _house_rules_phrase: &str,
        ) -> Result<Vec<MemberName>, StoreError> {
            self.record("members_seeking_elderly_care")?;
            Ok(vec![MemberName {
                given_name: "Miras".to_owned(),
                surname: "Mirasov".to_owned(),
            }])
        }

        async fn applicants_per_job(&self) -> Result<Vec<JobApplicantCount>, StoreError> {
            self.record("applicants_per_job")?;
            Ok(vec![JobApplicantCount {
                job_id: JobId::new(2),
                applicants: 0,
            }])
        }

        async fn confirmed_hours_per_caregiver(
            &self,
        ) -> Result<Vec<CaregiverHoursTotal>, StoreError> {
            self.record("confirmed_hours_per_caregiver")?;
            Ok(Vec::new())
        }

        async fn average_pay_per_caregiver(
            &self,
        ) -> Result<Vec<CaregiverPayAverage>, StoreError> {
            self.record("average_pay_per_caregiver")?;
            Ok(Vec::new())
        }

        async fn caregivers_paid_above_average(
            &self,
        ) -> Result<Vec<CaregiverPayTotal>, StoreError> {
            self.record("caregivers_paid_above_average")?;
            Ok(vec![CaregiverPayTotal {
                given_name: "Dana".to_owned(),
                surname: "Dauletova".to_owned(),
                total_pay: BigDecimal::from(300),
            }])
        }

        async fn total_cost_per_caregiver(
            &self,
        ) -> Result<Vec<CaregiverPayTotal>, StoreError> {
            self.record("total_cost_per_caregiver")?;
            Ok(Vec::new())
        }

        async fn rebuild_job_applications_view(&self) -> Result<(), StoreError> {
            self.record("rebuild_job_applications_view")
        }

        async fn job_applications_view(
            &self,
        ) -> Result<Vec<JobApplicationViewRow>, StoreError> {
            self.record("job_applications_view")?;
            Ok(vec![JobApplicationViewRow {
                job_id: JobId::new(2),
                other_requirements: None,
                caregiver_user_id: UserId::new(5),
                caregiver_name: "Dana".to_owned(),
                caregiver_surname: "Dauletova".to_owned(),
            }])
        }
    }

    fn batch_over(catalog: StubCatalog) -> (ReportBatch, Arc<StubCatalog>, Arc<RecordingSink>) {
        let catalog = Arc::new(catalog);
        let sink = Arc::new(RecordingSink::default());
        let batch = ReportBatch::new(catalog.clone(), sink.clone());
        (batch, catalog, sink)
    }

    #[tokio::test]
    async fn runs_every_operation_in_fixed_order() {
        let (batch, catalog, sink) = batch_over(StubCatalog::default());

        batch
            .run(&ReportBatchRequest::default())
            .await
            .expect("batch should succeed");

        let calls = catalog.calls.lock().expect("call lock");
        assert_eq!(*calls, FULL_SEQUENCE);

        let lines = sink.lines.lock().expect("sink lock");
        assert!(lines.contains(&"updated phone number for 1 user(s)".to_owned()));
        assert!(
            lines.contains(&"appointment 7: caregiver Dana Dauletova, member Miras Mirasov".to_owned())
        );
        assert!(lines.contains(&"job 2: 0 applicant(s)".to_owned()));
        assert!(lines.contains(&"Dana Dauletova: total pay 300".to_owned()));
        assert!(lines.contains(&"job 2, caregiver 5: Dana Dauletova (-)".to_owned()));
    }

    #[tokio::test]
    async fn first_failure_aborts_the_tail() {
        let (batch, catalog, sink) = batch_over(StubCatalog::failing_at("delete_members_on_street"));

        let err = batch
            .run(&ReportBatchRequest::default())
            .await
            .expect_err("stubbed failure must propagate");
        assert_eq!(err, StoreError::query("stubbed failure"));

        let calls = catalog.calls.lock().expect("call lock");
        assert_eq!(
            calls.as_slice(),
            &FULL_SEQUENCE[..4],
            "operations after the failure must not run",
        );

        let lines = sink.lines.lock().expect("sink lock");
        assert_eq!(lines.len(), 3, "only the completed mutations report counts");
    }

    #[rstest]
    fn default_request_carries_the_historical_literals() {
        let request = ReportBatchRequest::default();
        assert_eq!(request.phone_given_name, "Arman");
        assert_eq!(request.new_phone_number, "+77773414141");
        assert_eq!(request.purge_street, "Kabanbay Batyr");
        assert_eq!(request.requirements_phrase, "soft-spoken");
        assert_eq!(request.member_city, "Astana");
        assert_eq!(request.house_rules_phrase, "No pets.");
    }
}
