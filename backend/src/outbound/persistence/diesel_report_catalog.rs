//! Diesel-backed report catalog running the fixed analytical statement set.
//!
//! Plain filters and the subquery-driven mutations use the typed DSL. The
//! shapes the DSL does not express naturally — the bulk CASE update, the
//! double alias over users, the grouped aggregates, and the view DDL — are
//! kept as raw parameterised SQL so the statement reads exactly as it runs
//! in the engine.

use async_trait::async_trait;
use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{BigInt, Integer, Nullable, Numeric, Text};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{
    AppointmentWorkHours, CaregiverHoursTotal, CaregiverPayAverage, CaregiverPayTotal,
    ConfirmedAppointmentParties, JobApplicantCount, JobApplicationViewRow, MemberName,
    ReportCatalog, StoreError,
};
use crate::domain::{AppointmentId, CaregivingType, JobId, UserId};

use super::diesel_error::{map_diesel_error, map_pool_error};
use super::pool::DbPool;
use super::schema::{addresses, appointments, caregivers, jobs, members, users};

const CONTEXT: &str = "report";

/// Diesel-backed implementation of the report catalog port.
#[derive(Clone)]
pub struct DieselReportCatalog {
    pool: DbPool,
}

impl DieselReportCatalog {
    /// Create a new catalog with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// One conditional statement: low rates gain the fixed increment, the rest
/// are raised by the fixed factor.
const ADJUST_RATES_SQL: &str = "\
UPDATE caregivers \
SET hourly_rate = CASE \
    WHEN hourly_rate < 10 THEN hourly_rate + 0.3 \
    ELSE hourly_rate * 1.1 \
END";

/// Users joined twice under independent aliases: once as the caregiver
/// identity, once as the member identity. Both roles share the user id
/// space, so the same table appears on each side.
const CONFIRMED_PARTIES_SQL: &str = "\
SELECT a.appointment_id, \
       cu.given_name AS caregiver_name, \
       cu.surname    AS caregiver_surname, \
       mu.given_name AS member_name, \
       mu.surname    AS member_surname \
FROM appointments a \
JOIN caregivers c ON c.caregiver_user_id = a.caregiver_user_id \
JOIN users cu     ON cu.user_id = c.caregiver_user_id \
JOIN members m    ON m.member_user_id = a.member_user_id \
JOIN users mu     ON mu.user_id = m.member_user_id \
WHERE a.status = 'confirmed'";

/// Outer join so jobs nobody applied to still report a zero count.
const APPLICANTS_PER_JOB_SQL: &str = "\
SELECT j.job_id, \
       COUNT(ja.caregiver_user_id) AS applicants \
FROM jobs j \
LEFT JOIN job_applications ja ON ja.job_id = j.job_id \
GROUP BY j.job_id \
ORDER BY j.job_id";

const CONFIRMED_HOURS_SQL: &str = "\
SELECT u.given_name, \
       u.surname, \
       SUM(a.work_hours) AS total_hours \
FROM caregivers c \
JOIN users u        ON u.user_id = c.caregiver_user_id \
JOIN appointments a ON a.caregiver_user_id = c.caregiver_user_id \
WHERE a.status = 'confirmed' \
GROUP BY u.given_name, u.surname \
ORDER BY u.surname, u.given_name";

const AVERAGE_PAY_SQL: &str = "\
SELECT u.given_name, \
       u.surname, \
       AVG(c.hourly_rate * a.work_hours) AS average_pay \
FROM caregivers c \
JOIN users u        ON u.user_id = c.caregiver_user_id \
JOIN appointments a ON a.caregiver_user_id = c.caregiver_user_id \
WHERE a.status = 'confirmed' \
GROUP BY u.given_name, u.surname \
ORDER BY u.surname, u.given_name";

/// Two-stage aggregation: per-caregiver totals, a scalar average over those
/// totals, then the filter comparing each total to the scalar.
const ABOVE_AVERAGE_PAY_SQL: &str = "\
SELECT u.given_name, \
       u.surname, \
       totals.total_pay \
FROM ( \
    SELECT c.caregiver_user_id AS cid, \
           SUM(c.hourly_rate * a.work_hours) AS total_pay \
    FROM caregivers c \
    JOIN appointments a ON a.caregiver_user_id = c.caregiver_user_id \
    WHERE a.status = 'confirmed' \
    GROUP BY c.caregiver_user_id \
) AS totals \
JOIN caregivers c ON c.caregiver_user_id = totals.cid \
JOIN users u      ON u.user_id = c.caregiver_user_id \
WHERE totals.total_pay > ( \
    SELECT AVG(per.total_pay) \
    FROM ( \
        SELECT SUM(c2.hourly_rate * a2.work_hours) AS total_pay \
        FROM caregivers c2 \
        JOIN appointments a2 ON a2.caregiver_user_id = c2.caregiver_user_id \
        WHERE a2.status = 'confirmed' \
        GROUP BY c2.caregiver_user_id \
    ) AS per \
) \
ORDER BY totals.total_pay DESC";

const TOTAL_COST_SQL: &str = "\
SELECT u.given_name, \
       u.surname, \
       SUM(c.hourly_rate * a.work_hours) AS total_pay \
FROM caregivers c \
JOIN users u        ON u.user_id = c.caregiver_user_id \
JOIN appointments a ON a.caregiver_user_id = c.caregiver_user_id \
WHERE a.status = 'confirmed' \
GROUP BY u.given_name, u.surname \
ORDER BY u.surname, u.given_name";

const CREATE_VIEW_SQL: &str = "\
CREATE OR REPLACE VIEW job_applications_view AS \
SELECT ja.job_id, \
       j.other_requirements, \
       ja.caregiver_user_id, \
       u.given_name AS caregiver_name, \
       u.surname    AS caregiver_surname \
FROM job_applications ja \
JOIN jobs j       ON j.job_id = ja.job_id \
JOIN caregivers c ON c.caregiver_user_id = ja.caregiver_user_id \
JOIN users u      ON u.user_id = c.caregiver_user_id";

const READ_VIEW_SQL: &str = "\
SELECT job_id, other_requirements, caregiver_user_id, caregiver_name, caregiver_surname \
FROM job_applications_view \
ORDER BY job_id, caregiver_user_id";

#[derive(QueryableByName)]
struct ConfirmedPartiesRow {
    #[diesel(sql_type = Integer)]
    appointment_id: i32,
    #[diesel(sql_type = Text)]
    caregiver_name: String,
    #[diesel(sql_type = Text)]
    caregiver_surname: String,
    #[diesel(sql_type = Text)]
    member_name: String,
    #[diesel(sql_type = Text)]
    member_surname: String,
}

#[derive(QueryableByName)]
struct ApplicantCountRow {
    #[diesel(sql_type = Integer)]
    job_id: i32,
    #[diesel(sql_type = BigInt)]
    applicants: i64,
}

#[derive(QueryableByName)]
struct HoursTotalRow {
    #[diesel(sql_type = Text)]
    given_name: String,
    #[diesel(sql_type = Text)]
    surname: String,
    #[diesel(sql_type = BigInt)]
    total_hours: i64,
}

#[derive(QueryableByName)]
struct PayAverageRow {
    #[diesel(sql_type = Text)]
    given_name: String,
    #[diesel(sql_type = Text)]
    surname: String,
    #[diesel(sql_type = Numeric)]
    average_pay: BigDecimal,
}

#[derive(QueryableByName)]
struct PayTotalRow {
    #[diesel(sql_type = Text)]
    given_name: String,
    #[diesel(sql_type = Text)]
    surname: String,
    #[diesel(sql_type = Numeric)]
    total_pay: BigDecimal,
}

#[derive(QueryableByName)]
struct ViewRow {
    #[diesel(sql_type = Integer)]
    job_id: i32,
    #[diesel(sql_type = Nullable<Text>)]
    other_requirements: Option<String>,
    #[diesel(sql_type = Integer)]
    caregiver_user_id: i32,
    #[diesel(sql_type = Text)]
    caregiver_name: String,
    #[diesel(sql_type = Text)]
    caregiver_surname: String,
}

#[async_trait]
impl ReportCatalog for DieselReportCatalog {
    async fn update_phone_number(
        &self,
        given_name: &str,
        surname: &str,
        phone_number: &str,
    ) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::update(
            users::table.filter(
                users::given_name
                    .eq(given_name)
                    .and(users::surname.eq(surname)),
            ),
        )
        .set(users::phone_number.eq(phone_number))
        .execute(&mut conn)
        .await
        .map_err(|err| map_diesel_error(CONTEXT, err))
    }

    async fn adjust_hourly_rates(&self) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        sql_query(ADJUST_RATES_SQL)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))
    }

    async fn delete_jobs_posted_by(
        &self,
        given_name: &str,
        surname: &str,
    ) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // The owning-member ids are computed first, then filter the delete.
        let owner_ids = members::table
            .inner_join(users::table)
            .filter(
                users::given_name
                    .eq(given_name)
                    .and(users::surname.eq(surname)),
            )
            .select(members::member_user_id);

        diesel::delete(jobs::table.filter(jobs::member_user_id.eq_any(owner_ids)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))
    }

    async fn delete_members_on_street(&self, street: &str) -> Result<usize, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let street_member_ids = addresses::table
            .filter(addresses::street.eq(street))
            .select(addresses::member_user_id);

        diesel::delete(members::table.filter(members::member_user_id.eq_any(street_member_ids)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))
    }

    async fn confirmed_appointment_parties(
        &self,
    ) -> Result<Vec<ConfirmedAppointmentParties>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ConfirmedPartiesRow> = sql_query(CONFIRMED_PARTIES_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|row| ConfirmedAppointmentParties {
                appointment_id: AppointmentId::new(row.appointment_id),
                caregiver_given_name: row.caregiver_name,
                caregiver_surname: row.caregiver_surname,
                member_given_name: row.member_name,
                member_surname: row.member_surname,
            })
            .collect())
    }

    async fn jobs_requiring(&self, phrase: &str) -> Result<Vec<JobId>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pattern = format!("%{phrase}%");
        let ids: Vec<i32> = jobs::table
            .filter(jobs::other_requirements.ilike(pattern))
            .select(jobs::job_id)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(ids.into_iter().map(JobId::new).collect())
    }

    async fn babysitting_work_hours(&self) -> Result<Vec<AppointmentWorkHours>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(i32, i32)> = appointments::table
            .inner_join(caregivers::table)
            .filter(caregivers::caregiving_type.eq(CaregivingType::Babysitter.as_str()))
            .select((appointments::appointment_id, appointments::work_hours))
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|(appointment_id, work_hours)| AppointmentWorkHours {
                appointment_id: AppointmentId::new(appointment_id),
                work_hours,
            })
            .collect())
    }

    async fn members_seeking_elderly_care(
        &self,
        city: &str,
        house_rules_phrase: &str,
    ) -> Result<Vec<MemberName>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let pattern = format!("%{house_rules_phrase}%");
        let rows: Vec<(String, String)> = members::table
            .inner_join(users::table)
            .inner_join(jobs::table)
            .filter(
                jobs::required_caregiving_type
                    .eq(CaregivingType::ElderlyCaregiver.as_str())
                    .and(users::city.eq(city))
                    .and(members::house_rules.ilike(pattern)),
            )
            .select((users::given_name, users::surname))
            .distinct()
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|(given_name, surname)| MemberName {
                given_name,
                surname,
            })
            .collect())
    }

    async fn applicants_per_job(&self) -> Result<Vec<JobApplicantCount>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ApplicantCountRow> = sql_query(APPLICANTS_PER_JOB_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|row| JobApplicantCount {
                job_id: JobId::new(row.job_id),
                applicants: row.applicants,
            })
            .collect())
    }

    async fn confirmed_hours_per_caregiver(
        &self,
    ) -> Result<Vec<CaregiverHoursTotal>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<HoursTotalRow> = sql_query(CONFIRMED_HOURS_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|row| CaregiverHoursTotal {
                given_name: row.given_name,
                surname: row.surname,
                total_hours: row.total_hours,
            })
            .collect())
    }

    async fn average_pay_per_caregiver(
        &self,
    ) -> Result<Vec<CaregiverPayAverage>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PayAverageRow> = sql_query(AVERAGE_PAY_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|row| CaregiverPayAverage {
                given_name: row.given_name,
                surname: row.surname,
                average_pay: row.average_pay,
            })
            .collect())
    }

    async fn caregivers_paid_above_average(
        &self,
    ) -> Result<Vec<CaregiverPayTotal>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PayTotalRow> = sql_query(ABOVE_AVERAGE_PAY_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows.into_iter().map(pay_total_to_domain).collect())
    }

    async fn total_cost_per_caregiver(&self) -> Result<Vec<CaregiverPayTotal>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<PayTotalRow> = sql_query(TOTAL_COST_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows.into_iter().map(pay_total_to_domain).collect())
    }

    async fn rebuild_job_applications_view(&self) -> Result<(), StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        sql_query(CREATE_VIEW_SQL)
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(())
    }

    async fn job_applications_view(&self) -> Result<Vec<JobApplicationViewRow>, StoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ViewRow> = sql_query(READ_VIEW_SQL)
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(CONTEXT, err))?;

        Ok(rows
            .into_iter()
            .map(|row| JobApplicationViewRow {
                job_id: JobId::new(row.job_id),
                other_requirements: row.other_requirements,
                caregiver_user_id: UserId::new(row.caregiver_user_id),
                caregiver_name: row.caregiver_name,
                caregiver_surname: row.caregiver_surname,
            })
            .collect())
    }
}

fn pay_total_to_domain(row: PayTotalRow) -> CaregiverPayTotal {
    CaregiverPayTotal {
        given_name: row.given_name,
        surname: row.surname,
        total_pay: row.total_pay,
    }
}

#[cfg(test)]
mod tests {
    //! Checks over the raw statement shapes the engine will receive.

    use std::str::FromStr;

    use rstest::rstest;

    use super::*;

    #[rstest]
    fn rate_adjustment_is_one_conditional_statement() {
        assert!(ADJUST_RATES_SQL.starts_with("UPDATE caregivers"));
        assert!(ADJUST_RATES_SQL.contains("CASE"));
        assert!(ADJUST_RATES_SQL.contains("hourly_rate < 10"));
        assert!(ADJUST_RATES_SQL.contains("hourly_rate + 0.3"));
        assert!(ADJUST_RATES_SQL.contains("hourly_rate * 1.1"));
    }

    /// Decimal mirror of the CASE expression in [`ADJUST_RATES_SQL`].
    fn adjusted(rate: &BigDecimal) -> BigDecimal {
        let threshold = BigDecimal::from(10);
        if rate < &threshold {
            rate + BigDecimal::from_str("0.3").expect("decimal")
        } else {
            rate * BigDecimal::from_str("1.1").expect("decimal")
        }
    }

    #[rstest]
    #[case("5.00", "5.30")]
    #[case("9.99", "10.29")]
    #[case("10.00", "11.00")]
    #[case("20.00", "22.00")]
    fn rate_adjustment_constants_produce_expected_rates(
        #[case] before: &str,
        #[case] after: &str,
    ) {
        let rate = BigDecimal::from_str(before).expect("decimal");
        let expected = BigDecimal::from_str(after).expect("decimal");
        assert_eq!(adjusted(&rate), expected);
    }

    #[rstest]
    fn confirmed_parties_join_users_under_two_aliases() {
        let cu = CONFIRMED_PARTIES_SQL.matches("JOIN users cu").count();
        let mu = CONFIRMED_PARTIES_SQL.matches("JOIN users mu").count();
        assert_eq!((cu, mu), (1, 1), "users must appear once per role");
    }

    #[rstest]
    fn applicant_counts_keep_unapplied_jobs() {
        assert!(APPLICANTS_PER_JOB_SQL.contains("LEFT JOIN job_applications"));
        assert!(APPLICANTS_PER_JOB_SQL.contains("COUNT(ja.caregiver_user_id)"));
        assert!(APPLICANTS_PER_JOB_SQL.ends_with("ORDER BY j.job_id"));
    }

    #[rstest]
    #[case(CONFIRMED_HOURS_SQL)]
    #[case(AVERAGE_PAY_SQL)]
    #[case(TOTAL_COST_SQL)]
    fn per_caregiver_reports_group_and_order_by_name(#[case] sql: &str) {
        assert!(sql.contains("WHERE a.status = 'confirmed'"));
        assert!(sql.contains("GROUP BY u.given_name, u.surname"));
        assert!(sql.ends_with("ORDER BY u.surname, u.given_name"));
    }

    #[rstest]
    fn above_average_filter_nests_both_aggregation_stages() {
        assert!(ABOVE_AVERAGE_PAY_SQL.contains("GROUP BY c.caregiver_user_id"));
        assert!(ABOVE_AVERAGE_PAY_SQL.contains("SELECT AVG(per.total_pay)"));
        assert!(ABOVE_AVERAGE_PAY_SQL.contains("totals.total_pay > ("));
        assert!(ABOVE_AVERAGE_PAY_SQL.ends_with("ORDER BY totals.total_pay DESC"));
    }

    #[rstest]
    fn view_is_replaced_and_read_in_key_order() {
        assert!(CREATE_VIEW_SQL.starts_with("CREATE OR REPLACE VIEW job_applications_view"));
        assert!(READ_VIEW_SQL.contains("FROM job_applications_view"));
        assert!(READ_VIEW_SQL.ends_with("ORDER BY job_id, caregiver_user_id"));
    }
}
