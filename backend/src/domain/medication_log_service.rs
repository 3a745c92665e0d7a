use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use log::info;
use std::sync::Arc;

use crate::domain::commands::medication_logs::{
    CheckDoseSafetyCommand, CheckDoseSafetyResult, DeleteMedicationLogCommand,
    DeleteMedicationLogResult, MedicationLogListQuery, MedicationLogListResult, RecordDoseCommand,
    RecordDoseResult,
};
use crate::domain::dose_safety;
use crate::domain::models::medication::MedicationLog;
use crate::domain::validation;
use crate::storage::csv::{CsvConnection, MedicationLogRepository, MedicationRepository};
use crate::storage::traits::{MedicationLogStorage, MedicationStorage};

/// Service for recording administered doses and classifying overdose risk
#[derive(Clone)]
pub struct MedicationLogService {
    log_repository: MedicationLogRepository,
    medication_repository: MedicationRepository,
}

impl MedicationLogService {
    /// Create a new MedicationLogService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let log_repository = MedicationLogRepository::new(connection.as_ref().clone());
        let medication_repository = MedicationRepository::new(connection.as_ref().clone());
        Self {
            log_repository,
            medication_repository,
        }
    }

    /// Record an administered dose against an existing medication definition
    pub async fn record_dose(&self, command: RecordDoseCommand) -> Result<RecordDoseResult> {
        info!(
            "Recording dose of {} for child {}",
            command.medication_definition_id, command.child_id
        );

        let administered_at = validation::validate_new_dose_log(&command)?;

        // A log must point at a real regimen
        self.medication_repository
            .get_definition(&command.child_id, &command.medication_definition_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Medication definition not found: {}",
                    command.medication_definition_id
                )
            })?;

        let now = Utc::now();
        let log = MedicationLog {
            id: MedicationLog::generate_id(now.timestamp_millis() as u64),
            medication_definition_id: command.medication_definition_id.clone(),
            child_id: command.child_id.clone(),
            administered_at,
            dosage_administered: command.dosage_administered,
            dosage_unit: command.dosage_unit,
            administered_by: command.administered_by.trim().to_string(),
            created_at: now,
        };

        self.log_repository.store_log(&log).await?;

        info!("Recorded dose log {} for child {}", log.id, log.child_id);

        Ok(RecordDoseResult { log })
    }

    /// List dose logs, most recent first, with optional definition and
    /// calendar-date filters
    pub async fn list_logs(&self, query: MedicationLogListQuery) -> Result<MedicationLogListResult> {
        let mut logs = self.log_repository.list_logs(&query.child_id).await?;

        if let Some(definition_id) = &query.medication_definition_id {
            logs.retain(|l| &l.medication_definition_id == definition_id);
        }

        if let Some(raw_date) = &query.date {
            let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
                .map_err(|_| anyhow::anyhow!("Invalid date filter (expected YYYY-MM-DD): {}", raw_date))?;
            logs.retain(|l| l.administered_at.with_timezone(&Local).date_naive() == date);
        }

        info!("Found {} dose logs for child {}", logs.len(), query.child_id);

        Ok(MedicationLogListResult { logs })
    }

    /// Delete a dose log (caregivers can remove mistaken entries)
    pub async fn delete_log(
        &self,
        command: DeleteMedicationLogCommand,
    ) -> Result<DeleteMedicationLogResult> {
        info!(
            "Deleting dose log {} for child {}",
            command.log_id, command.child_id
        );

        let deleted = self
            .log_repository
            .delete_log(&command.child_id, &command.log_id)
            .await?;

        if !deleted {
            return Err(anyhow::anyhow!("Dose log not found: {}", command.log_id));
        }

        Ok(DeleteMedicationLogResult {
            success_message: "Dose log deleted successfully".to_string(),
        })
    }

    /// Classify how close today's dose count is to the definition's daily
    /// maximum. "Today" is the local calendar date at the time of the call.
    ///
    /// The caller is expected to block a new dose on `dangerous` and ask for
    /// confirmation on `warning`; this service only classifies.
    pub async fn check_dose_safety(
        &self,
        command: CheckDoseSafetyCommand,
    ) -> Result<CheckDoseSafetyResult> {
        let definition = self
            .medication_repository
            .get_definition(&command.child_id, &command.medication_definition_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Medication definition not found: {}",
                    command.medication_definition_id
                )
            })?;

        let today = Local::now().date_naive();
        let doses_given_today = self
            .count_doses_on(&command.child_id, &definition.id, today)
            .await?;

        let risk = dose_safety::evaluate_risk(doses_given_today, definition.max_doses_per_day)?;

        info!(
            "Dose safety for {} today: {}/{} -> {:?}",
            definition.id, doses_given_today, definition.max_doses_per_day, risk
        );

        Ok(CheckDoseSafetyResult {
            medication_definition_id: definition.id,
            doses_given_today,
            max_doses_per_day: definition.max_doses_per_day,
            risk,
        })
    }

    /// Count doses of one medication administered on a local calendar date
    async fn count_doses_on(
        &self,
        child_id: &str,
        definition_id: &str,
        date: NaiveDate,
    ) -> Result<u32> {
        let logs = self.log_repository.list_logs(child_id).await?;
        let count = logs
            .iter()
            .filter(|l| l.medication_definition_id == definition_id)
            .filter(|l| l.administered_at.with_timezone(&Local).date_naive() == date)
            .count();
        Ok(count as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::child_service::ChildService;
    use crate::domain::commands::children::CreateChildCommand;
    use crate::domain::commands::medications::CreateMedicationCommand;
    use crate::domain::medication_service::MedicationService;
    use crate::domain::validation::ValidationError;
    use shared::{DosageUnit, RiskLevel};
    use tempfile::tempdir;

    struct Fixture {
        service: MedicationLogService,
        child_id: String,
        medication_id: String,
        _temp_dir: tempfile::TempDir,
    }

    async fn setup_test() -> Fixture {
        let temp_dir = tempdir().unwrap();
        let connection = Arc::new(CsvConnection::new(temp_dir.path()).unwrap());

        let child = ChildService::new(connection.clone())
            .create_child(CreateChildCommand {
                name: "Emma".to_string(),
                date_of_birth: "2019-06-01".to_string(),
                weight_kg: None,
            })
            .await
            .unwrap();

        let medication = MedicationService::new(connection.clone())
            .create_medication(CreateMedicationCommand {
                child_id: child.child.id.clone(),
                name: "Paracetamol".to_string(),
                dosage: 5.0,
                dosage_unit: DosageUnit::Ml,
                frequency: 6,
                max_doses_per_day: 4,
                max_total_daily_dosage: None,
                start_date: "2024-02-01".to_string(),
                end_date: None,
            })
            .await
            .unwrap();

        Fixture {
            service: MedicationLogService::new(connection),
            child_id: child.child.id,
            medication_id: medication.medication.id,
            _temp_dir: temp_dir,
        }
    }

    fn dose_command(fixture: &Fixture, administered_at: chrono::DateTime<Utc>) -> RecordDoseCommand {
        RecordDoseCommand {
            medication_definition_id: fixture.medication_id.clone(),
            child_id: fixture.child_id.clone(),
            administered_at: administered_at.to_rfc3339(),
            dosage_administered: 5.0,
            dosage_unit: DosageUnit::Ml,
            administered_by: "Mum".to_string(),
        }
    }

    #[tokio::test]
    async fn test_record_and_list_doses() {
        let fixture = setup_test().await;

        fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now()))
            .await
            .unwrap();

        let listed = fixture
            .service
            .list_logs(MedicationLogListQuery {
                child_id: fixture.child_id.clone(),
                medication_definition_id: Some(fixture.medication_id.clone()),
                date: None,
            })
            .await
            .unwrap();
        assert_eq!(listed.logs.len(), 1);
        assert_eq!(listed.logs[0].administered_by, "Mum");
    }

    #[tokio::test]
    async fn test_dose_against_unknown_medication_rejected() {
        let fixture = setup_test().await;

        let mut command = dose_command(&fixture, Utc::now());
        command.medication_definition_id = "medication::missing".to_string();
        assert!(fixture.service.record_dose(command).await.is_err());
    }

    #[tokio::test]
    async fn test_dose_validation_rejects_blank_administered_by() {
        let fixture = setup_test().await;

        let mut command = dose_command(&fixture, Utc::now());
        command.administered_by = "  ".to_string();
        let err = fixture.service.record_dose(command).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EmptyAdministeredBy)
        );
    }

    #[tokio::test]
    async fn test_risk_escalates_with_todays_doses() {
        let fixture = setup_test().await;
        let check = CheckDoseSafetyCommand {
            child_id: fixture.child_id.clone(),
            medication_definition_id: fixture.medication_id.clone(),
        };

        // 0 of 4
        let result = fixture.service.check_dose_safety(check.clone()).await.unwrap();
        assert_eq!(result.risk, RiskLevel::Safe);
        assert_eq!(result.doses_given_today, 0);

        // 2 of 4 -> still safe
        for _ in 0..2 {
            fixture
                .service
                .record_dose(dose_command(&fixture, Utc::now()))
                .await
                .unwrap();
        }
        let result = fixture.service.check_dose_safety(check.clone()).await.unwrap();
        assert_eq!(result.risk, RiskLevel::Safe);

        // 3 of 4 -> warning
        fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now()))
            .await
            .unwrap();
        let result = fixture.service.check_dose_safety(check.clone()).await.unwrap();
        assert_eq!(result.risk, RiskLevel::Warning);
        assert_eq!(result.doses_given_today, 3);

        // 4 of 4 -> dangerous
        fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now()))
            .await
            .unwrap();
        let result = fixture.service.check_dose_safety(check).await.unwrap();
        assert_eq!(result.risk, RiskLevel::Dangerous);
    }

    #[tokio::test]
    async fn test_yesterdays_doses_do_not_count_today() {
        let fixture = setup_test().await;

        fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now() - chrono::Duration::days(2)))
            .await
            .unwrap();

        let result = fixture
            .service
            .check_dose_safety(CheckDoseSafetyCommand {
                child_id: fixture.child_id.clone(),
                medication_definition_id: fixture.medication_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(result.doses_given_today, 0);
        assert_eq!(result.risk, RiskLevel::Safe);
    }

    #[tokio::test]
    async fn test_date_filter_on_log_listing() {
        let fixture = setup_test().await;

        let old = Utc::now() - chrono::Duration::days(3);
        fixture
            .service
            .record_dose(dose_command(&fixture, old))
            .await
            .unwrap();
        fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now()))
            .await
            .unwrap();

        let old_local_date = old.with_timezone(&Local).date_naive();
        let filtered = fixture
            .service
            .list_logs(MedicationLogListQuery {
                child_id: fixture.child_id.clone(),
                medication_definition_id: None,
                date: Some(old_local_date.format("%Y-%m-%d").to_string()),
            })
            .await
            .unwrap();
        assert_eq!(filtered.logs.len(), 1);

        let bad_filter = fixture
            .service
            .list_logs(MedicationLogListQuery {
                child_id: fixture.child_id.clone(),
                medication_definition_id: None,
                date: Some("02/10/2024".to_string()),
            })
            .await;
        assert!(bad_filter.is_err());
    }

    #[tokio::test]
    async fn test_delete_log() {
        let fixture = setup_test().await;

        let recorded = fixture
            .service
            .record_dose(dose_command(&fixture, Utc::now()))
            .await
            .unwrap();

        fixture
            .service
            .delete_log(DeleteMedicationLogCommand {
                child_id: fixture.child_id.clone(),
                log_id: recorded.log.id.clone(),
            })
            .await
            .unwrap();

        let again = fixture
            .service
            .delete_log(DeleteMedicationLogCommand {
                child_id: fixture.child_id.clone(),
                log_id: recorded.log.id,
            })
            .await;
        assert!(again.is_err());
    }
}
