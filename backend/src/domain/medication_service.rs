use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::domain::commands::medications::{
    CreateMedicationCommand, CreateMedicationResult, DeactivateMedicationCommand,
    DeactivateMedicationResult, MedicationListQuery, MedicationListResult,
};
use crate::domain::models::medication::MedicationDefinition;
use crate::domain::validation;
use crate::storage::csv::{CsvConnection, MedicationRepository};
use crate::storage::traits::MedicationStorage;

/// Service for managing medication definitions (the prescribed regimens dose
/// logs are checked against)
#[derive(Clone)]
pub struct MedicationService {
    medication_repository: MedicationRepository,
}

impl MedicationService {
    /// Create a new MedicationService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let medication_repository = MedicationRepository::new(connection.as_ref().clone());
        Self {
            medication_repository,
        }
    }

    /// Create a new medication definition. New definitions start active.
    pub async fn create_medication(
        &self,
        command: CreateMedicationCommand,
    ) -> Result<CreateMedicationResult> {
        info!(
            "Creating medication '{}' for child {}",
            command.name, command.child_id
        );

        let (start_date, end_date) = validation::validate_new_medication(&command)?;

        let now = Utc::now();
        let medication = MedicationDefinition {
            id: MedicationDefinition::generate_id(now.timestamp_millis() as u64),
            child_id: command.child_id.clone(),
            name: command.name.trim().to_string(),
            dosage: command.dosage,
            dosage_unit: command.dosage_unit,
            frequency: command.frequency,
            max_doses_per_day: command.max_doses_per_day,
            max_total_daily_dosage: command.max_total_daily_dosage,
            start_date,
            end_date,
            is_active: true,
            created_at: now,
        };

        self.medication_repository
            .store_definition(&medication)
            .await?;

        info!(
            "Created medication {} for child {}",
            medication.id, medication.child_id
        );

        Ok(CreateMedicationResult { medication })
    }

    /// List a child's medication definitions, newest first, optionally
    /// filtered by the active flag
    pub async fn list_medications(&self, query: MedicationListQuery) -> Result<MedicationListResult> {
        let mut medications = self
            .medication_repository
            .list_definitions(&query.child_id)
            .await?;

        if let Some(is_active) = query.is_active {
            medications.retain(|m| m.is_active == is_active);
        }

        info!(
            "Found {} medications for child {}",
            medications.len(),
            query.child_id
        );

        Ok(MedicationListResult { medications })
    }

    /// Deactivate a medication definition so it no longer shows up as a
    /// current regimen. Historical dose logs keep referring to it.
    pub async fn deactivate_medication(
        &self,
        command: DeactivateMedicationCommand,
    ) -> Result<DeactivateMedicationResult> {
        info!(
            "Deactivating medication {} for child {}",
            command.medication_id, command.child_id
        );

        let mut medication = self
            .medication_repository
            .get_definition(&command.child_id, &command.medication_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!("Medication definition not found: {}", command.medication_id)
            })?;

        medication.is_active = false;
        self.medication_repository
            .update_definition(&medication)
            .await?;

        Ok(DeactivateMedicationResult { medication })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::child_service::ChildService;
    use crate::domain::commands::children::CreateChildCommand;
    use crate::domain::validation::ValidationError;
    use shared::DosageUnit;
    use tempfile::tempdir;

    async fn setup_test() -> (MedicationService, String, tempfile::TempDir) {
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

        (
            MedicationService::new(connection),
            child.child.id,
            temp_dir,
        )
    }

    fn create_command(child_id: &str, name: &str) -> CreateMedicationCommand {
        CreateMedicationCommand {
            child_id: child_id.to_string(),
            name: name.to_string(),
            dosage: 5.0,
            dosage_unit: DosageUnit::Ml,
            frequency: 6,
            max_doses_per_day: 4,
            max_total_daily_dosage: None,
            start_date: "2024-02-01".to_string(),
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_medication_starts_active() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let result = service
            .create_medication(create_command(&child_id, "Paracetamol"))
            .await
            .unwrap();
        assert!(result.medication.is_active);
        assert_eq!(result.medication.name, "Paracetamol");
        assert_eq!(result.medication.max_doses_per_day, 4);
    }

    #[tokio::test]
    async fn test_invalid_regimen_rejected() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let mut command = create_command(&child_id, "Ibuprofen");
        command.start_date = "2024-02-10".to_string();
        command.end_date = Some("2024-02-01".to_string());
        let err = service.create_medication(command).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::EndDateBeforeStartDate)
        );

        let mut command = create_command(&child_id, "Ibuprofen");
        command.max_doses_per_day = 0;
        let err = service.create_medication(command).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NonPositiveMaxDosesPerDay)
        );
    }

    #[tokio::test]
    async fn test_list_filters_by_active_flag() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let kept = service
            .create_medication(create_command(&child_id, "Paracetamol"))
            .await
            .unwrap();
        let retired = service
            .create_medication(create_command(&child_id, "Ibuprofen"))
            .await
            .unwrap();

        service
            .deactivate_medication(DeactivateMedicationCommand {
                child_id: child_id.clone(),
                medication_id: retired.medication.id.clone(),
            })
            .await
            .unwrap();

        let all = service
            .list_medications(MedicationListQuery {
                child_id: child_id.clone(),
                is_active: None,
            })
            .await
            .unwrap();
        assert_eq!(all.medications.len(), 2);

        let active = service
            .list_medications(MedicationListQuery {
                child_id: child_id.clone(),
                is_active: Some(true),
            })
            .await
            .unwrap();
        assert_eq!(active.medications.len(), 1);
        assert_eq!(active.medications[0].id, kept.medication.id);

        let inactive = service
            .list_medications(MedicationListQuery {
                child_id,
                is_active: Some(false),
            })
            .await
            .unwrap();
        assert_eq!(inactive.medications.len(), 1);
        assert_eq!(inactive.medications[0].id, retired.medication.id);
    }

    #[tokio::test]
    async fn test_deactivate_unknown_medication_errors() {
        let (service, child_id, _temp_dir) = setup_test().await;
        let result = service
            .deactivate_medication(DeactivateMedicationCommand {
                child_id,
                medication_id: "medication::missing".to_string(),
            })
            .await;
        assert!(result.is_err());
    }
}
