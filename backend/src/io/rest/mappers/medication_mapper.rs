use crate::domain::models::medication::{MedicationDefinition, MedicationLog};
use shared::{MedicationDefinition as MedicationDefinitionDto, MedicationLog as MedicationLogDto};

/// Maps medication domain models to their public DTO representations
pub struct MedicationMapper;

impl MedicationMapper {
    pub fn definition_to_dto(definition: MedicationDefinition) -> MedicationDefinitionDto {
        MedicationDefinitionDto {
            id: definition.id,
            child_id: definition.child_id,
            name: definition.name,
            dosage: definition.dosage,
            dosage_unit: definition.dosage_unit,
            frequency: definition.frequency,
            max_doses_per_day: definition.max_doses_per_day,
            max_total_daily_dosage: definition.max_total_daily_dosage,
            start_date: definition.start_date.format("%Y-%m-%d").to_string(),
            end_date: definition
                .end_date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            is_active: definition.is_active,
            created_at: definition.created_at.to_rfc3339(),
        }
    }

    pub fn log_to_dto(log: MedicationLog) -> MedicationLogDto {
        MedicationLogDto {
            id: log.id,
            medication_definition_id: log.medication_definition_id,
            child_id: log.child_id,
            administered_at: log.administered_at.to_rfc3339(),
            dosage_administered: log.dosage_administered,
            dosage_unit: log.dosage_unit,
            administered_by: log.administered_by,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}
