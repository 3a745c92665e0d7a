use crate::domain::models::reminder::MedicationReminder;
use shared::MedicationReminder as MedicationReminderDto;

/// Maps reminder domain models to their public DTO representation
pub struct ReminderMapper;

impl ReminderMapper {
    pub fn to_dto(reminder: MedicationReminder) -> MedicationReminderDto {
        MedicationReminderDto {
            id: reminder.id,
            medication_definition_id: reminder.medication_definition_id,
            child_id: reminder.child_id,
            scheduled_time: reminder.scheduled_time.to_rfc3339(),
            is_completed: reminder.is_completed,
            completed_at: reminder.completed_at.map(|t| t.to_rfc3339()),
            created_at: reminder.created_at.to_rfc3339(),
        }
    }
}
