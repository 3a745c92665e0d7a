use anyhow::Result;
use chrono::{DateTime, Duration, NaiveTime, Utc};
use log::info;
use std::sync::Arc;

use crate::domain::commands::reminders::{
    GenerateRemindersCommand, GenerateRemindersResult, ReminderListQuery, ReminderListResult,
    UpdateReminderCommand, UpdateReminderResult,
};
use crate::domain::models::medication::MedicationDefinition;
use crate::domain::models::reminder::MedicationReminder;
use crate::storage::csv::{CsvConnection, MedicationRepository, ReminderRepository};
use crate::storage::traits::{MedicationStorage, ReminderStorage};

/// How far past the start date the schedule extends when a regimen has no
/// end date.
const DEFAULT_SCHEDULE_DAYS: i64 = 30;

/// Service for generating and managing medication reminders
#[derive(Clone)]
pub struct ReminderService {
    reminder_repository: ReminderRepository,
    medication_repository: MedicationRepository,
}

impl ReminderService {
    /// Create a new ReminderService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let reminder_repository = ReminderRepository::new(connection.as_ref().clone());
        let medication_repository = MedicationRepository::new(connection.as_ref().clone());
        Self {
            reminder_repository,
            medication_repository,
        }
    }

    /// Generate the full reminder schedule for a medication definition: one
    /// slot every `frequency` hours from the start date to the end date
    /// (inclusive), or for 30 days when the regimen is open-ended.
    pub async fn generate_reminders(
        &self,
        command: GenerateRemindersCommand,
    ) -> Result<GenerateRemindersResult> {
        info!(
            "Generating reminders for medication {} (child {})",
            command.medication_definition_id, command.child_id
        );

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

        let times = Self::schedule_times(&definition)?;

        let now = Utc::now();
        let now_millis = now.timestamp_millis() as u64;
        let reminders: Vec<MedicationReminder> = times
            .into_iter()
            .enumerate()
            .map(|(index, scheduled_time)| MedicationReminder {
                id: MedicationReminder::generate_id(now_millis, index),
                medication_definition_id: definition.id.clone(),
                child_id: definition.child_id.clone(),
                scheduled_time,
                is_completed: false,
                completed_at: None,
                created_at: now,
            })
            .collect();

        self.reminder_repository.store_reminders(&reminders).await?;

        let count = reminders.len();
        info!("Generated {} reminders for medication {}", count, definition.id);

        Ok(GenerateRemindersResult {
            count,
            success_message: format!("Generated {} reminders for '{}'", count, definition.name),
        })
    }

    /// List a child's reminders, soonest first
    pub async fn list_reminders(&self, query: ReminderListQuery) -> Result<ReminderListResult> {
        let mut reminders = self
            .reminder_repository
            .list_reminders(&query.child_id)
            .await?;

        if query.pending_only {
            reminders.retain(|r| !r.is_completed);
        }

        info!(
            "Found {} reminders for child {}",
            reminders.len(),
            query.child_id
        );

        Ok(ReminderListResult { reminders })
    }

    /// Mark a reminder completed, or pending again when a caregiver undoes
    /// a mistaken tick
    pub async fn update_reminder(
        &self,
        command: UpdateReminderCommand,
    ) -> Result<UpdateReminderResult> {
        let mut reminder = self
            .reminder_repository
            .get_reminder(&command.child_id, &command.reminder_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Reminder not found: {}", command.reminder_id))?;

        reminder.is_completed = command.is_completed;
        reminder.completed_at = if command.is_completed {
            Some(Utc::now())
        } else {
            None
        };

        self.reminder_repository.update_reminder(&reminder).await?;

        info!(
            "Marked reminder {} as {}",
            reminder.id,
            if reminder.is_completed {
                "completed"
            } else {
                "pending"
            }
        );

        Ok(UpdateReminderResult { reminder })
    }

    /// Compute the scheduled administration times for a definition.
    fn schedule_times(definition: &MedicationDefinition) -> Result<Vec<DateTime<Utc>>> {
        // Validated at creation, but a zero interval read back from storage
        // would loop forever here.
        if definition.frequency == 0 {
            return Err(anyhow::anyhow!(
                "Medication {} has a zero dosing interval",
                definition.id
            ));
        }

        let start = definition.start_date.and_time(NaiveTime::MIN).and_utc();
        let end = match definition.end_date {
            Some(end_date) => end_date.and_time(NaiveTime::MIN).and_utc(),
            None => start + Duration::days(DEFAULT_SCHEDULE_DAYS),
        };

        let step = Duration::hours(i64::from(definition.frequency));
        let mut times = Vec::new();
        let mut current = start;
        while current <= end {
            times.push(current);
            current += step;
        }

        Ok(times)
    }
}
