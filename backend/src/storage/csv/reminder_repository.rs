use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use crate::domain::models::reminder::MedicationReminder;
use crate::storage::traits::ReminderStorage;

const HEADER: [&str; 7] = [
    "id",
    "medication_definition_id",
    "child_id",
    "scheduled_time",
    "is_completed",
    "completed_at",
    "created_at",
];

/// CSV-based reminder repository
#[derive(Clone)]
pub struct ReminderRepository {
    connection: CsvConnection,
    child_repository: ChildRepository,
}

impl ReminderRepository {
    /// Create a new CSV reminder repository
    pub fn new(connection: CsvConnection) -> Self {
        let child_repository = ChildRepository::new(connection.clone());
        Self {
            connection,
            child_repository,
        }
    }

    fn child_directory_name(&self, child_id: &str) -> Result<String> {
        self.child_repository
            .find_directory_by_child_id(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))
    }

    fn parse_record(record: &StringRecord) -> Result<MedicationReminder> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let completed_at = match record.get(5).unwrap_or("") {
            "" => None,
            raw => Some(
                DateTime::parse_from_rfc3339(raw)
                    .context("Invalid completed_at timestamp in CSV")?
                    .with_timezone(&Utc),
            ),
        };

        Ok(MedicationReminder {
            id: field(0),
            medication_definition_id: field(1),
            child_id: field(2),
            scheduled_time: DateTime::parse_from_rfc3339(record.get(3).unwrap_or(""))
                .context("Invalid scheduled_time timestamp in CSV")?
                .with_timezone(&Utc),
            is_completed: record
                .get(4)
                .unwrap_or("")
                .parse::<bool>()
                .context("Invalid is_completed flag in CSV")?,
            completed_at,
            created_at: DateTime::parse_from_rfc3339(record.get(6).unwrap_or(""))
                .context("Invalid created_at timestamp in CSV")?
                .with_timezone(&Utc),
        })
    }

    fn read_reminders(&self, directory_name: &str) -> Result<Vec<MedicationReminder>> {
        let file_path = self.connection.get_reminders_file_path(directory_name);
        self.connection
            .ensure_record_file_exists(&file_path, &HEADER.join(","))?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut reminders = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            reminders.push(Self::parse_record(&record)?);
        }

        Ok(reminders)
    }

    fn write_reminders(
        &self,
        directory_name: &str,
        reminders: &[MedicationReminder],
    ) -> Result<()> {
        let file_path = self.connection.get_reminders_file_path(directory_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(HEADER)?;

            for reminder in reminders {
                csv_writer.write_record(&[
                    reminder.id.clone(),
                    reminder.medication_definition_id.clone(),
                    reminder.child_id.clone(),
                    reminder.scheduled_time.to_rfc3339(),
                    reminder.is_completed.to_string(),
                    reminder
                        .completed_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default(),
                    reminder.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl ReminderStorage for ReminderRepository {
    async fn store_reminders(&self, reminders: &[MedicationReminder]) -> Result<()> {
        let Some(first) = reminders.first() else {
            return Ok(());
        };
        let directory_name = self.child_directory_name(&first.child_id)?;

        let mut all = self.read_reminders(&directory_name)?;
        all.extend_from_slice(reminders);
        self.write_reminders(&directory_name, &all)?;

        info!(
            "Stored {} reminders for child {}",
            reminders.len(),
            first.child_id
        );
        Ok(())
    }

    async fn list_reminders(&self, child_id: &str) -> Result<Vec<MedicationReminder>> {
        let directory_name = self.child_directory_name(child_id)?;

        let mut reminders = self.read_reminders(&directory_name)?;
        // Soonest first
        reminders.sort_by_key(|r| r.scheduled_time);
        Ok(reminders)
    }

    async fn get_reminder(
        &self,
        child_id: &str,
        reminder_id: &str,
    ) -> Result<Option<MedicationReminder>> {
        let directory_name = self.child_directory_name(child_id)?;

        let reminders = self.read_reminders(&directory_name)?;
        Ok(reminders.into_iter().find(|r| r.id == reminder_id))
    }

    async fn update_reminder(&self, reminder: &MedicationReminder) -> Result<()> {
        let directory_name = self.child_directory_name(&reminder.child_id)?;

        let mut reminders = self.read_reminders(&directory_name)?;
        let slot = reminders
            .iter_mut()
            .find(|r| r.id == reminder.id)
            .ok_or_else(|| anyhow::anyhow!("Reminder not found: {}", reminder.id))?;
        *slot = reminder.clone();

        self.write_reminders(&directory_name, &reminders)?;
        info!("Updated reminder {}", reminder.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::child::Child;
    use crate::storage::traits::ChildStorage;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn setup_test_repo() -> (ReminderRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();

        let now = Utc::now();
        let child = Child {
            id: "child::1".to_string(),
            name: "Emma".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2019, 6, 1).unwrap(),
            weight_kg: None,
            created_at: now,
            updated_at: now,
        };
        ChildRepository::new(connection.clone())
            .store_child(&child)
            .await
            .unwrap();

        (ReminderRepository::new(connection), temp_dir)
    }

    fn reminder(id: &str, scheduled: &str) -> MedicationReminder {
        MedicationReminder {
            id: id.to_string(),
            medication_definition_id: "medication::1".to_string(),
            child_id: "child::1".to_string(),
            scheduled_time: DateTime::parse_from_rfc3339(scheduled)
                .unwrap()
                .with_timezone(&Utc),
            is_completed: false,
            completed_at: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_store_batch_and_list_soonest_first() {
        let (repo, _temp_dir) = setup_test_repo().await;

        repo.store_reminders(&[
            reminder("reminder::2", "2024-02-10T12:00:00Z"),
            reminder("reminder::1", "2024-02-10T06:00:00Z"),
        ])
        .await
        .unwrap();

        let reminders = repo.list_reminders("child::1").await.unwrap();
        assert_eq!(reminders.len(), 2);
        assert_eq!(reminders[0].id, "reminder::1");
        assert_eq!(reminders[1].id, "reminder::2");
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_no_op() {
        let (repo, _temp_dir) = setup_test_repo().await;
        repo.store_reminders(&[]).await.unwrap();
        assert!(repo.list_reminders("child::1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_completion_round_trips() {
        let (repo, _temp_dir) = setup_test_repo().await;
        let mut stored = reminder("reminder::1", "2024-02-10T06:00:00Z");
        repo.store_reminders(std::slice::from_ref(&stored))
            .await
            .unwrap();

        stored.is_completed = true;
        stored.completed_at = Some(Utc::now());
        repo.update_reminder(&stored).await.unwrap();

        let loaded = repo
            .get_reminder("child::1", "reminder::1")
            .await
            .unwrap()
            .unwrap();
        assert!(loaded.is_completed);
        assert!(loaded.completed_at.is_some());
    }
}
