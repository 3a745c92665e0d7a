use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use super::{dosage_unit_from_str, dosage_unit_to_str};
use crate::domain::models::medication::MedicationLog;
use crate::storage::traits::MedicationLogStorage;

const HEADER: [&str; 8] = [
    "id",
    "medication_definition_id",
    "child_id",
    "administered_at",
    "dosage_administered",
    "dosage_unit",
    "administered_by",
    "created_at",
];

/// CSV-based dose log repository
#[derive(Clone)]
pub struct MedicationLogRepository {
    connection: CsvConnection,
    child_repository: ChildRepository,
}

impl MedicationLogRepository {
    /// Create a new CSV dose log repository
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

    fn parse_record(record: &StringRecord) -> Result<MedicationLog> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        Ok(MedicationLog {
            id: field(0),
            medication_definition_id: field(1),
            child_id: field(2),
            administered_at: DateTime::parse_from_rfc3339(record.get(3).unwrap_or(""))
                .context("Invalid administered_at timestamp in CSV")?
                .with_timezone(&Utc),
            dosage_administered: record
                .get(4)
                .unwrap_or("")
                .parse::<f64>()
                .context("Invalid dosage_administered in CSV")?,
            dosage_unit: dosage_unit_from_str(record.get(5).unwrap_or(""))?,
            administered_by: field(6),
            created_at: DateTime::parse_from_rfc3339(record.get(7).unwrap_or(""))
                .context("Invalid created_at timestamp in CSV")?
                .with_timezone(&Utc),
        })
    }

    fn read_logs(&self, directory_name: &str) -> Result<Vec<MedicationLog>> {
        let file_path = self
            .connection
            .get_medication_logs_file_path(directory_name);
        self.connection
            .ensure_record_file_exists(&file_path, &HEADER.join(","))?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut logs = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            logs.push(Self::parse_record(&record)?);
        }

        Ok(logs)
    }

    fn write_logs(&self, directory_name: &str, logs: &[MedicationLog]) -> Result<()> {
        let file_path = self
            .connection
            .get_medication_logs_file_path(directory_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(HEADER)?;

            for log in logs {
                csv_writer.write_record(&[
                    log.id.clone(),
                    log.medication_definition_id.clone(),
                    log.child_id.clone(),
                    log.administered_at.to_rfc3339(),
                    log.dosage_administered.to_string(),
                    dosage_unit_to_str(log.dosage_unit).to_string(),
                    log.administered_by.clone(),
                    log.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl MedicationLogStorage for MedicationLogRepository {
    async fn store_log(&self, log: &MedicationLog) -> Result<()> {
        let directory_name = self.child_directory_name(&log.child_id)?;

        let mut logs = self.read_logs(&directory_name)?;
        logs.push(log.clone());
        self.write_logs(&directory_name, &logs)?;

        info!("Stored dose log {} for child {}", log.id, log.child_id);
        Ok(())
    }

    async fn list_logs(&self, child_id: &str) -> Result<Vec<MedicationLog>> {
        let directory_name = self.child_directory_name(child_id)?;

        let mut logs = self.read_logs(&directory_name)?;
        // Most recent first
        logs.sort_by(|a, b| b.administered_at.cmp(&a.administered_at));
        Ok(logs)
    }

    async fn delete_log(&self, child_id: &str, log_id: &str) -> Result<bool> {
        let directory_name = self.child_directory_name(child_id)?;

        let logs = self.read_logs(&directory_name)?;
        let original_len = logs.len();
        let remaining: Vec<MedicationLog> = logs.into_iter().filter(|l| l.id != log_id).collect();

        if remaining.len() == original_len {
            return Ok(false);
        }

        self.write_logs(&directory_name, &remaining)?;
        info!("Deleted dose log {} for child {}", log_id, child_id);
        Ok(true)
    }
}
