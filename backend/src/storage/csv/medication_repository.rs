use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use csv::{Reader, StringRecord, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use super::{dosage_unit_from_str, dosage_unit_to_str};
use crate::domain::models::medication::MedicationDefinition;
use crate::storage::traits::MedicationStorage;

const HEADER: [&str; 12] = [
    "id",
    "child_id",
    "name",
    "dosage",
    "dosage_unit",
    "frequency",
    "max_doses_per_day",
    "max_total_daily_dosage",
    "start_date",
    "end_date",
    "is_active",
    "created_at",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV-based medication definition repository
#[derive(Clone)]
pub struct MedicationRepository {
    connection: CsvConnection,
    child_repository: ChildRepository,
}

impl MedicationRepository {
    /// Create a new CSV medication repository
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

    fn parse_record(record: &StringRecord) -> Result<MedicationDefinition> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let max_total_daily_dosage = match record.get(7).unwrap_or("") {
            "" => None,
            raw => Some(
                raw.parse::<f64>()
                    .context("Invalid max_total_daily_dosage in CSV")?,
            ),
        };

        let end_date = match record.get(9).unwrap_or("") {
            "" => None,
            raw => Some(
                NaiveDate::parse_from_str(raw, DATE_FORMAT).context("Invalid end_date in CSV")?,
            ),
        };

        Ok(MedicationDefinition {
            id: field(0),
            child_id: field(1),
            name: field(2),
            dosage: record
                .get(3)
                .unwrap_or("")
                .parse::<f64>()
                .context("Invalid dosage in CSV")?,
            dosage_unit: dosage_unit_from_str(record.get(4).unwrap_or(""))?,
            frequency: record
                .get(5)
                .unwrap_or("")
                .parse::<u32>()
                .context("Invalid frequency in CSV")?,
            max_doses_per_day: record
                .get(6)
                .unwrap_or("")
                .parse::<u32>()
                .context("Invalid max_doses_per_day in CSV")?,
            max_total_daily_dosage,
            start_date: NaiveDate::parse_from_str(record.get(8).unwrap_or(""), DATE_FORMAT)
                .context("Invalid start_date in CSV")?,
            end_date,
            is_active: record
                .get(10)
                .unwrap_or("")
                .parse::<bool>()
                .context("Invalid is_active flag in CSV")?,
            created_at: DateTime::parse_from_rfc3339(record.get(11).unwrap_or(""))
                .context("Invalid created_at timestamp in CSV")?
                .with_timezone(&Utc),
        })
    }

    fn read_definitions(&self, directory_name: &str) -> Result<Vec<MedicationDefinition>> {
        let file_path = self.connection.get_medications_file_path(directory_name);
        self.connection
            .ensure_record_file_exists(&file_path, &HEADER.join(","))?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut definitions = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            definitions.push(Self::parse_record(&record)?);
        }

        Ok(definitions)
    }

    fn write_definitions(
        &self,
        directory_name: &str,
        definitions: &[MedicationDefinition],
    ) -> Result<()> {
        let file_path = self.connection.get_medications_file_path(directory_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(HEADER)?;

            for definition in definitions {
                csv_writer.write_record(&[
                    definition.id.clone(),
                    definition.child_id.clone(),
                    definition.name.clone(),
                    definition.dosage.to_string(),
                    dosage_unit_to_str(definition.dosage_unit).to_string(),
                    definition.frequency.to_string(),
                    definition.max_doses_per_day.to_string(),
                    definition
                        .max_total_daily_dosage
                        .map(|v| v.to_string())
                        .unwrap_or_default(),
                    definition.start_date.format(DATE_FORMAT).to_string(),
                    definition
                        .end_date
                        .map(|d| d.format(DATE_FORMAT).to_string())
                        .unwrap_or_default(),
                    definition.is_active.to_string(),
                    definition.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

#[async_trait]
impl MedicationStorage for MedicationRepository {
    async fn store_definition(&self, definition: &MedicationDefinition) -> Result<()> {
        let directory_name = self.child_directory_name(&definition.child_id)?;

        let mut definitions = self.read_definitions(&directory_name)?;
        definitions.push(definition.clone());
        self.write_definitions(&directory_name, &definitions)?;

        info!(
            "Stored medication definition {} for child {}",
            definition.id, definition.child_id
        );
        Ok(())
    }

    async fn get_definition(
        &self,
        child_id: &str,
        medication_id: &str,
    ) -> Result<Option<MedicationDefinition>> {
        let directory_name = self.child_directory_name(child_id)?;

        let definitions = self.read_definitions(&directory_name)?;
        Ok(definitions.into_iter().find(|d| d.id == medication_id))
    }

    async fn list_definitions(&self, child_id: &str) -> Result<Vec<MedicationDefinition>> {
        let directory_name = self.child_directory_name(child_id)?;

        let mut definitions = self.read_definitions(&directory_name)?;
        // Newest first
        definitions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(definitions)
    }

    async fn update_definition(&self, definition: &MedicationDefinition) -> Result<()> {
        let directory_name = self.child_directory_name(&definition.child_id)?;

        let mut definitions = self.read_definitions(&directory_name)?;
        let slot = definitions
            .iter_mut()
            .find(|d| d.id == definition.id)
            .ok_or_else(|| {
                anyhow::anyhow!("Medication definition not found: {}", definition.id)
            })?;
        *slot = definition.clone();

        self.write_definitions(&directory_name, &definitions)?;
        info!("Updated medication definition {}", definition.id);
        Ok(())
    }
}
