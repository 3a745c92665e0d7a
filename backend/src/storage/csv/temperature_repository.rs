use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use csv::{Reader, StringRecord, Writer};
use log::info;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::child_repository::ChildRepository;
use super::connection::CsvConnection;
use crate::domain::models::temperature::TemperatureReading;
use crate::storage::traits::TemperatureStorage;
use shared::TemperatureUnit;

const HEADER: [&str; 7] = [
    "id",
    "child_id",
    "temperature",
    "unit",
    "timestamp",
    "notes",
    "created_at",
];

/// CSV-based temperature reading repository
#[derive(Clone)]
pub struct TemperatureRepository {
    connection: CsvConnection,
    child_repository: ChildRepository,
}

impl TemperatureRepository {
    /// Create a new CSV temperature repository
    pub fn new(connection: CsvConnection) -> Self {
        let child_repository = ChildRepository::new(connection.clone());
        Self {
            connection,
            child_repository,
        }
    }

    /// Resolve the directory for a child ID, failing when the child is
    /// unknown. Readings belong to exactly one child, so an unknown owner is
    /// an error rather than a fallback.
    fn child_directory_name(&self, child_id: &str) -> Result<String> {
        self.child_repository
            .find_directory_by_child_id(child_id)?
            .ok_or_else(|| anyhow::anyhow!("Child not found: {}", child_id))
    }

    fn parse_record(record: &StringRecord) -> Result<TemperatureReading> {
        let field = |index: usize| record.get(index).unwrap_or("").to_string();

        let unit = match record.get(3).unwrap_or("") {
            "C" => TemperatureUnit::C,
            "F" => TemperatureUnit::F,
            other => return Err(anyhow::anyhow!("Unknown temperature unit in CSV: {}", other)),
        };

        let notes = match record.get(5).unwrap_or("") {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(TemperatureReading {
            id: field(0),
            child_id: field(1),
            temperature: record
                .get(2)
                .unwrap_or("")
                .parse::<f64>()
                .context("Invalid temperature value in CSV")?,
            unit,
            timestamp: parse_timestamp(record.get(4).unwrap_or(""))
                .context("Invalid reading timestamp in CSV")?,
            notes,
            created_at: parse_timestamp(record.get(6).unwrap_or(""))
                .context("Invalid created_at timestamp in CSV")?,
        })
    }

    /// Read all readings for a child from their CSV file
    fn read_readings(&self, directory_name: &str) -> Result<Vec<TemperatureReading>> {
        let file_path = self.connection.get_temperatures_file_path(directory_name);
        self.connection
            .ensure_record_file_exists(&file_path, &HEADER.join(","))?;

        let file = File::open(&file_path)?;
        let mut csv_reader = Reader::from_reader(BufReader::new(file));

        let mut readings = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            readings.push(Self::parse_record(&record)?);
        }

        Ok(readings)
    }

    /// Write all readings for a child to their CSV file (atomic rewrite)
    fn write_readings(
        &self,
        directory_name: &str,
        readings: &[TemperatureReading],
    ) -> Result<()> {
        let file_path = self.connection.get_temperatures_file_path(directory_name);
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;

            let mut csv_writer = Writer::from_writer(BufWriter::new(file));
            csv_writer.write_record(HEADER)?;

            for reading in readings {
                csv_writer.write_record(&[
                    reading.id.clone(),
                    reading.child_id.clone(),
                    reading.temperature.to_string(),
                    match reading.unit {
                        TemperatureUnit::C => "C",
                        TemperatureUnit::F => "F",
                    }
                    .to_string(),
                    reading.timestamp.to_rfc3339(),
                    reading.notes.clone().unwrap_or_default(),
                    reading.created_at.to_rfc3339(),
                ])?;
            }

            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    Ok(DateTime::parse_from_rfc3339(raw)?.with_timezone(&Utc))
}

#[async_trait]
impl TemperatureStorage for TemperatureRepository {
    async fn store_reading(&self, reading: &TemperatureReading) -> Result<()> {
        let directory_name = self.child_directory_name(&reading.child_id)?;

        let mut readings = self.read_readings(&directory_name)?;
        readings.push(reading.clone());
        self.write_readings(&directory_name, &readings)?;

        info!(
            "Stored reading {} for child {}",
            reading.id, reading.child_id
        );
        Ok(())
    }

    async fn list_readings(&self, child_id: &str) -> Result<Vec<TemperatureReading>> {
        let directory_name = self.child_directory_name(child_id)?;

        let mut readings = self.read_readings(&directory_name)?;
        readings.sort_by_key(|r| r.timestamp);
        Ok(readings)
    }

    async fn delete_reading(&self, child_id: &str, reading_id: &str) -> Result<bool> {
        let directory_name = self.child_directory_name(child_id)?;

        let readings = self.read_readings(&directory_name)?;
        let original_len = readings.len();
        let remaining: Vec<TemperatureReading> = readings
            .into_iter()
            .filter(|r| r.id != reading_id)
            .collect();

        if remaining.len() == original_len {
            return Ok(false);
        }

        self.write_readings(&directory_name, &remaining)?;
        info!("Deleted reading {} for child {}", reading_id, child_id);
        Ok(true)
    }
}
