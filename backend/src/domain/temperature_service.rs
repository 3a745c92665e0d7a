use anyhow::Result;
use chrono::Utc;
use log::info;
use std::sync::Arc;

use crate::domain::commands::temperatures::{
    DeleteTemperatureCommand, DeleteTemperatureResult, GetTrendCommand, GetTrendResult,
    RecordTemperatureCommand, RecordTemperatureResult, TemperatureListQuery, TemperatureListResult,
};
use crate::domain::models::temperature::TemperatureReading;
use crate::domain::temperature_trend;
use crate::domain::validation;
use crate::storage::csv::{CsvConnection, TemperatureRepository};
use crate::storage::traits::TemperatureStorage;

/// Service for recording temperature readings and deriving trend summaries
#[derive(Clone)]
pub struct TemperatureService {
    temperature_repository: TemperatureRepository,
}

impl TemperatureService {
    /// Create a new TemperatureService
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        let temperature_repository = TemperatureRepository::new(connection.as_ref().clone());
        Self {
            temperature_repository,
        }
    }

    /// Record a new temperature reading
    pub async fn record_reading(
        &self,
        command: RecordTemperatureCommand,
    ) -> Result<RecordTemperatureResult> {
        info!(
            "Recording temperature for child {}: {} {:?}",
            command.child_id, command.temperature, command.temperature_unit
        );

        let timestamp = validation::validate_new_reading(&command)?;

        let notes = command
            .notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        let now = Utc::now();
        let reading = TemperatureReading {
            id: TemperatureReading::generate_id(now.timestamp_millis() as u64),
            child_id: command.child_id.clone(),
            temperature: command.temperature,
            unit: command.temperature_unit,
            timestamp,
            notes,
            created_at: now,
        };

        self.temperature_repository.store_reading(&reading).await?;

        info!("Recorded reading {} for child {}", reading.id, reading.child_id);

        Ok(RecordTemperatureResult { reading })
    }

    /// List a child's readings in chronological order
    pub async fn list_readings(&self, query: TemperatureListQuery) -> Result<TemperatureListResult> {
        let readings = self
            .temperature_repository
            .list_readings(&query.child_id)
            .await?;

        info!(
            "Found {} readings for child {}",
            readings.len(),
            query.child_id
        );

        Ok(TemperatureListResult { readings })
    }

    /// Delete a reading (caregivers can remove mistaken entries)
    pub async fn delete_reading(
        &self,
        command: DeleteTemperatureCommand,
    ) -> Result<DeleteTemperatureResult> {
        info!(
            "Deleting reading {} for child {}",
            command.reading_id, command.child_id
        );

        let deleted = self
            .temperature_repository
            .delete_reading(&command.child_id, &command.reading_id)
            .await?;

        if !deleted {
            return Err(anyhow::anyhow!(
                "Temperature reading not found: {}",
                command.reading_id
            ));
        }

        Ok(DeleteTemperatureResult {
            success_message: "Temperature reading deleted successfully".to_string(),
        })
    }

    /// Compute the trend summary over all of a child's readings
    pub async fn get_trend(&self, command: GetTrendCommand) -> Result<GetTrendResult> {
        let readings = self
            .temperature_repository
            .list_readings(&command.child_id)
            .await?;

        let trend = temperature_trend::calculate_trend(&readings);

        info!(
            "Computed trend for child {} over {} readings: {:?}/{:?}",
            command.child_id,
            trend.readings.len(),
            trend.trend,
            trend.trend_direction
        );

        Ok(GetTrendResult { trend })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::child_service::ChildService;
    use crate::domain::commands::children::CreateChildCommand;
    use crate::domain::validation::ValidationError;
    use shared::{TemperatureUnit, Trend, TrendDirection};
    use tempfile::tempdir;

    async fn setup_test() -> (TemperatureService, String, tempfile::TempDir) {
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
            TemperatureService::new(connection),
            child.child.id,
            temp_dir,
        )
    }

    fn record_command(child_id: &str, temperature: f64, timestamp: &str) -> RecordTemperatureCommand {
        RecordTemperatureCommand {
            child_id: child_id.to_string(),
            temperature,
            temperature_unit: TemperatureUnit::C,
            timestamp: timestamp.to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_record_and_list_readings() {
        let (service, child_id, _temp_dir) = setup_test().await;

        service
            .record_reading(record_command(&child_id, 38.2, "2024-02-10T12:00:00Z"))
            .await
            .unwrap();
        service
            .record_reading(record_command(&child_id, 37.1, "2024-02-10T06:00:00Z"))
            .await
            .unwrap();

        let listed = service
            .list_readings(TemperatureListQuery {
                child_id: child_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(listed.readings.len(), 2);
        // chronological order regardless of insertion order
        assert_eq!(listed.readings[0].temperature, 37.1);
        assert_eq!(listed.readings[1].temperature, 38.2);
    }

    #[tokio::test]
    async fn test_out_of_range_reading_rejected() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let err = service
            .record_reading(record_command(&child_id, 44.0, "2024-02-10T12:00:00Z"))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::TemperatureOutOfRange { .. })
        ));

        // nothing was persisted
        let listed = service
            .list_readings(TemperatureListQuery {
                child_id: child_id.clone(),
            })
            .await
            .unwrap();
        assert!(listed.readings.is_empty());
    }

    #[tokio::test]
    async fn test_blank_notes_are_dropped() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let mut command = record_command(&child_id, 38.0, "2024-02-10T12:00:00Z");
        command.notes = Some("   ".to_string());
        let result = service.record_reading(command).await.unwrap();
        assert_eq!(result.reading.notes, None);
    }

    #[tokio::test]
    async fn test_trend_over_recorded_readings() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let base = Utc::now() - chrono::Duration::hours(10);
        service
            .record_reading(record_command(&child_id, 36.5, &base.to_rfc3339()))
            .await
            .unwrap();
        service
            .record_reading(record_command(
                &child_id,
                37.8,
                &(base + chrono::Duration::hours(8)).to_rfc3339(),
            ))
            .await
            .unwrap();

        let result = service
            .get_trend(GetTrendCommand {
                child_id: child_id.clone(),
            })
            .await
            .unwrap();
        assert_eq!(result.trend.trend_direction, TrendDirection::Up);
        assert_eq!(result.trend.trend, Trend::Worsening);
        assert_eq!(result.trend.current_temp, 37.8);
        assert!((result.trend.avg_temp_last_24h - 37.15).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_trend_for_child_without_readings() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let result = service
            .get_trend(GetTrendCommand { child_id })
            .await
            .unwrap();
        assert_eq!(result.trend.trend, Trend::Stable);
        assert_eq!(result.trend.trend_direction, TrendDirection::Flat);
        assert_eq!(result.trend.current_temp, 0.0);
        assert!(result.trend.readings.is_empty());
    }

    #[tokio::test]
    async fn test_delete_reading() {
        let (service, child_id, _temp_dir) = setup_test().await;

        let recorded = service
            .record_reading(record_command(&child_id, 38.0, "2024-02-10T12:00:00Z"))
            .await
            .unwrap();

        service
            .delete_reading(DeleteTemperatureCommand {
                child_id: child_id.clone(),
                reading_id: recorded.reading.id.clone(),
            })
            .await
            .unwrap();

        let again = service
            .delete_reading(DeleteTemperatureCommand {
                child_id,
                reading_id: recorded.reading.id,
            })
            .await;
        assert!(again.is_err());
    }
}
