use crate::domain::models::temperature::{TemperatureReading, TemperatureTrend};
use shared::{
    TemperatureReading as TemperatureReadingDto, TemperatureTrendResponse, TrendReading,
};

/// Maps temperature domain models to their public DTO representations
pub struct TemperatureMapper;

impl TemperatureMapper {
    pub fn reading_to_dto(reading: TemperatureReading) -> TemperatureReadingDto {
        TemperatureReadingDto {
            id: reading.id,
            child_id: reading.child_id,
            temperature: reading.temperature,
            temperature_unit: reading.unit,
            timestamp: reading.timestamp.to_rfc3339(),
            notes: reading.notes,
            created_at: reading.created_at.to_rfc3339(),
        }
    }

    pub fn trend_to_dto(trend: TemperatureTrend) -> TemperatureTrendResponse {
        TemperatureTrendResponse {
            current_temp: trend.current_temp,
            peak_temp: trend.peak_temp,
            lowest_temp: trend.lowest_temp,
            trend: trend.trend,
            trend_direction: trend.trend_direction,
            avg_temp_last_24h: trend.avg_temp_last_24h,
            readings: trend
                .readings
                .into_iter()
                .map(|entry| TrendReading {
                    timestamp: entry.timestamp.to_rfc3339(),
                    temperature: entry.temperature,
                    unit: entry.unit,
                })
                .collect(),
        }
    }
}
