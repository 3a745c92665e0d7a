//! Domain models for temperature readings and the derived trend summary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{TemperatureUnit, Trend, TrendDirection};

use super::random_suffix;

/// One temperature measurement tied to a child and a timestamp.
/// Immutable once created; deletable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub id: String,
    pub child_id: String,
    pub temperature: f64,
    pub unit: TemperatureUnit,
    pub timestamp: DateTime<Utc>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TemperatureReading {
    /// Generate a unique reading ID.
    /// Format: reading::<epoch_millis>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("reading::{}-{}", timestamp_millis, random_suffix(4))
    }
}

/// One entry of the sorted reading list inside a trend summary, re-tagged
/// with the reading's original unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendEntry {
    pub timestamp: DateTime<Utc>,
    pub temperature: f64,
    pub unit: TemperatureUnit,
}

/// Derived current/peak/low summary of a reading set.
/// Pure function output, owned by the caller; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTrend {
    pub current_temp: f64,
    pub peak_temp: f64,
    pub lowest_temp: f64,
    pub trend: Trend,
    pub trend_direction: TrendDirection,
    pub avg_temp_last_24h: f64,
    pub readings: Vec<TrendEntry>,
}
