//! Domain models for medication definitions and administered-dose logs.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::DosageUnit;

use super::random_suffix;

/// The prescribed regimen (dosage, interval, daily caps) dose logs are
/// checked against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationDefinition {
    pub id: String,
    pub child_id: String,
    pub name: String,
    pub dosage: f64,
    pub dosage_unit: DosageUnit,
    /// Dosing interval in hours
    pub frequency: u32,
    pub max_doses_per_day: u32,
    pub max_total_daily_dosage: Option<f64>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl MedicationDefinition {
    /// Generate a unique medication definition ID.
    /// Format: medication::<epoch_millis>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("medication::{}-{}", timestamp_millis, random_suffix(4))
    }
}

/// One recorded administration of a medication. The child ID is carried
/// redundantly alongside the definition ID for query convenience.
/// Immutable once created; deletable by a caregiver to correct mistakes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationLog {
    pub id: String,
    pub medication_definition_id: String,
    pub child_id: String,
    pub administered_at: DateTime<Utc>,
    pub dosage_administered: f64,
    pub dosage_unit: DosageUnit,
    pub administered_by: String,
    pub created_at: DateTime<Utc>,
}

impl MedicationLog {
    /// Generate a unique dose log ID.
    /// Format: medlog::<epoch_millis>-<random_suffix>
    pub fn generate_id(timestamp_millis: u64) -> String {
        format!("medlog::{}-{}", timestamp_millis, random_suffix(4))
    }
}
