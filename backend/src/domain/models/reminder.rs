use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One scheduled administration slot derived from a medication definition's
/// dosing interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationReminder {
    pub id: String,
    pub medication_definition_id: String,
    pub child_id: String,
    pub scheduled_time: DateTime<Utc>,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl MedicationReminder {
    /// Generate a unique reminder ID. Reminders are created in batches, so
    /// the position within the batch keeps IDs unique for a single instant.
    /// Format: reminder::<epoch_millis>-<index>
    pub fn generate_id(timestamp_millis: u64, index: usize) -> String {
        format!("reminder::{}-{}", timestamp_millis, index)
    }
}
