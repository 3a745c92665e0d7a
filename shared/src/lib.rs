use serde::{Deserialize, Serialize};

/// Unit a temperature value was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    C,
    F,
}

/// Unit a medication dose is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DosageUnit {
    /// Tablet or pill count
    Tablets,
    /// Liquid volume in millilitres
    Ml,
}

/// Qualitative temperature trend over a reading set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

/// Direction of the temperature movement between the first and last reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// How close today's dose count is to the configured daily maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Warning,
    Dangerous,
}

/// A child whose health is being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Child {
    pub id: String,
    pub name: String,
    /// Date of birth (YYYY-MM-DD)
    pub date_of_birth: String,
    /// Optional weight in kilograms
    pub weight_kg: Option<f64>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    /// Last update timestamp (RFC 3339)
    pub updated_at: String,
}

/// Request to register a new child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
    pub date_of_birth: String,
    pub weight_kg: Option<f64>,
}

/// Response containing all registered children
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildListResponse {
    pub children: Vec<Child>,
}

/// Response after deleting a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteChildResponse {
    pub success_message: String,
}

/// One temperature measurement tied to a child and a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    pub id: String,
    pub child_id: String,
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    /// Measurement timestamp (RFC 3339)
    pub timestamp: String,
    pub notes: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Request to record a new temperature reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateTemperatureReadingRequest {
    pub child_id: String,
    pub temperature: f64,
    pub temperature_unit: TemperatureUnit,
    pub timestamp: String,
    pub notes: Option<String>,
}

/// Response containing a child's temperature readings in chronological order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReadingListResponse {
    pub readings: Vec<TemperatureReading>,
}

/// Response after deleting a temperature reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteTemperatureReadingResponse {
    pub success_message: String,
}

/// A reading as it appears inside a trend summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReading {
    /// Measurement timestamp (RFC 3339)
    pub timestamp: String,
    pub temperature: f64,
    pub unit: TemperatureUnit,
}

/// Derived temperature trend summary. Recomputed on every request, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureTrendResponse {
    pub current_temp: f64,
    pub peak_temp: f64,
    pub lowest_temp: f64,
    pub trend: Trend,
    pub trend_direction: TrendDirection,
    pub avg_temp_last_24h: f64,
    pub readings: Vec<TrendReading>,
}

/// The prescribed regimen a dose log is checked against.
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
    /// Start of the regimen (YYYY-MM-DD)
    pub start_date: String,
    /// Optional end of the regimen (YYYY-MM-DD)
    pub end_date: Option<String>,
    pub is_active: bool,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Request to create a new medication definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicationRequest {
    pub child_id: String,
    pub name: String,
    pub dosage: f64,
    pub dosage_unit: DosageUnit,
    pub frequency: u32,
    pub max_doses_per_day: u32,
    pub max_total_daily_dosage: Option<f64>,
    pub start_date: String,
    pub end_date: Option<String>,
}

/// Response containing a child's medication definitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationListResponse {
    pub medications: Vec<MedicationDefinition>,
}

/// One recorded administration of a medication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationLog {
    pub id: String,
    pub medication_definition_id: String,
    pub child_id: String,
    /// Administration timestamp (RFC 3339)
    pub administered_at: String,
    pub dosage_administered: f64,
    pub dosage_unit: DosageUnit,
    pub administered_by: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Request to record an administered dose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateMedicationLogRequest {
    pub medication_definition_id: String,
    pub child_id: String,
    pub administered_at: String,
    pub dosage_administered: f64,
    pub dosage_unit: DosageUnit,
    pub administered_by: String,
}

/// Response containing recorded doses, most recent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationLogListResponse {
    pub logs: Vec<MedicationLog>,
}

/// Response after deleting a medication log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteMedicationLogResponse {
    pub success_message: String,
}

/// Overdose-risk classification for one medication on the current day.
///
/// A `dangerous` result blocks recording a new dose; `warning` requires
/// explicit caregiver confirmation; `safe` allows it silently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoseSafetyResponse {
    pub medication_definition_id: String,
    pub doses_given_today: u32,
    pub max_doses_per_day: u32,
    pub risk: RiskLevel,
}

/// One scheduled administration slot derived from a medication definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicationReminder {
    pub id: String,
    pub medication_definition_id: String,
    pub child_id: String,
    /// Scheduled administration time (RFC 3339)
    pub scheduled_time: String,
    pub is_completed: bool,
    /// Completion timestamp (RFC 3339), present only when completed
    pub completed_at: Option<String>,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

/// Request to generate the reminder schedule for a medication definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRemindersRequest {
    pub child_id: String,
    pub medication_definition_id: String,
}

/// Response after generating reminders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRemindersResponse {
    pub count: usize,
    pub success_message: String,
}

/// Request to mark a reminder completed or pending again
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReminderRequest {
    pub child_id: String,
    pub is_completed: bool,
}

/// Response containing reminders, soonest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReminderListResponse {
    pub reminders: Vec<MedicationReminder>,
}

/// Error payload returned by the API.
///
/// `field` is set for validation failures and names the offending field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub field: Option<String>,
}
