//! Domain-level command and query types.
//!
//! These structs are used by services inside the domain layer and are **not**
//! exposed over the public API. The REST layer is responsible for mapping the
//! public DTOs defined in the `shared` crate to these internal types.

pub mod children {
    use crate::domain::models::child::Child;

    /// Input for registering a new child.
    #[derive(Debug, Clone)]
    pub struct CreateChildCommand {
        pub name: String,
        /// Date of birth as received from the client (YYYY-MM-DD)
        pub date_of_birth: String,
        pub weight_kg: Option<f64>,
    }

    /// Result of registering a child.
    #[derive(Debug, Clone)]
    pub struct CreateChildResult {
        pub child: Child,
    }

    /// Input for fetching a single child.
    #[derive(Debug, Clone)]
    pub struct GetChildCommand {
        pub child_id: String,
    }

    /// Result of fetching a single child.
    #[derive(Debug, Clone)]
    pub struct GetChildResult {
        pub child: Option<Child>,
    }

    /// Result of listing all children.
    #[derive(Debug, Clone)]
    pub struct ListChildrenResult {
        pub children: Vec<Child>,
    }

    /// Input for deleting a child and all of its records.
    #[derive(Debug, Clone)]
    pub struct DeleteChildCommand {
        pub child_id: String,
    }

    /// Result of deleting a child.
    #[derive(Debug, Clone)]
    pub struct DeleteChildResult {
        pub success_message: String,
    }
}

pub mod temperatures {
    use crate::domain::models::temperature::{TemperatureReading, TemperatureTrend};
    use shared::TemperatureUnit;

    /// Input for recording a new temperature reading.
    #[derive(Debug, Clone)]
    pub struct RecordTemperatureCommand {
        pub child_id: String,
        pub temperature: f64,
        pub temperature_unit: TemperatureUnit,
        /// Measurement timestamp as received from the client (RFC 3339)
        pub timestamp: String,
        pub notes: Option<String>,
    }

    /// Result of recording a reading.
    #[derive(Debug, Clone)]
    pub struct RecordTemperatureResult {
        pub reading: TemperatureReading,
    }

    /// Query parameters for listing a child's readings.
    #[derive(Debug, Clone)]
    pub struct TemperatureListQuery {
        pub child_id: String,
    }

    /// Result of listing readings, in chronological order.
    #[derive(Debug, Clone)]
    pub struct TemperatureListResult {
        pub readings: Vec<TemperatureReading>,
    }

    /// Input for deleting a reading.
    #[derive(Debug, Clone)]
    pub struct DeleteTemperatureCommand {
        pub child_id: String,
        pub reading_id: String,
    }

    /// Result of deleting a reading.
    #[derive(Debug, Clone)]
    pub struct DeleteTemperatureResult {
        pub success_message: String,
    }

    /// Input for computing a child's temperature trend.
    #[derive(Debug, Clone)]
    pub struct GetTrendCommand {
        pub child_id: String,
    }

    /// Result of the trend computation.
    #[derive(Debug, Clone)]
    pub struct GetTrendResult {
        pub trend: TemperatureTrend,
    }
}

pub mod medications {
    use crate::domain::models::medication::MedicationDefinition;
    use shared::DosageUnit;

    /// Input for creating a new medication definition.
    #[derive(Debug, Clone)]
    pub struct CreateMedicationCommand {
        pub child_id: String,
        pub name: String,
        pub dosage: f64,
        pub dosage_unit: DosageUnit,
        /// Dosing interval in hours
        pub frequency: u32,
        pub max_doses_per_day: u32,
        pub max_total_daily_dosage: Option<f64>,
        /// Regimen start as received from the client (YYYY-MM-DD)
        pub start_date: String,
        /// Optional regimen end as received from the client (YYYY-MM-DD)
        pub end_date: Option<String>,
    }

    /// Result of creating a medication definition.
    #[derive(Debug, Clone)]
    pub struct CreateMedicationResult {
        pub medication: MedicationDefinition,
    }

    /// Query parameters for listing a child's medication definitions.
    #[derive(Debug, Clone)]
    pub struct MedicationListQuery {
        pub child_id: String,
        /// When set, only definitions whose active flag matches are returned
        pub is_active: Option<bool>,
    }

    /// Result of listing medication definitions, newest first.
    #[derive(Debug, Clone)]
    pub struct MedicationListResult {
        pub medications: Vec<MedicationDefinition>,
    }

    /// Input for deactivating a medication definition.
    #[derive(Debug, Clone)]
    pub struct DeactivateMedicationCommand {
        pub child_id: String,
        pub medication_id: String,
    }

    /// Result of deactivating a medication definition.
    #[derive(Debug, Clone)]
    pub struct DeactivateMedicationResult {
        pub medication: MedicationDefinition,
    }
}

pub mod medication_logs {
    use crate::domain::models::medication::MedicationLog;
    use shared::{DosageUnit, RiskLevel};

    /// Input for recording an administered dose.
    #[derive(Debug, Clone)]
    pub struct RecordDoseCommand {
        pub medication_definition_id: String,
        pub child_id: String,
        /// Administration timestamp as received from the client (RFC 3339)
        pub administered_at: String,
        pub dosage_administered: f64,
        pub dosage_unit: DosageUnit,
        pub administered_by: String,
    }

    /// Result of recording a dose.
    #[derive(Debug, Clone)]
    pub struct RecordDoseResult {
        pub log: MedicationLog,
    }

    /// Query parameters for listing dose logs.
    #[derive(Debug, Clone)]
    pub struct MedicationLogListQuery {
        pub child_id: String,
        pub medication_definition_id: Option<String>,
        /// Restrict to one calendar date (YYYY-MM-DD, local time)
        pub date: Option<String>,
    }

    /// Result of listing dose logs, most recent first.
    #[derive(Debug, Clone)]
    pub struct MedicationLogListResult {
        pub logs: Vec<MedicationLog>,
    }

    /// Input for deleting a dose log.
    #[derive(Debug, Clone)]
    pub struct DeleteMedicationLogCommand {
        pub child_id: String,
        pub log_id: String,
    }

    /// Result of deleting a dose log.
    #[derive(Debug, Clone)]
    pub struct DeleteMedicationLogResult {
        pub success_message: String,
    }

    /// Input for classifying today's overdose risk for one medication.
    #[derive(Debug, Clone)]
    pub struct CheckDoseSafetyCommand {
        pub child_id: String,
        pub medication_definition_id: String,
    }

    /// Result of the overdose-risk classification.
    #[derive(Debug, Clone)]
    pub struct CheckDoseSafetyResult {
        pub medication_definition_id: String,
        pub doses_given_today: u32,
        pub max_doses_per_day: u32,
        pub risk: RiskLevel,
    }
}

pub mod reminders {
    use crate::domain::models::reminder::MedicationReminder;

    /// Input for generating the reminder schedule of a medication definition.
    #[derive(Debug, Clone)]
    pub struct GenerateRemindersCommand {
        pub child_id: String,
        pub medication_definition_id: String,
    }

    /// Result of generating reminders.
    #[derive(Debug, Clone)]
    pub struct GenerateRemindersResult {
        pub count: usize,
        pub success_message: String,
    }

    /// Query parameters for listing reminders.
    #[derive(Debug, Clone)]
    pub struct ReminderListQuery {
        pub child_id: String,
        /// When true, only not-yet-completed reminders are returned
        pub pending_only: bool,
    }

    /// Result of listing reminders, soonest first.
    #[derive(Debug, Clone)]
    pub struct ReminderListResult {
        pub reminders: Vec<MedicationReminder>,
    }

    /// Input for marking a reminder completed or pending again.
    #[derive(Debug, Clone)]
    pub struct UpdateReminderCommand {
        pub child_id: String,
        pub reminder_id: String,
        pub is_completed: bool,
    }

    /// Result of updating a reminder.
    #[derive(Debug, Clone)]
    pub struct UpdateReminderResult {
        pub reminder: MedicationReminder,
    }
}
