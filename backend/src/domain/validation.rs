//! Domain validation rules.
//!
//! Applied at entity-creation boundaries, before anything is persisted. Each
//! rule failure carries the offending field so the REST layer can hand the
//! client an actionable error. A rejected command never partially persists
//! an entity; the services call these functions before touching storage.

use chrono::{DateTime, NaiveDate, Utc};
use shared::TemperatureUnit;

use crate::domain::commands::children::CreateChildCommand;
use crate::domain::commands::medication_logs::RecordDoseCommand;
use crate::domain::commands::medications::CreateMedicationCommand;
use crate::domain::commands::temperatures::RecordTemperatureCommand;

/// Physiologically plausible temperature bounds, per unit.
const CELSIUS_RANGE: std::ops::RangeInclusive<f64> = 35.0..=43.0;
const FAHRENHEIT_RANGE: std::ops::RangeInclusive<f64> = 95.0..=109.4;

/// A rejected field on entity creation. Always recoverable: the caller can
/// resubmit corrected data.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyChildName,
    #[error("date_of_birth is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidDateOfBirth,
    #[error("date_of_birth cannot be in the future")]
    DateOfBirthInFuture,
    #[error("child_id is required")]
    MissingChildId,
    #[error("timestamp is not a valid point in time (expected RFC 3339)")]
    InvalidTimestamp,
    #[error("temperature {value} is outside the plausible range for {unit:?}")]
    TemperatureOutOfRange { value: f64, unit: TemperatureUnit },
    #[error("name cannot be empty")]
    EmptyMedicationName,
    #[error("dosage must be positive")]
    NonPositiveDosage,
    #[error("frequency must be positive")]
    NonPositiveFrequency,
    #[error("max_doses_per_day must be positive")]
    NonPositiveMaxDosesPerDay,
    #[error("start_date is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidStartDate,
    #[error("end_date is not a valid calendar date (expected YYYY-MM-DD)")]
    InvalidEndDate,
    #[error("end_date cannot be earlier than start_date")]
    EndDateBeforeStartDate,
    #[error("medication_definition_id is required")]
    MissingMedicationDefinitionId,
    #[error("administered_at is not a valid point in time (expected RFC 3339)")]
    InvalidAdministeredAt,
    #[error("dosage_administered must be positive")]
    NonPositiveDosageAdministered,
    #[error("administered_by cannot be empty")]
    EmptyAdministeredBy,
}

impl ValidationError {
    /// Name of the offending field, as it appears on the wire.
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyChildName | Self::EmptyMedicationName => "name",
            Self::InvalidDateOfBirth | Self::DateOfBirthInFuture => "date_of_birth",
            Self::MissingChildId => "child_id",
            Self::InvalidTimestamp => "timestamp",
            Self::TemperatureOutOfRange { .. } => "temperature",
            Self::NonPositiveDosage => "dosage",
            Self::NonPositiveFrequency => "frequency",
            Self::NonPositiveMaxDosesPerDay => "max_doses_per_day",
            Self::InvalidStartDate => "start_date",
            Self::InvalidEndDate | Self::EndDateBeforeStartDate => "end_date",
            Self::MissingMedicationDefinitionId => "medication_definition_id",
            Self::InvalidAdministeredAt => "administered_at",
            Self::NonPositiveDosageAdministered => "dosage_administered",
            Self::EmptyAdministeredBy => "administered_by",
        }
    }
}

/// Validate a new-child command and return the parsed date of birth.
pub fn validate_new_child(
    command: &CreateChildCommand,
    today: NaiveDate,
) -> Result<NaiveDate, ValidationError> {
    if command.name.trim().is_empty() {
        return Err(ValidationError::EmptyChildName);
    }

    let date_of_birth = NaiveDate::parse_from_str(&command.date_of_birth, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDateOfBirth)?;
    if date_of_birth > today {
        return Err(ValidationError::DateOfBirthInFuture);
    }

    Ok(date_of_birth)
}

/// Validate a new-reading command and return the parsed measurement time.
pub fn validate_new_reading(
    command: &RecordTemperatureCommand,
) -> Result<DateTime<Utc>, ValidationError> {
    if command.child_id.trim().is_empty() {
        return Err(ValidationError::MissingChildId);
    }

    let timestamp = parse_rfc3339(&command.timestamp).ok_or(ValidationError::InvalidTimestamp)?;

    let range = match command.temperature_unit {
        TemperatureUnit::C => CELSIUS_RANGE,
        TemperatureUnit::F => FAHRENHEIT_RANGE,
    };
    if !range.contains(&command.temperature) {
        return Err(ValidationError::TemperatureOutOfRange {
            value: command.temperature,
            unit: command.temperature_unit,
        });
    }

    Ok(timestamp)
}

/// Validate a new-medication command and return the parsed regimen dates.
pub fn validate_new_medication(
    command: &CreateMedicationCommand,
) -> Result<(NaiveDate, Option<NaiveDate>), ValidationError> {
    if command.child_id.trim().is_empty() {
        return Err(ValidationError::MissingChildId);
    }
    if command.name.trim().is_empty() {
        return Err(ValidationError::EmptyMedicationName);
    }
    if !command.dosage.is_finite() || command.dosage <= 0.0 {
        return Err(ValidationError::NonPositiveDosage);
    }
    if command.frequency == 0 {
        return Err(ValidationError::NonPositiveFrequency);
    }
    if command.max_doses_per_day == 0 {
        return Err(ValidationError::NonPositiveMaxDosesPerDay);
    }

    let start_date = NaiveDate::parse_from_str(&command.start_date, "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidStartDate)?;
    let end_date = match &command.end_date {
        Some(raw) => {
            let end = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ValidationError::InvalidEndDate)?;
            if end < start_date {
                return Err(ValidationError::EndDateBeforeStartDate);
            }
            Some(end)
        }
        None => None,
    };

    Ok((start_date, end_date))
}

/// Validate a new-dose-log command and return the parsed administration time.
pub fn validate_new_dose_log(command: &RecordDoseCommand) -> Result<DateTime<Utc>, ValidationError> {
    if command.medication_definition_id.trim().is_empty() {
        return Err(ValidationError::MissingMedicationDefinitionId);
    }
    if command.child_id.trim().is_empty() {
        return Err(ValidationError::MissingChildId);
    }

    let administered_at =
        parse_rfc3339(&command.administered_at).ok_or(ValidationError::InvalidAdministeredAt)?;

    if !command.dosage_administered.is_finite() || command.dosage_administered <= 0.0 {
        return Err(ValidationError::NonPositiveDosageAdministered);
    }
    if command.administered_by.trim().is_empty() {
        return Err(ValidationError::EmptyAdministeredBy);
    }

    Ok(administered_at)
}

fn parse_rfc3339(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}
