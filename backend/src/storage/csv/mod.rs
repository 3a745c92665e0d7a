//! CSV/YAML filesystem storage.
//!
//! Each child owns a directory named after them under the base data
//! directory. The profile lives in `child.yaml`; readings, medication
//! definitions, dose logs and reminders are CSV files rewritten whole on
//! every mutation (record sets are small) with a temp-file + rename so a
//! crash never leaves a half-written file.

pub mod child_repository;
pub mod connection;
pub mod medication_log_repository;
pub mod medication_repository;
pub mod reminder_repository;
pub mod temperature_repository;

pub use child_repository::ChildRepository;
pub use connection::CsvConnection;
pub use medication_log_repository::MedicationLogRepository;
pub use medication_repository::MedicationRepository;
pub use reminder_repository::ReminderRepository;
pub use temperature_repository::TemperatureRepository;

use shared::DosageUnit;

/// Wire spelling of a dosage unit inside CSV files.
pub(crate) fn dosage_unit_to_str(unit: DosageUnit) -> &'static str {
    match unit {
        DosageUnit::Tablets => "tablets",
        DosageUnit::Ml => "ml",
    }
}

pub(crate) fn dosage_unit_from_str(raw: &str) -> anyhow::Result<DosageUnit> {
    match raw {
        "tablets" => Ok(DosageUnit::Tablets),
        "ml" => Ok(DosageUnit::Ml),
        other => Err(anyhow::anyhow!("Unknown dosage unit in CSV: {}", other)),
    }
}
