//! # Storage Module
//!
//! Handles all data persistence for the fever tracker.
//!
//! Data lives in a per-child directory under a base data directory: the
//! child's profile as `child.yaml`, and its records (temperature readings,
//! medication definitions, dose logs, reminders) as CSV files. The domain
//! layer only sees the storage traits, so the backing implementation can be
//! swapped without touching business logic.

pub mod csv;
pub mod traits;

pub use csv::CsvConnection;
pub use traits::{
    ChildStorage, MedicationLogStorage, MedicationStorage, ReminderStorage, TemperatureStorage,
};
