//! # Storage Traits
//!
//! This module defines the storage abstraction traits that allow different
//! storage backends to be used interchangeably in the domain layer.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::child::Child;
use crate::domain::models::medication::{MedicationDefinition, MedicationLog};
use crate::domain::models::reminder::MedicationReminder;
use crate::domain::models::temperature::TemperatureReading;

/// Trait defining the interface for child storage operations
#[async_trait]
pub trait ChildStorage: Send + Sync {
    /// Store a new child
    async fn store_child(&self, child: &Child) -> Result<()>;

    /// Retrieve a specific child by ID
    async fn get_child(&self, child_id: &str) -> Result<Option<Child>>;

    /// List all children ordered by name
    async fn list_children(&self) -> Result<Vec<Child>>;

    /// Delete a child by ID, together with all of its records
    async fn delete_child(&self, child_id: &str) -> Result<()>;
}

/// Trait defining the interface for temperature reading storage operations
#[async_trait]
pub trait TemperatureStorage: Send + Sync {
    /// Store a new temperature reading
    async fn store_reading(&self, reading: &TemperatureReading) -> Result<()>;

    /// List a child's readings in chronological order (oldest first)
    async fn list_readings(&self, child_id: &str) -> Result<Vec<TemperatureReading>>;

    /// Delete a single reading.
    /// Returns true if the reading was found and deleted, false otherwise
    async fn delete_reading(&self, child_id: &str, reading_id: &str) -> Result<bool>;
}

/// Trait defining the interface for medication definition storage operations
#[async_trait]
pub trait MedicationStorage: Send + Sync {
    /// Store a new medication definition
    async fn store_definition(&self, definition: &MedicationDefinition) -> Result<()>;

    /// Retrieve a specific definition by ID
    async fn get_definition(
        &self,
        child_id: &str,
        medication_id: &str,
    ) -> Result<Option<MedicationDefinition>>;

    /// List a child's definitions, newest first
    async fn list_definitions(&self, child_id: &str) -> Result<Vec<MedicationDefinition>>;

    /// Update an existing definition
    async fn update_definition(&self, definition: &MedicationDefinition) -> Result<()>;
}

/// Trait defining the interface for dose log storage operations
#[async_trait]
pub trait MedicationLogStorage: Send + Sync {
    /// Store a new dose log
    async fn store_log(&self, log: &MedicationLog) -> Result<()>;

    /// List a child's dose logs, most recent first
    async fn list_logs(&self, child_id: &str) -> Result<Vec<MedicationLog>>;

    /// Delete a single dose log.
    /// Returns true if the log was found and deleted, false otherwise
    async fn delete_log(&self, child_id: &str, log_id: &str) -> Result<bool>;
}

/// Trait defining the interface for reminder storage operations
#[async_trait]
pub trait ReminderStorage: Send + Sync {
    /// Store a batch of generated reminders
    async fn store_reminders(&self, reminders: &[MedicationReminder]) -> Result<()>;

    /// List a child's reminders ordered by scheduled time (soonest first)
    async fn list_reminders(&self, child_id: &str) -> Result<Vec<MedicationReminder>>;

    /// Retrieve a specific reminder by ID
    async fn get_reminder(
        &self,
        child_id: &str,
        reminder_id: &str,
    ) -> Result<Option<MedicationReminder>>;

    /// Update an existing reminder
    async fn update_reminder(&self, reminder: &MedicationReminder) -> Result<()>;
}
