//! # Domain Module
//!
//! Contains all business logic for the fever tracker.
//!
//! This module encapsulates the core rules, entities, and services that
//! define how temperature readings and medication doses are recorded,
//! validated, and summarized. It operates independently of any specific UI
//! framework or storage mechanism.
//!
//! ## Module Organization
//!
//! - **temperature_trend**: Pure trend calculation over a reading set
//! - **dose_safety**: Pure overdose-risk classification
//! - **validation**: Entity validation rules applied before persistence
//! - **child_service / temperature_service / medication_service /
//!   medication_log_service / reminder_service**: CRUD services wrapping the
//!   storage layer
//! - **commands**: Internal command/query/result types used by the services
//! - **models**: Domain entities
//!
//! ## Core Concepts
//!
//! - **Reading**: One temperature measurement tied to a child and a timestamp
//! - **Dose log**: One recorded administration of a medication
//! - **Medication definition**: The prescribed regimen a dose log is checked
//!   against
//! - **Trend**: Derived qualitative summary of recent temperature direction
//! - **Overdose risk**: Classification of how close today's dose count is to
//!   the configured daily maximum
//!
//! The two computation components hold no state between calls: every request
//! loads the relevant records, derives its summary, and returns it.

pub mod child_service;
pub mod commands;
pub mod dose_safety;
pub mod medication_log_service;
pub mod medication_service;
pub mod models;
pub mod reminder_service;
pub mod temperature_service;
pub mod temperature_trend;
pub mod validation;

pub use child_service::*;
pub use dose_safety::*;
pub use medication_log_service::*;
pub use medication_service::*;
pub use reminder_service::*;
pub use temperature_service::*;
pub use temperature_trend::*;
pub use validation::*;
