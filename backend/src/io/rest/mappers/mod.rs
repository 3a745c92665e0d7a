//! Mappers translating domain models to the public DTOs in the `shared`
//! crate. Inbound requests are turned into domain commands directly by the
//! handlers; only the outbound direction needs structural mapping.

pub mod child_mapper;
pub mod medication_mapper;
pub mod reminder_mapper;
pub mod temperature_mapper;
