//! # IO Module
//!
//! Interface layer exposing the domain services to the outside world over
//! HTTP. Contains no business logic; it translates DTOs to domain commands
//! and domain results back to DTOs.

pub mod rest;
