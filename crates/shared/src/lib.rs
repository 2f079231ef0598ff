//! Shared types, errors, configuration, and telemetry for CardLedger.
//!
//! This crate provides common building blocks used across all other crates:
//! - Card numbers and PINs as validated value types
//! - The fault taxonomy exposed to transport collaborators
//! - Configuration management
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod telemetry;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
