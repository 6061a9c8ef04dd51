//! Sitecheck Core Library
//!
//! This crate provides the domain models, validation, date normalization, and
//! configuration shared by the Sitecheck API client and CLI. The backend API
//! owns all entity lifecycles; these types mirror its JSON payloads in memory
//! for the duration of a client session.

pub mod config;
pub mod datetime;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use config::ClientConfig;
pub use datetime::{date_portion, normalize_date, DatePolicy};
pub use error::AppError;
