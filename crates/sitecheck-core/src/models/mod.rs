//! Data models for the application
//!
//! Typed mirrors of the JSON payloads exchanged with the backend API,
//! organized by domain. Identifiers are opaque strings (the backend uses
//! Mongo-style `_id` values) and field names are camelCase on the wire.

mod auth;
mod inspection;
mod organization;
mod requests;
mod user;
mod workflow;

// Re-export all models for convenient imports
pub use auth::*;
pub use inspection::*;
pub use organization::*;
pub use requests::*;
pub use user::*;
pub use workflow::*;
