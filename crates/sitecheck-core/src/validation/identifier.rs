//! Identifier validation
//!
//! The backend issues Mongo-style object ids: 24 lowercase hex characters.
//! The client checks the shape before putting an id in a URL path.

use anyhow::{Context, Result};
use regex::Regex;

/// Length of a backend object id
pub const OBJECT_ID_LENGTH: usize = 24;

/// Validate an opaque backend identifier.
pub fn validate_object_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(anyhow::anyhow!("Object id cannot be empty"));
    }

    if id.len() != OBJECT_ID_LENGTH {
        return Err(anyhow::anyhow!(
            "Object id '{}' must be exactly {} characters",
            id,
            OBJECT_ID_LENGTH
        ));
    }

    let pattern =
        Regex::new(r"^[0-9a-f]{24}$").context("Failed to compile object id validation regex")?;

    if !pattern.is_match(id) {
        return Err(anyhow::anyhow!(
            "Object id '{}' contains invalid characters. Allowed: lowercase hex digits",
            id
        ));
    }

    Ok(())
}

/// Check if a string has the object id shape.
pub fn is_object_id(id: &str) -> bool {
    validate_object_id(id).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_object_ids() {
        assert!(validate_object_id("64f1c2a9b7e4d3001a2b3c4d").is_ok());
        assert!(validate_object_id("000000000000000000000000").is_ok());
        assert!(is_object_id("abcdefabcdefabcdefabcdef"));
    }

    #[test]
    fn wrong_length_rejected() {
        assert!(validate_object_id("").is_err());
        assert!(validate_object_id("64f1c2a9").is_err());
        assert!(validate_object_id("64f1c2a9b7e4d3001a2b3c4d0").is_err());
    }

    #[test]
    fn invalid_characters_rejected() {
        assert!(validate_object_id("64F1C2A9B7E4D3001A2B3C4D").is_err()); // uppercase
        assert!(validate_object_id("64f1c2a9b7e4d3001a2b3cg!").is_err());
        assert!(!is_object_id("not an id"));
    }
}
