//! Validation modules

pub mod identifier;
pub mod rules;

pub use identifier::{is_object_id, validate_object_id, OBJECT_ID_LENGTH};
pub use rules::{
    parse_time_of_day, validate_auto_approval_rule, validate_inspection, validate_workflow,
    validate_workflow_config,
};
