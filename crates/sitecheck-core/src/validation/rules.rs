//! Domain invariant checks
//!
//! Shape checks the client applies before a payload goes to the API:
//! auto-approval rule coherence, workflow step uniqueness, and the
//! inspection status/batch-id coupling. The backend re-validates everything.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::NaiveTime;

use crate::models::{AutoApprovalRule, Inspection, Workflow};

const TIME_OF_DAY_FORMAT: &str = "%H:%M";

/// Parse an `HH:MM` time-of-day string.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, TIME_OF_DAY_FORMAT)
        .with_context(|| format!("Invalid time of day '{}', expected HH:MM", value))
}

/// Validate a single auto-approval rule.
///
/// Rules:
/// - `time_range_start` <= `time_range_end` (both HH:MM)
/// - `min_value` <= `max_value` when both are present
/// - `frequency_period` is required when `frequency_limit` is set
pub fn validate_auto_approval_rule(rule: &AutoApprovalRule) -> Result<()> {
    let start = parse_time_of_day(&rule.time_range_start)?;
    let end = parse_time_of_day(&rule.time_range_end)?;

    if start > end {
        return Err(anyhow::anyhow!(
            "Auto-approval time range starts at {} but ends at {}",
            rule.time_range_start,
            rule.time_range_end
        ));
    }

    if let (Some(min), Some(max)) = (rule.min_value, rule.max_value) {
        if min > max {
            return Err(anyhow::anyhow!(
                "Auto-approval bounds for '{}' are inverted: min {} > max {}",
                rule.value_field,
                min,
                max
            ));
        }
    }

    if rule.frequency_limit.is_some() && rule.frequency_period.is_none() {
        return Err(anyhow::anyhow!(
            "Auto-approval frequency limit requires a frequency period"
        ));
    }

    if rule.value_field.is_empty() {
        return Err(anyhow::anyhow!("Auto-approval value field cannot be empty"));
    }

    Ok(())
}

/// Validate the auto-approval configuration of a workflow: rules are only
/// meaningful when auto-approval is enabled.
pub fn validate_workflow_config(
    auto_approval_enabled: bool,
    rules: Option<&[AutoApprovalRule]>,
) -> Result<()> {
    match rules {
        Some(rules) if !auto_approval_enabled && !rules.is_empty() => Err(anyhow::anyhow!(
            "Auto-approval rules supplied but auto-approval is disabled"
        )),
        Some(rules) => {
            for (index, rule) in rules.iter().enumerate() {
                validate_auto_approval_rule(rule)
                    .with_context(|| format!("Invalid auto-approval rule #{}", index))?;
            }
            Ok(())
        }
        None => Ok(()),
    }
}

/// Validate a workflow template.
pub fn validate_workflow(workflow: &Workflow) -> Result<()> {
    if workflow.name.is_empty() {
        return Err(anyhow::anyhow!("Workflow name cannot be empty"));
    }

    if workflow.steps.is_empty() {
        return Err(anyhow::anyhow!("Workflow '{}' has no steps", workflow.name));
    }

    let mut seen = HashSet::new();
    for step in &workflow.steps {
        if step.id.is_empty() {
            return Err(anyhow::anyhow!(
                "Workflow '{}' has a step with an empty id",
                workflow.name
            ));
        }
        if !seen.insert(step.id.as_str()) {
            return Err(anyhow::anyhow!(
                "Workflow '{}' has duplicate step id '{}'",
                workflow.name,
                step.id
            ));
        }
    }

    validate_workflow_config(
        workflow.auto_approval_enabled,
        workflow.auto_approval_rules.as_deref(),
    )
    .with_context(|| format!("Workflow '{}'", workflow.name))
}

/// Validate an inspection payload.
pub fn validate_inspection(inspection: &Inspection) -> Result<()> {
    let mut seen = HashSet::new();
    for step in &inspection.steps {
        if step.step_id.is_empty() {
            return Err(anyhow::anyhow!(
                "Inspection '{}' has a filled step with an empty step id",
                inspection.id
            ));
        }
        if !seen.insert(step.step_id.as_str()) {
            return Err(anyhow::anyhow!(
                "Inspection '{}' fills step '{}' more than once",
                inspection.id,
                step.step_id
            ));
        }
    }

    if inspection.status.requires_batch_id() && inspection.batch_id.is_none() {
        return Err(anyhow::anyhow!(
            "Inspection '{}' is {} but has no batch id",
            inspection.id,
            inspection.status
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FilledStep, FrequencyPeriod, InspectionStatus, WorkflowStep};
    use chrono::Utc;

    fn rule() -> AutoApprovalRule {
        AutoApprovalRule {
            time_range_start: "08:00".to_string(),
            time_range_end: "17:30".to_string(),
            min_value: Some(10.0),
            max_value: Some(90.0),
            value_field: "meterReading".to_string(),
            require_photo: false,
            frequency_limit: Some(4),
            frequency_period: Some(FrequencyPeriod::Day),
        }
    }

    #[test]
    fn valid_rule_passes() {
        assert!(validate_auto_approval_rule(&rule()).is_ok());
    }

    #[test]
    fn inverted_time_range_rejected() {
        let mut bad = rule();
        bad.time_range_start = "18:00".to_string();
        bad.time_range_end = "08:00".to_string();
        assert!(validate_auto_approval_rule(&bad).is_err());
    }

    #[test]
    fn malformed_time_rejected() {
        let mut bad = rule();
        bad.time_range_start = "8am".to_string();
        assert!(validate_auto_approval_rule(&bad).is_err());
        assert!(parse_time_of_day("25:00").is_err());
        assert!(parse_time_of_day("07:45").is_ok());
    }

    #[test]
    fn inverted_bounds_rejected() {
        let mut bad = rule();
        bad.min_value = Some(90.0);
        bad.max_value = Some(10.0);
        assert!(validate_auto_approval_rule(&bad).is_err());
    }

    #[test]
    fn frequency_limit_needs_period() {
        let mut bad = rule();
        bad.frequency_period = None;
        assert!(validate_auto_approval_rule(&bad).is_err());
    }

    #[test]
    fn rules_without_enabled_flag_rejected() {
        let rules = vec![rule()];
        assert!(validate_workflow_config(false, Some(&rules)).is_err());
        assert!(validate_workflow_config(true, Some(&rules)).is_ok());
        assert!(validate_workflow_config(false, None).is_ok());
        // an explicit empty list on a disabled workflow is harmless
        assert!(validate_workflow_config(false, Some(&[])).is_ok());
    }

    fn workflow() -> Workflow {
        Workflow {
            id: "64f1c2a9b7e4d3001a2b3d01".to_string(),
            name: "Boiler room rounds".to_string(),
            category: "facilities".to_string(),
            description: String::new(),
            steps: vec![
                WorkflowStep {
                    id: "s1".to_string(),
                    title: "Check gauge".to_string(),
                    instructions: "Record PSI".to_string(),
                    media_required: false,
                },
                WorkflowStep {
                    id: "s2".to_string(),
                    title: "Photograph valve".to_string(),
                    instructions: "Wide shot".to_string(),
                    media_required: true,
                },
            ],
            organization_id: "64f1c2a9b7e4d3001a2b3c4d".to_string(),
            created_by: "64f1c2a9b7e4d3001a2b3c01".to_string(),
            auto_approval_enabled: false,
            auto_approval_rules: None,
            bulk_approval_enabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn duplicate_step_ids_rejected() {
        let mut bad = workflow();
        bad.steps[1].id = "s1".to_string();
        assert!(validate_workflow(&bad).is_err());
        assert!(validate_workflow(&workflow()).is_ok());
    }

    #[test]
    fn empty_steps_rejected() {
        let mut bad = workflow();
        bad.steps.clear();
        assert!(validate_workflow(&bad).is_err());
    }

    fn inspection(status: InspectionStatus, batch_id: Option<&str>) -> Inspection {
        Inspection {
            id: "64f1c2a9b7e4d3001a2b3e01".to_string(),
            workflow_id: "64f1c2a9b7e4d3001a2b3d01".to_string(),
            workflow_name: "Boiler room rounds".to_string(),
            category: "facilities".to_string(),
            inspection_type: "routine".to_string(),
            steps: vec![FilledStep {
                step_id: "s1".to_string(),
                step_title: "Check gauge".to_string(),
                response_text: "72 PSI".to_string(),
                media_urls: vec![],
                timestamp: Utc::now(),
            }],
            assigned_to: "64f1c2a9b7e4d3001a2b3c02".to_string(),
            inspector_id: "64f1c2a9b7e4d3001a2b3c01".to_string(),
            approver_id: None,
            approvers: None,
            status,
            organization_id: "64f1c2a9b7e4d3001a2b3c4d".to_string(),
            inspection_date: Utc::now(),
            auto_approved: None,
            batch_id: batch_id.map(str::to_string),
            meter_reading: Some(72.0),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn pending_bulk_requires_batch_id() {
        assert!(validate_inspection(&inspection(InspectionStatus::PendingBulk, None)).is_err());
        assert!(
            validate_inspection(&inspection(InspectionStatus::PendingBulk, Some("batch-1")))
                .is_ok()
        );
    }

    #[test]
    fn batch_id_survives_bulk_completion() {
        // once the batch is approved the marker stays behind
        assert!(
            validate_inspection(&inspection(InspectionStatus::Approved, Some("batch-1"))).is_ok()
        );
        assert!(validate_inspection(&inspection(InspectionStatus::Pending, None)).is_ok());
    }

    #[test]
    fn duplicate_filled_steps_rejected() {
        let mut bad = inspection(InspectionStatus::Pending, None);
        let duplicate = bad.steps[0].clone();
        bad.steps.push(duplicate);
        assert!(validate_inspection(&bad).is_err());
    }
}
