//! Workflow models: named, ordered checklist templates with optional
//! auto-approval policy.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Single step in a workflow template. Order = position in `Workflow::steps`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStep {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub instructions: String,
    #[serde(default)]
    pub media_required: bool,
}

/// Period over which an auto-approval frequency limit applies
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyPeriod {
    Hour,
    Day,
    Week,
}

impl Display for FrequencyPeriod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            FrequencyPeriod::Hour => write!(f, "hour"),
            FrequencyPeriod::Day => write!(f, "day"),
            FrequencyPeriod::Week => write!(f, "week"),
        }
    }
}

impl FromStr for FrequencyPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hour" => Ok(FrequencyPeriod::Hour),
            "day" => Ok(FrequencyPeriod::Day),
            "week" => Ok(FrequencyPeriod::Week),
            _ => Err(anyhow::anyhow!("Invalid frequency period: {}", s)),
        }
    }
}

/// Condition set under which an inspection bypasses manual approver review.
///
/// Time bounds are `HH:MM` time-of-day strings; numeric bounds apply to the
/// inspection field named by `value_field` (e.g. a meter reading).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoApprovalRule {
    pub time_range_start: String,
    pub time_range_end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
    pub value_field: String,
    #[serde(default)]
    pub require_photo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency_period: Option<FrequencyPeriod>,
}

/// Workflow template. `steps` order is meaningful (display/execution order)
/// and must survive serialization round-trips.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub category: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    pub organization_id: String,
    pub created_by: String,
    #[serde(default)]
    pub auto_approval_enabled: bool,
    /// Only meaningful when `auto_approval_enabled` is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approval_rules: Option<Vec<AutoApprovalRule>>,
    #[serde(default)]
    pub bulk_approval_enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Workflow {
    /// Look up a template step by id.
    pub fn step(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_preserve_order_through_serde() {
        let json = serde_json::json!({
            "_id": "64f1c2a9b7e4d3001a2b3d01",
            "name": "Boiler room rounds",
            "category": "facilities",
            "description": "Hourly boiler room checks",
            "steps": [
                { "_id": "s1", "title": "Check gauge", "instructions": "Record PSI", "mediaRequired": false },
                { "_id": "s2", "title": "Photograph valve", "instructions": "Wide shot", "mediaRequired": true },
                { "_id": "s3", "title": "Sign off", "instructions": "Initial the sheet", "mediaRequired": false }
            ],
            "organizationId": "64f1c2a9b7e4d3001a2b3c4d",
            "createdBy": "64f1c2a9b7e4d3001a2b3c01",
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-02T03:04:05Z"
        });
        let workflow: Workflow = serde_json::from_value(json).unwrap();
        let titles: Vec<_> = workflow.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Check gauge", "Photograph valve", "Sign off"]);

        let round_tripped: Workflow =
            serde_json::from_str(&serde_json::to_string(&workflow).unwrap()).unwrap();
        assert_eq!(round_tripped.steps, workflow.steps);
        assert!(!round_tripped.auto_approval_enabled);
        assert!(round_tripped.auto_approval_rules.is_none());
    }

    #[test]
    fn step_lookup() {
        let step = WorkflowStep {
            id: "s2".to_string(),
            title: "Photograph valve".to_string(),
            instructions: "Wide shot".to_string(),
            media_required: true,
        };
        let workflow = Workflow {
            id: "w1".to_string(),
            name: "Rounds".to_string(),
            category: "facilities".to_string(),
            description: String::new(),
            steps: vec![step.clone()],
            organization_id: "o1".to_string(),
            created_by: "u1".to_string(),
            auto_approval_enabled: false,
            auto_approval_rules: None,
            bulk_approval_enabled: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(workflow.step("s2"), Some(&step));
        assert_eq!(workflow.step("missing"), None);
    }
}
