//! Inspection models: one instantiated execution of a workflow by an
//! inspector, subject to approval.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use crate::error::AppError;

/// Inspection lifecycle status (kebab-case on the wire)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InspectionStatus {
    Pending,
    Approved,
    Rejected,
    AutoApproved,
    PendingBulk,
}

impl InspectionStatus {
    /// Statuses that still await an approval decision.
    pub fn is_open(&self) -> bool {
        matches!(self, InspectionStatus::Pending | InspectionStatus::PendingBulk)
    }

    /// Whether this status requires a batch id on the inspection.
    pub fn requires_batch_id(&self) -> bool {
        matches!(self, InspectionStatus::PendingBulk)
    }
}

impl Display for InspectionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            InspectionStatus::Pending => write!(f, "pending"),
            InspectionStatus::Approved => write!(f, "approved"),
            InspectionStatus::Rejected => write!(f, "rejected"),
            InspectionStatus::AutoApproved => write!(f, "auto-approved"),
            InspectionStatus::PendingBulk => write!(f, "pending-bulk"),
        }
    }
}

impl FromStr for InspectionStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InspectionStatus::Pending),
            "approved" => Ok(InspectionStatus::Approved),
            "rejected" => Ok(InspectionStatus::Rejected),
            "auto-approved" => Ok(InspectionStatus::AutoApproved),
            "pending-bulk" => Ok(InspectionStatus::PendingBulk),
            _ => Err(anyhow::anyhow!("Invalid inspection status: {}", s)),
        }
    }
}

/// Per-approver decision status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApproverStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApproverStatus {
    /// Legal transitions: pending -> approved | rejected. Decisions are final.
    pub fn can_transition_to(&self, next: ApproverStatus) -> bool {
        matches!(self, ApproverStatus::Pending)
            && matches!(next, ApproverStatus::Approved | ApproverStatus::Rejected)
    }
}

impl Display for ApproverStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ApproverStatus::Pending => write!(f, "pending"),
            ApproverStatus::Approved => write!(f, "approved"),
            ApproverStatus::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ApproverStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ApproverStatus::Pending),
            "approved" => Ok(ApproverStatus::Approved),
            "rejected" => Ok(ApproverStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid approver status: {}", s)),
        }
    }
}

/// Inspector's recorded response to one workflow step.
/// `step_title` is a denormalized copy and may drift from the template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FilledStep {
    pub step_id: String,
    pub step_title: String,
    pub response_text: String,
    /// Ordered by upload order
    #[serde(default)]
    pub media_urls: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// One approver's slot on an inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionApprover {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub status: ApproverStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_date: Option<DateTime<Utc>>,
}

impl InspectionApprover {
    /// Record a decision, enforcing the pending -> approved|rejected rule.
    pub fn apply_decision(
        &mut self,
        next: ApproverStatus,
        remarks: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        if !self.status.can_transition_to(next) {
            return Err(AppError::InvalidTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        self.status = next;
        self.remarks = remarks;
        self.action_date = Some(at);
        Ok(())
    }
}

/// Inspection entity. `workflow_name` is a denormalized copy of the template
/// name at submission time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    #[serde(rename = "_id")]
    pub id: String,
    pub workflow_id: String,
    pub workflow_name: String,
    pub category: String,
    pub inspection_type: String,
    pub steps: Vec<FilledStep>,
    pub assigned_to: String,
    pub inspector_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approvers: Option<Vec<InspectionApprover>>,
    pub status: InspectionStatus,
    pub organization_id: String,
    pub inspection_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approved: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_reading: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Inspection {
    /// The filled step for a given workflow step id, if recorded.
    pub fn filled_step(&self, step_id: &str) -> Option<&FilledStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_wire_form_is_kebab_case() {
        assert_eq!(
            serde_json::to_string(&InspectionStatus::AutoApproved).unwrap(),
            "\"auto-approved\""
        );
        assert_eq!(
            serde_json::from_str::<InspectionStatus>("\"pending-bulk\"").unwrap(),
            InspectionStatus::PendingBulk
        );
        assert!(serde_json::from_str::<InspectionStatus>("\"autoApproved\"").is_err());
        assert!("in-review".parse::<InspectionStatus>().is_err());
    }

    #[test]
    fn open_statuses() {
        assert!(InspectionStatus::Pending.is_open());
        assert!(InspectionStatus::PendingBulk.is_open());
        assert!(!InspectionStatus::AutoApproved.is_open());
        assert!(InspectionStatus::PendingBulk.requires_batch_id());
        assert!(!InspectionStatus::Pending.requires_batch_id());
    }

    fn pending_approver() -> InspectionApprover {
        InspectionApprover {
            user_id: "64f1c2a9b7e4d3001a2b3c02".to_string(),
            user_name: Some("Dana Okafor".to_string()),
            status: ApproverStatus::Pending,
            remarks: None,
            action_date: None,
        }
    }

    #[test]
    fn approver_decision_from_pending() {
        let mut approver = pending_approver();
        let now = Utc::now();
        approver
            .apply_decision(ApproverStatus::Approved, Some("Looks good".to_string()), now)
            .unwrap();
        assert_eq!(approver.status, ApproverStatus::Approved);
        assert_eq!(approver.action_date, Some(now));
    }

    #[test]
    fn approver_decisions_are_final() {
        let mut approver = pending_approver();
        approver
            .apply_decision(ApproverStatus::Rejected, None, Utc::now())
            .unwrap();

        let err = approver
            .apply_decision(ApproverStatus::Approved, None, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition { .. }));
    }

    #[test]
    fn pending_to_pending_is_not_a_transition() {
        assert!(!ApproverStatus::Pending.can_transition_to(ApproverStatus::Pending));
    }
}
