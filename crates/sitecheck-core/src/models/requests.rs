//! Request DTOs sent to the backend API.
//!
//! These are validated client-side before the request goes out; the backend
//! remains the source of truth and re-validates everything.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::inspection::ApproverStatus;
use super::organization::{OrganizationSettings, OrganizationSize};
use super::workflow::AutoApprovalRule;

/// Credentials for POST /auth/login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password must not be empty"))]
    pub password: String,
}

/// Request DTO for creating an organization
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrganizationRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Organization name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub address: String,
    pub phone: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    pub size: OrganizationSize,
    #[serde(default)]
    pub settings: OrganizationSettings,
}

/// Step definition inside a workflow creation request (ids are assigned by
/// the backend)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewWorkflowStep {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Step title must be between 1 and 255 characters"
    ))]
    pub title: String,
    pub instructions: String,
    #[serde(default)]
    pub media_required: bool,
}

/// Request DTO for creating a workflow template
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Workflow name must be between 1 and 255 characters"
    ))]
    pub name: String,
    pub category: String,
    pub description: String,
    #[validate(length(min = 1, message = "A workflow needs at least one step"), nested)]
    pub steps: Vec<NewWorkflowStep>,
    #[serde(default)]
    pub auto_approval_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_approval_rules: Option<Vec<AutoApprovalRule>>,
    #[serde(default)]
    pub bulk_approval_enabled: bool,
}

/// Filled step inside an inspection submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewFilledStep {
    #[validate(length(min = 1, message = "Step id must not be empty"))]
    pub step_id: String,
    pub response_text: String,
    /// Ordered by upload order
    #[serde(default)]
    pub media_urls: Vec<String>,
}

/// Request DTO for submitting an inspection.
///
/// `inspection_date` is the calendar date the inspector picked (`YYYY-MM-DD`);
/// the API client normalizes it to a full timestamp before sending.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitInspectionRequest {
    #[validate(length(min = 1, message = "Workflow id must not be empty"))]
    pub workflow_id: String,
    pub inspection_type: String,
    #[validate(length(min = 1, message = "An inspection needs at least one filled step"), nested)]
    pub steps: Vec<NewFilledStep>,
    pub assigned_to: String,
    pub inspection_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter_reading: Option<f64>,
}

/// Approve/reject payload for one approver's decision
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApprovalActionRequest {
    pub status: ApproverStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
}

/// Bulk approval payload. The client generates `batch_id` (UUID v4) so all
/// inspections in the batch share one marker.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BulkApprovalRequest {
    #[validate(length(min = 1, message = "Batch id must not be empty"))]
    pub batch_id: String,
    #[validate(length(min = 1, message = "A batch needs at least one inspection"))]
    pub inspection_ids: Vec<String>,
}
