//! Domain methods for the Sitecheck API client.
//!
//! Response types come from `sitecheck_core::models`; wrapper types that only
//! exist on the wire (BulkApprovalResponse) are defined here.

use anyhow::{Context, Result};
use sitecheck_core::datetime::{normalize_date, DatePolicy};
use sitecheck_core::models::{
    ApprovalActionRequest, ApproverStatus, AuthResponse, BulkApprovalRequest,
    CreateOrganizationRequest, CreateWorkflowRequest, Inspection, InspectionStatus, LoginRequest,
    Organization, SubmitInspectionRequest, User, Workflow,
};
use sitecheck_core::validation::{validate_object_id, validate_workflow_config};
use uuid::Uuid;
use validator::Validate;

use crate::{api_prefix, ApiClient};

/// Bulk approval response: the shared batch marker and how many inspections
/// were moved to pending-bulk.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkApprovalResponse {
    pub batch_id: String,
    pub count: usize,
}

impl ApiClient {
    // --- auth ---

    /// POST /auth/login. Does not require a token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        request.validate().context("Invalid login request")?;

        self.post_json(&format!("{}/auth/login", api_prefix()), &request)
            .await
    }

    /// GET /auth/me — the user behind the current token.
    pub async fn current_user(&self) -> Result<User> {
        self.get(&format!("{}/auth/me", api_prefix()), &[]).await
    }

    // --- organizations ---

    pub async fn list_organizations(&self) -> Result<Vec<Organization>> {
        self.get(&format!("{}/organizations", api_prefix()), &[])
            .await
    }

    pub async fn get_organization(&self, id: &str) -> Result<Organization> {
        validate_object_id(id)?;
        self.get(&format!("{}/organizations/{}", api_prefix(), id), &[])
            .await
    }

    pub async fn create_organization(
        &self,
        request: &CreateOrganizationRequest,
    ) -> Result<Organization> {
        request.validate().context("Invalid organization request")?;
        self.post_json(&format!("{}/organizations", api_prefix()), request)
            .await
    }

    /// List the users of an organization.
    pub async fn list_users(&self, organization_id: &str) -> Result<Vec<User>> {
        validate_object_id(organization_id)?;
        self.get(
            &format!("{}/organizations/{}/users", api_prefix(), organization_id),
            &[],
        )
        .await
    }

    // --- workflows ---

    pub async fn list_workflows(&self, organization_id: Option<&str>) -> Result<Vec<Workflow>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(org) = organization_id {
            validate_object_id(org)?;
            query.push(("organizationId", org.to_string()));
        }
        self.get(&format!("{}/workflows", api_prefix()), &query)
            .await
    }

    pub async fn get_workflow(&self, id: &str) -> Result<Workflow> {
        validate_object_id(id)?;
        self.get(&format!("{}/workflows/{}", api_prefix(), id), &[])
            .await
    }

    pub async fn create_workflow(&self, request: &CreateWorkflowRequest) -> Result<Workflow> {
        request.validate().context("Invalid workflow request")?;
        validate_workflow_config(
            request.auto_approval_enabled,
            request.auto_approval_rules.as_deref(),
        )?;
        self.post_json(&format!("{}/workflows", api_prefix()), request)
            .await
    }

    // --- inspections ---

    /// List inspections with optional status/workflow filters and pagination.
    pub async fn list_inspections(
        &self,
        status: Option<InspectionStatus>,
        workflow_id: Option<&str>,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<Inspection>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(workflow) = workflow_id {
            validate_object_id(workflow)?;
            query.push(("workflowId", workflow.to_string()));
        }
        if let Some(l) = limit {
            query.push(("limit", l.to_string()));
        }
        if let Some(o) = offset {
            query.push(("offset", o.to_string()));
        }
        self.get(&format!("{}/inspections", api_prefix()), &query)
            .await
    }

    pub async fn get_inspection(&self, id: &str) -> Result<Inspection> {
        validate_object_id(id)?;
        self.get(&format!("{}/inspections/{}", api_prefix(), id), &[])
            .await
    }

    /// Submit an inspection. The request carries a plain `YYYY-MM-DD` date;
    /// it is normalized under `policy` before the payload goes out.
    pub async fn submit_inspection(
        &self,
        request: &SubmitInspectionRequest,
        policy: DatePolicy,
    ) -> Result<Inspection> {
        request.validate().context("Invalid inspection request")?;
        validate_object_id(&request.workflow_id)?;

        let mut payload = request.clone();
        payload.inspection_date = normalize_date(&request.inspection_date, policy)?;

        self.post_json(&format!("{}/inspections", api_prefix()), &payload)
            .await
    }

    pub async fn approve_inspection(
        &self,
        id: &str,
        remarks: Option<String>,
    ) -> Result<Inspection> {
        self.decide_inspection(id, ApproverStatus::Approved, remarks)
            .await
    }

    pub async fn reject_inspection(
        &self,
        id: &str,
        remarks: Option<String>,
    ) -> Result<Inspection> {
        self.decide_inspection(id, ApproverStatus::Rejected, remarks)
            .await
    }

    async fn decide_inspection(
        &self,
        id: &str,
        status: ApproverStatus,
        remarks: Option<String>,
    ) -> Result<Inspection> {
        validate_object_id(id)?;
        let action = match status {
            ApproverStatus::Approved => "approve",
            ApproverStatus::Rejected => "reject",
            ApproverStatus::Pending => {
                return Err(anyhow::anyhow!("An approval decision cannot be pending"))
            }
        };
        let request = ApprovalActionRequest { status, remarks };
        self.post_json(
            &format!("{}/inspections/{}/{}", api_prefix(), id, action),
            &request,
        )
        .await
    }

    /// Queue a set of inspections for bulk approval under one generated
    /// batch id. Returns the batch id so callers can track the batch.
    pub async fn bulk_approve(&self, inspection_ids: Vec<String>) -> Result<BulkApprovalResponse> {
        for id in &inspection_ids {
            validate_object_id(id)?;
        }
        let request = BulkApprovalRequest {
            batch_id: Uuid::new_v4().to_string(),
            inspection_ids,
        };
        request.validate().context("Invalid bulk approval request")?;

        self.post_json(
            &format!("{}/inspections/bulk-approve", api_prefix()),
            &request,
        )
        .await
    }

    pub async fn delete_inspection(&self, id: &str) -> Result<()> {
        validate_object_id(id)?;
        self.delete(&format!("{}/inspections/{}", api_prefix(), id))
            .await
    }
}
