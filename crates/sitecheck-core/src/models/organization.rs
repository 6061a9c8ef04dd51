use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Organization size category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrganizationSize {
    Small,
    Medium,
    Large,
    Enterprise,
}

impl Display for OrganizationSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            OrganizationSize::Small => write!(f, "small"),
            OrganizationSize::Medium => write!(f, "medium"),
            OrganizationSize::Large => write!(f, "large"),
            OrganizationSize::Enterprise => write!(f, "enterprise"),
        }
    }
}

impl FromStr for OrganizationSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(OrganizationSize::Small),
            "medium" => Ok(OrganizationSize::Medium),
            "large" => Ok(OrganizationSize::Large),
            "enterprise" => Ok(OrganizationSize::Enterprise),
            _ => Err(anyhow::anyhow!("Invalid organization size: {}", s)),
        }
    }
}

/// Per-organization feature toggles
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationSettings {
    pub allow_user_invites: bool,
    pub require_approver_review: bool,
}

impl Default for OrganizationSettings {
    fn default() -> Self {
        Self {
            allow_user_invites: true,
            require_approver_review: true,
        }
    }
}

/// Role defined by an organization beyond the built-in set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CustomRole {
    pub name: String,
    pub permissions: Vec<String>,
}

/// Organization (top-level tenant owning users, workflows, and inspections)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    pub settings: OrganizationSettings,
    pub size: OrganizationSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_roles: Option<Vec<CustomRole>>,
    #[serde(default)]
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
