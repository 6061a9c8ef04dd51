use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Built-in user roles. `Custom` defers to the organization's custom roles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Inspector,
    Approver,
    Guest,
    Custom,
}

impl Display for UserRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            UserRole::Admin => write!(f, "admin"),
            UserRole::Inspector => write!(f, "inspector"),
            UserRole::Approver => write!(f, "approver"),
            UserRole::Guest => write!(f, "guest"),
            UserRole::Custom => write!(f, "custom"),
        }
    }
}

impl FromStr for UserRole {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(UserRole::Admin),
            "inspector" => Ok(UserRole::Inspector),
            "approver" => Ok(UserRole::Approver),
            "guest" => Ok(UserRole::Guest),
            "custom" => Ok(UserRole::Custom),
            _ => Err(anyhow::anyhow!("Invalid user role: {}", s)),
        }
    }
}

/// User entity. Email uniqueness within an organization is backend-enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub organization_id: String,
    /// Name of the organization custom role; meaningful when `role` is custom
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Effective role name: the custom role when set, the built-in otherwise.
    pub fn role_name(&self) -> String {
        match (&self.role, &self.custom_role) {
            (UserRole::Custom, Some(name)) => name.clone(),
            (role, _) => role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inspector() -> User {
        serde_json::from_value(serde_json::json!({
            "_id": "64f1c2a9b7e4d3001a2b3c01",
            "name": "Priya Narayan",
            "email": "priya@acme.example",
            "role": "inspector",
            "organizationId": "64f1c2a9b7e4d3001a2b3c4d",
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-02T03:04:05Z"
        }))
        .unwrap()
    }

    #[test]
    fn role_round_trips() {
        let user = inspector();
        assert_eq!(user.role, UserRole::Inspector);
        assert_eq!(user.role_name(), "inspector");
        assert!(serde_json::from_str::<UserRole>("\"superuser\"").is_err());
    }

    #[test]
    fn custom_role_name_wins() {
        let mut user = inspector();
        user.role = UserRole::Custom;
        user.custom_role = Some("night-shift-lead".to_string());
        assert_eq!(user.role_name(), "night-shift-lead");
    }
}
