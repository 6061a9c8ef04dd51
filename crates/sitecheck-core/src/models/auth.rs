use serde::{Deserialize, Serialize};

use super::user::User;

/// Login payload returned by the auth service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

/// In-memory session state for the client.
///
/// Invariant: `user` is present iff `is_authenticated`. State is built
/// through the constructors below rather than field-by-field mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl AuthState {
    /// No session, nothing in flight.
    pub fn unauthenticated() -> Self {
        Self {
            is_authenticated: false,
            user: None,
            loading: false,
            error: None,
            token: None,
        }
    }

    /// A login request is in flight.
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::unauthenticated()
        }
    }

    /// Session established.
    pub fn authenticated(user: User, token: String) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            loading: false,
            error: None,
            token: Some(token),
        }
    }

    /// Login failed; keeps the error message for display.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::unauthenticated()
        }
    }

    /// Check the user/is_authenticated invariant.
    pub fn is_consistent(&self) -> bool {
        self.is_authenticated == self.user.is_some()
    }
}

impl Default for AuthState {
    fn default() -> Self {
        Self::unauthenticated()
    }
}

impl From<AuthResponse> for AuthState {
    fn from(response: AuthResponse) -> Self {
        Self::authenticated(response.user, response.token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserRole;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: "64f1c2a9b7e4d3001a2b3c01".to_string(),
            name: "Priya Narayan".to_string(),
            email: "priya@acme.example".to_string(),
            role: UserRole::Inspector,
            organization_id: "64f1c2a9b7e4d3001a2b3c4d".to_string(),
            custom_role: None,
            permissions: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn constructors_uphold_invariant() {
        assert!(AuthState::unauthenticated().is_consistent());
        assert!(AuthState::loading().is_consistent());
        assert!(AuthState::failed("bad credentials").is_consistent());
        assert!(AuthState::authenticated(user(), "jwt".to_string()).is_consistent());
    }

    #[test]
    fn login_response_becomes_authenticated_state() {
        let state: AuthState = AuthResponse {
            user: user(),
            token: "jwt".to_string(),
        }
        .into();
        assert!(state.is_authenticated);
        assert_eq!(state.token.as_deref(), Some("jwt"));
        assert!(!state.loading);
    }

    #[test]
    fn failed_state_keeps_message() {
        let state = AuthState::failed("bad credentials");
        assert_eq!(state.error.as_deref(), Some("bad credentials"));
        assert!(!state.is_authenticated);
    }
}
