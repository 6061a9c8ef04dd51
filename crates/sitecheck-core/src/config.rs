//! Configuration module
//!
//! Client configuration sourced from the environment. The backend base URL
//! defaults to the local development server; the timezone and date policy
//! feed the inspection-date normalization in [`crate::datetime`].

use std::env;

use chrono_tz::Tz;

use crate::datetime::DatePolicy;
use crate::error::AppError;

// Common constants
const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client configuration shared by the API client and CLI
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub timezone: Tz,
    pub date_policy: DatePolicy,
    pub request_timeout_secs: u64,
}

impl ClientConfig {
    /// Load configuration from the environment.
    ///
    /// Variables: SITECHECK_API_URL, SITECHECK_API_TOKEN, SITECHECK_TIMEZONE
    /// (IANA name, default UTC), SITECHECK_DATE_POLICY (`utc-noon`,
    /// `local-midnight`, `zone-midnight` or `zone-midnight:<tz>`).
    pub fn from_env() -> Result<Self, AppError> {
        let api_base_url =
            env::var("SITECHECK_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        let api_token = env::var("SITECHECK_API_TOKEN").ok();

        let timezone = match env::var("SITECHECK_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|_| AppError::InvalidInput(format!("Unknown timezone: {}", name)))?,
            Err(_) => Tz::UTC,
        };

        // Bare `zone-midnight` picks up SITECHECK_TIMEZONE
        let date_policy = match env::var("SITECHECK_DATE_POLICY").as_deref() {
            Ok("zone-midnight") => DatePolicy::ZoneMidnight(timezone),
            Ok(other) => other
                .parse::<DatePolicy>()
                .map_err(|e| AppError::InvalidInput(e.to_string()))?,
            Err(_) => DatePolicy::UtcNoon,
        };

        Ok(Self {
            api_base_url,
            api_token,
            timezone,
            date_policy,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timezone: Tz::UTC,
            date_policy: DatePolicy::UtcNoon,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}
