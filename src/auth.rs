use clap::Args;
use rocket::http::Status;
use rocket::request::{FromRequest, Outcome, Request};
use std::str::FromStr;
use subtle::ConstantTimeEq;
use tracing::{info, warn};

use crate::config::Config;

#[derive(Clone)]
pub struct AdminApiKey(String);

impl std::fmt::Debug for AdminApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminApiKey").field(&"[REDACTED]").finish()
    }
}

impl AdminApiKey {
    const MIN_LENGTH: usize = 32;

    fn new(value: String) -> Result<Self, AdminApiKeyError> {
        if value.len() < Self::MIN_LENGTH {
            return Err(AdminApiKeyError::TooShort { len: value.len() });
        }

        Ok(Self(value))
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AdminApiKey {
    type Err = AdminApiKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdminApiKeyError {
    #[error("Admin API key must be at least {min} characters, got {len}", min = AdminApiKey::MIN_LENGTH)]
    TooShort { len: usize },
}

/// Authentication configuration for API guards.
#[derive(Debug, Args, Clone)]
pub struct AuthConfig {
    #[arg(
        long,
        env = "ADMIN_API_KEY",
        help = "API key for authenticating administrative requests"
    )]
    pub admin_api_key: AdminApiKey,
}

/// Guard for administrative endpoints.
///
/// Validates the `X-API-KEY` header against the configured admin key.
pub(crate) struct AdminAuth;

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AdminAuth {
    type Error = AuthError;

    async fn from_request(
        request: &'r Request<'_>,
    ) -> Outcome<Self, Self::Error> {
        match authenticate_request(request) {
            Ok(()) => {
                info!(
                    endpoint = %request.uri(),
                    "Admin authentication success"
                );
                Outcome::Success(Self)
            }
            Err((status, error)) => Outcome::Error((status, error)),
        }
    }
}

fn authenticate_request(
    request: &Request<'_>,
) -> Result<(), (Status, AuthError)> {
    let config = request.rocket().state::<Config>().ok_or_else(|| {
        warn!("Config not found in Rocket state");
        (Status::InternalServerError, AuthError::ConfigMissing)
    })?;

    let Some(api_key) = request.headers().get_one("X-API-KEY") else {
        warn!(
            endpoint = %request.uri(),
            "Missing X-API-KEY header"
        );
        return Err((Status::Unauthorized, AuthError::MissingApiKey));
    };

    if !validate_api_key(api_key, config.auth.admin_api_key.as_str()) {
        warn!(
            endpoint = %request.uri(),
            "Invalid API key"
        );
        return Err((Status::Unauthorized, AuthError::InvalidApiKey));
    }

    Ok(())
}

fn validate_api_key(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

/// Why a request failed authentication. Surfaced to clients only through the
/// response status; the JSON body comes from the registered catchers.
#[derive(Debug)]
pub enum AuthError {
    MissingApiKey,
    InvalidApiKey,
    ConfigMissing,
}

/// Creates test authentication configuration for use in tests.
///
/// # Errors
///
/// Returns an error if parsing fails (should not happen with hardcoded values).
pub fn test_auth_config() -> Result<AuthConfig, AdminApiKeyError> {
    Ok(AuthConfig {
        admin_api_key: "test-key-12345678901234567890123456".parse()?,
    })
}
