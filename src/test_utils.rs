//! Shared helpers for unit and end-to-end tests.

use rocket::routes;
use std::sync::Arc;

use crate::auth::test_auth_config;
use crate::config::{Config, LogLevel};
use crate::transaction::service::NodeConfig;
use crate::transaction::TransactionService;

/// API key accepted by [`test_config`].
pub const TEST_API_KEY: &str = "test-key-12345678901234567890123456";

/// Returns a configuration suitable for tests.
///
/// # Errors
///
/// Returns an error if parsing fails (should not happen with hardcoded
/// values).
pub fn test_config() -> Result<Config, anyhow::Error> {
    Ok(Config {
        auth: test_auth_config()?,
        node: NodeConfig::test_default(),
        log_level: LogLevel::Debug,
    })
}

/// Sets up a test Rocket instance backed by the given transaction service.
///
/// This function is NOT behind `#[cfg(test)]` because E2E tests in the
/// `tests/` directory need to call it. E2E tests should only interact with
/// the returned Rocket instance through its public HTTP API.
///
/// # Errors
///
/// Returns an error if the test configuration cannot be built.
pub fn setup_test_rocket(
    service: Arc<dyn TransactionService>,
) -> Result<rocket::Rocket<rocket::Build>, anyhow::Error> {
    Ok(rocket::build()
        .manage(test_config()?)
        .manage(service)
        .mount("/", routes![crate::asset::issue_asset])
        .register("/", crate::catchers::json_catchers()))
}
