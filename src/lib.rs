use rocket::routes;
use std::sync::Arc;
use tracing::info;

use crate::transaction::TransactionService;

pub mod asset;
pub mod config;
pub mod test_utils;
pub mod transaction;

pub(crate) mod auth;
pub(crate) mod catchers;
pub(crate) mod params;

pub use auth::{AdminApiKey, AuthConfig};
pub use config::{setup_tracing, Config, LogLevel};

/// Initializes and configures the Rocket web server.
///
/// Builds the transaction-node client from configuration and mounts the
/// transaction API endpoints. This is the main entry point for starting the
/// application.
///
/// # Errors
///
/// Returns an error if the transaction-node HTTP client cannot be built.
pub fn initialize_rocket(
    config: Config,
) -> Result<rocket::Rocket<rocket::Build>, anyhow::Error> {
    let service = config.node.service()?;
    info!(node = %config.node.base_url, "Using transaction node");

    Ok(build_rocket(config, service))
}

fn build_rocket(
    config: Config,
    service: Arc<dyn TransactionService>,
) -> rocket::Rocket<rocket::Build> {
    let figment = rocket::Config::figment()
        .merge(("address", "0.0.0.0"))
        .merge(("port", 8000));

    rocket::custom(figment)
        .manage(config)
        .manage(service)
        .mount("/", routes![asset::issue_asset])
        .register("/", catchers::json_catchers())
}
