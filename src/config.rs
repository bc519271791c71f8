use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::auth::AuthConfig;
use crate::transaction::service::NodeConfig;

#[derive(Debug, Parser)]
#[command(name = "ledger-issuance")]
#[command(about = "Transaction API service for issuing assets on the ledger")]
pub struct Config {
    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub node: NodeConfig,

    #[arg(
        long,
        env = "LOG_LEVEL",
        default_value = "info",
        help = "Log level for the service"
    )]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_filter(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn setup_tracing(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.as_filter()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
