use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::asset::AssetIssuance;

pub mod mock;
pub mod service;

/// Common transaction parameters forwarded untouched to the
/// transaction-creation service.
///
/// Fee selection, deadline handling and signing belong to the node; this
/// service only carries the fields through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionParams {
    #[serde(rename = "feeNQT", skip_serializing_if = "Option::is_none")]
    pub fee_nqt: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcast: Option<bool>,
}

/// Service abstraction for turning a validated attachment into a ledger
/// transaction.
///
/// The implementation is responsible for fee computation, signing and
/// broadcast. Implementations can be real node-backed services or mocks for
/// testing.
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// Creates a transaction carrying the given attachment.
    ///
    /// # Errors
    ///
    /// Returns [`TransactionError`] if the node rejects the transaction or
    /// cannot be reached. Errors reported by the node are passed through
    /// verbatim, never reinterpreted.
    async fn create_transaction(
        &self,
        params: &TransactionParams,
        attachment: AssetIssuance,
    ) -> Result<TransactionSummary, TransactionError>;
}

/// Node response for a successfully created transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSummary {
    /// Identifier the node assigned to the transaction.
    pub transaction: String,

    #[serde(rename = "fullHash")]
    pub full_hash: String,

    #[serde(rename = "feeNQT")]
    pub fee_nqt: i64,

    pub broadcasted: bool,

    /// Echo of the accepted issuance payload.
    pub attachment: AssetIssuance,
}

/// Stable code reported when the node cannot be reached or answers with
/// something other than a transaction result.
pub(crate) const NODE_UNAVAILABLE_CODE: u8 = 9;

/// Errors that can occur while delegating to the transaction node.
#[derive(Debug, thiserror::Error)]
pub enum TransactionError {
    /// Error reported by the node, passed through verbatim.
    #[error("{description}")]
    Node { code: u8, description: String },

    /// Node answered with an unexpected HTTP status.
    #[error("node error: {status_code} - {body}")]
    Api { status_code: u16, body: String },

    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Node returned a payload that is neither a summary nor an error.
    #[error("Failed to parse node response: {body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}
