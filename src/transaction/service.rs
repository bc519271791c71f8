use async_trait::async_trait;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use super::{
    TransactionError, TransactionParams, TransactionService,
    TransactionSummary,
};
use crate::asset::{AssetIssuance, TransactionKind};

#[derive(Debug, Args, Clone)]
pub struct NodeConfig {
    #[arg(
        long = "node-base-url",
        env = "NODE_BASE_URL",
        default_value = "http://127.0.0.1:8125",
        help = "Base URL of the transaction node"
    )]
    pub base_url: String,

    #[arg(
        long = "node-connect-timeout-secs",
        env = "NODE_CONNECT_TIMEOUT_SECS",
        default_value = "10",
        help = "Transaction node connection timeout in seconds"
    )]
    pub connect_timeout_secs: u64,

    #[arg(
        long = "node-request-timeout-secs",
        env = "NODE_REQUEST_TIMEOUT_SECS",
        default_value = "30",
        help = "Transaction node request timeout in seconds"
    )]
    pub request_timeout_secs: u64,
}

impl NodeConfig {
    pub(crate) fn service(
        &self,
    ) -> Result<Arc<dyn TransactionService>, TransactionError> {
        let service = HttpTransactionService::new(
            self.base_url.clone(),
            self.connect_timeout_secs,
            self.request_timeout_secs,
        )?;
        Ok(Arc::new(service))
    }

    #[must_use]
    pub fn test_default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8125".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

/// Transaction service backed by a ledger node's HTTP API.
///
/// The call is single-shot: the node owns its own timeout and retry policy,
/// so failures here surface immediately to the caller.
pub struct HttpTransactionService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransactionService {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: String,
        connect_timeout_secs: u64,
        request_timeout_secs: u64,
    ) -> Result<Self, TransactionError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(request_timeout_secs))
            .build()?;
        Ok(Self { client, base_url })
    }
}

#[derive(Serialize)]
struct CreateTransactionBody<'a> {
    #[serde(rename = "type")]
    kind: TransactionKind,
    attachment: &'a AssetIssuance,
    #[serde(flatten)]
    params: &'a TransactionParams,
}

/// Nodes answer 200 for both accepted transactions and business-level
/// rejections; the error envelope is distinguished by its `errorCode` field.
#[derive(Deserialize)]
#[serde(untagged)]
enum NodeResponse {
    Error {
        #[serde(rename = "errorCode")]
        error_code: u8,
        #[serde(rename = "errorDescription")]
        error_description: String,
    },
    Summary(TransactionSummary),
}

#[async_trait]
impl TransactionService for HttpTransactionService {
    async fn create_transaction(
        &self,
        params: &TransactionParams,
        attachment: AssetIssuance,
    ) -> Result<TransactionSummary, TransactionError> {
        let url =
            format!("{}/transactions", self.base_url.trim_end_matches('/'));

        debug!(%url, method = "POST", kind = ?attachment.kind(), "Forwarding transaction to node");

        let body = CreateTransactionBody {
            kind: attachment.kind(),
            attachment: &attachment,
            params,
        };

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            return Err(TransactionError::Api {
                status_code: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: NodeResponse =
            serde_json::from_str(&body).map_err(|e| {
                tracing::error!(
                    %body,
                    error = %e,
                    "Failed to parse node response"
                );
                TransactionError::Parse { body: body.clone(), source: e }
            })?;

        match parsed {
            NodeResponse::Summary(summary) => Ok(summary),
            NodeResponse::Error { error_code, error_description } => {
                Err(TransactionError::Node {
                    code: error_code,
                    description: error_description,
                })
            }
        }
    }
}
