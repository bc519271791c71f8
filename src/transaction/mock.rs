use async_trait::async_trait;
#[cfg(test)]
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use super::{
    TransactionError, TransactionParams, TransactionService,
    TransactionSummary,
};
use crate::asset::AssetIssuance;

#[cfg(test)]
#[derive(Debug, Clone)]
pub(crate) struct CreateTransactionCall {
    pub(crate) params: TransactionParams,
    pub(crate) attachment: AssetIssuance,
}

enum MockBehavior {
    Success,
    NodeError { code: u8, description: String },
}

/// Mock transaction service for testing.
///
/// This mock is NOT behind `#[cfg(test)]` because `setup_test_rocket()` (used
/// by E2E tests in `tests/`) needs to construct it. Call recording IS behind
/// `#[cfg(test)]` because E2E tests only interact with the service through
/// its HTTP API and compile the library without `#[cfg(test)]` enabled.
pub struct MockTransactionService {
    behavior: MockBehavior,
    call_count: Arc<AtomicUsize>,
    #[cfg(test)]
    last_call: Arc<Mutex<Option<CreateTransactionCall>>>,
}

impl MockTransactionService {
    #[must_use]
    pub fn new_success() -> Self {
        Self {
            behavior: MockBehavior::Success,
            call_count: Arc::new(AtomicUsize::new(0)),
            #[cfg(test)]
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    #[must_use]
    pub fn new_node_error(code: u8, description: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::NodeError {
                code,
                description: description.into(),
            },
            call_count: Arc::new(AtomicUsize::new(0)),
            #[cfg(test)]
            last_call: Arc::new(Mutex::new(None)),
        }
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }

    #[cfg(test)]
    pub(crate) fn last_call(&self) -> Option<CreateTransactionCall> {
        self.last_call.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionService for MockTransactionService {
    async fn create_transaction(
        &self,
        params: &TransactionParams,
        attachment: AssetIssuance,
    ) -> Result<TransactionSummary, TransactionError> {
        self.call_count.fetch_add(1, Ordering::Relaxed);

        #[cfg(test)]
        {
            *self.last_call.lock().unwrap() = Some(CreateTransactionCall {
                params: params.clone(),
                attachment: attachment.clone(),
            });
        }
        #[cfg(not(test))]
        let _ = params;

        match &self.behavior {
            MockBehavior::Success => Ok(TransactionSummary {
                transaction: "16282983679291040291".to_string(),
                full_hash: "a3f2de6a8b1c4975e0c8b6ed31a2f0447d92cf013e5b8aa6\
                            04c1d79e2b85f316"
                    .to_string(),
                fee_nqt: 100_000_000,
                broadcasted: true,
                attachment,
            }),
            MockBehavior::NodeError { code, description } => {
                Err(TransactionError::Node {
                    code: *code,
                    description: description.clone(),
                })
            }
        }
    }
}
