use serde::{Deserialize, Serialize};

/// Ledger operation carried by a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    AssetIssuance,
}

/// Immutable payload describing a new asset to be entered on the ledger.
///
/// Built once per validated request; ownership moves to the
/// transaction-creation service and the payload is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIssuance {
    name: String,
    description: String,
    decimals: u8,
    #[serde(rename = "quantityNQT")]
    quantity_nqt: i64,
}

impl AssetIssuance {
    pub(crate) fn new(
        name: String,
        description: String,
        decimals: u8,
        quantity_nqt: i64,
    ) -> Self {
        Self { name, description, decimals, quantity_nqt }
    }

    #[must_use]
    pub const fn kind(&self) -> TransactionKind {
        TransactionKind::AssetIssuance
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn decimals(&self) -> u8 {
        self.decimals
    }

    #[must_use]
    pub const fn quantity_nqt(&self) -> i64 {
        self.quantity_nqt
    }
}
