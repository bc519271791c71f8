//! Shared request-parameter handling for the transaction API.
//!
//! Domain parameters arrive as strings; the helpers here assign them meaning
//! and reject them with stable, enumerable error codes that clients can match
//! on.

use serde::{Deserialize, Serialize};

pub(crate) const NAME_PARAMETER: &str = "name";
pub(crate) const DESCRIPTION_PARAMETER: &str = "description";
pub(crate) const DECIMALS_PARAMETER: &str = "decimals";
pub(crate) const QUANTITY_NQT_PARAMETER: &str = "quantityNQT";

/// Largest amount representable on the ledger, in NQT.
pub(crate) const MAX_BALANCE_NQT: i64 = 2_158_812_800 * 100_000_000;

const MISSING_PARAMETER_CODE: u8 = 3;
const INCORRECT_PARAMETER_CODE: u8 = 4;

/// A request parameter that failed validation.
///
/// Checks run in a fixed order and stop at the first violation, so callers
/// always see exactly one of these per rejected request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ParameterError {
    #[error("\"{0}\" not specified")]
    Missing(&'static str),

    #[error("incorrect \"{parameter}\" ({constraint})")]
    IncorrectLength {
        parameter: &'static str,
        constraint: &'static str,
    },

    #[error("incorrect \"{parameter}\" ({constraint})")]
    IncorrectFormat {
        parameter: &'static str,
        constraint: &'static str,
    },

    #[error("incorrect \"{0}\"")]
    IncorrectValue(&'static str),
}

impl ParameterError {
    /// Stable numeric code carried in the JSON error envelope.
    pub(crate) const fn error_code(&self) -> u8 {
        match self {
            Self::Missing(_) => MISSING_PARAMETER_CODE,
            Self::IncorrectLength { .. }
            | Self::IncorrectFormat { .. }
            | Self::IncorrectValue(_) => INCORRECT_PARAMETER_CODE,
        }
    }
}

/// JSON envelope returned for every rejected request.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(rename = "errorCode")]
    pub(crate) error_code: u8,
    #[serde(rename = "errorDescription")]
    pub(crate) error_description: String,
}

/// Returns whether `input` consists solely of digits and latin letters.
///
/// Names entered on the ledger are matched case-insensitively, so both cases
/// are accepted here.
pub(crate) fn is_in_alphabet(input: &str) -> bool {
    input.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Extracts the `quantityNQT` parameter, shared by every transaction type
/// that moves a quantity.
pub(crate) fn parse_quantity_nqt(
    raw: Option<&str>,
) -> Result<i64, ParameterError> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(ParameterError::Missing(QUANTITY_NQT_PARAMETER))?;

    let quantity = raw
        .parse::<i64>()
        .map_err(|_| ParameterError::IncorrectValue(QUANTITY_NQT_PARAMETER))?;

    if !(1..=MAX_BALANCE_NQT).contains(&quantity) {
        return Err(ParameterError::IncorrectValue(QUANTITY_NQT_PARAMETER));
    }

    Ok(quantity)
}
