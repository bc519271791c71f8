//! Asset-issuance domain: validation rules and the issuance attachment.

mod attachment;

pub(crate) mod api;

pub(crate) use api::issue_asset;
pub use attachment::{AssetIssuance, TransactionKind};

use crate::params::{
    self, ParameterError, DECIMALS_PARAMETER, DESCRIPTION_PARAMETER,
    NAME_PARAMETER,
};

pub const MIN_NAME_LENGTH: usize = 3;
pub const MAX_NAME_LENGTH: usize = 10;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;

const MAX_DECIMALS: u8 = 8;

const NAME_LENGTH_CONSTRAINT: &str = "length must be in [3..10] range";
const NAME_ALPHABET_CONSTRAINT: &str =
    "must contain only digits and latin letters";
const DESCRIPTION_LENGTH_CONSTRAINT: &str =
    "length must not exceed 1000 characters";

/// Validated field set produced by the issuance checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IssuanceFields {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) decimals: u8,
}

/// Runs the issuance parameter checks in their fixed order, stopping at the
/// first violation: name presence, name length, name alphabet, description
/// length, decimals.
pub(crate) fn validate_issuance(
    name: Option<&str>,
    description: Option<&str>,
    decimals: Option<&str>,
) -> Result<IssuanceFields, ParameterError> {
    let name =
        name.ok_or(ParameterError::Missing(NAME_PARAMETER))?.trim();

    let name_length = name.chars().count();
    if !(MIN_NAME_LENGTH..=MAX_NAME_LENGTH).contains(&name_length) {
        return Err(ParameterError::IncorrectLength {
            parameter: NAME_PARAMETER,
            constraint: NAME_LENGTH_CONSTRAINT,
        });
    }

    if !params::is_in_alphabet(name) {
        return Err(ParameterError::IncorrectFormat {
            parameter: NAME_PARAMETER,
            constraint: NAME_ALPHABET_CONSTRAINT,
        });
    }

    let description = description.unwrap_or_default();
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ParameterError::IncorrectLength {
            parameter: DESCRIPTION_PARAMETER,
            constraint: DESCRIPTION_LENGTH_CONSTRAINT,
        });
    }

    let decimals = parse_decimals(decimals)?;

    Ok(IssuanceFields {
        name: name.to_owned(),
        description: description.to_owned(),
        decimals,
    })
}

fn parse_decimals(raw: Option<&str>) -> Result<u8, ParameterError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(0);
    };

    let decimals = raw
        .parse::<u8>()
        .map_err(|_| ParameterError::IncorrectValue(DECIMALS_PARAMETER))?;

    if decimals > MAX_DECIMALS {
        return Err(ParameterError::IncorrectValue(DECIMALS_PARAMETER));
    }

    Ok(decimals)
}
