//! Overflow-safe arithmetic and precision helpers for ledger calculations.
//!
//! Amounts inside the ledgers are `u128`. Canonical precision is 18
//! decimals; assets with fewer decimals are scaled up by
//! `10^(18 - decimals)` before they meet prices or ratios.

use soroban_sdk::{Env, U256};
use tenor_errors::ContractError;

/// Decimals used by claim tokens, prices and ratios.
pub const CANONICAL_DECIMALS: u32 = 18;

/// `1e18`: one whole unit, or 100%, in canonical precision.
pub const SCALE: u128 = 1_000_000_000_000_000_000;

#[inline]
pub fn add(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_add(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn sub(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_sub(b).ok_or(ContractError::Overflow)
}

#[inline]
pub fn mul(a: u128, b: u128) -> Result<u128, ContractError> {
    a.checked_mul(b).ok_or(ContractError::Overflow)
}

/// `10^(18 - decimals)`. Rejects assets with more than 18 decimals.
pub fn precision_scalar(decimals: u32) -> Result<u128, ContractError> {
    if decimals > CANONICAL_DECIMALS {
        return Err(ContractError::InvalidDecimals);
    }
    Ok(10_u128.pow(CANONICAL_DECIMALS - decimals))
}

/// Converts a ledger amount to the `i128` used by the token interface.
#[inline]
pub fn to_token_amount(amount: u128) -> Result<i128, ContractError> {
    i128::try_from(amount).map_err(|_| ContractError::Overflow)
}

/// Collateralization ratio of a position as an 18-decimal mantissa:
///
/// ```text
/// locked × collateral_scalar × collateral_price × 1e18 / (debt × underlying_price)
/// ```
///
/// Products are taken in 256 bits; results above `u128::MAX` saturate. A
/// position without debt is infinitely collateralized and reads as
/// `u128::MAX`. A zero price is `PriceUnavailable`.
pub fn collateralization_ratio(
    e: &Env,
    locked_collateral: u128,
    collateral_precision_scalar: u128,
    collateral_price: u128,
    debt: u128,
    underlying_price: u128,
) -> Result<u128, ContractError> {
    if debt == 0 {
        return Ok(u128::MAX);
    }
    if collateral_price == 0 || underlying_price == 0 {
        return Err(ContractError::PriceUnavailable);
    }

    let collateral_value = U256::from_u128(e, locked_collateral)
        .mul(&U256::from_u128(e, collateral_precision_scalar))
        .mul(&U256::from_u128(e, collateral_price))
        .mul(&U256::from_u128(e, SCALE));
    let debt_value = U256::from_u128(e, debt).mul(&U256::from_u128(e, underlying_price));

    Ok(collateral_value.div(&debt_value).to_u128().unwrap_or(u128::MAX))
}
