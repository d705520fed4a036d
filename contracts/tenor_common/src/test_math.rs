//! Tests for precision helpers, the ratio formula and the reentrancy flag.

#![cfg(test)]

use crate::guard;
use crate::math::{self, SCALE};
use crate::types::{BondConfig, PermissionFlag, PermissionFlags};
use soroban_sdk::{contract, contractimpl, Env};
use tenor_errors::ContractError;

#[contract]
pub struct GuardProbe;

#[contractimpl]
impl GuardProbe {
    pub fn ping(_e: Env) -> bool {
        true
    }
}

const DOLLAR: u128 = SCALE;

#[test]
fn test_precision_scalar_common_decimals() {
    assert_eq!(math::precision_scalar(18), Ok(1));
    assert_eq!(math::precision_scalar(8), Ok(10_000_000_000));
    assert_eq!(math::precision_scalar(7), Ok(100_000_000_000));
    assert_eq!(math::precision_scalar(6), Ok(1_000_000_000_000));
    assert_eq!(math::precision_scalar(0), Ok(SCALE));
}

#[test]
fn test_precision_scalar_rejects_more_than_18_decimals() {
    assert_eq!(
        math::precision_scalar(19),
        Err(ContractError::InvalidDecimals)
    );
}

#[test]
fn test_to_token_amount_bounds() {
    assert_eq!(math::to_token_amount(0), Ok(0));
    assert_eq!(math::to_token_amount(i128::MAX as u128), Ok(i128::MAX));
    assert_eq!(
        math::to_token_amount(i128::MAX as u128 + 1),
        Err(ContractError::Overflow)
    );
}

#[test]
fn test_checked_helpers() {
    assert_eq!(math::add(u128::MAX, 1), Err(ContractError::Overflow));
    assert_eq!(math::sub(0, 1), Err(ContractError::Overflow));
    assert_eq!(math::mul(u128::MAX, 2), Err(ContractError::Overflow));
    assert_eq!(math::add(2, 3), Ok(5));
}

#[test]
fn test_ratio_ten_units_at_one_hundred_dollars() {
    let e = Env::default();
    // 10 collateral at $100 against 100 debt at $1 → 1000%.
    let ratio =
        math::collateralization_ratio(&e, 10 * SCALE, 1, 100 * DOLLAR, 100 * SCALE, DOLLAR)
            .unwrap();
    assert_eq!(ratio, 10 * SCALE);
}

#[test]
fn test_ratio_ten_units_at_twelve_dollars() {
    let e = Env::default();
    let ratio =
        math::collateralization_ratio(&e, 10 * SCALE, 1, 12 * DOLLAR, 100 * SCALE, DOLLAR)
            .unwrap();
    assert_eq!(ratio, 12 * SCALE / 10);
}

#[test]
fn test_ratio_normalizes_collateral_decimals() {
    let e = Env::default();
    // 10 units of a 7-decimal collateral.
    let scalar = math::precision_scalar(7).unwrap();
    let ratio = math::collateralization_ratio(
        &e,
        10 * 10_000_000,
        scalar,
        100 * DOLLAR,
        100 * SCALE,
        DOLLAR,
    )
    .unwrap();
    assert_eq!(ratio, 10 * SCALE);
}

#[test]
fn test_ratio_without_debt_is_unbounded() {
    let e = Env::default();
    let ratio = math::collateralization_ratio(&e, 0, 1, 0, 0, 0).unwrap();
    assert_eq!(ratio, u128::MAX);
}

#[test]
fn test_ratio_zero_price_is_unavailable() {
    let e = Env::default();
    assert_eq!(
        math::collateralization_ratio(&e, SCALE, 1, 0, SCALE, DOLLAR),
        Err(ContractError::PriceUnavailable)
    );
    assert_eq!(
        math::collateralization_ratio(&e, SCALE, 1, DOLLAR, SCALE, 0),
        Err(ContractError::PriceUnavailable)
    );
}

#[test]
fn test_ratio_large_values_do_not_overflow_u128_intermediates() {
    let e = Env::default();
    // locked × price alone exceeds u128::MAX.
    let locked = 1_000_000_000 * SCALE;
    let ratio =
        math::collateralization_ratio(&e, locked, 1, 1_000_000 * DOLLAR, locked, DOLLAR).unwrap();
    assert_eq!(ratio, 1_000_000 * SCALE);
}

#[test]
fn test_ratio_zero_decimal_collateral_scales_in_256_bits() {
    let e = Env::default();
    // 1e21 whole units of a 0-decimal asset normalize to 1e39, past u128::MAX.
    let scalar = math::precision_scalar(0).unwrap();
    let locked = 1_000 * SCALE;
    let debt = 100 * SCALE * SCALE;
    let ratio = math::collateralization_ratio(&e, locked, scalar, DOLLAR, debt, DOLLAR).unwrap();
    assert_eq!(ratio, 10 * SCALE);
}

#[test]
fn test_permission_flags_round_trip_every_flag() {
    let flags = [
        PermissionFlag::DepositCollateral,
        PermissionFlag::Borrow,
        PermissionFlag::RepayBorrow,
        PermissionFlag::LiquidateBorrow,
        PermissionFlag::SupplyUnderlying,
        PermissionFlag::RedeemUnderlying,
    ];
    for flag in flags {
        let mut table = PermissionFlags::default();
        assert!(!table.get(flag));
        table.set(flag, true);
        assert!(table.get(flag));
        for other in flags {
            if other != flag {
                assert!(!table.get(other));
            }
        }
    }
}

#[test]
fn test_default_bond_config_is_unlisted() {
    let config = BondConfig::default();
    assert_eq!(config.require_listed(), Err(ContractError::BondNotListed));
    assert_eq!(
        config.require_allowed(PermissionFlag::Borrow, ContractError::BorrowNotAllowed),
        Err(ContractError::BorrowNotAllowed)
    );
}

#[test]
fn test_guard_rejects_nested_entry() {
    let e = Env::default();
    let id = e.register(GuardProbe, ());
    e.as_contract(&id, || {
        let outer = guard::with_reentrancy_guard(&e, || {
            let inner = guard::with_reentrancy_guard(&e, || Ok(1_u32));
            assert_eq!(inner, Err(ContractError::ReentrancyDetected));
            Ok(2_u32)
        });
        assert_eq!(outer, Ok(2));
        assert!(!guard::is_locked(&e));
    });
}
