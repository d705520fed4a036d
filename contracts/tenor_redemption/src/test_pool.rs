//! Supply and redemption against a single bond.

#![cfg(test)]

use crate::test_helpers::{setup, setup_with_decimals, DEFAULT_MINT_UNITS, EXPIRY, START};
use crate::{RedemptionPool, RedemptionPoolClient};
use soroban_sdk::testutils::{Address as _, Events, Ledger};
use soroban_sdk::{Address, Env, FromVal, Symbol};
use tenor_claim_token::{TenorClaimToken, TenorClaimTokenClient};
use tenor_common::PermissionFlag;
use tenor_errors::ContractError;

// ═══════════════════════════════════════════════════════════════════════
// 1. Initialization
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_initialize_twice_fails() {
    let e = Env::default();
    let p = setup(&e);
    assert_eq!(
        p.pool.try_initialize(&p.admin, &p.registry.address),
        Err(Ok(ContractError::AlreadyInitialized))
    );
    assert_eq!(p.pool.get_registry(), p.registry.address);
    assert_eq!(p.pool.get_admin(), p.admin);
}

#[test]
fn test_uninitialized_pool_rejects_supply() {
    let e = Env::default();
    e.mock_all_auths();
    let id = e.register(RedemptionPool, ());
    let pool = RedemptionPoolClient::new(&e, &id);
    let a = Address::generate(&e);

    assert_eq!(
        pool.try_supply_underlying(&a, &a, &1),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(pool.get_total_underlying_supply(&a), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// 2. Supply
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_supply_mints_scaled_claim_tokens() {
    let e = Env::default();
    let p = setup(&e);
    let amount = 250 * p.unit;

    p.pool.supply_underlying(&p.bond, &p.supplier, &amount);

    // 6-decimal underlying: one native unit is 1e12 claim units.
    assert_eq!(p.claim.balance(&p.supplier), amount * 1_000_000_000_000);
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), amount);
    assert_eq!(p.underlying.balance(&p.pool.address), amount as i128);

    let event = e
        .events()
        .all()
        .into_iter()
        .rev()
        .find(|ev| ev.0 == p.pool.address)
        .unwrap();
    assert_eq!(
        Symbol::from_val(&e, &event.1.get(0).unwrap()),
        Symbol::new(&e, "supply_underlying")
    );
    let data = <(Address, u128, u128)>::from_val(&e, &event.2);
    assert_eq!(
        data,
        (p.supplier.clone(), amount, amount * 1_000_000_000_000)
    );
}

#[test]
fn test_supply_accumulates() {
    let e = Env::default();
    let p = setup(&e);

    p.pool.supply_underlying(&p.bond, &p.supplier, &(3 * p.unit));
    p.pool.supply_underlying(&p.bond, &p.supplier, &(4 * p.unit));

    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 7 * p.unit);
}

#[test]
fn test_supply_fails_at_and_after_expiration() {
    let e = Env::default();
    let p = setup(&e);

    e.ledger().with_mut(|li| li.timestamp = EXPIRY - 1);
    p.pool.supply_underlying(&p.bond, &p.supplier, &p.unit);

    for now in [EXPIRY, EXPIRY + 1] {
        e.ledger().with_mut(|li| li.timestamp = now);
        assert_eq!(
            p.pool.try_supply_underlying(&p.bond, &p.supplier, &p.unit),
            Err(Ok(ContractError::BondMatured))
        );
    }
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), p.unit);
}

#[test]
fn test_supply_validation_order() {
    let e = Env::default();
    let p = setup(&e);
    let unlisted = Address::generate(&e);

    assert_eq!(
        p.pool.try_supply_underlying(&unlisted, &p.supplier, &0),
        Err(Ok(ContractError::BondNotListed))
    );
    assert_eq!(
        p.pool.try_supply_underlying(&p.bond, &p.supplier, &0),
        Err(Ok(ContractError::SupplyUnderlyingZero))
    );

    p.allow(PermissionFlag::SupplyUnderlying, false);
    assert_eq!(
        p.pool.try_supply_underlying(&p.bond, &p.supplier, &0),
        Err(Ok(ContractError::SupplyUnderlyingZero))
    );
    assert_eq!(
        p.pool.try_supply_underlying(&p.bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::SupplyUnderlyingNotAllowed))
    );
}

#[test]
fn test_supply_transfer_failure_rolls_back() {
    let e = Env::default();
    let p = setup(&e);
    p.underlying.set_failing(&true);

    assert_eq!(
        p.pool.try_supply_underlying(&p.bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::TokenTransferFailed))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 0);
    assert_eq!(p.claim.balance(&p.supplier), 0);
}

#[test]
fn test_supply_mint_failure_rolls_back() {
    let e = Env::default();
    let p = setup(&e);

    // Claim token that only accepts issuance from other contracts.
    let underlying = p.underlying.address.clone();
    let foreign_bond = e.register(TenorClaimToken, ());
    TenorClaimTokenClient::new(&e, &foreign_bond).initialize(
        &p.admin,
        &Address::generate(&e),
        &Address::generate(&e),
        &underlying,
        &underlying,
        &EXPIRY,
    );
    p.registry.list_bond(&p.admin, &foreign_bond);
    p.registry.set_permission(
        &p.admin,
        &foreign_bond,
        &PermissionFlag::SupplyUnderlying,
        &true,
    );

    assert_eq!(
        p.pool
            .try_supply_underlying(&foreign_bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::MintFailed))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&foreign_bond), 0);
    assert_eq!(
        p.underlying.balance(&p.supplier),
        DEFAULT_MINT_UNITS * p.unit as i128
    );
}

#[test]
fn test_listed_bond_without_claim_terms_fails() {
    let e = Env::default();
    let p = setup(&e);
    let bare_bond = e.register(TenorClaimToken, ());
    p.registry.list_bond(&p.admin, &bare_bond);
    p.registry.set_permission(
        &p.admin,
        &bare_bond,
        &PermissionFlag::SupplyUnderlying,
        &true,
    );

    assert_eq!(
        p.pool.try_supply_underlying(&bare_bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        p.pool.try_redeem_underlying(&bare_bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&bare_bond), 0);
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Redeem
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_redeem_fails_before_expiration() {
    let e = Env::default();
    let p = setup(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &p.unit);

    for now in [START, EXPIRY - 1] {
        e.ledger().with_mut(|li| li.timestamp = now);
        assert_eq!(
            p.pool.try_redeem_underlying(&p.bond, &p.supplier, &p.unit),
            Err(Ok(ContractError::BondNotMatured))
        );
    }

    e.ledger().with_mut(|li| li.timestamp = EXPIRY);
    p.pool.redeem_underlying(&p.bond, &p.supplier, &p.unit);
}

#[test]
fn test_redeem_validation_order() {
    let e = Env::default();
    let p = setup(&e);
    let unlisted = Address::generate(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &p.unit);

    for amount in [0, p.unit] {
        assert_eq!(
            p.pool.try_redeem_underlying(&unlisted, &p.supplier, &amount),
            Err(Ok(ContractError::BondNotListed))
        );
    }

    p.mature();
    for amount in [0, p.unit] {
        assert_eq!(
            p.pool.try_redeem_underlying(&unlisted, &p.supplier, &amount),
            Err(Ok(ContractError::BondNotListed))
        );
    }

    assert_eq!(
        p.pool.try_redeem_underlying(&p.bond, &p.supplier, &0),
        Err(Ok(ContractError::RedeemUnderlyingZero))
    );

    p.allow(PermissionFlag::RedeemUnderlying, false);
    assert_eq!(
        p.pool.try_redeem_underlying(&p.bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::RedeemUnderlyingNotAllowed))
    );
}

#[test]
fn test_over_redeem_leaves_supply_unchanged() {
    let e = Env::default();
    let p = setup(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &(5 * p.unit));
    p.mature();

    assert_eq!(
        p.pool
            .try_redeem_underlying(&p.bond, &p.supplier, &(5 * p.unit + 1)),
        Err(Ok(ContractError::RedeemUnderlyingInsufficientUnderlying))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 5 * p.unit);
    assert_eq!(
        p.claim.balance(&p.supplier),
        5 * p.unit * 1_000_000_000_000
    );
}

#[test]
fn test_redeem_without_claim_tokens_fails() {
    let e = Env::default();
    let p = setup(&e);
    let outsider = Address::generate(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &(5 * p.unit));
    p.mature();

    assert_eq!(
        p.pool.try_redeem_underlying(&p.bond, &outsider, &p.unit),
        Err(Ok(ContractError::BurnFailed))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 5 * p.unit);
    assert_eq!(p.underlying.balance(&outsider), 0);
}

#[test]
fn test_redeem_transfer_failure_rolls_back() {
    let e = Env::default();
    let p = setup(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &(5 * p.unit));
    p.mature();
    p.underlying.set_failing(&true);

    assert_eq!(
        p.pool.try_redeem_underlying(&p.bond, &p.supplier, &p.unit),
        Err(Ok(ContractError::TokenTransferFailed))
    );
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 5 * p.unit);
    assert_eq!(
        p.claim.balance(&p.supplier),
        5 * p.unit * 1_000_000_000_000
    );
}

#[test]
fn test_redeem_emits_event() {
    let e = Env::default();
    let p = setup(&e);
    p.pool.supply_underlying(&p.bond, &p.supplier, &(2 * p.unit));
    p.mature();

    p.pool.redeem_underlying(&p.bond, &p.supplier, &p.unit);

    let event = e
        .events()
        .all()
        .into_iter()
        .rev()
        .find(|ev| ev.0 == p.pool.address)
        .unwrap();
    assert_eq!(
        Symbol::from_val(&e, &event.1.get(0).unwrap()),
        Symbol::new(&e, "redeem_underlying")
    );
    assert_eq!(Address::from_val(&e, &event.1.get(1).unwrap()), p.bond);
    let data = <(Address, u128)>::from_val(&e, &event.2);
    assert_eq!(data, (p.supplier.clone(), p.unit));
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Round trip across decimals
// ═══════════════════════════════════════════════════════════════════════

fn assert_round_trip(decimals: u32) {
    let e = Env::default();
    let p = setup_with_decimals(&e, decimals);
    let starting_balance = p.underlying.balance(&p.supplier);
    // 1234 whole units and a fractional remainder.
    let amount = 1_234 * p.unit + p.unit / 3;

    p.pool.supply_underlying(&p.bond, &p.supplier, &amount);
    assert_eq!(
        p.claim.balance(&p.supplier),
        amount * 10_u128.pow(18 - decimals)
    );

    p.mature();
    p.pool.redeem_underlying(&p.bond, &p.supplier, &amount);

    assert_eq!(p.underlying.balance(&p.supplier), starting_balance);
    assert_eq!(p.claim.balance(&p.supplier), 0);
    assert_eq!(p.claim.total_supply(), 0);
    assert_eq!(p.pool.get_total_underlying_supply(&p.bond), 0);
}

#[test]
fn test_round_trip_six_decimals() {
    assert_round_trip(6);
}

#[test]
fn test_round_trip_eight_decimals() {
    assert_round_trip(8);
}

#[test]
fn test_round_trip_eighteen_decimals() {
    assert_round_trip(18);
}

#[test]
fn test_supply_rejects_overflowing_claim_amount() {
    let e = Env::default();
    let p = setup_with_decimals(&e, 0);
    // u128::MAX / 1e18 + 1 native units of a 0-decimal asset overflow.
    let amount = u128::MAX / 1_000_000_000_000_000_000 + 1;

    assert_eq!(
        p.pool.try_supply_underlying(&p.bond, &p.supplier, &amount),
        Err(Ok(ContractError::Overflow))
    );
}
