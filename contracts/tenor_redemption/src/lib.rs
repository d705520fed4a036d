#![no_std]

//! # Tenor Redemption Pool
//!
//! Converts a bond's underlying asset into claim tokens before maturity and
//! back after it. One underlying unit mints `underlying_precision_scalar`
//! claim-token units, so supply and redemption round-trip exactly for any
//! underlying with at most 18 decimals.
//!
//! Supply is open while `now < expiration`; redemption opens at
//! `now >= expiration`.

mod events;

use soroban_sdk::{contract, contractimpl, contracttype, token::TokenClient, Address, Env};
use tenor_common::interfaces::{ClaimTokenClient, RegistryClient};
use tenor_common::{
    guard, math, BondConfig, BondTerms, PermissionFlag, BUMP_TARGET, BUMP_THRESHOLD,
};
use tenor_errors::ContractError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Registry,
    /// bond -> total underlying held for it. Stored in `persistent()`.
    TotalUnderlying(Address),
}

fn read_total_underlying(e: &Env, bond: &Address) -> u128 {
    let key = DataKey::TotalUnderlying(bond.clone());
    match e.storage().persistent().get::<_, u128>(&key) {
        Some(total) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            total
        }
        None => 0,
    }
}

fn write_total_underlying(e: &Env, bond: &Address, total: u128) {
    let key = DataKey::TotalUnderlying(bond.clone());
    e.storage().persistent().set(&key, &total);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn listed_bond(e: &Env, bond: &Address) -> Result<BondConfig, ContractError> {
    let registry: Address = e
        .storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(ContractError::NotInitialized)?;
    let config = RegistryClient::new(e, &registry).get_bond(bond);
    config.require_listed()?;
    Ok(config)
}

/// Terms from the bond's claim token. A listed address that is not an
/// initialized claim token reads as `NotInitialized`.
fn bond_terms(claim: &ClaimTokenClient) -> Result<BondTerms, ContractError> {
    match claim.try_terms() {
        Ok(Ok(terms)) => Ok(terms),
        _ => Err(ContractError::NotInitialized),
    }
}

#[contract]
pub struct RedemptionPool;

#[contractimpl]
impl RedemptionPool {
    pub fn initialize(e: Env, admin: Address, registry: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Registry, &registry);
        Ok(())
    }

    /// Pull `amount` underlying from `account` and mint
    /// `amount × underlying_precision_scalar` claim tokens to it.
    ///
    /// # Errors
    /// * `BondNotListed`, `BondMatured`, `SupplyUnderlyingZero`,
    ///   `SupplyUnderlyingNotAllowed`
    /// * `Overflow`: the claim amount does not fit
    /// * `TokenTransferFailed`, `MintFailed`
    pub fn supply_underlying(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let claim = ClaimTokenClient::new(&e, &bond);
            let terms = bond_terms(&claim)?;
            if terms.is_matured(e.ledger().timestamp()) {
                return Err(ContractError::BondMatured);
            }
            if amount == 0 {
                return Err(ContractError::SupplyUnderlyingZero);
            }
            config.require_allowed(
                PermissionFlag::SupplyUnderlying,
                ContractError::SupplyUnderlyingNotAllowed,
            )?;

            let fy_amount = math::mul(amount, terms.underlying_precision_scalar)?;
            let token_amount = math::to_token_amount(amount)?;

            let total = math::add(read_total_underlying(&e, &bond), amount)?;
            write_total_underlying(&e, &bond, total);

            let contract = e.current_contract_address();
            let pulled = TokenClient::new(&e, &terms.underlying).try_transfer_from(
                &contract,
                &account,
                &contract,
                &token_amount,
            );
            if !matches!(pulled, Ok(Ok(()))) {
                return Err(ContractError::TokenTransferFailed);
            }

            if !matches!(claim.try_mint(&contract, &account, &fy_amount), Ok(Ok(true))) {
                return Err(ContractError::MintFailed);
            }

            events::emit_supply_underlying(&e, &bond, &account, amount, fy_amount);
            Ok(())
        })
    }

    /// Burn `amount × underlying_precision_scalar` claim tokens from
    /// `account` and pay out `amount` underlying.
    ///
    /// # Errors
    /// * `BondNotListed`, `BondNotMatured`, `RedeemUnderlyingZero`,
    ///   `RedeemUnderlyingNotAllowed`
    /// * `RedeemUnderlyingInsufficientUnderlying`: more than the pool holds
    /// * `BurnFailed`, `TokenTransferFailed`
    pub fn redeem_underlying(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let claim = ClaimTokenClient::new(&e, &bond);
            let terms = bond_terms(&claim)?;
            if !terms.is_matured(e.ledger().timestamp()) {
                return Err(ContractError::BondNotMatured);
            }
            if amount == 0 {
                return Err(ContractError::RedeemUnderlyingZero);
            }
            config.require_allowed(
                PermissionFlag::RedeemUnderlying,
                ContractError::RedeemUnderlyingNotAllowed,
            )?;

            let total = read_total_underlying(&e, &bond);
            if amount > total {
                return Err(ContractError::RedeemUnderlyingInsufficientUnderlying);
            }
            let fy_amount = math::mul(amount, terms.underlying_precision_scalar)?;
            let token_amount = math::to_token_amount(amount)?;

            write_total_underlying(&e, &bond, total - amount);

            let contract = e.current_contract_address();
            if !matches!(claim.try_burn(&contract, &account, &fy_amount), Ok(Ok(true))) {
                return Err(ContractError::BurnFailed);
            }

            let paid = TokenClient::new(&e, &terms.underlying).try_transfer(
                &contract,
                &account,
                &token_amount,
            );
            if !matches!(paid, Ok(Ok(()))) {
                return Err(ContractError::TokenTransferFailed);
            }

            events::emit_redeem_underlying(&e, &bond, &account, amount);
            Ok(())
        })
    }

    /// Underlying held for `bond`, in native units. `0` for unknown bonds.
    pub fn get_total_underlying_supply(e: Env, bond: Address) -> u128 {
        read_total_underlying(&e, &bond)
    }

    pub fn get_registry(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }
}


#[cfg(test)]
mod test_pool;
