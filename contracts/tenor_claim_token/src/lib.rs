#![no_std]

//! # Tenor Claim Token
//!
//! Maturity-dated claim on a bond's underlying asset. The token address is
//! the bond's identity throughout the protocol; it carries the bond terms
//! (expiration, underlying, collateral and both precision scalars).
//!
//! Balances are 18-decimal `u128` amounts. Only the vault ledger and the
//! redemption pool configured at initialization may mint or burn.

mod events;

use soroban_sdk::{contract, contractimpl, contracttype, token::TokenClient, Address, Env};
use tenor_common::math::{self, CANONICAL_DECIMALS};
use tenor_common::{BondTerms, BUMP_TARGET, BUMP_THRESHOLD};
use tenor_errors::ContractError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Terms,
    VaultLedger,
    RedemptionPool,
    TotalSupply,
    /// Holder balance. Stored in `persistent()`.
    Balance(Address),
}

fn read_terms(e: &Env) -> Result<BondTerms, ContractError> {
    e.storage()
        .instance()
        .get(&DataKey::Terms)
        .ok_or(ContractError::NotInitialized)
}

fn read_balance(e: &Env, id: &Address) -> u128 {
    let key = DataKey::Balance(id.clone());
    match e.storage().persistent().get::<_, u128>(&key) {
        Some(balance) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            balance
        }
        None => 0,
    }
}

fn write_balance(e: &Env, id: &Address, balance: u128) {
    let key = DataKey::Balance(id.clone());
    e.storage().persistent().set(&key, &balance);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn read_total_supply(e: &Env) -> u128 {
    e.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

/// Only the configured vault ledger and redemption pool may mint or burn.
fn require_issuer(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let vault: Address = e
        .storage()
        .instance()
        .get(&DataKey::VaultLedger)
        .ok_or(ContractError::NotInitialized)?;
    let pool: Address = e
        .storage()
        .instance()
        .get(&DataKey::RedemptionPool)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != vault && *caller != pool {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

#[contract]
pub struct TenorClaimToken;

#[contractimpl]
impl TenorClaimToken {
    /// Fix the bond terms. Precision scalars are derived from the assets'
    /// `decimals()` here and never change afterwards.
    ///
    /// # Errors
    /// * `AlreadyInitialized`: called a second time
    /// * `InvalidExpiration`: `expiration_time` is not in the future
    /// * `InvalidDecimals`: an asset has more than 18 decimals
    pub fn initialize(
        e: Env,
        admin: Address,
        vault_ledger: Address,
        redemption_pool: Address,
        underlying: Address,
        collateral: Address,
        expiration_time: u64,
    ) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Terms) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        if expiration_time <= e.ledger().timestamp() {
            return Err(ContractError::InvalidExpiration);
        }

        let underlying_precision_scalar =
            math::precision_scalar(TokenClient::new(&e, &underlying).decimals())?;
        let collateral_precision_scalar =
            math::precision_scalar(TokenClient::new(&e, &collateral).decimals())?;

        let terms = BondTerms {
            expiration_time,
            underlying,
            collateral,
            underlying_precision_scalar,
            collateral_precision_scalar,
        };

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Terms, &terms);
        e.storage()
            .instance()
            .set(&DataKey::VaultLedger, &vault_ledger);
        e.storage()
            .instance()
            .set(&DataKey::RedemptionPool, &redemption_pool);
        Ok(())
    }

    // --- Issuance ---

    /// Mint `amount` to `to`. Returns `false` when the supply cannot grow
    /// by `amount`.
    pub fn mint(
        e: Env,
        minter: Address,
        to: Address,
        amount: u128,
    ) -> Result<bool, ContractError> {
        require_issuer(&e, &minter)?;

        let Some(total) = read_total_supply(&e).checked_add(amount) else {
            return Ok(false);
        };
        let balance = read_balance(&e, &to);
        // balance <= total supply
        write_balance(&e, &to, balance + amount);
        e.storage().instance().set(&DataKey::TotalSupply, &total);

        events::emit_mint(&e, &minter, &to, amount);
        Ok(true)
    }

    /// Burn `amount` from `from`. Returns `false` on an insufficient balance.
    pub fn burn(
        e: Env,
        burner: Address,
        from: Address,
        amount: u128,
    ) -> Result<bool, ContractError> {
        require_issuer(&e, &burner)?;

        let balance = read_balance(&e, &from);
        if balance < amount {
            return Ok(false);
        }
        write_balance(&e, &from, balance - amount);
        let total = math::sub(read_total_supply(&e), amount)?;
        e.storage().instance().set(&DataKey::TotalSupply, &total);

        events::emit_burn(&e, &burner, &from, amount);
        Ok(true)
    }

    /// Holder-to-holder transfer. Returns `false` on an insufficient balance.
    pub fn transfer(e: Env, from: Address, to: Address, amount: u128) -> bool {
        from.require_auth();

        let from_balance = read_balance(&e, &from);
        if from_balance < amount {
            return false;
        }
        write_balance(&e, &from, from_balance - amount);
        let to_balance = read_balance(&e, &to);
        write_balance(&e, &to, to_balance + amount);

        events::emit_transfer(&e, &from, &to, amount);
        true
    }

    // --- Reads ---

    pub fn balance(e: Env, id: Address) -> u128 {
        read_balance(&e, &id)
    }

    pub fn total_supply(e: Env) -> u128 {
        read_total_supply(&e)
    }

    pub fn decimals(_e: Env) -> u32 {
        CANONICAL_DECIMALS
    }

    pub fn terms(e: Env) -> Result<BondTerms, ContractError> {
        read_terms(&e)
    }

    pub fn expiration_time(e: Env) -> Result<u64, ContractError> {
        Ok(read_terms(&e)?.expiration_time)
    }

    pub fn underlying(e: Env) -> Result<Address, ContractError> {
        Ok(read_terms(&e)?.underlying)
    }

    pub fn collateral(e: Env) -> Result<Address, ContractError> {
        Ok(read_terms(&e)?.collateral)
    }

    pub fn underlying_precision_scalar(e: Env) -> Result<u128, ContractError> {
        Ok(read_terms(&e)?.underlying_precision_scalar)
    }

    pub fn collateral_precision_scalar(e: Env) -> Result<u128, ContractError> {
        Ok(read_terms(&e)?.collateral_precision_scalar)
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }

    /// `true` once the ledger time reaches the expiration.
    pub fn is_matured(e: Env) -> Result<bool, ContractError> {
        Ok(read_terms(&e)?.is_matured(e.ledger().timestamp()))
    }
}
