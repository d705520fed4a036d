#![no_std]

//! Admin-fed price feed.
//!
//! Prices are USD values per whole unit of an asset, as 18-decimal
//! mantissas. An asset without a price reads as `0`.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};
use tenor_common::{BUMP_TARGET, BUMP_THRESHOLD};
use tenor_errors::ContractError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Price(Address),
}

#[contract]
pub struct SimplePriceFeed;

#[contractimpl]
impl SimplePriceFeed {
    pub fn initialize(e: Env, admin: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();
        e.storage().instance().set(&DataKey::Admin, &admin);
        Ok(())
    }

    /// Publish a price for `asset`.
    ///
    /// # Errors
    /// * `Unauthorized`: `admin` is not the stored admin
    /// * `InvalidPrice`: `price` is zero
    pub fn set_price(
        e: Env,
        admin: Address,
        asset: Address,
        price: u128,
    ) -> Result<(), ContractError> {
        admin.require_auth();
        let stored: Address = e
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)?;
        if stored != admin {
            return Err(ContractError::Unauthorized);
        }
        if price == 0 {
            return Err(ContractError::InvalidPrice);
        }

        let key = DataKey::Price(asset.clone());
        e.storage().persistent().set(&key, &price);
        e.storage()
            .persistent()
            .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);

        e.events()
            .publish((Symbol::new(&e, "price_set"), asset), price);
        Ok(())
    }

    /// Current price of `asset`, `0` when none was published.
    pub fn get_adjusted_price(e: Env, asset: Address) -> u128 {
        e.storage()
            .persistent()
            .get(&DataKey::Price(asset))
            .unwrap_or(0)
    }
}
