#![no_std]

//! # Tenor Permission Registry
//!
//! Lists bonds and gates every mutating action of the vault ledger and the
//! redemption pool behind per-bond permission flags.
//!
//! ## Features
//! - List a bond (identified by its claim-token address)
//! - Switch any of the six action flags on or off, at any time
//! - Set the bond's required collateralization ratio (100% to 10,000%)
//! - Point the protocol at a price feed
//!
//! ## Security
//! - Every mutator authenticates the admin argument and compares it with the
//!   stored admin
//! - Reads never fail: unknown bonds read as unlisted with every flag off

mod events;

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};
use tenor_common::{BondConfig, PermissionFlag, PermissionFlags, BUMP_TARGET, BUMP_THRESHOLD};
use tenor_errors::ContractError;

/// Ratio assigned to a bond when it is listed: 150%.
pub const DEFAULT_COLLATERALIZATION_RATIO: u128 = 1_500_000_000_000_000_000;
/// Lowest accepted ratio: 100%.
pub const MIN_COLLATERALIZATION_RATIO: u128 = 1_000_000_000_000_000_000;
/// Highest accepted ratio: 10,000%.
pub const MAX_COLLATERALIZATION_RATIO: u128 = 100_000_000_000_000_000_000;

/// Storage keys for the registry contract
#[contracttype]
#[derive(Clone)]
enum DataKey {
    /// Admin address
    Admin,
    /// Price feed contract address
    Oracle,
    /// Bond record: bond -> BondConfig. Stored in `persistent()`.
    Bond(Address),
}

fn require_admin(e: &Env, caller: &Address) -> Result<(), ContractError> {
    caller.require_auth();
    let stored: Address = e
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(ContractError::NotInitialized)?;
    if stored != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn load_bond(e: &Env, bond: &Address) -> Option<BondConfig> {
    let key = DataKey::Bond(bond.clone());
    let storage = e.storage().persistent();
    let config: BondConfig = storage.get(&key)?;
    storage.extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
    Some(config)
}

fn load_listed_bond(e: &Env, bond: &Address) -> Result<BondConfig, ContractError> {
    let config = load_bond(e, bond).unwrap_or_default();
    config.require_listed()?;
    Ok(config)
}

fn save_bond(e: &Env, bond: &Address, config: &BondConfig) {
    let key = DataKey::Bond(bond.clone());
    e.storage().persistent().set(&key, config);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

#[contract]
pub struct PermissionRegistry;

#[contractimpl]
impl PermissionRegistry {
    /// Initialize the registry with an admin and the protocol price feed.
    ///
    /// # Errors
    /// * `AlreadyInitialized`: called a second time
    pub fn initialize(e: Env, admin: Address, oracle: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Oracle, &oracle);
        Ok(())
    }

    // --- Admin mutators ---

    /// List a bond. Flags start switched off and the ratio starts at
    /// [`DEFAULT_COLLATERALIZATION_RATIO`].
    ///
    /// # Errors
    /// * `Unauthorized`: `admin` is not the stored admin
    /// * `AlreadyListed`: the bond is already listed
    ///
    /// # Events
    /// Emits `bond_listed`
    pub fn list_bond(e: Env, admin: Address, bond: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;

        if load_bond(&e, &bond).is_some_and(|config| config.is_listed) {
            return Err(ContractError::AlreadyListed);
        }

        let config = BondConfig {
            is_listed: true,
            collateralization_ratio: DEFAULT_COLLATERALIZATION_RATIO,
            permissions: PermissionFlags::default(),
        };
        save_bond(&e, &bond, &config);

        events::emit_bond_listed(&e, &bond);
        Ok(())
    }

    /// Switch one action flag of a listed bond.
    ///
    /// # Errors
    /// * `Unauthorized`: `admin` is not the stored admin
    /// * `BondNotListed`: the bond is not listed
    ///
    /// # Events
    /// Emits `permission_changed` with `(admin, flag, value)`
    pub fn set_permission(
        e: Env,
        admin: Address,
        bond: Address,
        flag: PermissionFlag,
        value: bool,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        let mut config = load_listed_bond(&e, &bond)?;

        config.permissions.set(flag, value);
        save_bond(&e, &bond, &config);

        events::emit_permission_changed(&e, &admin, &bond, flag, value);
        Ok(())
    }

    /// Set the collateralization ratio a listed bond requires.
    ///
    /// # Errors
    /// * `Unauthorized`: `admin` is not the stored admin
    /// * `BondNotListed`: the bond is not listed
    /// * `RatioBelowMinimum`: `ratio` < 100%
    /// * `RatioAboveMaximum`: `ratio` > 10,000%
    pub fn set_collateralization_ratio(
        e: Env,
        admin: Address,
        bond: Address,
        ratio: u128,
    ) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        let mut config = load_listed_bond(&e, &bond)?;

        if ratio < MIN_COLLATERALIZATION_RATIO {
            return Err(ContractError::RatioBelowMinimum);
        }
        if ratio > MAX_COLLATERALIZATION_RATIO {
            return Err(ContractError::RatioAboveMaximum);
        }

        let old_ratio = config.collateralization_ratio;
        config.collateralization_ratio = ratio;
        save_bond(&e, &bond, &config);

        events::emit_ratio_set(&e, &admin, &bond, old_ratio, ratio);
        Ok(())
    }

    /// Point the protocol at a new price feed.
    pub fn set_oracle(e: Env, admin: Address, oracle: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;

        let old_oracle: Address = e
            .storage()
            .instance()
            .get(&DataKey::Oracle)
            .ok_or(ContractError::NotInitialized)?;
        e.storage().instance().set(&DataKey::Oracle, &oracle);

        events::emit_oracle_set(&e, &admin, &old_oracle, &oracle);
        Ok(())
    }

    /// Hand admin rights to `new_admin`.
    pub fn transfer_admin(e: Env, admin: Address, new_admin: Address) -> Result<(), ContractError> {
        require_admin(&e, &admin)?;
        e.storage().instance().set(&DataKey::Admin, &new_admin);

        events::emit_admin_transferred(&e, &admin, &new_admin);
        Ok(())
    }

    // --- Reads ---

    /// Full record for a bond; unlisted default for unknown bonds.
    pub fn get_bond(e: Env, bond: Address) -> BondConfig {
        load_bond(&e, &bond).unwrap_or_default()
    }

    /// `false` for unlisted bonds.
    pub fn get_permission(e: Env, bond: Address, flag: PermissionFlag) -> bool {
        load_bond(&e, &bond)
            .filter(|config| config.is_listed)
            .is_some_and(|config| config.permissions.get(flag))
    }

    /// `0` for unlisted bonds.
    pub fn get_collateralization_ratio(e: Env, bond: Address) -> u128 {
        load_bond(&e, &bond)
            .filter(|config| config.is_listed)
            .map_or(0, |config| config.collateralization_ratio)
    }

    pub fn is_listed(e: Env, bond: Address) -> bool {
        load_bond(&e, &bond).is_some_and(|config| config.is_listed)
    }

    pub fn get_oracle(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Oracle)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn get_admin(e: Env) -> Result<Address, ContractError> {
        e.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ContractError::NotInitialized)
    }
}
