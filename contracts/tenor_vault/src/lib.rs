#![no_std]

//! # Tenor Vault Ledger
//!
//! Per-account custody of a bond's collateral asset and the claim-token debt
//! it backs.
//!
//! ## Position lifecycle
//! 1. `open_vault` once per (bond, account)
//! 2. `deposit_collateral` → free collateral
//! 3. `lock_collateral` → locked collateral backing debt
//! 4. `borrow` mints claim tokens, `repay_borrow` burns them
//! 5. `free_collateral` / `withdraw_collateral` unwind the position
//!
//! Every mutation reads the bond record from the permission registry first;
//! an unlisted bond always fails with `BondNotListed`. Solvency is judged by
//! the collateralization ratio
//!
//! ```text
//! locked × collateral_scalar × price(collateral) × 1e18 / (debt × price(underlying))
//! ```
//!
//! against the bond's required ratio, using prices from the registry's feed.

mod events;
mod types;

pub use types::Vault;

use soroban_sdk::{contract, contractimpl, contracttype, token::TokenClient, Address, Env};
use tenor_common::interfaces::{ClaimTokenClient, PriceFeedClient, RegistryClient};
use tenor_common::{guard, math, BondConfig, BondTerms, PermissionFlag, BUMP_TARGET, BUMP_THRESHOLD};
use tenor_errors::ContractError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Admin,
    Registry,
    /// (bond, account) -> Vault. Stored in `persistent()`.
    Vault(Address, Address),
}

// --- Storage ---

fn load_vault(e: &Env, bond: &Address, account: &Address) -> Vault {
    let key = DataKey::Vault(bond.clone(), account.clone());
    match e.storage().persistent().get::<_, Vault>(&key) {
        Some(vault) => {
            e.storage()
                .persistent()
                .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
            vault
        }
        None => Vault::default(),
    }
}

fn save_vault(e: &Env, bond: &Address, account: &Address, vault: &Vault) {
    let key = DataKey::Vault(bond.clone(), account.clone());
    e.storage().persistent().set(&key, vault);
    e.storage()
        .persistent()
        .extend_ttl(&key, BUMP_THRESHOLD, BUMP_TARGET);
}

fn load_open_vault(e: &Env, bond: &Address, account: &Address) -> Result<Vault, ContractError> {
    let vault = load_vault(e, bond, account);
    if !vault.is_open {
        return Err(ContractError::VaultNotOpen);
    }
    Ok(vault)
}

// --- Collaborators ---

fn registry(e: &Env) -> Result<RegistryClient<'_>, ContractError> {
    let address: Address = e
        .storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(ContractError::NotInitialized)?;
    Ok(RegistryClient::new(e, &address))
}

fn listed_bond(e: &Env, bond: &Address) -> Result<BondConfig, ContractError> {
    let config = registry(e)?.get_bond(bond);
    config.require_listed()?;
    Ok(config)
}

/// Terms from the bond's claim token. A listed address that is not an
/// initialized claim token reads as `NotInitialized`.
fn bond_terms(e: &Env, bond: &Address) -> Result<BondTerms, ContractError> {
    match ClaimTokenClient::new(e, bond).try_terms() {
        Ok(Ok(terms)) => Ok(terms),
        _ => Err(ContractError::NotInitialized),
    }
}

fn price_of(feed: &PriceFeedClient, asset: &Address) -> Result<u128, ContractError> {
    match feed.try_get_adjusted_price(asset) {
        Ok(Ok(price)) if price > 0 => Ok(price),
        _ => Err(ContractError::PriceUnavailable),
    }
}

/// Ratio the position would have with `locked_collateral` and `debt`.
/// `u128::MAX` without debt; the oracle is not consulted in that case.
fn collateralization_ratio(
    e: &Env,
    bond: &Address,
    locked_collateral: u128,
    debt: u128,
) -> Result<u128, ContractError> {
    if debt == 0 {
        return Ok(u128::MAX);
    }
    let terms = bond_terms(e, bond)?;
    let feed = PriceFeedClient::new(e, &registry(e)?.get_oracle());
    let collateral_price = price_of(&feed, &terms.collateral)?;
    let underlying_price = price_of(&feed, &terms.underlying)?;

    math::collateralization_ratio(
        e,
        locked_collateral,
        terms.collateral_precision_scalar,
        collateral_price,
        debt,
        underlying_price,
    )
}

fn require_collateralized(
    e: &Env,
    bond: &Address,
    config: &BondConfig,
    locked_collateral: u128,
    debt: u128,
) -> Result<(), ContractError> {
    let ratio = collateralization_ratio(e, bond, locked_collateral, debt)?;
    if ratio < config.collateralization_ratio {
        return Err(ContractError::BelowCollateralizationRatio);
    }
    Ok(())
}

fn pull_tokens(
    e: &Env,
    asset: &Address,
    from: &Address,
    amount: u128,
) -> Result<(), ContractError> {
    let amount = math::to_token_amount(amount)?;
    let contract = e.current_contract_address();
    match TokenClient::new(e, asset).try_transfer_from(&contract, from, &contract, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TokenTransferFailed),
    }
}

fn push_tokens(e: &Env, asset: &Address, to: &Address, amount: u128) -> Result<(), ContractError> {
    let amount = math::to_token_amount(amount)?;
    let contract = e.current_contract_address();
    match TokenClient::new(e, asset).try_transfer(&contract, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TokenTransferFailed),
    }
}

#[contract]
pub struct VaultLedger;

#[contractimpl]
impl VaultLedger {
    pub fn initialize(e: Env, admin: Address, registry: Address) -> Result<(), ContractError> {
        if e.storage().instance().has(&DataKey::Admin) {
            return Err(ContractError::AlreadyInitialized);
        }
        admin.require_auth();

        e.storage().instance().set(&DataKey::Admin, &admin);
        e.storage().instance().set(&DataKey::Registry, &registry);
        Ok(())
    }

    // --- Position management ---

    /// Open `account`'s vault in `bond`. Opening twice is a no-op.
    ///
    /// # Errors
    /// * `BondNotListed`
    ///
    /// # Events
    /// Emits `vault_opened` on the first call only
    pub fn open_vault(e: Env, bond: Address, account: Address) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            listed_bond(&e, &bond)?;

            let mut vault = load_vault(&e, &bond, &account);
            if vault.is_open {
                return Ok(());
            }
            vault.is_open = true;
            save_vault(&e, &bond, &account, &vault);

            events::emit_vault_opened(&e, &bond, &account);
            Ok(())
        })
    }

    /// Pull `amount` of the bond's collateral asset from `account` (the
    /// ledger must hold an allowance) and credit it as free collateral.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `DepositCollateralZero`,
    ///   `DepositCollateralNotAllowed`
    /// * `TokenTransferFailed`: the pull failed; nothing is credited
    pub fn deposit_collateral(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &account)?;
            if amount == 0 {
                return Err(ContractError::DepositCollateralZero);
            }
            config.require_allowed(
                PermissionFlag::DepositCollateral,
                ContractError::DepositCollateralNotAllowed,
            )?;

            let terms = bond_terms(&e, &bond)?;

            // CEI: credit before the pull.
            vault.free_collateral = math::add(vault.free_collateral, amount)?;
            save_vault(&e, &bond, &account, &vault);

            pull_tokens(&e, &terms.collateral, &account, amount)?;

            events::emit_collateral_deposited(&e, &bond, &account, amount);
            Ok(())
        })
    }

    /// Send `amount` of free collateral back to `account`. Not gated by a
    /// permission flag.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `WithdrawCollateralZero`
    /// * `WithdrawCollateralInsufficientFreeCollateral`
    /// * `TokenTransferFailed`
    pub fn withdraw_collateral(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &account)?;
            if amount == 0 {
                return Err(ContractError::WithdrawCollateralZero);
            }
            if amount > vault.free_collateral {
                return Err(ContractError::WithdrawCollateralInsufficientFreeCollateral);
            }

            let terms = bond_terms(&e, &bond)?;

            // CEI: debit before the transfer.
            vault.free_collateral -= amount;
            save_vault(&e, &bond, &account, &vault);

            push_tokens(&e, &terms.collateral, &account, amount)?;

            events::emit_collateral_withdrawn(&e, &bond, &account, amount);
            Ok(())
        })
    }

    /// Move `amount` from free to locked collateral.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `LockCollateralZero`
    /// * `LockCollateralInsufficientFreeCollateral`
    pub fn lock_collateral(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &account)?;
            if amount == 0 {
                return Err(ContractError::LockCollateralZero);
            }
            if amount > vault.free_collateral {
                return Err(ContractError::LockCollateralInsufficientFreeCollateral);
            }

            vault.free_collateral -= amount;
            vault.locked_collateral = math::add(vault.locked_collateral, amount)?;
            save_vault(&e, &bond, &account, &vault);

            events::emit_collateral_locked(&e, &bond, &account, amount);
            Ok(())
        })
    }

    /// Move `amount` from locked back to free collateral. With outstanding
    /// debt the remaining locked collateral must still meet the bond's ratio.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `FreeCollateralZero`
    /// * `FreeCollateralInsufficientLockedCollateral`
    /// * `BelowCollateralizationRatio`, `PriceUnavailable`
    pub fn free_collateral(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &account)?;
            if amount == 0 {
                return Err(ContractError::FreeCollateralZero);
            }
            if amount > vault.locked_collateral {
                return Err(ContractError::FreeCollateralInsufficientLockedCollateral);
            }

            let remaining_locked = vault.locked_collateral - amount;
            if vault.debt > 0 {
                require_collateralized(&e, &bond, &config, remaining_locked, vault.debt)?;
            }

            vault.locked_collateral = remaining_locked;
            vault.free_collateral = math::add(vault.free_collateral, amount)?;
            save_vault(&e, &bond, &account, &vault);

            events::emit_collateral_freed(&e, &bond, &account, amount);
            Ok(())
        })
    }

    // --- Debt ---

    /// Mint `amount` claim tokens to `account` against its locked collateral.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `BondMatured`, `BorrowZero`,
    ///   `BorrowNotAllowed`
    /// * `BelowCollateralizationRatio`, `PriceUnavailable`
    /// * `MintFailed`
    pub fn borrow(
        e: Env,
        bond: Address,
        account: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        account.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &account)?;
            if bond_terms(&e, &bond)?.is_matured(e.ledger().timestamp()) {
                return Err(ContractError::BondMatured);
            }
            if amount == 0 {
                return Err(ContractError::BorrowZero);
            }
            config.require_allowed(PermissionFlag::Borrow, ContractError::BorrowNotAllowed)?;

            let new_debt = math::add(vault.debt, amount)?;
            require_collateralized(&e, &bond, &config, vault.locked_collateral, new_debt)?;

            vault.debt = new_debt;
            save_vault(&e, &bond, &account, &vault);

            let minted = ClaimTokenClient::new(&e, &bond).try_mint(
                &e.current_contract_address(),
                &account,
                &amount,
            );
            if !matches!(minted, Ok(Ok(true))) {
                return Err(ContractError::MintFailed);
            }

            events::emit_borrow(&e, &bond, &account, amount);
            Ok(())
        })
    }

    /// Burn `amount` claim tokens held by `payer` and reduce `borrower`'s
    /// debt by the same amount. `payer` may differ from `borrower`.
    ///
    /// # Errors
    /// * `BondNotListed`, `VaultNotOpen`, `RepayBorrowZero`,
    ///   `RepayBorrowNotAllowed`, `RepayBorrowInsufficientDebt`
    /// * `BurnFailed`
    pub fn repay_borrow(
        e: Env,
        bond: Address,
        payer: Address,
        borrower: Address,
        amount: u128,
    ) -> Result<(), ContractError> {
        payer.require_auth();
        guard::with_reentrancy_guard(&e, || {
            let config = listed_bond(&e, &bond)?;
            let mut vault = load_open_vault(&e, &bond, &borrower)?;
            if amount == 0 {
                return Err(ContractError::RepayBorrowZero);
            }
            config.require_allowed(
                PermissionFlag::RepayBorrow,
                ContractError::RepayBorrowNotAllowed,
            )?;
            if amount > vault.debt {
                return Err(ContractError::RepayBorrowInsufficientDebt);
            }

            vault.debt -= amount;
            save_vault(&e, &bond, &borrower, &vault);

            let burned = ClaimTokenClient::new(&e, &bond).try_burn(
                &e.current_contract_address(),
                &payer,
                &amount,
            );
            if !matches!(burned, Ok(Ok(true))) {
                return Err(ContractError::BurnFailed);
            }

            events::emit_repay_borrow(&e, &bond, &payer, &borrower, amount, vault.debt);
            Ok(())
        })
    }

    // --- Solvency ---

    /// `true` when the position's ratio is strictly below the bond's
    /// required ratio. Closed vaults and debt-free vaults are never
    /// underwater.
    pub fn is_account_underwater(
        e: Env,
        bond: Address,
        account: Address,
    ) -> Result<bool, ContractError> {
        let vault = load_vault(&e, &bond, &account);
        if !vault.is_open || vault.debt == 0 {
            return Ok(false);
        }
        let config = registry(&e)?.get_bond(&bond);
        let ratio = collateralization_ratio(&e, &bond, vault.locked_collateral, vault.debt)?;
        Ok(ratio < config.collateralization_ratio)
    }

    pub fn get_hypothetical_collateralization_ratio(
        e: Env,
        bond: Address,
        locked_collateral: u128,
        debt: u128,
    ) -> Result<u128, ContractError> {
        collateralization_ratio(&e, &bond, locked_collateral, debt)
    }

    pub fn get_current_collateralization_ratio(
        e: Env,
        bond: Address,
        account: Address,
    ) -> Result<u128, ContractError> {
        let vault = load_vault(&e, &bond, &account);
        collateralization_ratio(&e, &bond, vault.locked_collateral, vault.debt)
    }

    // --- Reads ---

    pub fn get_vault(e: Env, bond: Address, account: Address) -> Vault {
        load_vault(&e, &bond, &account)
    }

    pub fn is_vault_open(e: Env, bond: Address, account: Address) -> bool {
        load_vault(&e, &bond, &account).is_open
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
