use soroban_sdk::{Address, Env, Symbol};

/// Emitted the first time an account opens a vault in a bond.
///
/// # Topics
/// * `Symbol` - "vault_opened"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The account
pub fn emit_vault_opened(e: &Env, bond: &Address, account: &Address) {
    let topics = (Symbol::new(e, "vault_opened"), bond.clone());
    e.events().publish(topics, account.clone());
}

/// Shared shape of the four collateral movements.
///
/// # Topics
/// * `Symbol` - event name
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The account
/// * `u128` - Amount moved, in collateral native units
fn emit_collateral_event(e: &Env, name: &str, bond: &Address, account: &Address, amount: u128) {
    let topics = (Symbol::new(e, name), bond.clone());
    e.events().publish(topics, (account.clone(), amount));
}

pub fn emit_collateral_deposited(e: &Env, bond: &Address, account: &Address, amount: u128) {
    emit_collateral_event(e, "collateral_deposited", bond, account, amount);
}

pub fn emit_collateral_withdrawn(e: &Env, bond: &Address, account: &Address, amount: u128) {
    emit_collateral_event(e, "collateral_withdrawn", bond, account, amount);
}

pub fn emit_collateral_locked(e: &Env, bond: &Address, account: &Address, amount: u128) {
    emit_collateral_event(e, "collateral_locked", bond, account, amount);
}

pub fn emit_collateral_freed(e: &Env, bond: &Address, account: &Address, amount: u128) {
    emit_collateral_event(e, "collateral_freed", bond, account, amount);
}

/// Emitted when claim tokens are minted against a vault.
///
/// # Topics
/// * `Symbol` - "borrow"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The borrower
/// * `u128` - Claim tokens minted
pub fn emit_borrow(e: &Env, bond: &Address, account: &Address, amount: u128) {
    let topics = (Symbol::new(e, "borrow"), bond.clone());
    e.events().publish(topics, (account.clone(), amount));
}

/// Emitted when debt is repaid by burning claim tokens.
///
/// # Topics
/// * `Symbol` - "repay_borrow"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The payer whose claim tokens were burned
/// * `Address` - The borrower whose debt shrank
/// * `u128` - Amount repaid
/// * `u128` - Remaining debt
pub fn emit_repay_borrow(
    e: &Env,
    bond: &Address,
    payer: &Address,
    borrower: &Address,
    amount: u128,
    new_debt: u128,
) {
    let topics = (Symbol::new(e, "repay_borrow"), bond.clone());
    let data = (payer.clone(), borrower.clone(), amount, new_debt);
    e.events().publish(topics, data);
}
