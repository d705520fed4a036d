use soroban_sdk::{Address, Env, Symbol};

/// Emitted when underlying is supplied in exchange for claim tokens.
///
/// # Topics
/// * `Symbol` - "supply_underlying"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The supplier
/// * `u128` - Underlying supplied, in native units
/// * `u128` - Claim tokens minted
pub fn emit_supply_underlying(
    e: &Env,
    bond: &Address,
    account: &Address,
    underlying_amount: u128,
    fy_amount: u128,
) {
    let topics = (Symbol::new(e, "supply_underlying"), bond.clone());
    let data = (account.clone(), underlying_amount, fy_amount);
    e.events().publish(topics, data);
}

/// Emitted when claim tokens are redeemed for underlying after maturity.
///
/// # Topics
/// * `Symbol` - "redeem_underlying"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The redeemer
/// * `u128` - Underlying paid out, in native units
pub fn emit_redeem_underlying(e: &Env, bond: &Address, account: &Address, underlying_amount: u128) {
    let topics = (Symbol::new(e, "redeem_underlying"), bond.clone());
    let data = (account.clone(), underlying_amount);
    e.events().publish(topics, data);
}
