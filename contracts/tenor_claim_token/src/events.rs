use soroban_sdk::{Address, Env, Symbol};

/// # Topics
/// * `Symbol` - "mint"
/// * `Address` - Recipient
///
/// # Data
/// * `Address` - Issuing contract (vault ledger or redemption pool)
/// * `u128` - Amount minted
pub fn emit_mint(e: &Env, minter: &Address, to: &Address, amount: u128) {
    let topics = (Symbol::new(e, "mint"), to.clone());
    e.events().publish(topics, (minter.clone(), amount));
}

/// # Topics
/// * `Symbol` - "burn"
/// * `Address` - Holder burned from
///
/// # Data
/// * `Address` - Burning contract
/// * `u128` - Amount burned
pub fn emit_burn(e: &Env, burner: &Address, from: &Address, amount: u128) {
    let topics = (Symbol::new(e, "burn"), from.clone());
    e.events().publish(topics, (burner.clone(), amount));
}

pub fn emit_transfer(e: &Env, from: &Address, to: &Address, amount: u128) {
    let topics = (Symbol::new(e, "transfer"), from.clone(), to.clone());
    e.events().publish(topics, amount);
}
