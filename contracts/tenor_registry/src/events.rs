use soroban_sdk::{Address, Env, Symbol};
use tenor_common::PermissionFlag;

/// Emitted when a bond is listed.
///
/// # Topics
/// * `Symbol` - "bond_listed"
/// * `Address` - The bond (claim-token address)
///
/// # Data
/// * `()`
pub fn emit_bond_listed(e: &Env, bond: &Address) {
    let topics = (Symbol::new(e, "bond_listed"), bond.clone());
    e.events().publish(topics, ());
}

/// Emitted when an action flag changes.
///
/// # Topics
/// * `Symbol` - "permission_changed"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The admin who made the change
/// * `PermissionFlag` - The flag
/// * `bool` - The new value
pub fn emit_permission_changed(
    e: &Env,
    admin: &Address,
    bond: &Address,
    flag: PermissionFlag,
    value: bool,
) {
    let topics = (Symbol::new(e, "permission_changed"), bond.clone());
    let data = (admin.clone(), flag, value);
    e.events().publish(topics, data);
}

/// Emitted when a bond's collateralization ratio changes.
///
/// # Topics
/// * `Symbol` - "ratio_set"
/// * `Address` - The bond
///
/// # Data
/// * `Address` - The admin
/// * `u128` - Previous ratio
/// * `u128` - New ratio
pub fn emit_ratio_set(e: &Env, admin: &Address, bond: &Address, old_ratio: u128, new_ratio: u128) {
    let topics = (Symbol::new(e, "ratio_set"), bond.clone());
    let data = (admin.clone(), old_ratio, new_ratio);
    e.events().publish(topics, data);
}

/// Emitted when the price feed is replaced.
///
/// # Topics
/// * `Symbol` - "oracle_set"
///
/// # Data
/// * `Address` - The admin
/// * `Address` - Previous feed
/// * `Address` - New feed
pub fn emit_oracle_set(e: &Env, admin: &Address, old_oracle: &Address, new_oracle: &Address) {
    let topics = (Symbol::new(e, "oracle_set"),);
    let data = (admin.clone(), old_oracle.clone(), new_oracle.clone());
    e.events().publish(topics, data);
}

/// Emitted when admin rights move to a new address.
///
/// # Topics
/// * `Symbol` - "admin_transferred"
///
/// # Data
/// * `Address` - Previous admin
/// * `Address` - New admin
pub fn emit_admin_transferred(e: &Env, old_admin: &Address, new_admin: &Address) {
    let topics = (Symbol::new(e, "admin_transferred"),);
    let data = (old_admin.clone(), new_admin.clone());
    e.events().publish(topics, data);
}
