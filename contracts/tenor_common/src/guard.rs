//! Reentrancy flag kept in the calling contract's instance storage.
//!
//! A failed invocation rolls its storage writes back, so an `Err` leaves the
//! flag cleared as well.

use soroban_sdk::{symbol_short, Env, Symbol};
use tenor_errors::ContractError;

const LOCK_KEY: Symbol = symbol_short!("lock");

pub fn is_locked(e: &Env) -> bool {
    e.storage().instance().get(&LOCK_KEY).unwrap_or(false)
}

/// Runs `f` with the flag held; a nested entry fails with `ReentrancyDetected`.
pub fn with_reentrancy_guard<T, F>(e: &Env, f: F) -> Result<T, ContractError>
where
    F: FnOnce() -> Result<T, ContractError>,
{
    if is_locked(e) {
        return Err(ContractError::ReentrancyDetected);
    }
    e.storage().instance().set(&LOCK_KEY, &true);
    let result = f();
    e.storage().instance().remove(&LOCK_KEY);
    result
}
