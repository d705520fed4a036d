#![no_std]

//! Minimal token used by the ledger tests.
//!
//! Speaks the subset of the Soroban token interface the ledgers call
//! (`transfer`, `transfer_from`, `approve`, `balance`, `decimals`) and adds
//! `set_failing` so tests can make every transfer fail on demand.

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};
use tenor_errors::ContractError;

#[contracttype]
#[derive(Clone)]
enum DataKey {
    Decimals,
    Failing,
    Balance(Address),
    Allowance(Address, Address),
}

fn balance_of(e: &Env, id: &Address) -> i128 {
    e.storage()
        .instance()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn move_balance(e: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    if amount < 0 {
        return Err(ContractError::TokenTransferFailed);
    }
    if e.storage().instance().get(&DataKey::Failing).unwrap_or(false) {
        return Err(ContractError::TokenTransferFailed);
    }
    let from_balance = balance_of(e, from);
    if from_balance < amount {
        return Err(ContractError::TokenTransferFailed);
    }
    e.storage()
        .instance()
        .set(&DataKey::Balance(from.clone()), &(from_balance - amount));
    let to_balance = balance_of(e, to);
    e.storage()
        .instance()
        .set(&DataKey::Balance(to.clone()), &(to_balance + amount));
    Ok(())
}

#[contract]
pub struct MockToken;

#[contractimpl]
impl MockToken {
    pub fn __constructor(e: Env, decimals: u32) {
        e.storage().instance().set(&DataKey::Decimals, &decimals);
    }

    pub fn decimals(e: Env) -> u32 {
        e.storage().instance().get(&DataKey::Decimals).unwrap_or(7)
    }

    pub fn set_failing(e: Env, failing: bool) {
        e.storage().instance().set(&DataKey::Failing, &failing);
    }

    pub fn mint(e: Env, to: Address, amount: i128) {
        let balance = balance_of(&e, &to);
        e.storage()
            .instance()
            .set(&DataKey::Balance(to), &(balance + amount));
    }

    pub fn balance(e: Env, id: Address) -> i128 {
        balance_of(&e, &id)
    }

    pub fn allowance(e: Env, from: Address, spender: Address) -> i128 {
        e.storage()
            .instance()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn approve(e: Env, from: Address, spender: Address, amount: i128, _expiration_ledger: u32) {
        from.require_auth();
        e.storage()
            .instance()
            .set(&DataKey::Allowance(from, spender), &amount);
    }

    pub fn transfer(e: Env, from: Address, to: Address, amount: i128) -> Result<(), ContractError> {
        from.require_auth();
        move_balance(&e, &from, &to, amount)
    }

    pub fn transfer_from(
        e: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), ContractError> {
        spender.require_auth();
        let key = DataKey::Allowance(from.clone(), spender);
        let allowance: i128 = e.storage().instance().get(&key).unwrap_or(0);
        if allowance < amount {
            return Err(ContractError::TokenTransferFailed);
        }
        move_balance(&e, &from, &to, amount)?;
        e.storage().instance().set(&key, &(allowance - amount));
        Ok(())
    }
}
