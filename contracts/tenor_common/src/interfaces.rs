//! Cross-contract call surfaces.
//!
//! Each trait only names the functions the caller actually uses; the
//! generated clients dispatch by function name, so the implementing contract
//! may expose more.

use soroban_sdk::{contractclient, Address, Env};
use tenor_errors::ContractError;

use crate::types::{BondConfig, BondTerms};

/// Read surface of the permission registry.
#[contractclient(name = "RegistryClient")]
pub trait RegistryInterface {
    /// Listing flag, ratio and permissions; default record for unknown bonds.
    fn get_bond(env: Env, bond: Address) -> BondConfig;

    /// Price feed configured for the protocol.
    fn get_oracle(env: Env) -> Result<Address, ContractError>;
}

/// Mint/burn surface of a bond's claim token.
///
/// `mint` and `burn` report an unfulfillable request with `false` instead of
/// failing; callers turn that into `MintFailed` / `BurnFailed`.
#[contractclient(name = "ClaimTokenClient")]
pub trait ClaimTokenInterface {
    fn mint(env: Env, minter: Address, to: Address, amount: u128) -> Result<bool, ContractError>;

    fn burn(env: Env, burner: Address, from: Address, amount: u128)
        -> Result<bool, ContractError>;

    fn terms(env: Env) -> Result<BondTerms, ContractError>;
}

/// Price feed. Prices are 18-decimal mantissas; `0` means no price is known.
#[contractclient(name = "PriceFeedClient")]
pub trait PriceFeedInterface {
    fn get_adjusted_price(env: Env, asset: Address) -> u128;
}
