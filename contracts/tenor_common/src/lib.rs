#![no_std]

//! # Tenor Common
//!
//! Pieces shared by every Tenor contract:
//!
//! - [`types`]: bond configuration, permission flags and bond terms exchanged
//!   between contracts.
//! - [`interfaces`]: `#[contractclient]` traits for the registry, the claim
//!   token and the price feed.
//! - [`math`]: checked arithmetic and 18-decimal precision normalization.
//! - [`guard`]: instance-storage reentrancy flag.

pub mod guard;
pub mod interfaces;
pub mod math;
pub mod types;

pub use tenor_errors::ContractError;
pub use types::{BondConfig, BondTerms, PermissionFlag, PermissionFlags};

/// Minimum ledger TTL before a persistent entry is bumped (~1 day at 5 s/ledger).
pub const BUMP_THRESHOLD: u32 = 17_280;
/// Target TTL after a bump (~30 days).
pub const BUMP_TARGET: u32 = 518_400;

#[cfg(test)]
mod test_math;
