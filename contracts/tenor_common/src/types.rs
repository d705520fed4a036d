use soroban_sdk::{contracttype, Address};
use tenor_errors::ContractError;

// --- Permissions ---

/// Every action the registry can switch on or off for a listed bond.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PermissionFlag {
    DepositCollateral,
    Borrow,
    RepayBorrow,
    LiquidateBorrow,
    SupplyUnderlying,
    RedeemUnderlying,
}

/// Per-bond permission table. All flags start `false` when a bond is listed.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PermissionFlags {
    pub deposit_collateral: bool,
    pub borrow: bool,
    pub repay_borrow: bool,
    pub liquidate_borrow: bool,
    pub supply_underlying: bool,
    pub redeem_underlying: bool,
}

impl PermissionFlags {
    pub fn get(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::DepositCollateral => self.deposit_collateral,
            PermissionFlag::Borrow => self.borrow,
            PermissionFlag::RepayBorrow => self.repay_borrow,
            PermissionFlag::LiquidateBorrow => self.liquidate_borrow,
            PermissionFlag::SupplyUnderlying => self.supply_underlying,
            PermissionFlag::RedeemUnderlying => self.redeem_underlying,
        }
    }

    pub fn set(&mut self, flag: PermissionFlag, value: bool) {
        let slot = match flag {
            PermissionFlag::DepositCollateral => &mut self.deposit_collateral,
            PermissionFlag::Borrow => &mut self.borrow,
            PermissionFlag::RepayBorrow => &mut self.repay_borrow,
            PermissionFlag::LiquidateBorrow => &mut self.liquidate_borrow,
            PermissionFlag::SupplyUnderlying => &mut self.supply_underlying,
            PermissionFlag::RedeemUnderlying => &mut self.redeem_underlying,
        };
        *slot = value;
    }
}

// --- Bond configuration (registry-owned) ---

/// Registry record for one bond. Unknown bonds read as `BondConfig::default()`,
/// i.e. unlisted with every permission off.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct BondConfig {
    pub is_listed: bool,
    /// 18-decimal mantissa, `1e18` == 100%.
    pub collateralization_ratio: u128,
    pub permissions: PermissionFlags,
}

impl BondConfig {
    pub fn require_listed(&self) -> Result<(), ContractError> {
        if !self.is_listed {
            return Err(ContractError::BondNotListed);
        }
        Ok(())
    }

    /// Fails with `denied` when `flag` is switched off.
    pub fn require_allowed(
        &self,
        flag: PermissionFlag,
        denied: ContractError,
    ) -> Result<(), ContractError> {
        if !self.permissions.get(flag) {
            return Err(denied);
        }
        Ok(())
    }
}

// --- Bond terms (claim-token-owned) ---

/// Immutable terms of a bond, fixed when its claim token is initialized.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BondTerms {
    /// Unix timestamp at which the bond matures.
    pub expiration_time: u64,
    /// Asset redeemable for the claim token at maturity.
    pub underlying: Address,
    /// Asset locked in vaults to back debt.
    pub collateral: Address,
    /// `10^(18 - underlying decimals)`.
    pub underlying_precision_scalar: u128,
    /// `10^(18 - collateral decimals)`.
    pub collateral_precision_scalar: u128,
}

impl BondTerms {
    pub fn is_matured(&self, now: u64) -> bool {
        now >= self.expiration_time
    }
}
