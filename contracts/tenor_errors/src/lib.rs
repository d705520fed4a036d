#![no_std]

use soroban_sdk::contracterror;

/// @title  ErrorCategory
/// @notice Groups errors by failure class so callers can branch on the kind
///         of rejection before looking at the specific code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Contract setup errors (codes 1-99).
    Initialization,
    /// Caller is not allowed to perform the action (codes 100-199).
    Authorization,
    /// Bond listing, maturity and vault lifecycle errors (codes 200-299).
    Lifecycle,
    /// A per-bond permission flag is switched off (codes 300-399).
    Permission,
    /// Malformed arguments such as zero amounts (codes 400-499).
    Validation,
    /// The operation would breach the collateralization ratio (codes 500-599).
    Solvency,
    /// Not enough collateral, debt or liquidity to honour the request (codes 600-699).
    InsufficientResource,
    /// A collaborator contract reported a failure (codes 700-799).
    ExternalCall,
    /// Checked arithmetic failed (codes 800-899).
    Arithmetic,
}

/// @title  ContractError
/// @notice Canonical error enum shared by every Tenor contract.
/// @dev    Codes are wire-stable. Never renumber a variant after deployment.
///         Append new variants at the end of their category block only.
///
/// Error Code Layout:
///   1   -  99 : Initialization
///   100 - 199 : Authorization
///   200 - 299 : Lifecycle
///   300 - 399 : Permission
///   400 - 499 : Validation
///   500 - 599 : Solvency
///   600 - 699 : InsufficientResource
///   700 - 799 : ExternalCall
///   800 - 899 : Arithmetic
#[contracterror]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum ContractError {
    // --- Initialization (1-99) ---
    /// Contract has not been initialized yet.
    /// Contracts: registry, vault, redemption, claim token, oracle
    NotInitialized = 1,

    /// Contract has already been initialized and cannot be re-initialized.
    /// Contracts: registry, vault, redemption, claim token, oracle
    AlreadyInitialized = 2,

    // --- Authorization (100-199) ---
    /// Caller is not the admin, or not a configured minter/burner.
    /// Contracts: registry, claim token, oracle
    Unauthorized = 100,

    // --- Lifecycle (200-299) ---
    /// Bond has not been listed in the registry.
    /// Contracts: registry, vault, redemption
    BondNotListed = 200,

    /// Bond is already listed in the registry.
    /// Contracts: registry
    AlreadyListed = 201,

    /// Bond has reached its expiration time.
    /// Contracts: vault, redemption
    BondMatured = 202,

    /// Bond has not reached its expiration time yet.
    /// Contracts: redemption
    BondNotMatured = 203,

    /// The (bond, account) vault has not been opened.
    /// Contracts: vault
    VaultNotOpen = 204,

    /// Expiration time must lie in the future when the claim token is created.
    /// Contracts: claim token
    InvalidExpiration = 205,

    // --- Permission (300-399) ---
    /// Collateral deposits are switched off for this bond.
    /// Contracts: vault
    DepositCollateralNotAllowed = 300,

    /// Borrowing is switched off for this bond.
    /// Contracts: vault
    BorrowNotAllowed = 301,

    /// Repayments are switched off for this bond.
    /// Contracts: vault
    RepayBorrowNotAllowed = 302,

    /// Supplying underlying is switched off for this bond.
    /// Contracts: redemption
    SupplyUnderlyingNotAllowed = 303,

    /// Redeeming underlying is switched off for this bond.
    /// Contracts: redemption
    RedeemUnderlyingNotAllowed = 304,

    // --- Validation (400-499) ---
    /// Collateral deposit amount is zero.
    DepositCollateralZero = 400,

    /// Collateral withdrawal amount is zero.
    WithdrawCollateralZero = 401,

    /// Collateral lock amount is zero.
    LockCollateralZero = 402,

    /// Collateral unlock amount is zero.
    FreeCollateralZero = 403,

    /// Borrow amount is zero.
    BorrowZero = 404,

    /// Repay amount is zero.
    RepayBorrowZero = 405,

    /// Underlying supply amount is zero.
    SupplyUnderlyingZero = 406,

    /// Underlying redemption amount is zero.
    RedeemUnderlyingZero = 407,

    /// Collateralization ratio is below 100%.
    /// Contracts: registry
    RatioBelowMinimum = 408,

    /// Collateralization ratio is above 10,000%.
    /// Contracts: registry
    RatioAboveMaximum = 409,

    /// Asset reports more than 18 decimals.
    /// Contracts: claim token
    InvalidDecimals = 410,

    /// Price must be strictly positive.
    /// Contracts: oracle
    InvalidPrice = 411,

    // --- Solvency (500-599) ---
    /// The resulting collateralization ratio would drop below the bond's ratio.
    /// Contracts: vault
    BelowCollateralizationRatio = 500,

    // --- InsufficientResource (600-699) ---
    /// Withdrawal exceeds the vault's free collateral.
    WithdrawCollateralInsufficientFreeCollateral = 600,

    /// Lock exceeds the vault's free collateral.
    LockCollateralInsufficientFreeCollateral = 601,

    /// Unlock exceeds the vault's locked collateral.
    FreeCollateralInsufficientLockedCollateral = 602,

    /// Repayment exceeds the vault's outstanding debt.
    RepayBorrowInsufficientDebt = 603,

    /// Redemption exceeds the underlying held for the bond.
    RedeemUnderlyingInsufficientUnderlying = 604,

    // --- ExternalCall (700-799) ---
    /// Collateral or underlying transfer did not succeed.
    TokenTransferFailed = 700,

    /// Claim-token mint did not succeed.
    MintFailed = 701,

    /// Claim-token burn did not succeed.
    BurnFailed = 702,

    /// The price feed returned no usable price for an asset.
    PriceUnavailable = 703,

    /// A nested call re-entered a guarded entry point.
    ReentrancyDetected = 704,

    // --- Arithmetic (800-899) ---
    /// Integer overflow (or an out-of-range conversion) in checked arithmetic.
    Overflow = 800,
}

/// @title  ErrorExt
/// @notice Provides category() and description() on every ContractError variant.
pub trait ErrorExt {
    /// @return The ErrorCategory bucket this error belongs to.
    fn category(&self) -> ErrorCategory;

    /// @return A static string description safe for display.
    fn description(&self) -> &'static str;
}

impl ErrorExt for ContractError {
    fn category(&self) -> ErrorCategory {
        match self {
            ContractError::NotInitialized | ContractError::AlreadyInitialized => {
                ErrorCategory::Initialization
            }

            ContractError::Unauthorized => ErrorCategory::Authorization,

            ContractError::BondNotListed
            | ContractError::AlreadyListed
            | ContractError::BondMatured
            | ContractError::BondNotMatured
            | ContractError::VaultNotOpen
            | ContractError::InvalidExpiration => ErrorCategory::Lifecycle,

            ContractError::DepositCollateralNotAllowed
            | ContractError::BorrowNotAllowed
            | ContractError::RepayBorrowNotAllowed
            | ContractError::SupplyUnderlyingNotAllowed
            | ContractError::RedeemUnderlyingNotAllowed => ErrorCategory::Permission,

            ContractError::DepositCollateralZero
            | ContractError::WithdrawCollateralZero
            | ContractError::LockCollateralZero
            | ContractError::FreeCollateralZero
            | ContractError::BorrowZero
            | ContractError::RepayBorrowZero
            | ContractError::SupplyUnderlyingZero
            | ContractError::RedeemUnderlyingZero
            | ContractError::RatioBelowMinimum
            | ContractError::RatioAboveMaximum
            | ContractError::InvalidDecimals
            | ContractError::InvalidPrice => ErrorCategory::Validation,

            ContractError::BelowCollateralizationRatio => ErrorCategory::Solvency,

            ContractError::WithdrawCollateralInsufficientFreeCollateral
            | ContractError::LockCollateralInsufficientFreeCollateral
            | ContractError::FreeCollateralInsufficientLockedCollateral
            | ContractError::RepayBorrowInsufficientDebt
            | ContractError::RedeemUnderlyingInsufficientUnderlying => {
                ErrorCategory::InsufficientResource
            }

            ContractError::TokenTransferFailed
            | ContractError::MintFailed
            | ContractError::BurnFailed
            | ContractError::PriceUnavailable
            | ContractError::ReentrancyDetected => ErrorCategory::ExternalCall,

            ContractError::Overflow => ErrorCategory::Arithmetic,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract has already been initialized",
            ContractError::Unauthorized => "Caller is not authorized for this action",
            ContractError::BondNotListed => "Bond is not listed",
            ContractError::AlreadyListed => "Bond is already listed",
            ContractError::BondMatured => "Bond has matured",
            ContractError::BondNotMatured => "Bond has not matured",
            ContractError::VaultNotOpen => "Vault is not open",
            ContractError::InvalidExpiration => "Expiration time must be in the future",
            ContractError::DepositCollateralNotAllowed => "Collateral deposits are not allowed",
            ContractError::BorrowNotAllowed => "Borrowing is not allowed",
            ContractError::RepayBorrowNotAllowed => "Repaying borrows is not allowed",
            ContractError::SupplyUnderlyingNotAllowed => "Supplying underlying is not allowed",
            ContractError::RedeemUnderlyingNotAllowed => "Redeeming underlying is not allowed",
            ContractError::DepositCollateralZero => "Collateral deposit amount is zero",
            ContractError::WithdrawCollateralZero => "Collateral withdrawal amount is zero",
            ContractError::LockCollateralZero => "Collateral lock amount is zero",
            ContractError::FreeCollateralZero => "Collateral unlock amount is zero",
            ContractError::BorrowZero => "Borrow amount is zero",
            ContractError::RepayBorrowZero => "Repay amount is zero",
            ContractError::SupplyUnderlyingZero => "Underlying supply amount is zero",
            ContractError::RedeemUnderlyingZero => "Underlying redemption amount is zero",
            ContractError::RatioBelowMinimum => "Collateralization ratio is below 100%",
            ContractError::RatioAboveMaximum => "Collateralization ratio is above 10000%",
            ContractError::InvalidDecimals => "Asset has more than 18 decimals",
            ContractError::InvalidPrice => "Price must be strictly positive",
            ContractError::BelowCollateralizationRatio => {
                "Resulting collateralization ratio is below the required ratio"
            }
            ContractError::WithdrawCollateralInsufficientFreeCollateral => {
                "Withdrawal exceeds free collateral"
            }
            ContractError::LockCollateralInsufficientFreeCollateral => {
                "Lock exceeds free collateral"
            }
            ContractError::FreeCollateralInsufficientLockedCollateral => {
                "Unlock exceeds locked collateral"
            }
            ContractError::RepayBorrowInsufficientDebt => "Repayment exceeds outstanding debt",
            ContractError::RedeemUnderlyingInsufficientUnderlying => {
                "Redemption exceeds available underlying"
            }
            ContractError::TokenTransferFailed => "Token transfer failed",
            ContractError::MintFailed => "Claim token mint failed",
            ContractError::BurnFailed => "Claim token burn failed",
            ContractError::PriceUnavailable => "Price feed returned no price",
            ContractError::ReentrancyDetected => "Reentrancy detected; call rejected",
            ContractError::Overflow => "Integer overflow in checked arithmetic",
        }
    }
}
