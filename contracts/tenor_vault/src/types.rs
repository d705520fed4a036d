use soroban_sdk::contracttype;

/// One account's position in one bond.
///
/// `free_collateral` can be withdrawn at will; `locked_collateral` backs
/// `debt` and is only released while the position stays above the bond's
/// collateralization ratio.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Vault {
    pub is_open: bool,
    pub locked_collateral: u128,
    pub free_collateral: u128,
    /// Claim-token units (18 decimals) owed.
    pub debt: u128,
}
