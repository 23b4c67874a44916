//! External asset contract boundaries.
//!
//! The engine never sees inside a token contract; it moves value through
//! these traits and keeps wrapped assets in its own custody account. Every
//! adapter also implements [`Snapshot`] so a failed submission can roll its
//! state back along with the ledger.

use thiserror::Error;

use reef_types::{Address, Snapshot, SubId};

/// Errors surfaced by external asset contracts.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("transfer refused: {0}")]
    TransferRefused(String),

    #[error("decimals unavailable: {0}")]
    DecimalsUnavailable(String),

    #[error("{0}")]
    Other(String),
}

/// An external fungible token contract.
pub trait FungibleAsset: Snapshot {
    /// Decimal places of the external representation.
    fn decimals(&self) -> Result<u8, AssetError>;

    /// Pull `amount` external units from `from` into `to`'s custody.
    fn transfer_from(&mut self, from: &Address, to: &Address, amount: u128)
        -> Result<(), AssetError>;

    /// Push `amount` external units out of custody to `to`.
    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), AssetError>;
}

/// An external non-fungible token contract. Items are identified by sub-id
/// and move one at a time.
pub trait NonFungibleAsset: Snapshot {
    fn safe_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        sub_id: &SubId,
    ) -> Result<(), AssetError>;
}

/// An external semi-fungible multitoken contract. Balances are identified
/// by sub-id and move in raw amounts with no decimal conversion.
pub trait MultiTokenAsset: Snapshot {
    fn safe_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<(), AssetError>;
}
