//! Ledger trait surface consumed by the engine.
//!
//! Read access is split out so primitives can query balances during pricing
//! without gaining mint/burn capability.

use reef_types::{Address, Snapshot, TokenId};

use crate::error::LedgerError;

/// Read-only balance and approval queries.
pub trait LedgerRead {
    /// Balance of `owner` in the given token.
    fn balance_of(&self, owner: &Address, token: &TokenId) -> u128;

    /// Balances for parallel slices of owners and token ids.
    fn balance_of_batch(
        &self,
        owners: &[Address],
        tokens: &[TokenId],
    ) -> Result<Vec<u128>, LedgerError>;

    /// Whether `operator` may act on behalf of `owner`.
    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool;
}

/// Full mutation surface: mint and burn, single and batch.
///
/// The engine is the only holder of this trait object; everything else sees
/// [`LedgerRead`]. Batch operations validate slice lengths and apply all
/// entries or none.
pub trait MultiTokenLedger: LedgerRead + Snapshot {
    /// Credit `amount` of `token` to `owner`.
    fn mint(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError>;

    /// Debit `amount` of `token` from `owner`.
    fn burn(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError>;

    /// Credit each `(token, amount)` pair to `owner`.
    fn mint_batch(
        &mut self,
        owner: &Address,
        tokens: &[TokenId],
        amounts: &[u128],
    ) -> Result<(), LedgerError>;

    /// Debit each `(token, amount)` pair from `owner`.
    fn burn_batch(
        &mut self,
        owner: &Address,
        tokens: &[TokenId],
        amounts: &[u128],
    ) -> Result<(), LedgerError>;
}
