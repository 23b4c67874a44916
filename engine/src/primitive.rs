//! Primitive contract boundary.
//!
//! A primitive prices swaps between internal tokens. It sees the ledger
//! read-only, so it can consult any balance (including its own, mid-batch)
//! while pricing, but only the engine can move value. Mutable access to the
//! primitive itself lets implementations update internal reserves or
//! virtual state during pricing.

use thiserror::Error;

use reef_ledger::LedgerRead;
use reef_types::{Address, Metadata, Snapshot, TokenId};

/// Errors surfaced by primitive pricing calls.
#[derive(Debug, Error)]
pub enum PrimitiveError {
    #[error("unsupported token pair")]
    UnsupportedPair,

    #[error("insufficient liquidity: need {needed}, have {available}")]
    InsufficientLiquidity { needed: u128, available: u128 },

    #[error("rejected: {0}")]
    Rejected(String),

    #[error("{0}")]
    Other(String),
}

/// A registered primitive contract.
pub trait Primitive: Snapshot {
    /// Price `input_amount` of `input_token` into an output amount of
    /// `output_token`.
    fn compute_output_amount(
        &mut self,
        ledger: &dyn LedgerRead,
        input_token: &TokenId,
        output_token: &TokenId,
        input_amount: u128,
        user: &Address,
        metadata: &Metadata,
    ) -> Result<u128, PrimitiveError>;

    /// Price a desired `output_amount` of `output_token` into the required
    /// input amount of `input_token`.
    fn compute_input_amount(
        &mut self,
        ledger: &dyn LedgerRead,
        input_token: &TokenId,
        output_token: &TokenId,
        output_amount: u128,
        user: &Address,
        metadata: &Metadata,
    ) -> Result<u128, PrimitiveError>;
}
