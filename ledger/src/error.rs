use thiserror::Error;

use reef_types::{Address, TokenId};

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("insufficient balance of {token}: need {needed}, have {available}")]
    InsufficientBalance {
        token: TokenId,
        needed: u128,
        available: u128,
    },

    #[error("balance overflow")]
    Overflow,

    #[error("length mismatch: {ids} token ids, {amounts} amounts")]
    LengthMismatch { ids: usize, amounts: usize },

    #[error("{operator} is not an approved operator for {owner}")]
    NotApproved { owner: Address, operator: Address },
}
