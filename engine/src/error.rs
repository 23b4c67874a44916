use thiserror::Error;

use reef_ledger::LedgerError;
use reef_types::{Address, SnapshotError, TokenId};

use crate::assets::AssetError;
use crate::primitive::PrimitiveError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("token id {0} was not declared for this batch")]
    MissingTokenId(TokenId),

    #[error("delta contribution for {token} exceeds the signed accumulator range")]
    DeltaMagnitude { token: TokenId },

    #[error("delta accumulator overflow for {token}")]
    DeltaOverflow { token: TokenId },

    #[error("expected a credit of {token}, found a debit")]
    NegativeDelta { token: TokenId },

    #[error("expected a debit of {token}, found a credit")]
    PositiveDelta { token: TokenId },

    #[error("non-fungible interactions move exactly one item, got {0}")]
    InvalidNonFungibleAmount(u128),

    #[error("delta roll-over is only available inside a batch")]
    RolloverOutsideBatch,

    #[error("no registered asset at {0}")]
    UnknownAsset(Address),

    #[error("no registered primitive at {0}")]
    UnknownPrimitive(Address),

    #[error("token {token} is already registered to {primitive}")]
    TokenAlreadyRegistered { token: TokenId, primitive: Address },

    #[error("{operator} is not an approved operator for {principal}")]
    NotApproved { principal: Address, operator: Address },

    #[error("recursive submission rejected: engine is busy")]
    Busy,

    #[error("unsolicited inbound transfer")]
    UnexpectedTransfer,

    #[error("unwrap fee divisor {divisor} below minimum {min}")]
    FeeDivisorTooSmall { divisor: u128, min: u128 },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("primitive error: {0}")]
    Primitive(#[from] PrimitiveError),

    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}
