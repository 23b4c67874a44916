//! The interaction sum type.
//!
//! One variant per operation kind; ill-formed kind/field combinations are
//! unrepresentable and every dispatch site matches exhaustively.

use serde::{Deserialize, Serialize};

use reef_types::{Address, Metadata, SubId, TokenId};

/// Sentinel amount meaning "use the current accumulated delta of the
/// specified token" instead of an explicit amount. Only meaningful inside a
/// batch.
pub const USE_DELTA: u128 = u128::MAX;

/// A single typed operation submitted to the engine.
///
/// Immutable once submitted; the engine only reads it during dispatch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    /// Deposit an external fungible token, crediting its internal token.
    WrapFungible { asset: Address, amount: u128 },

    /// Withdraw an external fungible token, debiting its internal token.
    UnwrapFungible { asset: Address, amount: u128 },

    /// Deposit one non-fungible item. `amount` must be exactly 1.
    WrapNonFungible {
        asset: Address,
        sub_id: SubId,
        amount: u128,
    },

    /// Withdraw one non-fungible item. `amount` must be exactly 1.
    UnwrapNonFungible {
        asset: Address,
        sub_id: SubId,
        amount: u128,
    },

    /// Deposit a semi-fungible multitoken balance.
    WrapMultiToken {
        asset: Address,
        sub_id: SubId,
        amount: u128,
    },

    /// Withdraw a semi-fungible multitoken balance.
    UnwrapMultiToken {
        asset: Address,
        sub_id: SubId,
        amount: u128,
    },

    /// Ask a primitive to price an input amount into an output amount.
    ComputeOutputAmount {
        primitive: Address,
        input_token: TokenId,
        output_token: TokenId,
        input_amount: u128,
        metadata: Metadata,
    },

    /// Ask a primitive to price a desired output amount into the required
    /// input amount.
    ComputeInputAmount {
        primitive: Address,
        input_token: TokenId,
        output_token: TokenId,
        output_amount: u128,
        metadata: Metadata,
    },
}

impl Interaction {
    /// The token the specified amount refers to.
    pub fn specified_token(&self) -> TokenId {
        match self {
            Self::WrapFungible { asset, .. } | Self::UnwrapFungible { asset, .. } => {
                TokenId::from_fungible(asset)
            }
            Self::WrapNonFungible { asset, sub_id, .. }
            | Self::UnwrapNonFungible { asset, sub_id, .. }
            | Self::WrapMultiToken { asset, sub_id, .. }
            | Self::UnwrapMultiToken { asset, sub_id, .. } => TokenId::from_sub_id(asset, sub_id),
            Self::ComputeOutputAmount { input_token, .. } => *input_token,
            Self::ComputeInputAmount { output_token, .. } => *output_token,
        }
    }

    /// The raw specified amount, possibly [`USE_DELTA`].
    pub fn specified_amount(&self) -> u128 {
        match self {
            Self::WrapFungible { amount, .. }
            | Self::UnwrapFungible { amount, .. }
            | Self::WrapNonFungible { amount, .. }
            | Self::UnwrapNonFungible { amount, .. }
            | Self::WrapMultiToken { amount, .. }
            | Self::UnwrapMultiToken { amount, .. } => *amount,
            Self::ComputeOutputAmount { input_amount, .. } => *input_amount,
            Self::ComputeInputAmount { output_amount, .. } => *output_amount,
        }
    }

    /// Whether [`USE_DELTA`] resolves against the accumulated credit of the
    /// specified token (kinds that consume it) or against the accumulated
    /// debit (kinds that produce it).
    pub fn rollover_reads_credit(&self) -> bool {
        match self {
            Self::UnwrapFungible { .. }
            | Self::UnwrapNonFungible { .. }
            | Self::UnwrapMultiToken { .. }
            | Self::ComputeOutputAmount { .. } => true,
            Self::WrapFungible { .. }
            | Self::WrapNonFungible { .. }
            | Self::WrapMultiToken { .. }
            | Self::ComputeInputAmount { .. } => false,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::WrapFungible { .. } => "wrap_fungible",
            Self::UnwrapFungible { .. } => "unwrap_fungible",
            Self::WrapNonFungible { .. } => "wrap_non_fungible",
            Self::UnwrapNonFungible { .. } => "unwrap_non_fungible",
            Self::WrapMultiToken { .. } => "wrap_multi_token",
            Self::UnwrapMultiToken { .. } => "unwrap_multi_token",
            Self::ComputeOutputAmount { .. } => "compute_output_amount",
            Self::ComputeInputAmount { .. } => "compute_input_amount",
        }
    }
}
