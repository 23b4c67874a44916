//! Engine configuration.

use serde::{Deserialize, Serialize};

use reef_types::Address;

/// Tunable engine parameters, owned by the orchestrator.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineParams {
    /// Divisor of the unwrap fee: `fee = amount / unwrap_fee_divisor`.
    /// Defaults to `u128::MAX`, which rounds every realistic fee to zero
    /// until the divisor is administratively lowered.
    pub unwrap_fee_divisor: u128,

    /// Ledger account credited with unwrap fees, folded truncation, and
    /// wrap over-collection dust.
    pub fee_recipient: Address,
}

impl EngineParams {
    pub fn new(fee_recipient: Address) -> Self {
        Self {
            unwrap_fee_divisor: u128::MAX,
            fee_recipient,
        }
    }
}

impl Default for EngineParams {
    fn default() -> Self {
        Self::new(Address::ZERO)
    }
}
