//! Exact integer rescaling between external asset precision and the
//! 18-decimal internal basis.
//!
//! All results are bit-exact and reproducible. Scaling up is checked
//! multiplication; scaling down is floor division with the remainder
//! reported explicitly so callers decide where truncated value goes (wrap
//! over-collection to the fee recipient, unwrap truncation folded into the
//! fee).

use reef_types::LEDGER_DECIMALS;

use crate::error::EngineError;

fn pow10(exp: u8) -> Result<u128, EngineError> {
    10u128.checked_pow(exp as u32).ok_or(EngineError::Overflow)
}

/// Rescale `amount` from `from` decimal places to `to` decimal places.
///
/// Returns `(converted, truncated)` where `truncated` is the remainder lost
/// to floor division when scaling down, in `from`-decimal units. Scaling up
/// never truncates.
pub fn convert_decimals(from: u8, to: u8, amount: u128) -> Result<(u128, u128), EngineError> {
    if from == to {
        Ok((amount, 0))
    } else if from < to {
        let shift = pow10(to - from)?;
        let converted = amount.checked_mul(shift).ok_or(EngineError::Overflow)?;
        Ok((converted, 0))
    } else {
        let shift = pow10(from - to)?;
        Ok((amount / shift, amount % shift))
    }
}

/// External transfer amount needed to wrap `amount` internal units of an
/// asset with `decimals` places, and the over-collected dust.
///
/// For coarse assets (`decimals < 18`) the externally required amount is
/// rounded up to the next representable unit; the surplus beyond `amount`
/// is returned as `dust` in internal 18-decimal units.
pub fn transfer_amount_for_wrap(amount: u128, decimals: u8) -> Result<(u128, u128), EngineError> {
    if decimals >= LEDGER_DECIMALS {
        let (transfer, _) = convert_decimals(LEDGER_DECIMALS, decimals, amount)?;
        Ok((transfer, 0))
    } else {
        let shift = pow10(LEDGER_DECIMALS - decimals)?;
        let quotient = amount / shift;
        let remainder = amount % shift;
        if remainder == 0 {
            Ok((quotient, 0))
        } else {
            let transfer = quotient.checked_add(1).ok_or(EngineError::Overflow)?;
            let collected = transfer.checked_mul(shift).ok_or(EngineError::Overflow)?;
            Ok((transfer, collected - amount))
        }
    }
}
