//! Ledger precision constants.
//!
//! All internal balances are fixed-point integers (u128) with 18 decimal
//! places, regardless of the precision of the wrapped external asset. The
//! smallest unit is 1 raw.

/// Number of decimal places of every internal balance.
pub const LEDGER_DECIMALS: u8 = 18;

/// One whole token in raw units: 10^18.
pub const LEDGER_UNIT: u128 = 1_000_000_000_000_000_000;
