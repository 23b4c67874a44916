//! Per-batch signed balance deltas.
//!
//! A batch declares its token ids up front; every interaction then adjusts
//! the signed net delta of a declared token. At flush the deltas collapse
//! into one batch mint and one batch burn, the only persisted user-side
//! mutation of the whole batch. Deltas are batch-local and never outlive the
//! submission.

use reef_types::TokenId;

use crate::error::EngineError;

/// Net signed delta of one declared token.
#[derive(Clone, Debug)]
pub struct DeltaEntry {
    pub token: TokenId,
    pub delta: i128,
}

/// The per-batch accumulator, in declaration order.
///
/// Lookups scan for the first matching id, so duplicate declarations are
/// permitted but degenerate: later duplicates never accumulate and settle at
/// net zero.
#[derive(Clone, Debug, Default)]
pub struct BalanceDeltas {
    entries: Vec<DeltaEntry>,
}

/// Flush result: parallel id/amount vectors for one batch mint and one batch
/// burn, zeros skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Settlement {
    pub mint_tokens: Vec<TokenId>,
    pub mint_amounts: Vec<u128>,
    pub burn_tokens: Vec<TokenId>,
    pub burn_amounts: Vec<u128>,
}

impl BalanceDeltas {
    pub fn new(tokens: &[TokenId]) -> Self {
        Self {
            entries: tokens
                .iter()
                .map(|token| DeltaEntry {
                    token: *token,
                    delta: 0,
                })
                .collect(),
        }
    }

    fn index_of(&self, token: &TokenId) -> Result<usize, EngineError> {
        self.entries
            .iter()
            .position(|entry| entry.token == *token)
            .ok_or(EngineError::MissingTokenId(*token))
    }

    fn signed(token: &TokenId, amount: u128) -> Result<i128, EngineError> {
        i128::try_from(amount).map_err(|_| EngineError::DeltaMagnitude { token: *token })
    }

    /// Add `amount` to the token's net delta.
    pub fn increase(&mut self, token: &TokenId, amount: u128) -> Result<(), EngineError> {
        let i = self.index_of(token)?;
        let add = Self::signed(token, amount)?;
        self.entries[i].delta = self.entries[i]
            .delta
            .checked_add(add)
            .ok_or(EngineError::DeltaOverflow { token: *token })?;
        Ok(())
    }

    /// Subtract `amount` from the token's net delta.
    pub fn decrease(&mut self, token: &TokenId, amount: u128) -> Result<(), EngineError> {
        let i = self.index_of(token)?;
        let sub = Self::signed(token, amount)?;
        self.entries[i].delta = self.entries[i]
            .delta
            .checked_sub(sub)
            .ok_or(EngineError::DeltaOverflow { token: *token })?;
        Ok(())
    }

    /// Current accumulated credit of the token. Rejects if the net delta is
    /// a debit; a violation is an error, never a clamp.
    pub fn credit_of(&self, token: &TokenId) -> Result<u128, EngineError> {
        let i = self.index_of(token)?;
        let delta = self.entries[i].delta;
        if delta < 0 {
            return Err(EngineError::NegativeDelta { token: *token });
        }
        Ok(delta as u128)
    }

    /// Current accumulated debit magnitude of the token. Rejects if the net
    /// delta is a credit.
    pub fn debit_of(&self, token: &TokenId) -> Result<u128, EngineError> {
        let i = self.index_of(token)?;
        let delta = self.entries[i].delta;
        if delta > 0 {
            return Err(EngineError::PositiveDelta { token: *token });
        }
        Ok(delta.unsigned_abs())
    }

    /// Collapse into the settlement vectors, skipping net-zero entries.
    pub fn finalize(self) -> Settlement {
        let mut settlement = Settlement::default();
        for entry in self.entries {
            if entry.delta > 0 {
                settlement.mint_tokens.push(entry.token);
                settlement.mint_amounts.push(entry.delta as u128);
            } else if entry.delta < 0 {
                settlement.burn_tokens.push(entry.token);
                settlement.burn_amounts.push(entry.delta.unsigned_abs());
            }
        }
        settlement
    }
}
