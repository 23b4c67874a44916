//! In-memory reference ledger.

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use reef_types::{Address, Snapshot, SnapshotError, TokenId};

use crate::error::LedgerError;
use crate::ledger::{LedgerRead, MultiTokenLedger};

/// Reference implementation of the multitoken ledger: a balance table plus
/// owner/operator approvals, with bincode snapshots for rollback.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InMemoryLedger {
    balances: HashMap<(Address, TokenId), u128>,
    approvals: HashSet<(Address, Address)>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant or revoke `operator`'s right to act on behalf of `owner`.
    pub fn set_approval_for_all(&mut self, owner: &Address, operator: &Address, approved: bool) {
        if approved {
            self.approvals.insert((*owner, *operator));
        } else {
            self.approvals.remove(&(*owner, *operator));
        }
    }

    /// Move `amount` of `token` from `from` to `to`.
    ///
    /// `caller` must be `from` or an approved operator of `from`.
    pub fn transfer(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        token: &TokenId,
        amount: u128,
    ) -> Result<(), LedgerError> {
        self.check_operator(caller, from)?;
        self.debit(from, token, amount)?;
        self.credit(to, token, amount)
    }

    /// Move each `(token, amount)` pair from `from` to `to`, all or none.
    pub fn transfer_batch(
        &mut self,
        caller: &Address,
        from: &Address,
        to: &Address,
        tokens: &[TokenId],
        amounts: &[u128],
    ) -> Result<(), LedgerError> {
        self.check_operator(caller, from)?;
        check_lengths(tokens, amounts)?;
        let saved = self.clone();
        for (token, amount) in tokens.iter().zip(amounts) {
            if let Err(e) = self.debit(from, token, *amount).and_then(|_| self.credit(to, token, *amount)) {
                *self = saved;
                return Err(e);
            }
        }
        Ok(())
    }

    fn check_operator(&self, caller: &Address, owner: &Address) -> Result<(), LedgerError> {
        if caller == owner || self.is_approved_for_all(owner, caller) {
            Ok(())
        } else {
            Err(LedgerError::NotApproved {
                owner: *owner,
                operator: *caller,
            })
        }
    }

    fn credit(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError> {
        let entry = self.balances.entry((*owner, *token)).or_insert(0);
        *entry = entry.checked_add(amount).ok_or(LedgerError::Overflow)?;
        Ok(())
    }

    fn debit(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError> {
        let available = self.balance_of(owner, token);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientBalance {
                token: *token,
                needed: amount,
                available,
            })?;
        if remaining == 0 {
            self.balances.remove(&(*owner, *token));
        } else {
            self.balances.insert((*owner, *token), remaining);
        }
        Ok(())
    }
}

fn check_lengths(tokens: &[TokenId], amounts: &[u128]) -> Result<(), LedgerError> {
    if tokens.len() == amounts.len() {
        Ok(())
    } else {
        Err(LedgerError::LengthMismatch {
            ids: tokens.len(),
            amounts: amounts.len(),
        })
    }
}

impl LedgerRead for InMemoryLedger {
    fn balance_of(&self, owner: &Address, token: &TokenId) -> u128 {
        self.balances.get(&(*owner, *token)).copied().unwrap_or(0)
    }

    fn balance_of_batch(
        &self,
        owners: &[Address],
        tokens: &[TokenId],
    ) -> Result<Vec<u128>, LedgerError> {
        if owners.len() != tokens.len() {
            return Err(LedgerError::LengthMismatch {
                ids: tokens.len(),
                amounts: owners.len(),
            });
        }
        Ok(owners
            .iter()
            .zip(tokens)
            .map(|(owner, token)| self.balance_of(owner, token))
            .collect())
    }

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.approvals.contains(&(*owner, *operator))
    }
}

impl MultiTokenLedger for InMemoryLedger {
    fn mint(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError> {
        self.credit(owner, token, amount)
    }

    fn burn(&mut self, owner: &Address, token: &TokenId, amount: u128) -> Result<(), LedgerError> {
        self.debit(owner, token, amount)
    }

    fn mint_batch(
        &mut self,
        owner: &Address,
        tokens: &[TokenId],
        amounts: &[u128],
    ) -> Result<(), LedgerError> {
        check_lengths(tokens, amounts)?;
        let saved = self.clone();
        for (token, amount) in tokens.iter().zip(amounts) {
            if let Err(e) = self.credit(owner, token, *amount) {
                *self = saved;
                return Err(e);
            }
        }
        Ok(())
    }

    fn burn_batch(
        &mut self,
        owner: &Address,
        tokens: &[TokenId],
        amounts: &[u128],
    ) -> Result<(), LedgerError> {
        check_lengths(tokens, amounts)?;
        let saved = self.clone();
        for (token, amount) in tokens.iter().zip(amounts) {
            if let Err(e) = self.debit(owner, token, *amount) {
                *self = saved;
                return Err(e);
            }
        }
        Ok(())
    }
}

impl Snapshot for InMemoryLedger {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(|e| SnapshotError::Serialize(e.to_string()))
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self = bincode::deserialize(bytes).map_err(|e| SnapshotError::Restore(e.to_string()))?;
        Ok(())
    }
}
