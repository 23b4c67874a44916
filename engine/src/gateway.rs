//! Primitive gateway.
//!
//! Swaps route through a registered primitive in two steps: the primitive
//! prices the trade against a read-only ledger view, then the engine
//! reconciles the primitive's own balances. The input side is minted to the
//! primitive and the output side is burned from it, except for tokens the
//! primitive itself registered, whose supply the primitive controls through
//! registration rather than balance. Reconciliation writes land immediately
//! so a later interaction in the same batch can read them.

use reef_ledger::MultiTokenLedger;
use reef_types::{Address, Metadata, SubId, TokenId};

use crate::dispatch::BalanceFlow;
use crate::engine::ReefEngine;
use crate::error::EngineError;

impl<L: MultiTokenLedger> ReefEngine<L> {
    pub(crate) fn compute_output(
        &mut self,
        user: &Address,
        primitive: &Address,
        input_token: &TokenId,
        output_token: &TokenId,
        input_amount: u128,
        metadata: &Metadata,
    ) -> Result<BalanceFlow, EngineError> {
        let prim = self
            .primitives
            .get_mut(primitive)
            .ok_or(EngineError::UnknownPrimitive(*primitive))?;
        let output_amount = prim.compute_output_amount(
            &self.ledger,
            input_token,
            output_token,
            input_amount,
            user,
            metadata,
        )?;
        self.reconcile_primitive(primitive, input_token, input_amount, output_token, output_amount)?;
        tracing::debug!(
            primitive = %primitive,
            input_amount,
            output_amount,
            "primitive priced forward swap"
        );
        Ok(BalanceFlow::swap(
            *input_token,
            input_amount,
            *output_token,
            output_amount,
        ))
    }

    pub(crate) fn compute_input(
        &mut self,
        user: &Address,
        primitive: &Address,
        input_token: &TokenId,
        output_token: &TokenId,
        output_amount: u128,
        metadata: &Metadata,
    ) -> Result<BalanceFlow, EngineError> {
        let prim = self
            .primitives
            .get_mut(primitive)
            .ok_or(EngineError::UnknownPrimitive(*primitive))?;
        let input_amount = prim.compute_input_amount(
            &self.ledger,
            input_token,
            output_token,
            output_amount,
            user,
            metadata,
        )?;
        self.reconcile_primitive(primitive, input_token, input_amount, output_token, output_amount)?;
        tracing::debug!(
            primitive = %primitive,
            input_amount,
            output_amount,
            "primitive priced backward swap"
        );
        Ok(BalanceFlow::swap(
            *input_token,
            input_amount,
            *output_token,
            output_amount,
        ))
    }

    /// Move the primitive's side of a priced swap. Registered tokens are
    /// exempt on their side: the primitive mints and burns them by pricing
    /// alone, so no balance backs them.
    fn reconcile_primitive(
        &mut self,
        primitive: &Address,
        input_token: &TokenId,
        input_amount: u128,
        output_token: &TokenId,
        output_amount: u128,
    ) -> Result<(), EngineError> {
        if input_amount > 0 && self.token_primitives.get(input_token) != Some(primitive) {
            self.ledger.mint(primitive, input_token, input_amount)?;
        }
        if output_amount > 0 && self.token_primitives.get(output_token) != Some(primitive) {
            self.ledger.burn(primitive, output_token, output_amount)?;
        }
        Ok(())
    }

    /// Derive and claim token ids for a registered primitive, one per
    /// nonce. All-or-nothing: a collision with an existing registration or
    /// within the call leaves no id claimed.
    pub fn register_tokens(
        &mut self,
        primitive: &Address,
        nonces: &[SubId],
    ) -> Result<Vec<TokenId>, EngineError> {
        if !self.primitives.contains_key(primitive) {
            return Err(EngineError::UnknownPrimitive(*primitive));
        }
        let mut tokens = Vec::with_capacity(nonces.len());
        for nonce in nonces {
            let token = TokenId::from_sub_id(primitive, nonce);
            if self.token_primitives.contains_key(&token) || tokens.contains(&token) {
                return Err(EngineError::TokenAlreadyRegistered {
                    token,
                    primitive: *primitive,
                });
            }
            tokens.push(token);
        }
        for token in &tokens {
            self.token_primitives.insert(*token, *primitive);
        }
        tracing::info!(
            primitive = %primitive,
            count = tokens.len(),
            "primitive registered tokens"
        );
        Ok(tokens)
    }
}
