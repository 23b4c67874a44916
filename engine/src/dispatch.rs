//! Per-interaction dispatch.
//!
//! Each handler performs the external side effects of one interaction
//! (custody transfers, primitive pricing, fee and dust mints) and reports
//! the user-side result as a [`BalanceFlow`]. The caller decides how the
//! flow lands: a single submission burns and mints the user's balances
//! directly, a batch folds the flow into its delta accumulator. Fee and
//! dust mints happen here, immediately, because they belong to the fee
//! recipient and never participate in the submitting user's netting.

use reef_ledger::MultiTokenLedger;
use reef_types::{Address, SubId, TokenId, LEDGER_DECIMALS};

use crate::decimals::{convert_decimals, transfer_amount_for_wrap};
use crate::engine::ReefEngine;
use crate::error::EngineError;
use crate::fee::unwrap_fee;
use crate::interaction::Interaction;
use crate::receipt::ExpectedTransfer;

/// User-side outcome of one interaction: what the user gave up and what the
/// user received, both as internal token amounts.
///
/// Either side may be zero-amount, in which case its token id is the zero id
/// and must not be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BalanceFlow {
    pub input_token: TokenId,
    pub input_amount: u128,
    pub output_token: TokenId,
    pub output_amount: u128,
}

impl BalanceFlow {
    /// The user only receives: wraps.
    pub(crate) fn credit(token: TokenId, amount: u128) -> Self {
        Self {
            input_token: TokenId::ZERO,
            input_amount: 0,
            output_token: token,
            output_amount: amount,
        }
    }

    /// The user only gives up: unwraps.
    pub(crate) fn debit(token: TokenId, amount: u128) -> Self {
        Self {
            input_token: token,
            input_amount: amount,
            output_token: TokenId::ZERO,
            output_amount: 0,
        }
    }

    /// The user trades one token for another: primitive swaps.
    pub(crate) fn swap(
        input_token: TokenId,
        input_amount: u128,
        output_token: TokenId,
        output_amount: u128,
    ) -> Self {
        Self {
            input_token,
            input_amount,
            output_token,
            output_amount,
        }
    }
}

impl<L: MultiTokenLedger> ReefEngine<L> {
    /// Execute one interaction with its resolved amount and return the
    /// user-side flow. Sentinel amounts are resolved before this point.
    pub(crate) fn execute_interaction(
        &mut self,
        user: &Address,
        interaction: &Interaction,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        match interaction {
            Interaction::WrapFungible { asset, .. } => self.wrap_fungible(user, asset, amount),
            Interaction::UnwrapFungible { asset, .. } => self.unwrap_fungible(user, asset, amount),
            Interaction::WrapNonFungible { asset, sub_id, .. } => {
                self.wrap_non_fungible(user, asset, sub_id, amount)
            }
            Interaction::UnwrapNonFungible { asset, sub_id, .. } => {
                self.unwrap_non_fungible(user, asset, sub_id, amount)
            }
            Interaction::WrapMultiToken { asset, sub_id, .. } => {
                self.wrap_multi_token(user, asset, sub_id, amount)
            }
            Interaction::UnwrapMultiToken { asset, sub_id, .. } => {
                self.unwrap_multi_token(user, asset, sub_id, amount)
            }
            Interaction::ComputeOutputAmount {
                primitive,
                input_token,
                output_token,
                metadata,
                ..
            } => self.compute_output(user, primitive, input_token, output_token, amount, metadata),
            Interaction::ComputeInputAmount {
                primitive,
                input_token,
                output_token,
                metadata,
                ..
            } => self.compute_input(user, primitive, input_token, output_token, amount, metadata),
        }
    }

    /// Pull enough external units to cover `amount` internal units. Coarse
    /// assets round the pull up; the surplus is minted to the fee recipient
    /// so custody always covers the credited total.
    fn wrap_fungible(
        &mut self,
        user: &Address,
        asset: &Address,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        let token = TokenId::from_fungible(asset);
        let custody = self.address;
        let fee_recipient = self.params.fee_recipient;

        let adapter = self
            .fungibles
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        let decimals = adapter.decimals()?;
        let (transfer, dust) = transfer_amount_for_wrap(amount, decimals)?;
        if transfer > 0 {
            adapter.transfer_from(user, &custody, transfer)?;
        }
        if dust > 0 {
            self.ledger.mint(&fee_recipient, &token, dust)?;
        }
        Ok(BalanceFlow::credit(token, amount))
    }

    /// Push external units out of custody. The fee and the down-scaling
    /// truncation both stay in the ledger, minted to the fee recipient, so
    /// the internal supply of the token keeps matching custody.
    fn unwrap_fungible(
        &mut self,
        user: &Address,
        asset: &Address,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        let token = TokenId::from_fungible(asset);
        let fee_recipient = self.params.fee_recipient;

        let fee = unwrap_fee(amount, self.params.unwrap_fee_divisor);
        let remaining = amount.checked_sub(fee).ok_or(EngineError::Overflow)?;

        let adapter = self
            .fungibles
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        let decimals = adapter.decimals()?;
        let (converted, truncated) = convert_decimals(LEDGER_DECIMALS, decimals, remaining)?;
        if converted > 0 {
            adapter.transfer(user, converted)?;
        }

        let fee_total = fee.checked_add(truncated).ok_or(EngineError::Overflow)?;
        if fee_total > 0 {
            self.ledger.mint(&fee_recipient, &token, fee_total)?;
        }
        Ok(BalanceFlow::debit(token, amount))
    }

    fn wrap_non_fungible(
        &mut self,
        user: &Address,
        asset: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        if amount != 1 {
            return Err(EngineError::InvalidNonFungibleAmount(amount));
        }
        let token = TokenId::from_sub_id(asset, sub_id);
        let custody = self.address;

        let adapter = self
            .non_fungibles
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        self.receipt.arm(ExpectedTransfer::NonFungible);
        adapter.safe_transfer_from(user, &custody, sub_id)?;
        self.receipt.accept(ExpectedTransfer::NonFungible)?;

        Ok(BalanceFlow::credit(token, 1))
    }

    /// Non-fungible unwraps carry no fee; an item cannot be split to pay
    /// one.
    fn unwrap_non_fungible(
        &mut self,
        user: &Address,
        asset: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        if amount != 1 {
            return Err(EngineError::InvalidNonFungibleAmount(amount));
        }
        let token = TokenId::from_sub_id(asset, sub_id);
        let custody = self.address;

        let adapter = self
            .non_fungibles
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        adapter.safe_transfer_from(&custody, user, sub_id)?;

        Ok(BalanceFlow::debit(token, 1))
    }

    /// Multitoken balances move raw: no decimal conversion on either side.
    fn wrap_multi_token(
        &mut self,
        user: &Address,
        asset: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        let token = TokenId::from_sub_id(asset, sub_id);
        let custody = self.address;

        let adapter = self
            .multi_tokens
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        self.receipt.arm(ExpectedTransfer::MultiToken);
        adapter.safe_transfer_from(user, &custody, sub_id, amount)?;
        self.receipt.accept(ExpectedTransfer::MultiToken)?;

        Ok(BalanceFlow::credit(token, amount))
    }

    fn unwrap_multi_token(
        &mut self,
        user: &Address,
        asset: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<BalanceFlow, EngineError> {
        let token = TokenId::from_sub_id(asset, sub_id);
        let custody = self.address;
        let fee_recipient = self.params.fee_recipient;

        let fee = unwrap_fee(amount, self.params.unwrap_fee_divisor);
        let remaining = amount.checked_sub(fee).ok_or(EngineError::Overflow)?;

        let adapter = self
            .multi_tokens
            .get_mut(asset)
            .ok_or(EngineError::UnknownAsset(*asset))?;
        if remaining > 0 {
            adapter.safe_transfer_from(&custody, user, sub_id, remaining)?;
        }
        if fee > 0 {
            self.ledger.mint(&fee_recipient, &token, fee)?;
        }
        Ok(BalanceFlow::debit(token, amount))
    }
}
