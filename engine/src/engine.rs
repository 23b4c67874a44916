//! The batch orchestrator.
//!
//! `ReefEngine` owns the ledger handle, the adapter and primitive
//! registries, and the engine parameters. Submissions move through
//! Idle → BuildingDeltas → Dispatching → Flushing → Idle; recursive entry is
//! rejected via the busy flag. Before dispatch the engine checkpoints every
//! collaborator; any failure restores all checkpoints, so a failed
//! submission leaves no observable state change.

use std::collections::HashMap;

use reef_ledger::{LedgerRead, MultiTokenLedger};
use reef_types::{Address, Snapshot, SnapshotError, TokenId};

use crate::assets::{FungibleAsset, MultiTokenAsset, NonFungibleAsset};
use crate::delta::{BalanceDeltas, Settlement};
use crate::dispatch::BalanceFlow;
use crate::error::EngineError;
use crate::fee::MIN_UNWRAP_FEE_DIVISOR;
use crate::interaction::{Interaction, USE_DELTA};
use crate::params::EngineParams;
use crate::primitive::Primitive;
use crate::receipt::{ExpectedTransfer, ReceiptGuard};

/// The interaction execution engine over a multitoken ledger.
pub struct ReefEngine<L: MultiTokenLedger> {
    pub(crate) address: Address,
    pub(crate) params: EngineParams,
    pub(crate) ledger: L,
    pub(crate) fungibles: HashMap<Address, Box<dyn FungibleAsset>>,
    pub(crate) non_fungibles: HashMap<Address, Box<dyn NonFungibleAsset>>,
    pub(crate) multi_tokens: HashMap<Address, Box<dyn MultiTokenAsset>>,
    pub(crate) primitives: HashMap<Address, Box<dyn Primitive>>,
    pub(crate) token_primitives: HashMap<TokenId, Address>,
    pub(crate) busy: bool,
    pub(crate) receipt: ReceiptGuard,
}

/// Pre-submission state of every collaborator.
struct Checkpoint {
    ledger: Vec<u8>,
    fungibles: Vec<(Address, Vec<u8>)>,
    non_fungibles: Vec<(Address, Vec<u8>)>,
    multi_tokens: Vec<(Address, Vec<u8>)>,
    primitives: Vec<(Address, Vec<u8>)>,
}

fn snapshot_registry<T: Snapshot + ?Sized>(
    registry: &HashMap<Address, Box<T>>,
) -> Result<Vec<(Address, Vec<u8>)>, SnapshotError> {
    registry
        .iter()
        .map(|(address, item)| Ok((*address, item.snapshot()?)))
        .collect()
}

fn restore_registry<T: Snapshot + ?Sized>(
    registry: &mut HashMap<Address, Box<T>>,
    saved: &[(Address, Vec<u8>)],
) -> Result<(), SnapshotError> {
    for (address, bytes) in saved {
        if let Some(item) = registry.get_mut(address) {
            item.restore(bytes)?;
        }
    }
    Ok(())
}

impl<L: MultiTokenLedger> ReefEngine<L> {
    /// Create an engine with its custody address, parameters, and ledger.
    pub fn new(address: Address, params: EngineParams, ledger: L) -> Self {
        Self {
            address,
            params,
            ledger,
            fungibles: HashMap::new(),
            non_fungibles: HashMap::new(),
            multi_tokens: HashMap::new(),
            primitives: HashMap::new(),
            token_primitives: HashMap::new(),
            busy: false,
            receipt: ReceiptGuard::new(),
        }
    }

    // ── Registration ─────────────────────────────────────────────────────

    pub fn register_fungible(&mut self, address: Address, asset: Box<dyn FungibleAsset>) {
        self.fungibles.insert(address, asset);
    }

    pub fn register_non_fungible(&mut self, address: Address, asset: Box<dyn NonFungibleAsset>) {
        self.non_fungibles.insert(address, asset);
    }

    pub fn register_multi_token(&mut self, address: Address, asset: Box<dyn MultiTokenAsset>) {
        self.multi_tokens.insert(address, asset);
    }

    pub fn register_primitive(&mut self, address: Address, primitive: Box<dyn Primitive>) {
        self.primitives.insert(address, primitive);
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The engine's custody address for external assets.
    pub fn address(&self) -> Address {
        self.address
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Mutable ledger access for administration between submissions, such
    /// as approval management or direct transfers.
    pub fn ledger_mut(&mut self) -> &mut L {
        &mut self.ledger
    }

    pub fn unwrap_fee_divisor(&self) -> u128 {
        self.params.unwrap_fee_divisor
    }

    pub fn fee_recipient(&self) -> Address {
        self.params.fee_recipient
    }

    /// The primitive that registered `token`, if any.
    pub fn token_primitive(&self, token: &TokenId) -> Option<Address> {
        self.token_primitives.get(token).copied()
    }

    // ── Administration ───────────────────────────────────────────────────

    /// Change the unwrap fee divisor. The divisor floor caps the maximum
    /// fee rate.
    pub fn set_unwrap_fee_divisor(&mut self, divisor: u128) -> Result<(), EngineError> {
        if divisor < MIN_UNWRAP_FEE_DIVISOR {
            return Err(EngineError::FeeDivisorTooSmall {
                divisor,
                min: MIN_UNWRAP_FEE_DIVISOR,
            });
        }
        self.params.unwrap_fee_divisor = divisor;
        tracing::info!(divisor, "unwrap fee divisor changed");
        Ok(())
    }

    // ── Inbound transfer hooks ───────────────────────────────────────────

    /// Notification of an inbound non-fungible safe transfer. Accepted only
    /// while a non-fungible wrap is in flight.
    pub fn on_non_fungible_received(&mut self) -> Result<(), EngineError> {
        self.receipt.accept(ExpectedTransfer::NonFungible)
    }

    /// Notification of an inbound multitoken safe transfer. Accepted only
    /// while a multitoken wrap is in flight.
    pub fn on_multi_token_received(&mut self) -> Result<(), EngineError> {
        self.receipt.accept(ExpectedTransfer::MultiToken)
    }

    // ── Submissions ──────────────────────────────────────────────────────

    /// Execute one interaction on the caller's own balances.
    pub fn submit_single(
        &mut self,
        caller: &Address,
        interaction: &Interaction,
    ) -> Result<BalanceFlow, EngineError> {
        self.run_single(caller, interaction)
    }

    /// Execute one interaction on behalf of `principal`, authorized by the
    /// ledger's owner/operator approval relation.
    pub fn submit_single_for(
        &mut self,
        principal: &Address,
        operator: &Address,
        interaction: &Interaction,
    ) -> Result<BalanceFlow, EngineError> {
        self.authorize(principal, operator)?;
        self.run_single(principal, interaction)
    }

    /// Execute a batch of interactions over the declared token ids, settling
    /// net deltas as one batch mint plus one batch burn.
    pub fn submit_batch(
        &mut self,
        caller: &Address,
        interactions: &[Interaction],
        declared: &[TokenId],
    ) -> Result<Settlement, EngineError> {
        self.run_batch(caller, interactions, declared)
    }

    /// Batch variant of [`Self::submit_single_for`].
    pub fn submit_batch_for(
        &mut self,
        principal: &Address,
        operator: &Address,
        interactions: &[Interaction],
        declared: &[TokenId],
    ) -> Result<Settlement, EngineError> {
        self.authorize(principal, operator)?;
        self.run_batch(principal, interactions, declared)
    }

    fn authorize(&self, principal: &Address, operator: &Address) -> Result<(), EngineError> {
        if principal != operator && !self.ledger.is_approved_for_all(principal, operator) {
            return Err(EngineError::NotApproved {
                principal: *principal,
                operator: *operator,
            });
        }
        Ok(())
    }

    fn run_single(
        &mut self,
        caller: &Address,
        interaction: &Interaction,
    ) -> Result<BalanceFlow, EngineError> {
        if self.busy {
            return Err(EngineError::Busy);
        }
        self.busy = true;
        let result = self.guarded(|engine| engine.execute_single(caller, interaction));
        self.busy = false;
        self.receipt.disarm();
        result
    }

    fn run_batch(
        &mut self,
        caller: &Address,
        interactions: &[Interaction],
        declared: &[TokenId],
    ) -> Result<Settlement, EngineError> {
        if self.busy {
            return Err(EngineError::Busy);
        }
        self.busy = true;
        let result = self.guarded(|engine| engine.execute_batch(caller, interactions, declared));
        self.busy = false;
        self.receipt.disarm();
        result
    }

    /// Run `body` between a full checkpoint and, on failure, a full restore.
    fn guarded<T>(
        &mut self,
        body: impl FnOnce(&mut Self) -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let checkpoint = self.checkpoint_all()?;
        match body(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(error = %e, "submission aborted, restoring state");
                self.restore_all(&checkpoint)?;
                Err(e)
            }
        }
    }

    fn execute_single(
        &mut self,
        caller: &Address,
        interaction: &Interaction,
    ) -> Result<BalanceFlow, EngineError> {
        let amount = interaction.specified_amount();
        if amount == USE_DELTA {
            return Err(EngineError::RolloverOutsideBatch);
        }
        tracing::debug!(kind = interaction.kind_name(), amount, "dispatching interaction");
        let flow = self.execute_interaction(caller, interaction, amount)?;
        if flow.input_amount > 0 {
            self.ledger.burn(caller, &flow.input_token, flow.input_amount)?;
        }
        if flow.output_amount > 0 {
            self.ledger.mint(caller, &flow.output_token, flow.output_amount)?;
        }
        Ok(flow)
    }

    fn execute_batch(
        &mut self,
        caller: &Address,
        interactions: &[Interaction],
        declared: &[TokenId],
    ) -> Result<Settlement, EngineError> {
        let mut deltas = BalanceDeltas::new(declared);
        for interaction in interactions {
            let specified = interaction.specified_amount();
            let amount = if specified == USE_DELTA {
                let token = interaction.specified_token();
                if interaction.rollover_reads_credit() {
                    deltas.credit_of(&token)?
                } else {
                    deltas.debit_of(&token)?
                }
            } else {
                specified
            };
            tracing::debug!(kind = interaction.kind_name(), amount, "dispatching interaction");
            let flow = self.execute_interaction(caller, interaction, amount)?;
            if flow.input_amount > 0 {
                deltas.decrease(&flow.input_token, flow.input_amount)?;
            }
            if flow.output_amount > 0 {
                deltas.increase(&flow.output_token, flow.output_amount)?;
            }
        }
        let settlement = deltas.finalize();
        if !settlement.mint_tokens.is_empty() {
            self.ledger
                .mint_batch(caller, &settlement.mint_tokens, &settlement.mint_amounts)?;
        }
        if !settlement.burn_tokens.is_empty() {
            self.ledger
                .burn_batch(caller, &settlement.burn_tokens, &settlement.burn_amounts)?;
        }
        tracing::info!(
            interactions = interactions.len(),
            mints = settlement.mint_tokens.len(),
            burns = settlement.burn_tokens.len(),
            "batch settled"
        );
        Ok(settlement)
    }

    fn checkpoint_all(&self) -> Result<Checkpoint, SnapshotError> {
        Ok(Checkpoint {
            ledger: self.ledger.snapshot()?,
            fungibles: snapshot_registry(&self.fungibles)?,
            non_fungibles: snapshot_registry(&self.non_fungibles)?,
            multi_tokens: snapshot_registry(&self.multi_tokens)?,
            primitives: snapshot_registry(&self.primitives)?,
        })
    }

    fn restore_all(&mut self, checkpoint: &Checkpoint) -> Result<(), SnapshotError> {
        self.ledger.restore(&checkpoint.ledger)?;
        restore_registry(&mut self.fungibles, &checkpoint.fungibles)?;
        restore_registry(&mut self.non_fungibles, &checkpoint.non_fungibles)?;
        restore_registry(&mut self.multi_tokens, &checkpoint.multi_tokens)?;
        restore_registry(&mut self.primitives, &checkpoint.primitives)?;
        Ok(())
    }
}
