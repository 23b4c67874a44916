//! Shared mock collaborators for the engine test suites.
//!
//! The asset mocks share state through `Rc<RefCell<_>>` so a test keeps a
//! handle to the contract it handed to the engine and can observe external
//! balances after a submission.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use reef_engine::{
    AssetError, EngineParams, FungibleAsset, MultiTokenAsset, NonFungibleAsset, Primitive,
    PrimitiveError, ReefEngine,
};
use reef_ledger::{InMemoryLedger, LedgerRead};
use reef_types::{Address, Metadata, Snapshot, SnapshotError, SubId, TokenId, LEDGER_UNIT};

pub const UNIT: u128 = LEDGER_UNIT;

pub fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

pub fn sub(n: u64) -> SubId {
    SubId::from_u64(n)
}

pub fn engine_addr() -> Address {
    addr(0xeee)
}

pub fn fee_recipient() -> Address {
    addr(0xfee)
}

pub fn make_engine() -> ReefEngine<InMemoryLedger> {
    ReefEngine::new(
        engine_addr(),
        EngineParams::new(fee_recipient()),
        InMemoryLedger::new(),
    )
}

/// Initialize the tracing subscriber with sensible defaults.
///
/// Respects the `RUST_LOG` environment variable for filtering.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
}

fn snapshot_state<S: Serialize>(state: &S) -> Result<Vec<u8>, SnapshotError> {
    bincode::serialize(state).map_err(|e| SnapshotError::Serialize(e.to_string()))
}

fn restore_state<S: for<'de> Deserialize<'de>>(bytes: &[u8]) -> Result<S, SnapshotError> {
    bincode::deserialize(bytes).map_err(|e| SnapshotError::Restore(e.to_string()))
}

// ---------------------------------------------------------------------------
// External asset mocks
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FungibleState {
    balances: HashMap<Address, u128>,
}

/// A fungible token contract with a plain balance table. Clones share
/// state, so tests keep one handle and give the other to the engine.
#[derive(Clone)]
pub struct MockFungibleToken {
    decimals: u8,
    custody: Address,
    state: Rc<RefCell<FungibleState>>,
}

impl MockFungibleToken {
    pub fn new(decimals: u8, custody: Address) -> Self {
        Self {
            decimals,
            custody,
            state: Rc::new(RefCell::new(FungibleState::default())),
        }
    }

    pub fn set_balance(&self, owner: Address, amount: u128) {
        self.state.borrow_mut().balances.insert(owner, amount);
    }

    pub fn balance(&self, owner: &Address) -> u128 {
        self.state
            .borrow()
            .balances
            .get(owner)
            .copied()
            .unwrap_or(0)
    }

    fn move_units(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        let mut state = self.state.borrow_mut();
        let available = state.balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(AssetError::TransferRefused(format!(
                "need {amount}, have {available}"
            )));
        }
        state.balances.insert(*from, available - amount);
        *state.balances.entry(*to).or_insert(0) += amount;
        Ok(())
    }
}

impl Snapshot for MockFungibleToken {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot_state(&*self.state.borrow())
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self.state.borrow_mut() = restore_state(bytes)?;
        Ok(())
    }
}

impl FungibleAsset for MockFungibleToken {
    fn decimals(&self) -> Result<u8, AssetError> {
        Ok(self.decimals)
    }

    fn transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        self.move_units(from, to, amount)
    }

    fn transfer(&mut self, to: &Address, amount: u128) -> Result<(), AssetError> {
        let custody = self.custody;
        self.move_units(&custody, to, amount)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NonFungibleState {
    owners: HashMap<SubId, Address>,
}

#[derive(Clone)]
pub struct MockNonFungibleToken {
    state: Rc<RefCell<NonFungibleState>>,
}

impl MockNonFungibleToken {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(NonFungibleState::default())),
        }
    }

    pub fn mint_item(&self, item: SubId, owner: Address) {
        self.state.borrow_mut().owners.insert(item, owner);
    }

    pub fn owner_of(&self, item: &SubId) -> Option<Address> {
        self.state.borrow().owners.get(item).copied()
    }
}

impl Snapshot for MockNonFungibleToken {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot_state(&*self.state.borrow())
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self.state.borrow_mut() = restore_state(bytes)?;
        Ok(())
    }
}

impl NonFungibleAsset for MockNonFungibleToken {
    fn safe_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        sub_id: &SubId,
    ) -> Result<(), AssetError> {
        let mut state = self.state.borrow_mut();
        if state.owners.get(sub_id) != Some(from) {
            return Err(AssetError::TransferRefused(format!(
                "{from} does not own item {sub_id}"
            )));
        }
        state.owners.insert(*sub_id, *to);
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MultiTokenState {
    balances: HashMap<(Address, SubId), u128>,
}

#[derive(Clone)]
pub struct MockMultiToken {
    state: Rc<RefCell<MultiTokenState>>,
}

impl MockMultiToken {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(MultiTokenState::default())),
        }
    }

    pub fn set_balance(&self, owner: Address, class: SubId, amount: u128) {
        self.state.borrow_mut().balances.insert((owner, class), amount);
    }

    pub fn balance(&self, owner: &Address, class: &SubId) -> u128 {
        self.state
            .borrow()
            .balances
            .get(&(*owner, *class))
            .copied()
            .unwrap_or(0)
    }
}

impl Snapshot for MockMultiToken {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot_state(&*self.state.borrow())
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self.state.borrow_mut() = restore_state(bytes)?;
        Ok(())
    }
}

impl MultiTokenAsset for MockMultiToken {
    fn safe_transfer_from(
        &mut self,
        from: &Address,
        to: &Address,
        sub_id: &SubId,
        amount: u128,
    ) -> Result<(), AssetError> {
        let mut state = self.state.borrow_mut();
        let available = state.balances.get(&(*from, *sub_id)).copied().unwrap_or(0);
        if available < amount {
            return Err(AssetError::TransferRefused(format!(
                "need {amount}, have {available}"
            )));
        }
        state.balances.insert((*from, *sub_id), available - amount);
        *state.balances.entry((*to, *sub_id)).or_insert(0) += amount;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Primitive mocks
// ---------------------------------------------------------------------------

/// Prices every pair at a fixed `num / den` rate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConstantRatePrimitive {
    pub num: u128,
    pub den: u128,
}

impl ConstantRatePrimitive {
    pub fn one_to_one() -> Self {
        Self { num: 1, den: 1 }
    }
}

impl Snapshot for ConstantRatePrimitive {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot_state(self)
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self = restore_state(bytes)?;
        Ok(())
    }
}

impl Primitive for ConstantRatePrimitive {
    fn compute_output_amount(
        &mut self,
        _ledger: &dyn LedgerRead,
        _input_token: &TokenId,
        _output_token: &TokenId,
        input_amount: u128,
        _user: &Address,
        _metadata: &Metadata,
    ) -> Result<u128, PrimitiveError> {
        input_amount
            .checked_mul(self.num)
            .map(|scaled| scaled / self.den)
            .ok_or_else(|| PrimitiveError::Other("rate overflow".into()))
    }

    fn compute_input_amount(
        &mut self,
        _ledger: &dyn LedgerRead,
        _input_token: &TokenId,
        _output_token: &TokenId,
        output_amount: u128,
        _user: &Address,
        _metadata: &Metadata,
    ) -> Result<u128, PrimitiveError> {
        // Ceiling so the pool never undercharges.
        output_amount
            .checked_mul(self.den)
            .and_then(|scaled| scaled.checked_add(self.num - 1))
            .map(|scaled| scaled / self.num)
            .ok_or_else(|| PrimitiveError::Other("rate overflow".into()))
    }
}

/// Prices one-to-one but refuses to quote more output than it currently
/// holds, reading its own ledger balance mid-submission.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LiquidityCheckedPrimitive {
    pub address: Address,
}

impl LiquidityCheckedPrimitive {
    fn quote(
        &self,
        ledger: &dyn LedgerRead,
        output_token: &TokenId,
        amount: u128,
    ) -> Result<u128, PrimitiveError> {
        let available = ledger.balance_of(&self.address, output_token);
        if available < amount {
            return Err(PrimitiveError::InsufficientLiquidity {
                needed: amount,
                available,
            });
        }
        Ok(amount)
    }
}

impl Snapshot for LiquidityCheckedPrimitive {
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError> {
        snapshot_state(self)
    }

    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError> {
        *self = restore_state(bytes)?;
        Ok(())
    }
}

impl Primitive for LiquidityCheckedPrimitive {
    fn compute_output_amount(
        &mut self,
        ledger: &dyn LedgerRead,
        _input_token: &TokenId,
        output_token: &TokenId,
        input_amount: u128,
        _user: &Address,
        _metadata: &Metadata,
    ) -> Result<u128, PrimitiveError> {
        self.quote(ledger, output_token, input_amount)
    }

    fn compute_input_amount(
        &mut self,
        ledger: &dyn LedgerRead,
        _input_token: &TokenId,
        output_token: &TokenId,
        output_amount: u128,
        _user: &Address,
        _metadata: &Metadata,
    ) -> Result<u128, PrimitiveError> {
        self.quote(ledger, output_token, output_amount)
    }
}
