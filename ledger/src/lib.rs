//! Multitoken balance ledger.
//!
//! Balances are keyed by `(owner, token id)` and mutated only through mint
//! and burn. The engine consumes the [`LedgerRead`] and [`MultiTokenLedger`]
//! trait surface; [`InMemoryLedger`] is the reference implementation with
//! owner/operator approvals and conventional transfers on top.

pub mod error;
pub mod ledger;
pub mod memory;

pub use error::LedgerError;
pub use ledger::{LedgerRead, MultiTokenLedger};
pub use memory::InMemoryLedger;
