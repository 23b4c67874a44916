//! Fundamental types for the reef ledger.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: external addresses, canonical token identifiers, pass-through
//! metadata, ledger precision constants, and the snapshot capability used
//! for whole-call rollback.

pub mod address;
pub mod amount;
pub mod metadata;
pub mod snapshot;
pub mod token;

mod hexfmt;

pub use address::Address;
pub use amount::{LEDGER_DECIMALS, LEDGER_UNIT};
pub use metadata::Metadata;
pub use snapshot::{Snapshot, SnapshotError};
pub use token::{SubId, TokenId};
