//! Interaction execution engine.
//!
//! The engine lets users wrap external assets into the multitoken ledger,
//! chain swaps against registered primitives entirely inside the ledger's
//! bookkeeping, and unwrap back out, paying at most one wrap and one unwrap
//! fee regardless of hop count. Submissions run single interactions or
//! batches; batches accumulate signed per-token deltas and settle as one
//! batch mint plus one batch burn. Any failure restores every collaborator
//! from its pre-submission snapshot.

pub mod assets;
pub mod decimals;
pub mod delta;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod fee;
pub mod gateway;
pub mod interaction;
pub mod params;
pub mod primitive;
pub mod receipt;

pub use assets::{AssetError, FungibleAsset, MultiTokenAsset, NonFungibleAsset};
pub use delta::{BalanceDeltas, Settlement};
pub use dispatch::BalanceFlow;
pub use engine::ReefEngine;
pub use error::EngineError;
pub use fee::MIN_UNWRAP_FEE_DIVISOR;
pub use interaction::{Interaction, USE_DELTA};
pub use params::EngineParams;
pub use primitive::{Primitive, PrimitiveError};
pub use receipt::{ExpectedTransfer, ReceiptGuard};
