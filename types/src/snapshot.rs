//! Snapshot capability for whole-call rollback.
//!
//! Before dispatching a submission the engine checkpoints the ledger, every
//! asset adapter, and every primitive; on any failure it restores every
//! checkpoint, so a failed submission leaves no observable state change.
//! Implementors typically serialize their state with bincode.

use thiserror::Error;

/// Errors raised while capturing or restoring a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot serialization failed: {0}")]
    Serialize(String),

    #[error("snapshot restore failed: {0}")]
    Restore(String),
}

/// State that can be checkpointed and rolled back.
pub trait Snapshot {
    /// Capture the current state as an opaque byte blob.
    fn snapshot(&self) -> Result<Vec<u8>, SnapshotError>;

    /// Replace the current state with a previously captured blob.
    fn restore(&mut self, bytes: &[u8]) -> Result<(), SnapshotError>;
}
