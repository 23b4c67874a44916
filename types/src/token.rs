//! Canonical token identifiers.
//!
//! Every asset held by the ledger is keyed by a 32-byte [`TokenId`] with two
//! derivation rules:
//!
//! - fungible tokens embed the contract address directly in the low 20 bytes,
//!   so the mapping is invertible and needs no preimage bookkeeping;
//! - non-fungible items, semi-fungible balances, and primitive-registered
//!   tokens hash the contract address together with a 32-byte sub-identifier
//!   (item id, balance class, or registration nonce) via Blake2b-256.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::Address;
use crate::hexfmt;

type Blake2b256 = Blake2b<U32>;

/// A 32-byte external sub-identifier: an item id within a non-fungible
/// contract, a balance class within a multitoken contract, or a primitive's
/// registration nonce.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubId([u8; 32]);

impl SubId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Construct a sub-id whose last eight bytes hold `n` big-endian.
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..32].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }
}

impl fmt::Debug for SubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubId({})", hexfmt::encode(&self.0[..4]))
    }
}

impl fmt::Display for SubId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hexfmt::encode(&self.0))
    }
}

/// A canonical 32-byte internal token identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenId([u8; 32]);

impl TokenId {
    pub const ZERO: Self = Self([0u8; 32]);

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Token id of a wrapped fungible token: the contract address occupies
    /// the low 20 bytes, the high 12 bytes stay zero.
    pub fn from_fungible(asset: &Address) -> Self {
        let mut bytes = [0u8; 32];
        bytes[12..32].copy_from_slice(asset.as_bytes());
        Self(bytes)
    }

    /// Token id of a sub-identified asset (non-fungible item, multitoken
    /// balance class, or primitive-registered token): Blake2b-256 over the
    /// contract address followed by the sub-id.
    pub fn from_sub_id(asset: &Address, sub_id: &SubId) -> Self {
        let mut hasher = Blake2b256::new();
        hasher.update(asset.as_bytes());
        hasher.update(sub_id.as_bytes());
        let result = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&result);
        Self(bytes)
    }
}

impl fmt::Debug for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenId({})", hexfmt::encode(&self.0[..4]))
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hexfmt::encode(&self.0))
    }
}
