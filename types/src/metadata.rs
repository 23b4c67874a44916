//! Opaque per-interaction metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::hexfmt;

/// A 32-byte blob passed through to a primitive untouched.
///
/// Primitives assign their own meaning (slippage bound, pool selector,
/// deadline). The engine never inspects it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Metadata([u8; 32]);

impl Metadata {
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

    /// Construct metadata whose last sixteen bytes hold `n` big-endian.
    ///
    /// Primitives that read a single numeric bound out of the metadata use
    /// this encoding.
    pub fn from_u128(n: u128) -> Self {
        let mut bytes = [0u8; 32];
        bytes[16..32].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    /// Read the last sixteen bytes back as a big-endian u128.
    pub fn as_u128(&self) -> u128 {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(&self.0[16..32]);
        u128::from_be_bytes(buf)
    }
}

impl fmt::Debug for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Metadata({})", hexfmt::encode(&self.0[..4]))
    }
}

impl fmt::Display for Metadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hexfmt::encode(&self.0))
    }
}
