//! Ring configuration.

use crate::error::{Error, Result};

/// Largest supported identifier-space exponent.
///
/// The ring materializes a slot for every identifier, so this bounds
/// allocation at `2^16` slots.
pub const MAX_M_BITS: u32 = 16;

/// Configuration for a [`Ring`](crate::ring::Ring).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingConfig {
    /// Identifier-space exponent. The ring holds `2^m_bits` slots and
    /// every finger table has `m_bits` entries.
    pub m_bits: u32,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self { m_bits: 5 }
    }
}

impl RingConfig {
    /// Create a configuration for a ring of `2^m_bits` identifiers.
    pub fn new(m_bits: u32) -> Self {
        Self { m_bits }
    }

    /// Set the identifier-space exponent.
    pub fn with_m_bits(mut self, m_bits: u32) -> Self {
        self.m_bits = m_bits;
        self
    }

    /// Number of identifiers on the ring (`2^m_bits`).
    pub fn ring_size(&self) -> u64 {
        1u64 << self.m_bits
    }

    /// Finger-table length (`log2` of the ring size).
    pub fn finger_count(&self) -> usize {
        self.m_bits as usize
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.m_bits == 0 || self.m_bits > MAX_M_BITS {
            return Err(Error::Config(format!(
                "m_bits must be in 1..={}, got {}",
                MAX_M_BITS, self.m_bits
            )));
        }
        Ok(())
    }
}
