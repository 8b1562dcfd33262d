//! Secure random bytes.
//!
//! Everything non-deterministic in the pipeline (salt, letters, words) draws
//! from an [`EntropySource`]. The binary uses [`OsEntropy`]; tests inject
//! [`FixedEntropy`] so every stage stays reproducible.

use crate::error::{PasswordError, Result};
use rand_core::{OsRng, RngCore};

pub trait EntropySource {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()>;
}

/// Operating system CSPRNG. Failures are fatal and never replaced by a
/// weaker generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        OsRng
            .try_fill_bytes(dest)
            .map_err(|e| PasswordError::EntropySource(e.to_string()))
    }
}

/// Replays a fixed byte pattern, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    pattern: Vec<u8>,
    pos: usize,
}

impl FixedEntropy {
    pub fn new(pattern: impl Into<Vec<u8>>) -> Self {
        let mut pattern = pattern.into();
        if pattern.is_empty() {
            pattern.push(0);
        }
        Self { pattern, pos: 0 }
    }
}

impl EntropySource for FixedEntropy {
    fn fill_bytes(&mut self, dest: &mut [u8]) -> Result<()> {
        for byte in dest.iter_mut() {
            *byte = self.pattern[self.pos];
            self.pos = (self.pos + 1) % self.pattern.len();
        }
        Ok(())
    }
}
