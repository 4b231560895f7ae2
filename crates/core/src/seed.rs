//! A player's committed random seed (spec §3 "Seed").

use ark_bn254::Fr;
use rand::RngCore;

use crate::field::{fr_from_bytes_be, fr_to_bytes_be};
use crate::poseidon::poseidon1;

/// A uniformly random field element, strictly less than the BN254 scalar
/// modulus. Generated from 31 random bytes rather than 32-bytes-then-reduce,
/// per spec §3/§9: reducing a full 32-byte sample biases the distribution by
/// roughly `2^-252` (negligible for this game, but free to avoid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Seed(pub(crate) Fr);

impl Seed {
    /// Sample a fresh seed from `rng`.
    pub fn generate<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes31 = [0u8; 31];
        rng.fill_bytes(&mut bytes31);
        let mut be32 = [0u8; 32];
        be32[1..].copy_from_slice(&bytes31);
        Self(fr_from_bytes_be(&be32))
    }

    /// Build a seed from a known field element — used by tests and by
    /// reveal-time deserialization of a previously committed seed.
    pub fn from_fr(fr: Fr) -> Self {
        Self(fr)
    }

    pub fn as_fr(&self) -> Fr {
        self.0
    }

    pub fn to_bytes_be(&self) -> [u8; 32] {
        fr_to_bytes_be(&self.0)
    }

    pub fn from_bytes_be(bytes: &[u8; 32]) -> Self {
        Self(fr_from_bytes_be(bytes))
    }

    /// `Poseidon1(seed)` — the value published on-chain at commit time.
    pub fn commitment(&self) -> Fr {
        poseidon1(self.0)
    }

    /// Check that `commitment` opens to this seed.
    pub fn opens(&self, commitment: Fr) -> bool {
        self.commitment() == commitment
    }
}
