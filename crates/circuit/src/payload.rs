//! Proof-payload wire encoding (spec §6).
//!
//! - `pi_a`, `pi_c`: 64 bytes each, `be(X) || be(Y)` over the base field.
//! - `pi_b`: 128 bytes, `be(X.c1) || be(X.c0) || be(Y.c1) || be(Y.c0)` — the
//!   c0/c1 order is swapped relative to snarkjs's standard G2 output. Every
//!   encoder and decoder here applies that swap; skipping it produces a
//!   proof that silently fails to verify rather than one that errors loudly,
//!   so the swap is centralized in exactly these two functions.
//! - Public inputs: six 32-byte big-endian field elements, in wire order.

use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
use ark_ec::AffineRepr;
use ark_ff::{BigInteger, PrimeField};
use ark_groth16::Proof;

use crate::error::CircuitError;
use crate::prover::PublicInputs;

fn fq_to_bytes_be(x: &Fq) -> [u8; 32] {
    let be = x.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

fn fq_from_bytes_be(bytes: &[u8]) -> Fq {
    Fq::from_be_bytes_mod_order(bytes)
}

fn fr_to_bytes_be(x: &Fr) -> [u8; 32] {
    let be = x.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

/// Encode a G1 point as `be(X) || be(Y)` (64 bytes).
pub fn encode_g1(point: &G1Affine) -> [u8; 64] {
    let mut out = [0u8; 64];
    out[0..32].copy_from_slice(&fq_to_bytes_be(&point.x));
    out[32..64].copy_from_slice(&fq_to_bytes_be(&point.y));
    out
}

pub fn decode_g1(bytes: &[u8]) -> Result<G1Affine, CircuitError> {
    if bytes.len() != 64 {
        return Err(CircuitError::MalformedPayload {
            expected: 64,
            actual: bytes.len(),
        });
    }
    let x = fq_from_bytes_be(&bytes[0..32]);
    let y = fq_from_bytes_be(&bytes[32..64]);
    Ok(G1Affine::new(x, y))
}

/// Encode a G2 point with the c0/c1 swap the verifier's BN254 encoding
/// requires: `be(X.c1) || be(X.c0) || be(Y.c1) || be(Y.c0)` (128 bytes).
pub fn encode_g2(point: &G2Affine) -> [u8; 128] {
    let mut out = [0u8; 128];
    out[0..32].copy_from_slice(&fq_to_bytes_be(&point.x.c1));
    out[32..64].copy_from_slice(&fq_to_bytes_be(&point.x.c0));
    out[64..96].copy_from_slice(&fq_to_bytes_be(&point.y.c1));
    out[96..128].copy_from_slice(&fq_to_bytes_be(&point.y.c0));
    out
}

pub fn decode_g2(bytes: &[u8]) -> Result<G2Affine, CircuitError> {
    if bytes.len() != 128 {
        return Err(CircuitError::MalformedPayload {
            expected: 128,
            actual: bytes.len(),
        });
    }
    let x_c1 = fq_from_bytes_be(&bytes[0..32]);
    let x_c0 = fq_from_bytes_be(&bytes[32..64]);
    let y_c1 = fq_from_bytes_be(&bytes[64..96]);
    let y_c0 = fq_from_bytes_be(&bytes[96..128]);
    Ok(G2Affine::new(Fq2::new(x_c0, x_c1), Fq2::new(y_c0, y_c1)))
}

/// A Groth16 proof plus its six public inputs, in the layout the on-chain
/// verifier consumes (spec §3 "Proof payload", §6).
pub struct ProofPayload {
    pub proof: Proof<Bn254>,
    pub public_inputs: PublicInputs,
}

impl ProofPayload {
    /// `pi_a (64) || pi_b (128) || pi_c (64) || six public inputs (192)` —
    /// 448 bytes total.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(448);
        out.extend_from_slice(&encode_g1(&self.proof.a));
        out.extend_from_slice(&encode_g2(&self.proof.b));
        out.extend_from_slice(&encode_g1(&self.proof.c));
        for input in &self.public_inputs {
            out.extend_from_slice(&fr_to_bytes_be(input));
        }
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CircuitError> {
        const EXPECTED: usize = 64 + 128 + 64 + 6 * 32;
        if bytes.len() != EXPECTED {
            return Err(CircuitError::MalformedPayload {
                expected: EXPECTED,
                actual: bytes.len(),
            });
        }
        let a = decode_g1(&bytes[0..64])?;
        let b = decode_g2(&bytes[64..192])?;
        let c = decode_g1(&bytes[192..256])?;
        let mut public_inputs = [Fr::from(0u64); 6];
        for (i, input) in public_inputs.iter_mut().enumerate() {
            let start = 256 + i * 32;
            *input = Fr::from_be_bytes_mod_order(&bytes[start..start + 32]);
        }
        Ok(Self {
            proof: Proof { a, b, c },
            public_inputs,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ec::CurveGroup;

    #[test]
    fn g1_round_trips() {
        let g1: G1Affine = G1Affine::generator();
        let bytes = encode_g1(&g1);
        assert_eq!(decode_g1(&bytes).unwrap(), g1);
    }

    #[test]
    fn g2_round_trips_with_swap() {
        let g2: G2Affine = G2Affine::generator();
        let bytes = encode_g2(&g2);
        // The swap is its own inverse: decoding undoes what encoding did.
        assert_eq!(decode_g2(&bytes).unwrap(), g2);
        // And the swap is observable: encoding without it would put c0
        // first, which disagrees with this layout unless c0 == c1.
        assert_ne!(&bytes[0..32], &fq_to_bytes_be(&g2.x.c0));
    }

    #[test]
    fn payload_round_trips() {
        let payload = ProofPayload {
            proof: Proof {
                a: G1Affine::generator(),
                b: G2Affine::generator(),
                c: (G1Affine::generator() + G1Affine::generator()).into_affine(),
            },
            public_inputs: [
                Fr::from(1u64),
                Fr::from(2u64),
                Fr::from(3u64),
                Fr::from(4u64),
                Fr::from(5u64),
                Fr::from(6u64),
            ],
        };
        let bytes = payload.to_bytes();
        assert_eq!(bytes.len(), 448);
        let decoded = ProofPayload::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.proof.a, payload.proof.a);
        assert_eq!(decoded.public_inputs, payload.public_inputs);
    }
}
