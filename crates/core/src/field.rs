//! BN254 scalar-field (`Fr`) encoding helpers.
//!
//! Arithmetic itself (`+`, `*`, inversion, equality) is `ark_ff::Field`'s —
//! this module only adds the byte/hex encodings and the 128-bit split used
//! by deck derivation (spec §4.2).

use ark_bn254::Fr;
use ark_ff::{BigInteger, PrimeField};

/// The BN254 scalar field modulus, `r`, for reference and tests.
pub const MODULUS_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Encode `x` as a fixed-width, lowercase, `0x`-prefixed big-endian hex string.
pub fn fr_to_hex_be(x: &Fr) -> String {
    let be = x.into_bigint().to_bytes_be();
    let mut s = String::from("0x");
    s.push_str(&hex::encode(be));
    s
}

/// Parse a big-endian hex string (with or without `0x`) into `Fr`, reducing
/// modulo `r` if the value doesn't fit.
pub fn fr_from_hex_be(s: &str) -> Result<Fr, hex::FromHexError> {
    let trimmed = s.trim_start_matches("0x");
    let bytes = hex::decode(trimmed)?;
    Ok(Fr::from_be_bytes_mod_order(&bytes))
}

/// Encode `x` as a fixed 32-byte big-endian array — the wire format spec §3
/// and §6 use for commitments, seeds, and public inputs.
pub fn fr_to_bytes_be(x: &Fr) -> [u8; 32] {
    let be = x.into_bigint().to_bytes_be();
    let mut out = [0u8; 32];
    out[32 - be.len()..].copy_from_slice(&be);
    out
}

/// Decode a 32-byte big-endian array into `Fr`, reducing modulo `r`.
pub fn fr_from_bytes_be(bytes: &[u8; 32]) -> Fr {
    Fr::from_be_bytes_mod_order(bytes)
}

/// Split `x` into `(low_128, high_bits)` such that
/// `x == low_128 + high_bits * 2^128`, matching the circuit's
/// `trunc_weights`/`high_weights` decomposition (spec §4.2, §4.4).
pub fn split_128(x: &Fr) -> (u128, Fr) {
    let be = x.into_bigint().to_bytes_be(); // 32 bytes, big-endian
    debug_assert_eq!(be.len(), 32);
    let mut low_bytes = [0u8; 16];
    low_bytes.copy_from_slice(&be[16..32]);
    let low = u128::from_be_bytes(low_bytes);

    let mut high_bytes = [0u8; 32];
    high_bytes[16..32].copy_from_slice(&be[0..16]);
    let high = Fr::from_be_bytes_mod_order(&high_bytes);
    (low, high)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_ff::{One, Zero};

    #[test]
    fn hex_roundtrip() {
        for v in [0u64, 1, 2, 255, 256, u64::MAX] {
            let x = Fr::from(v);
            let s = fr_to_hex_be(&x);
            assert!(s.starts_with("0x"));
            assert_eq!(s.len(), 66);
            assert_eq!(fr_from_hex_be(&s).unwrap(), x);
        }
    }

    #[test]
    fn bytes_roundtrip() {
        let x = Fr::from(0xdead_beefu64);
        let bytes = fr_to_bytes_be(&x);
        assert_eq!(fr_from_bytes_be(&bytes), x);
    }

    #[test]
    fn split_128_recombines() {
        let x = Fr::from(12345u64);
        let (low, high) = split_128(&x);
        assert_eq!(low, 12345u128);
        assert!(high.is_zero());

        let shifted = Fr::from(1u64) * Fr::from(2u64).pow([128u64]);
        let (low2, high2) = split_128(&shifted);
        assert_eq!(low2, 0u128);
        assert_eq!(high2, Fr::one());
    }
}
