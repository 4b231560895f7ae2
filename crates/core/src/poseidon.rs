//! Poseidon hash, arities 1/2/3, over BN254's scalar field.
//!
//! Backed by `ark_crypto_primitives`'s `PoseidonSponge`, built from
//! [`crate::poseidon_config::config_for_arity`] — the same config
//! `duel_circuit`'s in-circuit `PoseidonSpongeVar` gadget is built from.
//! Every other module in this crate and in `duel_circuit` calls through
//! these three functions rather than constructing a sponge directly, so the
//! off-circuit hash and the in-circuit one are one function, not two
//! independently-transcribed ones (spec §4.1).

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::PoseidonSponge;
use ark_crypto_primitives::sponge::CryptographicSponge;

use crate::poseidon_config::config_for_arity;

fn hash(inputs: &[Fr]) -> Fr {
    let cfg = config_for_arity(inputs.len());
    let mut sponge = PoseidonSponge::<Fr>::new(&cfg);
    sponge.absorb(&inputs.to_vec());
    sponge.squeeze_field_elements(1)[0]
}

/// `Poseidon1(x)` — used for seed commitments (spec §3, §4.1).
pub fn poseidon1(x: Fr) -> Fr {
    hash(&[x])
}

/// `Poseidon2(a, b)` — used for per-card weights and the coin-flip tiebreak
/// (spec §4.2, §4.3).
pub fn poseidon2(a: Fr, b: Fr) -> Fr {
    hash(&[a, b])
}

/// `Poseidon3(a, b, c)` — used for the combined seed (spec §4.2).
pub fn poseidon3(a: Fr, b: Fr, c: Fr) -> Fr {
    hash(&[a, b, c])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let a = Fr::from(1u64);
        let b = Fr::from(2u64);
        assert_eq!(poseidon1(a), poseidon1(a));
        assert_eq!(poseidon2(a, b), poseidon2(a, b));
        assert_eq!(poseidon3(a, b, Fr::from(3u64)), poseidon3(a, b, Fr::from(3u64)));
    }

    #[test]
    fn arities_disagree() {
        let a = Fr::from(7u64);
        let b = Fr::from(7u64);
        // Same field element, different arity => different digest (no
        // accidental collapse between Poseidon1 and Poseidon2 diagonal).
        assert_ne!(poseidon1(a), poseidon2(a, b));
    }

    #[test]
    fn order_sensitive() {
        let a = Fr::from(1u64);
        let b = Fr::from(2u64);
        assert_ne!(poseidon2(a, b), poseidon2(b, a));
    }
}
