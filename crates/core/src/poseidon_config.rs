//! Shared ark Poseidon parameters for BN254.
//!
//! [`poseidon`] (off-circuit) and `duel_circuit::gadgets` (in-circuit) both
//! build their sponge from [`config_for_arity`], so the two are the same
//! function evaluated two different ways rather than two independently
//! constructed ones — the bit-for-bit agreement spec §4.1 requires follows
//! from sharing this one config, not from re-deriving it twice.

use ark_bn254::Fr;
use ark_crypto_primitives::sponge::poseidon::{find_poseidon_ark_and_mds, PoseidonConfig};
use ark_ff::PrimeField;

const FULL_ROUNDS: usize = 8;
const PARTIAL_ROUNDS: usize = 57;
const ALPHA: u64 = 5;
const CAPACITY: usize = 1;

/// Builds the config for absorbing `num_inputs` field elements in one
/// permutation: `rate = num_inputs`, `capacity = 1`, width `= num_inputs + 1`.
pub fn config_for_arity(num_inputs: usize) -> PoseidonConfig<Fr> {
    let rate = num_inputs;
    let (ark, mds) = find_poseidon_ark_and_mds::<Fr>(
        Fr::MODULUS_BIT_SIZE as u64,
        rate,
        FULL_ROUNDS as u64,
        PARTIAL_ROUNDS as u64,
        0,
    );
    PoseidonConfig::new(FULL_ROUNDS, PARTIAL_ROUNDS, ALPHA, mds, ark, rate, CAPACITY)
}
