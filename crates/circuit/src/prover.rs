//! Groth16 setup and proving over BN254 (spec §4.4, §6).

use ark_bn254::{Bn254, Fr};
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof, ProvingKey, VerifyingKey};
use rand::RngCore;

use duel_core::seed::Seed;

use crate::circuit::DuelCircuit;
use crate::error::CircuitError;
use crate::witness::Witness;

/// The six public inputs, in wire order (spec §6): `seed1, seed2, commit1,
/// commit2, session_id, winner`.
pub type PublicInputs = [Fr; 6];

/// Run the Groth16 trusted setup for the duel circuit's fixed shape. In
/// production this is a circuit-specific phase 2 over a universal
/// Powers-of-Tau ceremony (spec §6); for a fixed-shape circuit like this one,
/// sampling parameters directly against one representative instance is
/// equivalent and is what `duel-prover setup` does.
pub fn setup<R: RngCore>(
    sample_witness: Witness,
    rng: &mut R,
) -> Result<ProvingKey<Bn254>, CircuitError> {
    let circuit = DuelCircuit {
        seed1: Fr::from(0u64),
        seed2: Fr::from(0u64),
        commit1: Fr::from(0u64),
        commit2: Fr::from(0u64),
        session_id: Fr::from(0u64),
        winner: Fr::from(1u64),
        witness: sample_witness,
    };
    Groth16::<Bn254>::generate_random_parameters_with_reduction(circuit, rng)
        .map_err(CircuitError::Synthesis)
}

/// Build the public-input vector the prover and verifier share, in wire
/// order.
pub fn public_inputs(
    seed1: &Seed,
    seed2: &Seed,
    commit1: Fr,
    commit2: Fr,
    session_id: Fr,
    winner: u8,
) -> PublicInputs {
    [
        seed1.as_fr(),
        seed2.as_fr(),
        commit1,
        commit2,
        session_id,
        Fr::from(winner as u64),
    ]
}

/// Produce a Groth16 proof that `winner` is the unique consequence of
/// `(seed1, seed2, session_id)`, without re-deriving the witness (the caller
/// already ran the simulator and knows the declared winner matches it).
pub fn prove<R: RngCore>(
    pk: &ProvingKey<Bn254>,
    seed1: &Seed,
    seed2: &Seed,
    session_id: Fr,
    winner: u8,
    witness: Witness,
    rng: &mut R,
) -> Result<Proof<Bn254>, CircuitError> {
    let circuit = DuelCircuit {
        seed1: seed1.as_fr(),
        seed2: seed2.as_fr(),
        commit1: seed1.commitment(),
        commit2: seed2.commitment(),
        session_id,
        winner: Fr::from(winner as u64),
        witness,
    };
    Groth16::<Bn254>::create_random_proof_with_reduction(circuit, pk, rng)
        .map_err(CircuitError::Synthesis)
}

/// Prepare a verifying key for repeated verification calls.
pub fn prepare_verifying_key(vk: &VerifyingKey<Bn254>) -> PreparedVerifyingKey<Bn254> {
    ark_groth16::prepare_verifying_key(vk)
}
