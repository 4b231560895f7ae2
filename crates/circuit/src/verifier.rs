//! Pure Groth16 verification (spec §4.5): `e(π_A, π_B) = e(α, β) ·
//! e(Σ pub_i · L_i, γ) · e(π_C, δ)`.

use ark_bn254::Bn254;
use ark_groth16::{Groth16, PreparedVerifyingKey, Proof};

use crate::error::CircuitError;
use crate::prover::PublicInputs;

/// Check `proof` against `public_inputs` under `pvk`. Returns `Ok(true)` or
/// `Ok(false)`; a malformed proof or key surfaces as `Err`.
pub fn verify(
    pvk: &PreparedVerifyingKey<Bn254>,
    proof: &Proof<Bn254>,
    public_inputs: &PublicInputs,
) -> Result<bool, CircuitError> {
    Groth16::<Bn254>::verify_proof(pvk, proof, public_inputs).map_err(CircuitError::Synthesis)
}
