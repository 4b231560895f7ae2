#![no_std]

#[cfg(feature = "real-verifier")]
extern crate alloc;

use soroban_sdk::Bytes;
use soroban_sdk::Env;

pub const FIELD_SIZE_BYTES: usize = 32;
pub const G1_BYTES: usize = 64;
pub const G2_BYTES: usize = 128;

/// `pi_a (64) || pi_b (128) || pi_c (64)` — the fixed Groth16 proof wire
/// format (spec §6); there is no header, unlike the teacher's variable-count
/// UltraHonk blob, since the circuit shape is fixed.
pub const PROOF_BLOB_BYTES: usize = G1_BYTES + G2_BYTES + G1_BYTES;
pub const PUBLIC_INPUT_COUNT: usize = 6;
pub const PUBLIC_INPUTS_BYTES: usize = PUBLIC_INPUT_COUNT * FIELD_SIZE_BYTES;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProofBlobError {
    ProofWrongLength { expected: usize, actual: usize },
    PublicInputsWrongLength { expected: usize, actual: usize },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ParsedProofBlob {
    pub proof_bytes: usize,
    pub public_input_bytes: usize,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VerifyCoreError {
    InvalidProofBlob(ProofBlobError),
    VkParse,
    VerificationFailed,
}

/// Validates the fixed-length Groth16 wire format: `proof_blob` is exactly
/// `pi_a || pi_b || pi_c` and `public_inputs` is exactly six 32-byte
/// big-endian field elements.
pub fn parse_and_validate_proof_blob(
    proof_blob: &Bytes,
    public_inputs: &Bytes,
) -> Result<ParsedProofBlob, ProofBlobError> {
    let proof_len = proof_blob.len() as usize;
    if proof_len != PROOF_BLOB_BYTES {
        return Err(ProofBlobError::ProofWrongLength {
            expected: PROOF_BLOB_BYTES,
            actual: proof_len,
        });
    }
    let pub_len = public_inputs.len() as usize;
    if pub_len != PUBLIC_INPUTS_BYTES {
        return Err(ProofBlobError::PublicInputsWrongLength {
            expected: PUBLIC_INPUTS_BYTES,
            actual: pub_len,
        });
    }
    Ok(ParsedProofBlob {
        proof_bytes: proof_len,
        public_input_bytes: pub_len,
    })
}

#[cfg(feature = "real-verifier")]
mod groth16 {
    use alloc::vec::Vec;

    use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};
    use ark_ff::{BigInteger, PrimeField};
    use ark_groth16::{Groth16, Proof, VerifyingKey};
    use ark_serialize::CanonicalDeserialize;
    use soroban_sdk::Bytes;

    use super::{VerifyCoreError, FIELD_SIZE_BYTES, G1_BYTES, G2_BYTES};

    fn to_vec(bytes: &Bytes) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() as usize);
        for i in 0..bytes.len() {
            out.push(bytes.get(i).unwrap_or(0));
        }
        out
    }

    fn fq_from_be(bytes: &[u8]) -> Fq {
        Fq::from_be_bytes_mod_order(bytes)
    }

    fn decode_g1(bytes: &[u8]) -> Option<G1Affine> {
        if bytes.len() != G1_BYTES {
            return None;
        }
        let x = fq_from_be(&bytes[0..32]);
        let y = fq_from_be(&bytes[32..64]);
        Some(G1Affine::new(x, y))
    }

    /// Mirrors `duel_circuit::payload::decode_g2`'s c0/c1 swap — duplicated
    /// rather than shared, since this crate is `no_std` and the circuit
    /// crate is not.
    fn decode_g2(bytes: &[u8]) -> Option<G2Affine> {
        if bytes.len() != G2_BYTES {
            return None;
        }
        let x_c1 = fq_from_be(&bytes[0..32]);
        let x_c0 = fq_from_be(&bytes[32..64]);
        let y_c1 = fq_from_be(&bytes[64..96]);
        let y_c0 = fq_from_be(&bytes[96..128]);
        Some(G2Affine::new(Fq2::new(x_c0, x_c1), Fq2::new(y_c0, y_c1)))
    }

    pub fn verify(
        vk_bytes: &Bytes,
        proof_blob: &Bytes,
        public_inputs: &Bytes,
    ) -> Result<bool, VerifyCoreError> {
        let vk_vec = to_vec(vk_bytes);
        let vk = VerifyingKey::<Bn254>::deserialize_compressed(&vk_vec[..])
            .map_err(|_| VerifyCoreError::VkParse)?;
        let pvk = ark_groth16::prepare_verifying_key(&vk);

        let proof_vec = to_vec(proof_blob);
        let a = decode_g1(&proof_vec[0..G1_BYTES]).ok_or(VerifyCoreError::VkParse)?;
        let b = decode_g2(&proof_vec[G1_BYTES..G1_BYTES + G2_BYTES])
            .ok_or(VerifyCoreError::VkParse)?;
        let c = decode_g1(&proof_vec[G1_BYTES + G2_BYTES..]).ok_or(VerifyCoreError::VkParse)?;
        let proof = Proof { a, b, c };

        let pub_vec = to_vec(public_inputs);
        let mut inputs = [Fr::from(0u64); 6];
        for (i, input) in inputs.iter_mut().enumerate() {
            let start = i * FIELD_SIZE_BYTES;
            *input = Fr::from_be_bytes_mod_order(&pub_vec[start..start + FIELD_SIZE_BYTES]);
        }

        Groth16::<Bn254>::verify_proof(&pvk, &proof, &inputs)
            .map_err(|_| VerifyCoreError::VerificationFailed)
    }
}

#[cfg(feature = "real-verifier")]
pub fn verify_packed_proof(
    _env: &Env,
    vk_bytes: &Bytes,
    proof_blob: &Bytes,
    public_inputs: &Bytes,
) -> Result<(), VerifyCoreError> {
    parse_and_validate_proof_blob(proof_blob, public_inputs)
        .map_err(VerifyCoreError::InvalidProofBlob)?;
    if groth16::verify(vk_bytes, proof_blob, public_inputs)? {
        Ok(())
    } else {
        Err(VerifyCoreError::VerificationFailed)
    }
}

#[cfg(not(feature = "real-verifier"))]
pub fn verify_packed_proof(
    _env: &Env,
    _vk_bytes: &Bytes,
    proof_blob: &Bytes,
    public_inputs: &Bytes,
) -> Result<(), VerifyCoreError> {
    parse_and_validate_proof_blob(proof_blob, public_inputs)
        .map_err(VerifyCoreError::InvalidProofBlob)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use soroban_sdk::Env;

    fn make_bytes(env: &Env, len: usize) -> Bytes {
        Bytes::from_slice(env, &std::vec![0u8; len])
    }

    #[test]
    fn accepts_well_formed_lengths() {
        let env = Env::default();
        let proof = make_bytes(&env, PROOF_BLOB_BYTES);
        let pubs = make_bytes(&env, PUBLIC_INPUTS_BYTES);
        let parsed = parse_and_validate_proof_blob(&proof, &pubs).expect("must be valid");
        assert_eq!(parsed.proof_bytes, PROOF_BLOB_BYTES);
        assert_eq!(parsed.public_input_bytes, PUBLIC_INPUTS_BYTES);
    }

    #[test]
    fn rejects_wrong_proof_length() {
        let env = Env::default();
        let proof = make_bytes(&env, PROOF_BLOB_BYTES - 1);
        let pubs = make_bytes(&env, PUBLIC_INPUTS_BYTES);
        let err = parse_and_validate_proof_blob(&proof, &pubs).expect_err("must fail");
        assert_eq!(
            err,
            ProofBlobError::ProofWrongLength {
                expected: PROOF_BLOB_BYTES,
                actual: PROOF_BLOB_BYTES - 1
            }
        );
    }

    #[test]
    fn rejects_wrong_public_input_length() {
        let env = Env::default();
        let proof = make_bytes(&env, PROOF_BLOB_BYTES);
        let pubs = make_bytes(&env, PUBLIC_INPUTS_BYTES + 32);
        let err = parse_and_validate_proof_blob(&proof, &pubs).expect_err("must fail");
        assert_eq!(
            err,
            ProofBlobError::PublicInputsWrongLength {
                expected: PUBLIC_INPUTS_BYTES,
                actual: PUBLIC_INPUTS_BYTES + 32
            }
        );
    }
}
