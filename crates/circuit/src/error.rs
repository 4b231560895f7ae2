use thiserror::Error;

/// Errors from witness generation, proving, and verification.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error(transparent)]
    Core(#[from] duel_core::CoreError),

    #[error("deck witness is not a permutation of 0..25")]
    NotAPermutation,

    #[error(transparent)]
    Synthesis(#[from] ark_relations::r1cs::SynthesisError),

    #[error(transparent)]
    Serialize(#[from] ark_serialize::SerializationError),

    #[error("proof payload has the wrong length: expected {expected}, got {actual}")]
    MalformedPayload { expected: usize, actual: usize },
}
