//! Rank-1 constraint system, witness generator, and Groth16 prover/verifier
//! for the card duel (spec §4.4).

pub mod circuit;
pub mod error;
pub mod gadgets;
pub mod payload;
pub mod prover;
pub mod verifier;
pub mod witness;

pub use circuit::DuelCircuit;
pub use error::CircuitError;
pub use payload::ProofPayload;
pub use witness::Witness;
