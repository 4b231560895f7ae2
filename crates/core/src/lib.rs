//! Field, Poseidon, deck derivation, and the game simulator for a
//! commit-reveal card duel.
//!
//! This crate is the part of the system that must agree bit-for-bit across
//! every independent implementation: the witness generator in `duel-circuit`,
//! any in-browser simulator, and the on-chain verifier's helpers all reduce
//! to calls into [`poseidon`] and [`deck`]. It has no chain dependency and no
//! I/O; everything here is a pure function of its arguments.

pub mod boundary;
pub mod deck;
pub mod error;
pub mod field;
pub mod poseidon;
pub mod poseidon_config;
pub mod seed;
pub mod session;
pub mod simulate;

pub use deck::{CardType, Deck, DECK_SIZE};
pub use error::CoreError;
pub use seed::Seed;
pub use session::{Phase, Session, SessionError};
pub use simulate::{simulate, EndReason, RoundRecord, SimulationResult, ROUND_COUNT};
