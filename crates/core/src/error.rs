use thiserror::Error;

/// Errors surfaced by the pure core: field/Poseidon primitives, deck
/// derivation, and the game simulator. None of these are the on-chain
/// protocol errors (see the `duel-game` contract crate for those) — this
/// crate never touches chain state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Two of the 25 per-card weights truncated to their low 128 bits,
    /// making the sort order ambiguous. Per spec: refuse rather than pick
    /// an arbitrary winner for the tie.
    #[error("truncated weight collision between card indices {0} and {1}")]
    TruncatedWeightCollision(u8, u8),
    /// A deck witness did not contain each of `0..25` exactly once.
    #[error("deck is not a permutation of 0..25")]
    NotAPermutation,
}
