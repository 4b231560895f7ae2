//! Private-witness assembly for [`crate::circuit::DuelCircuit`].

use ark_bn254::Fr;
use ark_ff::Field;

use duel_core::deck::{Deck, DECK_SIZE};
use duel_core::poseidon::poseidon3;
use duel_core::seed::Seed;

use crate::error::CircuitError;

/// The private witness: a deck plus the `25·24/2 = 300` pairwise-distinctness
/// inverses the circuit's permutation constraint needs (spec §4.4.3). The
/// pair ordering matches [`crate::circuit::distinctness_pairs`] exactly.
#[derive(Clone)]
pub struct Witness {
    pub deck: Deck,
    pub inv: Vec<Fr>,
}

impl Witness {
    /// Derive the deck for `(seed1, seed2, session_id)` and build its
    /// distinctness witness. Fails with
    /// [`CircuitError::Core`]`(TruncatedWeightCollision)` on the
    /// negligible-probability sort collision (spec §4.2, §9).
    pub fn build(seed1: &Seed, seed2: &Seed, session_id: Fr) -> Result<Self, CircuitError> {
        let combined_seed = poseidon3(seed1.as_fr(), seed2.as_fr(), session_id);
        let deck = Deck::derive(combined_seed)?;
        Self::from_deck(deck)
    }

    /// Build a witness from an already-derived deck, computing the 300
    /// distinctness inverses. Fails with [`CircuitError::NotAPermutation`]
    /// if `deck.cards` repeats or omits any index in `0..25` — exercised by
    /// tests that hand-construct a malformed deck to confirm the circuit
    /// rejects it rather than silently proving over it (spec §8, test 5).
    pub fn from_deck(deck: Deck) -> Result<Self, CircuitError> {
        if !Deck::is_permutation(&deck.cards) {
            return Err(CircuitError::NotAPermutation);
        }
        let mut inv = Vec::with_capacity(DECK_SIZE * (DECK_SIZE - 1) / 2);
        for i in 0..DECK_SIZE {
            for j in (i + 1)..DECK_SIZE {
                let diff = Fr::from(deck.cards[i] as u64) - Fr::from(deck.cards[j] as u64);
                inv.push(diff.inverse().expect("distinct cards never collide in Fr"));
            }
        }
        Ok(Self { deck, inv })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_for_a_valid_session() {
        let s1 = Seed::from_fr(Fr::from(1u64));
        let s2 = Seed::from_fr(Fr::from(2u64));
        let w = Witness::build(&s1, &s2, Fr::from(1u64)).unwrap();
        assert_eq!(w.inv.len(), DECK_SIZE * (DECK_SIZE - 1) / 2);
    }

    #[test]
    fn rejects_duplicated_card() {
        let s1 = Seed::from_fr(Fr::from(1u64));
        let s2 = Seed::from_fr(Fr::from(2u64));
        let combined = poseidon3(s1.as_fr(), s2.as_fr(), Fr::from(1u64));
        let mut deck = Deck::derive(combined).unwrap();
        deck.cards[24] = deck.cards[0]; // duplicate index 0, index 7 missing (say)
        assert!(matches!(
            Witness::from_deck(deck),
            Err(CircuitError::NotAPermutation)
        ));
    }
}
