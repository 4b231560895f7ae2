//! The R1CS constraint system (spec §4.4).
//!
//! Public inputs are allocated in the order the wire format and the
//! on-chain verifier use (spec §6): `seed1, seed2, commit1, commit2,
//! session_id, winner`. Everything else — the deck, the weight
//! decomposition, and the 300 pairwise-distinctness inverses — is a private
//! witness.

use ark_bn254::Fr;
use ark_ff::{BigInteger, Field, PrimeField};
use ark_r1cs_std::alloc::AllocVar;
use ark_r1cs_std::boolean::Boolean;
use ark_r1cs_std::cmp::CmpGadget;
use ark_r1cs_std::eq::EqGadget;
use ark_r1cs_std::fields::fp::FpVar;
use ark_r1cs_std::select::CondSelectGadget;
use ark_r1cs_std::R1CSVar;
use ark_r1cs_std::ToBitsGadget;
use ark_relations::r1cs::{ConstraintSynthesizer, ConstraintSystemRef, SynthesisError};

use duel_core::deck::DECK_SIZE;
use duel_core::simulate::ROUND_COUNT;

use crate::gadgets::{poseidon1_var, poseidon2_var, poseidon3_var};
use crate::witness::Witness;

/// Index pairs `(i, j)` with `i < j` over `0..DECK_SIZE`, in the fixed order
/// both witness generation and constraint synthesis iterate — must agree so
/// `witness.inv[k]` lines up with `pair_index(k)` on both sides.
fn distinctness_pairs() -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(DECK_SIZE * (DECK_SIZE - 1) / 2);
    for i in 0..DECK_SIZE {
        for j in (i + 1)..DECK_SIZE {
            pairs.push((i, j));
        }
    }
    pairs
}

/// The card duel circuit.
#[derive(Clone)]
pub struct DuelCircuit {
    // Public inputs, wire order.
    pub seed1: Fr,
    pub seed2: Fr,
    pub commit1: Fr,
    pub commit2: Fr,
    pub session_id: Fr,
    pub winner: Fr,
    // Private witness.
    pub witness: Witness,
}

/// Recompose `bits` (little-endian) into an `FpVar`, allocating each bit as
/// a fresh witness — the standard way to get both a range check (the result
/// is provably `< 2^bits.len()`) and a usable field value out of one
/// decomposition.
fn alloc_bits_witness(
    cs: ConstraintSystemRef<Fr>,
    value: &Fr,
    num_bits: usize,
) -> Result<(FpVar<Fr>, Vec<Boolean<Fr>>), SynthesisError> {
    let bigint = value.into_bigint();
    let mut bits = Vec::with_capacity(num_bits);
    for i in 0..num_bits {
        let bit_value = bigint.get_bit(i);
        bits.push(Boolean::new_witness(cs.clone(), || Ok(bit_value))?);
    }
    let recomposed = Boolean::le_bits_to_fp_var(&bits)?;
    Ok((recomposed, bits))
}

/// One round's state update, threaded through the 12-round chain (spec
/// §4.3/§4.4.6). All branches are computed unconditionally and the correct
/// one selected, so the circuit has no data-dependent control flow.
#[allow(clippy::too_many_arguments)]
fn round_step(
    c1: &FpVar<Fr>,
    c2: &FpVar<Fr>,
    score1_in: &FpVar<Fr>,
    score2_in: &FpVar<Fr>,
    active_in: &Boolean<Fr>,
    winner_in: &FpVar<Fr>,
) -> Result<(FpVar<Fr>, FpVar<Fr>, Boolean<Fr>, FpVar<Fr>), SynthesisError> {
    let (type1, type2) = (card_type(c1)?, card_type(c2)?);

    let three = FpVar::constant(Fr::from(3u64));
    let black_spot1 = type1.is_eq(&three)?;
    let black_spot2 = type2.is_eq(&three)?;
    let any_black_spot = black_spot1.or(&black_spot2)?;

    // RPS: p1 wins iff (type1 + 1) mod 3 == type2.
    let type1_is_two = type1.is_eq(&FpVar::constant(Fr::from(2u64)))?;
    let type1_plus_one_mod3 = FpVar::conditionally_select(
        &type1_is_two,
        &FpVar::zero(),
        &(type1.clone() + FpVar::one()),
    )?;
    let tie = type1.is_eq(&type2)?;
    let p1_wins_rps = type1_plus_one_mod3.is_eq(&type2)?;
    let p2_wins_rps = tie.not().and(&p1_wins_rps.not())?;

    let gated_p1 = active_in.and(&any_black_spot.not())?.and(&p1_wins_rps)?;
    let gated_p2 = active_in.and(&any_black_spot.not())?.and(&p2_wins_rps)?;
    let score1_out = score1_in.clone() + FpVar::from(gated_p1);
    let score2_out = score2_in.clone() + FpVar::from(gated_p2);

    let three_score = FpVar::constant(Fr::from(3u64));
    let p1_reached_3 = score1_out.is_eq(&three_score)?;
    let p2_reached_3 = score2_out.is_eq(&three_score)?;

    let ends_by_black_spot = active_in.and(&any_black_spot)?;
    let ends_by_score = active_in.and(&p1_reached_3.or(&p2_reached_3)?)?;
    let active_out = active_in
        .and(&ends_by_black_spot.not())?
        .and(&ends_by_score.not())?;

    // Black Spot on c1 => p2 wins the match; on c2 => p1 wins. Score-end
    // gives priority to p1 (spec §4.3 parenthetical on simultaneous score).
    let black_spot_winner = FpVar::conditionally_select(
        &black_spot1,
        &FpVar::constant(Fr::from(2u64)),
        &FpVar::constant(Fr::from(1u64)),
    )?;
    let score_winner = FpVar::conditionally_select(
        &p1_reached_3,
        &FpVar::constant(Fr::from(1u64)),
        &FpVar::constant(Fr::from(2u64)),
    )?;
    let winner_out = FpVar::conditionally_select(
        &ends_by_black_spot,
        &black_spot_winner,
        &FpVar::conditionally_select(&ends_by_score, &score_winner, winner_in)?,
    )?;

    Ok((score1_out, score2_out, active_out, winner_out))
}

/// `floor(card / 8)` for `card` already known to be `< 25` — matches
/// `CardType::of`'s 0..7/8..15/16..23/24 boundaries exactly, because those
/// are precisely the four values of the top two bits of a 5-bit card index.
fn card_type(card: &FpVar<Fr>) -> Result<FpVar<Fr>, SynthesisError> {
    let cs = card.cs();
    let value = card.value().unwrap_or(Fr::from(0u64));
    let (_, bits) = alloc_bits_witness(cs, &value, 5)?;
    card.enforce_equal(&Boolean::le_bits_to_fp_var(&bits)?)?;
    let b3 = FpVar::from(bits[3].clone());
    let b4 = FpVar::from(bits[4].clone());
    Ok(b3 + b4 * FpVar::constant(Fr::from(2u64)))
}

impl ConstraintSynthesizer<Fr> for DuelCircuit {
    fn generate_constraints(self, cs: ConstraintSystemRef<Fr>) -> Result<(), SynthesisError> {
        // Public inputs, in wire order (spec §6).
        let seed1 = FpVar::new_input(cs.clone(), || Ok(self.seed1))?;
        let seed2 = FpVar::new_input(cs.clone(), || Ok(self.seed2))?;
        let commit1 = FpVar::new_input(cs.clone(), || Ok(self.commit1))?;
        let commit2 = FpVar::new_input(cs.clone(), || Ok(self.commit2))?;
        let session_id = FpVar::new_input(cs.clone(), || Ok(self.session_id))?;
        let winner = FpVar::new_input(cs.clone(), || Ok(self.winner))?;

        // 1. Commitment openings.
        poseidon1_var(&seed1)?.enforce_equal(&commit1)?;
        poseidon1_var(&seed2)?.enforce_equal(&commit2)?;

        // 2. Combined seed.
        let combined_seed = poseidon3_var(&seed1, &seed2, &session_id)?;

        // Private witness: the deck, each card allocated as a field witness.
        let w = &self.witness;
        let deck_vars: Vec<FpVar<Fr>> = w
            .deck
            .cards
            .iter()
            .map(|&c| FpVar::new_witness(cs.clone(), || Ok(Fr::from(c as u64))))
            .collect::<Result<_, _>>()?;

        // 3. Permutation validity: range check + pairwise distinctness.
        let twenty_four = FpVar::constant(Fr::from(24u64));
        for d in &deck_vars {
            d.is_le(&twenty_four)?.enforce_equal(&Boolean::TRUE)?;
        }
        for (k, &(i, j)) in distinctness_pairs().iter().enumerate() {
            let diff = deck_vars[i].clone() - deck_vars[j].clone();
            let inv = FpVar::new_witness(cs.clone(), || Ok(w.inv[k]))?;
            (inv * diff).enforce_equal(&FpVar::one())?;
        }

        // 4 & 5. Weight decomposition and sort order.
        let mut trunc_vars = Vec::with_capacity(DECK_SIZE);
        for i in 0..DECK_SIZE {
            let weight = poseidon2_var(&combined_seed, &deck_vars[i])?;
            let (trunc_var, _) =
                alloc_bits_witness(cs.clone(), &Fr::from(w.deck.trunc_weights[i]), 128)?;
            let (high_var, _) = alloc_bits_witness(cs.clone(), &w.deck.high_weights[i], 126)?;
            let two_pow_128 = FpVar::constant(Fr::from(2u64).pow([128u64]));
            let recombined = trunc_var.clone() + high_var * two_pow_128;
            weight.enforce_equal(&recombined)?;
            trunc_vars.push(trunc_var);
        }
        for i in 0..DECK_SIZE - 1 {
            trunc_vars[i]
                .is_le(&trunc_vars[i + 1])?
                .enforce_equal(&Boolean::TRUE)?;
        }

        // 6. Game simulation: 12 chained rounds.
        let mut score1 = FpVar::zero();
        let mut score2 = FpVar::zero();
        let mut active = Boolean::constant(true);
        let mut winner_running = FpVar::zero();
        for i in 0..ROUND_COUNT {
            let (s1, s2, act, win) = round_step(
                &deck_vars[2 * i],
                &deck_vars[2 * i + 1],
                &score1,
                &score2,
                &active,
                &winner_running,
            )?;
            score1 = s1;
            score2 = s2;
            active = act;
            winner_running = win;
        }

        // Deck exhausted with the match still active: higher score wins,
        // ties broken by `Poseidon2(cs, 25)`.
        let score1_gt_score2 = score1.is_gt(&score2)?;
        let score2_gt_score1 = score2.is_gt(&score1)?;
        let coin = poseidon2_var(&combined_seed, &FpVar::constant(Fr::from(25u64)))?;
        // `coin mod 2` needs the full canonical bit decomposition, not just
        // a free high/low split: `to_bits_le` enforces the result is `< r`
        // (ark's standard range-checked decomposition), so the low bit is
        // pinned to the one canonical representation of `coin` instead of
        // leaving a prover free to pick either parity via an unreduced
        // `coin + r` witness.
        let coin_bits = coin.to_bits_le()?;
        let coin_is_odd = coin_bits[0].clone();
        let coinflip_winner =
            FpVar::conditionally_select(&coin_is_odd, &FpVar::constant(Fr::from(2u64)), &FpVar::constant(Fr::from(1u64)))?;
        let exhausted_winner = FpVar::conditionally_select(
            &score1_gt_score2,
            &FpVar::constant(Fr::from(1u64)),
            &FpVar::conditionally_select(
                &score2_gt_score1,
                &FpVar::constant(Fr::from(2u64)),
                &coinflip_winner,
            )?,
        )?;
        let final_winner =
            FpVar::conditionally_select(&active, &exhausted_winner, &winner_running)?;

        // 7. Winner binding.
        final_winner.enforce_equal(&winner)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Bn254;
    use ark_groth16::{prepare_verifying_key, Groth16};
    use rand::thread_rng;

    use duel_core::seed::Seed;
    use duel_core::simulate::simulate;

    use crate::witness::Witness;

    fn session(seed1: u64, seed2: u64, session_id: u64) -> (Seed, Seed, Fr) {
        (
            Seed::from_fr(Fr::from(seed1)),
            Seed::from_fr(Fr::from(seed2)),
            Fr::from(session_id),
        )
    }

    #[test]
    fn prove_and_verify_ok() {
        let (s1, s2, sid) = session(1, 2, 1);
        let result = simulate(&s1, &s2, sid).expect("no collision for this fixture");
        let witness = Witness::build(&s1, &s2, sid).expect("same fixture, same derivation");

        let circuit = DuelCircuit {
            seed1: s1.as_fr(),
            seed2: s2.as_fr(),
            commit1: s1.commitment(),
            commit2: s2.commitment(),
            session_id: sid,
            winner: Fr::from(result.winner as u64),
            witness: witness.clone(),
        };

        let mut rng = thread_rng();
        let params = Groth16::<Bn254>::generate_random_parameters_with_reduction(
            circuit.clone(),
            &mut rng,
        )
        .unwrap();
        let proof =
            Groth16::<Bn254>::create_random_proof_with_reduction(circuit, &params, &mut rng)
                .unwrap();

        let pvk = prepare_verifying_key(&params.vk);
        let public_inputs = [
            s1.as_fr(),
            s2.as_fr(),
            s1.commitment(),
            s2.commitment(),
            sid,
            Fr::from(result.winner as u64),
        ];
        let ok = Groth16::<Bn254>::verify_proof(&pvk, &proof, &public_inputs).unwrap();
        assert!(ok);
    }

    #[test]
    fn verify_fails_with_wrong_winner() {
        let (s1, s2, sid) = session(10, 20, 7);
        let result = simulate(&s1, &s2, sid).expect("no collision for this fixture");
        let witness = Witness::build(&s1, &s2, sid).unwrap();

        let circuit = DuelCircuit {
            seed1: s1.as_fr(),
            seed2: s2.as_fr(),
            commit1: s1.commitment(),
            commit2: s2.commitment(),
            session_id: sid,
            winner: Fr::from(result.winner as u64),
            witness,
        };

        let mut rng = thread_rng();
        let params = Groth16::<Bn254>::generate_random_parameters_with_reduction(
            circuit.clone(),
            &mut rng,
        )
        .unwrap();
        let proof =
            Groth16::<Bn254>::create_random_proof_with_reduction(circuit, &params, &mut rng)
                .unwrap();

        let pvk = prepare_verifying_key(&params.vk);
        let wrong_winner = if result.winner == 1 { 2 } else { 1 };
        let wrong_public_inputs = [
            s1.as_fr(),
            s2.as_fr(),
            s1.commitment(),
            s2.commitment(),
            sid,
            Fr::from(wrong_winner as u64),
        ];
        let ok = Groth16::<Bn254>::verify_proof(&pvk, &proof, &wrong_public_inputs).unwrap();
        assert!(!ok);
    }
}
