//! Pure game simulator (spec §4.3) — ground truth for the UI, the witness
//! generator, and (by construction) the circuit.

use ark_bn254::Fr;

use crate::deck::{CardType, Deck};
use crate::error::CoreError;
use crate::poseidon::{poseidon2, poseidon3};
use crate::seed::Seed;

/// Number of rounds a 25-card deck supports (card 24, Black Spot, is never
/// drawn as the 25th card of a round pair — it only ever appears as one of
/// the two cards in rounds `0..11`).
pub const ROUND_COUNT: usize = 12;

const SCORE_TO_WIN: u8 = 3;

/// Why the game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    /// One player scored to `SCORE_TO_WIN`.
    Score,
    /// A Black Spot was drawn, ending the game immediately.
    BlackSpot,
    /// All 12 rounds played with the deck head untied: higher score wins.
    Exhausted,
    /// All 12 rounds played, scores tied: `Poseidon2(cs, 25)` breaks the tie.
    CoinFlip,
}

/// One played round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRecord {
    pub card_p1: u8,
    pub card_p2: u8,
    pub type_p1: CardType,
    pub type_p2: CardType,
    /// `0` = tie, `1` = player 1, `2` = player 2.
    pub round_winner: u8,
    pub black_spot: bool,
    pub cumulative_score_p1: u8,
    pub cumulative_score_p2: u8,
    pub game_over: bool,
}

/// Full simulation output.
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub deck: Deck,
    pub rounds: Vec<RoundRecord>,
    /// `1` or `2`.
    pub winner: u8,
    pub end_reason: EndReason,
}

/// RPS-style comparison: `t1` beats `t2` iff `(t1 + 1) mod 3 == t2`.
/// Black Spot (type 3) is handled before this is ever called.
fn rps_winner(t1: CardType, t2: CardType) -> u8 {
    let a = t1 as u8;
    let b = t2 as u8;
    if a == b {
        0
    } else if (a + 1) % 3 == b {
        1
    } else {
        2
    }
}

/// Run the deterministic game for `(seed1, seed2, session_id)`.
///
/// Returns `CoreError::TruncatedWeightCollision` if the deck derivation hits
/// the negligible-probability sort-order collision (spec §4.2, §9) — the
/// caller must treat this as a refusal to produce a game, not silently pick
/// a tie-break.
pub fn simulate(seed1: &Seed, seed2: &Seed, session_id: Fr) -> Result<SimulationResult, CoreError> {
    let combined_seed = poseidon3(seed1.as_fr(), seed2.as_fr(), session_id);
    let deck = Deck::derive(combined_seed)?;

    let mut score1 = 0u8;
    let mut score2 = 0u8;
    let mut winner = 0u8;
    let mut active = true;
    let mut end_reason = EndReason::Score;
    let mut rounds = Vec::with_capacity(ROUND_COUNT);

    for i in 0..ROUND_COUNT {
        if !active {
            break;
        }
        let c1 = deck.cards[2 * i];
        let c2 = deck.cards[2 * i + 1];
        let t1 = CardType::of(c1);
        let t2 = CardType::of(c2);

        let mut round_winner = 0u8;
        let mut black_spot = false;

        if t1 == CardType::BlackSpot {
            winner = 2;
            active = false;
            black_spot = true;
            end_reason = EndReason::BlackSpot;
        } else if t2 == CardType::BlackSpot {
            winner = 1;
            active = false;
            black_spot = true;
            end_reason = EndReason::BlackSpot;
        } else {
            round_winner = rps_winner(t1, t2);
            match round_winner {
                1 => score1 += 1,
                2 => score2 += 1,
                _ => {}
            }
            if score1 >= SCORE_TO_WIN {
                winner = 1;
                active = false;
                end_reason = EndReason::Score;
            } else if score2 >= SCORE_TO_WIN {
                winner = 2;
                active = false;
                end_reason = EndReason::Score;
            }
        }

        rounds.push(RoundRecord {
            card_p1: c1,
            card_p2: c2,
            type_p1: t1,
            type_p2: t2,
            round_winner,
            black_spot,
            cumulative_score_p1: score1,
            cumulative_score_p2: score2,
            game_over: !active,
        });
    }

    if active {
        winner = if score1 > score2 {
            end_reason = EndReason::Exhausted;
            1
        } else if score2 > score1 {
            end_reason = EndReason::Exhausted;
            2
        } else {
            let coin = poseidon2(combined_seed, Fr::from(25u64));
            end_reason = EndReason::CoinFlip;
            (coin_is_odd(coin) as u8) + 1
        };
        if let Some(last) = rounds.last_mut() {
            last.game_over = true;
        }
    }

    Ok(SimulationResult {
        deck,
        rounds,
        winner,
        end_reason,
    })
}

/// `coin mod 2` over a field element: true iff the field element's canonical
/// representative is odd, i.e. its least significant bit is set.
fn coin_is_odd(coin: Fr) -> bool {
    use ark_ff::{BigInteger, PrimeField};
    coin.into_bigint().to_bytes_le()[0] & 1 == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seed(v: u64) -> Seed {
        Seed::from_fr(Fr::from(v))
    }

    #[test]
    fn deterministic_same_inputs_same_result() {
        let s1 = seed(1);
        let s2 = seed(2);
        let sid = Fr::from(1u64);
        let a = simulate(&s1, &s2, sid).unwrap();
        let b = simulate(&s1, &s2, sid).unwrap();
        assert_eq!(a.deck.cards, b.deck.cards);
        assert_eq!(a.winner, b.winner);
        assert_eq!(a.end_reason, b.end_reason);
    }

    #[test]
    fn role_assignment_is_positional_not_symmetric() {
        let sid = Fr::from(7u64);
        let a = simulate(&seed(10), &seed(20), sid).unwrap();
        let b = simulate(&seed(20), &seed(10), sid).unwrap();
        // Swapping seed order changes the combined seed (Poseidon3 is
        // order-sensitive), so decks generally differ — spec §8 "swap
        // symmetry failure".
        assert_ne!(a.deck.cards, b.deck.cards);
    }

    #[test]
    fn winner_is_one_or_two() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..25 {
            let s1 = Seed::generate(&mut rng);
            let s2 = Seed::generate(&mut rng);
            let sid = Seed::generate(&mut rng).as_fr();
            if let Ok(result) = simulate(&s1, &s2, sid) {
                assert!(result.winner == 1 || result.winner == 2);
                assert!(result.rounds.len() <= ROUND_COUNT);
                assert!(result.rounds.last().unwrap().game_over);
            }
        }
    }

    #[test]
    fn black_spot_ends_game_immediately() {
        // Scan session ids for one whose deck places card 24 in the first
        // round pair, to exercise the black-spot branch deterministically.
        let s1 = seed(1);
        let s2 = seed(2);
        for sid in 0u64..500 {
            let result = match simulate(&s1, &s2, Fr::from(sid)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if result.end_reason == EndReason::BlackSpot {
                let first_over = result
                    .rounds
                    .iter()
                    .position(|r| r.black_spot)
                    .expect("black spot round recorded");
                assert!(result.rounds[first_over].game_over);
                assert_eq!(result.rounds.len(), first_over + 1);
                return;
            }
        }
        panic!("no black-spot session id found in scan range");
    }

    #[test]
    fn coin_flip_winner_matches_parity() {
        // Scan session ids for one whose deck exhausts the round chain
        // tied, exercising the `EndReason::CoinFlip` branch (spec §8
        // scenario 6): the winner must be `(Poseidon2(cs, 25) mod 2) + 1`.
        let s1 = seed(1);
        let s2 = seed(2);
        for sid in 0u64..500 {
            let result = match simulate(&s1, &s2, Fr::from(sid)) {
                Ok(r) => r,
                Err(_) => continue,
            };
            if result.end_reason == EndReason::CoinFlip {
                let combined_seed = poseidon3(s1.as_fr(), s2.as_fr(), Fr::from(sid));
                let coin = poseidon2(combined_seed, Fr::from(25u64));
                let expected_winner = (coin_is_odd(coin) as u8) + 1;
                assert_eq!(result.winner, expected_winner);
                return;
            }
        }
        panic!("no coin-flip session id found in scan range");
    }
}
