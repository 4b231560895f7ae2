//! Off-chain mirror of a session's lifecycle (spec §3, §4.5).
//!
//! The on-chain `duel-game` contract is the authority for session state; this
//! module exists so `duel-prover` and tests can track and validate the same
//! state machine without a chain round-trip. Its `SessionError` variants name
//! the same error kinds the contract surfaces (spec §6), but this type is not
//! shared with the contract crate — the contract is `#![no_std]` and defines
//! its own `#[contracterror]` enum independently.

use ark_bn254::Fr;
use thiserror::Error;

use crate::poseidon::poseidon1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Open,
    Committed,
    Revealed,
    Settled,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    #[error("session already exists")]
    SessionExists,
    #[error("session is not open")]
    NotOpen,
    #[error("a player cannot join their own session")]
    SelfJoin,
    #[error("session is not in the committed phase")]
    NotCommitted,
    #[error("revealed seed does not open the stored commitment")]
    BadOpening,
    #[error("this player has already revealed")]
    AlreadyRevealed,
    #[error("session is not in the revealed phase")]
    NotRevealed,
    #[error("settlement public inputs do not match stored session state")]
    InputMismatch,
    #[error("proof did not verify")]
    InvalidProof,
    #[error("session is already settled")]
    AlreadySettled,
}

/// Logical mirror of the on-chain `Session` record. `player1`/`player2` are
/// left generic over the address representation (a `String`, a contract
/// `Address`, …) so this module stays free of any chain SDK dependency.
#[derive(Debug, Clone)]
pub struct Session<A> {
    pub player1: A,
    pub player2: Option<A>,
    pub commit1: Fr,
    pub commit2: Option<Fr>,
    pub seed1: Option<Fr>,
    pub seed2: Option<Fr>,
    pub winner: u8,
}

impl<A: PartialEq> Session<A> {
    /// `create(sid, p1, commit1)`.
    pub fn open(player1: A, commit1: Fr) -> Self {
        Self {
            player1,
            player2: None,
            commit1,
            commit2: None,
            seed1: None,
            seed2: None,
            winner: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.winner != 0 {
            Phase::Settled
        } else if self.seed1.is_some() && self.seed2.is_some() {
            Phase::Revealed
        } else if self.player2.is_some() {
            Phase::Committed
        } else {
            Phase::Open
        }
    }

    /// `join(sid, p2, commit2)`.
    pub fn join(&mut self, player2: A, commit2: Fr) -> Result<(), SessionError> {
        if self.phase() != Phase::Open {
            return Err(SessionError::NotOpen);
        }
        if player2 == self.player1 {
            return Err(SessionError::SelfJoin);
        }
        self.player2 = Some(player2);
        self.commit2 = Some(commit2);
        Ok(())
    }

    /// `reveal(sid, who, seed)`, where `who` is `1` or `2`.
    pub fn reveal(&mut self, who: u8, seed: Fr) -> Result<(), SessionError> {
        if self.phase() != Phase::Committed {
            return Err(SessionError::NotCommitted);
        }
        let commit = match who {
            1 => self.commit1,
            2 => self.commit2.expect("committed phase implies commit2 set"),
            _ => return Err(SessionError::NotCommitted),
        };
        if poseidon1(seed) != commit {
            return Err(SessionError::BadOpening);
        }
        match who {
            1 if self.seed1.is_some() => return Err(SessionError::AlreadyRevealed),
            2 if self.seed2.is_some() => return Err(SessionError::AlreadyRevealed),
            1 => self.seed1 = Some(seed),
            2 => self.seed2 = Some(seed),
            _ => unreachable!(),
        }
        Ok(())
    }

    /// `settle(sid, proof, pubs)` — this module only checks the public-input
    /// binding described by spec §4.5's precondition column; the actual
    /// Groth16 pairing check lives in `duel-circuit`'s verifier.
    pub fn settle(
        &mut self,
        commit1: Fr,
        commit2: Fr,
        seed1: Fr,
        seed2: Fr,
        winner: u8,
    ) -> Result<(), SessionError> {
        if self.phase() != Phase::Revealed {
            return Err(SessionError::NotRevealed);
        }
        if self.winner != 0 {
            return Err(SessionError::AlreadySettled);
        }
        let matches = self.commit1 == commit1
            && self.commit2 == Some(commit2)
            && self.seed1 == Some(seed1)
            && self.seed2 == Some(seed2);
        if !matches {
            return Err(SessionError::InputMismatch);
        }
        if winner != 1 && winner != 2 {
            return Err(SessionError::InputMismatch);
        }
        self.winner = winner;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit_for(seed: Fr) -> Fr {
        poseidon1(seed)
    }

    #[test]
    fn happy_path_transitions_monotonically() {
        let seed1 = Fr::from(11u64);
        let seed2 = Fr::from(22u64);
        let mut s = Session::open("alice", commit_for(seed1));
        assert_eq!(s.phase(), Phase::Open);

        s.join("bob", commit_for(seed2)).unwrap();
        assert_eq!(s.phase(), Phase::Committed);

        s.reveal(1, seed1).unwrap();
        assert_eq!(s.phase(), Phase::Committed);
        s.reveal(2, seed2).unwrap();
        assert_eq!(s.phase(), Phase::Revealed);

        s.settle(commit_for(seed1), commit_for(seed2), seed1, seed2, 1)
            .unwrap();
        assert_eq!(s.phase(), Phase::Settled);
        assert_eq!(s.winner, 1);
    }

    #[test]
    fn self_join_rejected() {
        let mut s = Session::open("alice", commit_for(Fr::from(1u64)));
        assert_eq!(
            s.join("alice", commit_for(Fr::from(2u64))),
            Err(SessionError::SelfJoin)
        );
    }

    #[test]
    fn bad_opening_rejected() {
        let mut s = Session::open("alice", commit_for(Fr::from(1u64)));
        s.join("bob", commit_for(Fr::from(2u64))).unwrap();
        assert_eq!(s.reveal(1, Fr::from(999u64)), Err(SessionError::BadOpening));
    }

    #[test]
    fn double_reveal_rejected() {
        let seed1 = Fr::from(1u64);
        let mut s = Session::open("alice", commit_for(seed1));
        s.join("bob", commit_for(Fr::from(2u64))).unwrap();
        s.reveal(1, seed1).unwrap();
        assert_eq!(s.reveal(1, seed1), Err(SessionError::AlreadyRevealed));
    }

    #[test]
    fn settle_before_reveal_rejected() {
        let mut s = Session::open("alice", commit_for(Fr::from(1u64)));
        s.join("bob", commit_for(Fr::from(2u64))).unwrap();
        assert_eq!(
            s.settle(Fr::from(0u64), Fr::from(0u64), Fr::from(0u64), Fr::from(0u64), 1),
            Err(SessionError::NotRevealed)
        );
    }

    #[test]
    fn double_settle_rejected() {
        let seed1 = Fr::from(1u64);
        let seed2 = Fr::from(2u64);
        let mut s = Session::open("alice", commit_for(seed1));
        s.join("bob", commit_for(seed2)).unwrap();
        s.reveal(1, seed1).unwrap();
        s.reveal(2, seed2).unwrap();
        s.settle(commit_for(seed1), commit_for(seed2), seed1, seed2, 1)
            .unwrap();
        assert_eq!(
            s.settle(commit_for(seed1), commit_for(seed2), seed1, seed2, 2),
            Err(SessionError::AlreadySettled)
        );
    }
}
