#![no_std]

mod engine;

use soroban_sdk::{
    contract, contractclient, contracterror, contractimpl, contracttype, Address, Bytes, BytesN,
    Env,
};

use engine::{encode_public_inputs, opens, SESSION_TTL_LEDGERS};

/// The settlement trait `duel-verifier` implements (spec §4.5).
#[contractclient(name = "VerifierClient")]
pub trait DuelVerifier {
    fn verify_with_stored_vk(env: Env, proof_blob: Bytes, public_inputs: Bytes) -> bool;
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    SessionNotFound = 1,
    SessionExists = 2,
    NotOpen = 3,
    SelfJoin = 4,
    NotCommitted = 5,
    AlreadyRevealed = 6,
    BadOpening = 7,
    NotRevealed = 8,
    InputMismatch = 9,
    InvalidProof = 10,
    AlreadySettled = 11,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Open,
    Committed,
    Revealed,
    Settled,
}

/// On-chain session record (spec §3). `player2`/`commit2`/`seed1`/`seed2`
/// stay `None` until `join`/`reveal` set them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub player1: Address,
    pub player2: Option<Address>,
    pub commit1: BytesN<32>,
    pub commit2: Option<BytesN<32>>,
    pub seed1: Option<BytesN<32>>,
    pub seed2: Option<BytesN<32>>,
    pub winner: u32,
}

impl Session {
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
}

/// The six public inputs a settlement proof is checked against (spec §3,
/// §6), in wire order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicInputs {
    pub seed1: BytesN<32>,
    pub seed2: BytesN<32>,
    pub commit1: BytesN<32>,
    pub commit2: BytesN<32>,
    pub session_id: u32,
    pub winner: u32,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    VerifierAddress,
    Session(u32),
}

#[contract]
pub struct DuelGameContract;

#[contractimpl]
impl DuelGameContract {
    pub fn __constructor(env: Env, admin: Address, verifier: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::VerifierAddress, &verifier);
    }

    /// `create(sid, p1, commit1)` (spec §4.5): opens a session with player1's
    /// seed commitment.
    pub fn create(
        env: Env,
        session_id: u32,
        player1: Address,
        commit1: BytesN<32>,
    ) -> Result<(), Error> {
        player1.require_auth();
        if Self::load_session(&env, session_id).is_some() {
            return Err(Error::SessionExists);
        }

        let session = Session {
            player1,
            player2: None,
            commit1,
            commit2: None,
            seed1: None,
            seed2: None,
            winner: 0,
        };
        Self::save_session(&env, session_id, &session);
        Ok(())
    }

    /// `join(sid, p2, commit2)`: the second player commits, closing the
    /// lobby and advancing the session to `Committed`.
    pub fn join(
        env: Env,
        session_id: u32,
        player2: Address,
        commit2: BytesN<32>,
    ) -> Result<(), Error> {
        player2.require_auth();
        let mut session = Self::require_session(&env, session_id)?;
        if session.phase() != Phase::Open {
            return Err(Error::NotOpen);
        }
        if player2 == session.player1 {
            return Err(Error::SelfJoin);
        }

        session.player2 = Some(player2);
        session.commit2 = Some(commit2);
        Self::save_session(&env, session_id, &session);
        Ok(())
    }

    /// `reveal(sid, who, seed)`: opens one player's commitment. The session
    /// moves to `Revealed` once both seeds are in.
    pub fn reveal(env: Env, session_id: u32, who: Address, seed: BytesN<32>) -> Result<(), Error> {
        who.require_auth();
        let mut session = Self::require_session(&env, session_id)?;
        if session.phase() != Phase::Committed {
            return Err(Error::NotCommitted);
        }

        let is_player1 = who == session.player1;
        let is_player2 = session.player2.as_ref() == Some(&who);
        if !is_player1 && !is_player2 {
            return Err(Error::NotCommitted);
        }

        let commit = if is_player1 {
            &session.commit1
        } else {
            session
                .commit2
                .as_ref()
                .expect("Committed phase implies commit2 is set")
        };
        if !opens(&env, &seed, commit) {
            return Err(Error::BadOpening);
        }

        if is_player1 {
            if session.seed1.is_some() {
                return Err(Error::AlreadyRevealed);
            }
            session.seed1 = Some(seed);
        } else {
            if session.seed2.is_some() {
                return Err(Error::AlreadyRevealed);
            }
            session.seed2 = Some(seed);
        }

        Self::save_session(&env, session_id, &session);
        Ok(())
    }

    /// `settle(sid, proof, pubs)`: binds `pubs` to the stored session state,
    /// then delegates the Groth16 pairing check to `duel-verifier` (spec
    /// §4.5). Already-settled sessions return `AlreadySettled` rather than
    /// re-applying a second proof, so a race between two settlement
    /// submissions resolves idempotently (spec §8).
    pub fn settle(
        env: Env,
        session_id: u32,
        proof_blob: Bytes,
        pubs: PublicInputs,
    ) -> Result<(), Error> {
        let mut session = Self::require_session(&env, session_id)?;
        match session.phase() {
            Phase::Settled => return Err(Error::AlreadySettled),
            Phase::Revealed => {}
            _ => return Err(Error::NotRevealed),
        }

        let matches = session.commit1 == pubs.commit1
            && session.commit2.as_ref() == Some(&pubs.commit2)
            && session.seed1.as_ref() == Some(&pubs.seed1)
            && session.seed2.as_ref() == Some(&pubs.seed2)
            && session_id == pubs.session_id;
        if !matches {
            return Err(Error::InputMismatch);
        }
        if pubs.winner != 1 && pubs.winner != 2 {
            return Err(Error::InputMismatch);
        }

        let public_inputs = encode_public_inputs(
            &env,
            &pubs.seed1,
            &pubs.seed2,
            &pubs.commit1,
            &pubs.commit2,
            pubs.session_id,
            pubs.winner,
        );
        let verifier_addr: Address = env
            .storage()
            .instance()
            .get(&DataKey::VerifierAddress)
            .expect("verifier missing");
        let verifier = VerifierClient::new(&env, &verifier_addr);
        if !verifier.verify_with_stored_vk(&proof_blob, &public_inputs) {
            return Err(Error::InvalidProof);
        }

        session.winner = pubs.winner;
        Self::save_session(&env, session_id, &session);
        Ok(())
    }

    /// `get(sid)`: a read-only snapshot, no access control (spec §4.5).
    pub fn get(env: Env, session_id: u32) -> Result<Session, Error> {
        Self::require_session(&env, session_id)
    }

    pub fn get_admin(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin missing")
    }

    pub fn set_admin(env: Env, new_admin: Address) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin missing");
        admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &new_admin);
    }

    pub fn get_verifier(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::VerifierAddress)
            .expect("verifier missing")
    }

    pub fn set_verifier(env: Env, new_verifier: Address) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin missing");
        admin.require_auth();
        env.storage()
            .instance()
            .set(&DataKey::VerifierAddress, &new_verifier);
    }

    pub fn upgrade(env: Env, new_wasm_hash: BytesN<32>) {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin missing");
        admin.require_auth();
        env.deployer().update_current_contract_wasm(new_wasm_hash);
    }

    fn load_session(env: &Env, session_id: u32) -> Option<Session> {
        env.storage().temporary().get(&DataKey::Session(session_id))
    }

    fn require_session(env: &Env, session_id: u32) -> Result<Session, Error> {
        Self::load_session(env, session_id).ok_or(Error::SessionNotFound)
    }

    fn save_session(env: &Env, session_id: u32, session: &Session) {
        let key = DataKey::Session(session_id);
        env.storage().temporary().set(&key, session);
        env.storage()
            .temporary()
            .extend_ttl(&key, SESSION_TTL_LEDGERS, SESSION_TTL_LEDGERS);
    }
}
