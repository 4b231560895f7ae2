//! Pure helpers for the session state machine: the on-chain Poseidon
//! commitment check and the public-input wire encoding `duel-verifier`
//! expects (spec §4.1, §6).

use soroban_sdk::{vec, Bytes, BytesN, Env};

pub const SESSION_TTL_LEDGERS: u32 = 518_400;

/// `Poseidon1(seed)`, using the same circomlib-parameterized Poseidon
/// `duel_core::poseidon::poseidon1` uses off-chain — every implementation
/// of the protocol must agree on this hash bit-for-bit (spec §4.1).
pub fn commit(env: &Env, seed: &BytesN<32>) -> BytesN<32> {
    soroban_poseidon::hash(env, vec![env, seed.clone()])
}

pub fn opens(env: &Env, seed: &BytesN<32>, commit_value: &BytesN<32>) -> bool {
    &commit(env, seed) == commit_value
}

/// Packs the six settlement public inputs into the wire layout
/// `duel-verifier` expects: six 32-byte big-endian field elements,
/// `seed1 || seed2 || commit1 || commit2 || session_id || winner` (spec §6).
pub fn encode_public_inputs(
    env: &Env,
    seed1: &BytesN<32>,
    seed2: &BytesN<32>,
    commit1: &BytesN<32>,
    commit2: &BytesN<32>,
    session_id: u32,
    winner: u32,
) -> Bytes {
    let mut out = Bytes::new(env);
    out.append(&Bytes::from(seed1.clone()));
    out.append(&Bytes::from(seed2.clone()));
    out.append(&Bytes::from(commit1.clone()));
    out.append(&Bytes::from(commit2.clone()));
    out.append(&encode_u32_as_field(env, session_id));
    out.append(&encode_u32_as_field(env, winner));
    out
}

fn encode_u32_as_field(env: &Env, value: u32) -> Bytes {
    let mut bytes = [0u8; 32];
    bytes[28..32].copy_from_slice(&value.to_be_bytes());
    Bytes::from_array(env, &bytes)
}
