#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, symbol_short, Address, Bytes, BytesN,
    Env, Symbol,
};

use duel_verifier_core::verify_packed_proof;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Error {
    NotInitialized = 1,
    NotAdmin = 2,
    InvalidProof = 3,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Vk,
    VkHash,
    Verified(BytesN<32>),
}

#[contract]
pub struct DuelVerifierContract;

#[contractimpl]
impl DuelVerifierContract {
    fn key_vk() -> Symbol {
        symbol_short!("vk")
    }

    fn key_vk_hash() -> Symbol {
        symbol_short!("vkhash")
    }

    pub fn __constructor(env: Env, admin: Address) {
        env.storage().instance().set(&DataKey::Admin, &admin);
    }

    /// Stores an `ark-serialize` canonical-compressed Groth16 verifying key
    /// (spec §6) and returns its keccak256 hash.
    pub fn set_vk(env: Env, vk_bytes: Bytes) -> BytesN<32> {
        let admin: Address = env
            .storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("admin not set");
        admin.require_auth();

        let vk_hash: BytesN<32> = env.crypto().keccak256(&vk_bytes).into();
        env.storage().instance().set(&Self::key_vk(), &vk_bytes);
        env.storage().instance().set(&Self::key_vk_hash(), &vk_hash);
        env.storage().instance().set(&DataKey::Vk, &vk_bytes);
        env.storage().instance().set(&DataKey::VkHash, &vk_hash);
        vk_hash
    }

    /// Checks a Groth16 proof against the stored verifying key (spec §4.5,
    /// §6): `proof_blob` is `pi_a (64) || pi_b (128) || pi_c (64)`,
    /// `public_inputs` is six 32-byte big-endian field elements.
    ///
    /// Returns `false` rather than panicking on a bad or malformed proof —
    /// a deliberate departure from this contract's teacher, which panics on
    /// a malformed blob. `duel-game::settle` needs to surface a catchable
    /// `Error::InvalidProof` rather than aborting the whole transaction, so
    /// every failure path here is an ordinary `false`.
    pub fn verify_with_stored_vk(env: Env, proof_blob: Bytes, public_inputs: Bytes) -> bool {
        let vk_bytes: Bytes = match env.storage().instance().get(&Self::key_vk()) {
            Some(vk) => vk,
            None => return false,
        };

        let ok = verify_packed_proof(&env, &vk_bytes, &proof_blob, &public_inputs).is_ok();
        if ok {
            let proof_id: BytesN<32> = env.crypto().keccak256(&proof_blob).into();
            env.storage()
                .instance()
                .set(&DataKey::Verified(proof_id), &true);
        }
        ok
    }

    pub fn is_verified(env: Env, proof_id: BytesN<32>) -> bool {
        env.storage()
            .instance()
            .get(&DataKey::Verified(proof_id))
            .unwrap_or(false)
    }

    pub fn get_vk_hash(env: Env) -> Option<BytesN<32>> {
        env.storage().instance().get(&Self::key_vk_hash())
    }
}

#[cfg(test)]
mod test;
