#![cfg(test)]
extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Bytes, BytesN, Env};

use crate::{DuelVerifierContract, DuelVerifierContractClient};

fn fixed_blob(env: &Env, len: usize, fill: u8) -> Bytes {
    Bytes::from_slice(env, &std::vec![fill; len])
}

#[test]
fn set_vk_and_verify_roundtrip() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(DuelVerifierContract, (admin.clone(),));
    let client = DuelVerifierContractClient::new(&env, &contract_id);

    let vk = Bytes::from_array(&env, b"fake-vk-bytes");
    let vk_hash = client.set_vk(&vk);
    assert_eq!(client.get_vk_hash(), Some(vk_hash));

    // Without a real VK, the default (non-`real-verifier`) build only
    // checks the wire-format lengths and accepts anything well-formed.
    let proof = fixed_blob(&env, 256, 0xAB);
    let public_inputs = fixed_blob(&env, 192, 0x01);
    assert!(client.verify_with_stored_vk(&proof, &public_inputs));

    let proof_id: BytesN<32> = env.crypto().keccak256(&proof).into();
    assert!(client.is_verified(&proof_id));
}

#[test]
fn rejects_wrong_length_proof() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(DuelVerifierContract, (admin.clone(),));
    let client = DuelVerifierContractClient::new(&env, &contract_id);

    client.set_vk(&Bytes::from_array(&env, b"fake-vk-bytes"));

    let short_proof = Bytes::from_array(&env, b"too-short");
    let public_inputs = fixed_blob(&env, 192, 0x01);
    assert!(!client.verify_with_stored_vk(&short_proof, &public_inputs));
}

#[test]
fn rejects_without_vk() {
    let env = Env::default();
    env.mock_all_auths();

    let admin = Address::generate(&env);
    let contract_id = env.register(DuelVerifierContract, (admin.clone(),));
    let client = DuelVerifierContractClient::new(&env, &contract_id);

    let proof = fixed_blob(&env, 256, 0xAB);
    let public_inputs = fixed_blob(&env, 192, 0x01);
    assert!(!client.verify_with_stored_vk(&proof, &public_inputs));
}
