//! Key (de)serialization for `duel-prover`, via `ark-serialize`'s canonical
//! compressed encoding.

use std::fs;

use anyhow::{Context, Result};
use ark_bn254::Bn254;
use ark_groth16::{ProvingKey, VerifyingKey};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

pub fn write_proving_key(path: &str, pk: &ProvingKey<Bn254>) -> Result<()> {
    let mut bytes = Vec::new();
    pk.serialize_compressed(&mut bytes)
        .context("serializing proving key")?;
    fs::write(path, bytes).with_context(|| format!("writing proving key to {path}"))
}

pub fn read_proving_key(path: &str) -> Result<ProvingKey<Bn254>> {
    let bytes = fs::read(path).with_context(|| format!("reading proving key from {path}"))?;
    ProvingKey::deserialize_compressed(&bytes[..]).context("deserializing proving key")
}

pub fn write_verifying_key(path: &str, vk: &VerifyingKey<Bn254>) -> Result<()> {
    let mut bytes = Vec::new();
    vk.serialize_compressed(&mut bytes)
        .context("serializing verifying key")?;
    fs::write(path, bytes).with_context(|| format!("writing verifying key to {path}"))
}

pub fn read_verifying_key(path: &str) -> Result<VerifyingKey<Bn254>> {
    let bytes = fs::read(path).with_context(|| format!("reading verifying key from {path}"))?;
    VerifyingKey::deserialize_compressed(&bytes[..]).context("deserializing verifying key")
}
