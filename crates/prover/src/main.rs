//! `duel-prover` — seed generation, witness/proof generation, and offline
//! verification for the card duel (spec §6 "CLI / build surface").

mod io;

use anyhow::{Context, Result};
use ark_bn254::Fr;
use clap::{Parser, Subcommand};
use rand::rngs::OsRng;
use tracing::info;

use duel_circuit::payload::ProofPayload;
use duel_circuit::prover;
use duel_circuit::witness::Witness;
use duel_core::field::{fr_from_hex_be, fr_to_bytes_be};
use duel_core::seed::Seed;
use duel_core::simulate::simulate;

#[derive(Parser)]
#[command(name = "duel-prover")]
#[command(about = "Seed generation, witness/proof generation, and offline verification for the card duel")]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sample a fresh seed and print its Poseidon commitment.
    GenSeed,

    /// Run the Groth16 trusted setup for the fixed circuit shape and write
    /// the proving/verifying keys to disk.
    Setup {
        /// Output path for the serialized proving key.
        #[arg(long, default_value = "duel.pk")]
        proving_key: String,

        /// Output path for the serialized verifying key.
        #[arg(long, default_value = "duel.vk")]
        verifying_key: String,
    },

    /// Simulate a session and produce a Groth16 proof of the declared
    /// winner, writing the wire-encoded proof payload to stdout (hex).
    Prove {
        /// Hex-encoded seed1.
        #[arg(long)]
        seed1: String,

        /// Hex-encoded seed2.
        #[arg(long)]
        seed2: String,

        /// Session id, as a decimal integer.
        #[arg(long)]
        session_id: u64,

        /// Path to the serialized proving key from `setup`.
        #[arg(long, default_value = "duel.pk")]
        proving_key: String,
    },

    /// Verify a hex-encoded proof payload against a verifying key.
    Verify {
        /// Hex-encoded proof payload, as produced by `prove`.
        #[arg(long)]
        payload: String,

        /// Path to the serialized verifying key from `setup`.
        #[arg(long, default_value = "duel.vk")]
        verifying_key: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::GenSeed => gen_seed(),
        Commands::Setup {
            proving_key,
            verifying_key,
        } => setup(&proving_key, &verifying_key),
        Commands::Prove {
            seed1,
            seed2,
            session_id,
            proving_key,
        } => prove(&seed1, &seed2, session_id, &proving_key),
        Commands::Verify {
            payload,
            verifying_key,
        } => verify(&payload, &verifying_key),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("duel_prover={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn gen_seed() -> Result<()> {
    let mut rng = OsRng;
    let seed = Seed::generate(&mut rng);
    let output = serde_json::json!({
        "seed": hex::encode(seed.to_bytes_be()),
        "commitment": hex::encode(fr_to_bytes_be(&seed.commitment())),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn setup(proving_key_path: &str, verifying_key_path: &str) -> Result<()> {
    info!("running circuit-specific trusted setup");
    let s1 = Seed::from_fr(Fr::from(1u64));
    let s2 = Seed::from_fr(Fr::from(2u64));
    let witness =
        Witness::build(&s1, &s2, Fr::from(1u64)).context("deriving the fixture witness")?;
    let mut rng = OsRng;
    let pk = prover::setup(witness, &mut rng).context("Groth16 setup")?;
    io::write_proving_key(proving_key_path, &pk)?;
    io::write_verifying_key(verifying_key_path, &pk.vk)?;
    info!(proving_key = proving_key_path, verifying_key = verifying_key_path, "wrote keys");
    Ok(())
}

fn prove(seed1_hex: &str, seed2_hex: &str, session_id: u64, proving_key_path: &str) -> Result<()> {
    let seed1 = Seed::from_fr(fr_from_hex_be(seed1_hex).context("parsing seed1")?);
    let seed2 = Seed::from_fr(fr_from_hex_be(seed2_hex).context("parsing seed2")?);
    let session_id_fr = Fr::from(session_id);

    info!("running the simulator to determine the declared winner");
    let result = simulate(&seed1, &seed2, session_id_fr).context("simulating the game")?;
    let witness =
        Witness::build(&seed1, &seed2, session_id_fr).context("building the circuit witness")?;

    let pk = io::read_proving_key(proving_key_path)?;
    let mut rng = OsRng;
    let proof = prover::prove(
        &pk,
        &seed1,
        &seed2,
        session_id_fr,
        result.winner,
        witness,
        &mut rng,
    )
    .context("generating the Groth16 proof")?;

    let public_inputs = prover::public_inputs(
        &seed1,
        &seed2,
        seed1.commitment(),
        seed2.commitment(),
        session_id_fr,
        result.winner,
    );
    let payload = ProofPayload {
        proof,
        public_inputs,
    };
    println!("{}", hex::encode(payload.to_bytes()));
    info!(winner = result.winner, end_reason = ?result.end_reason, "proof ready");
    Ok(())
}

fn verify(payload_hex: &str, verifying_key_path: &str) -> Result<()> {
    let bytes = hex::decode(payload_hex).context("decoding proof payload hex")?;
    let payload = ProofPayload::from_bytes(&bytes).context("parsing proof payload")?;
    let vk = io::read_verifying_key(verifying_key_path)?;
    let pvk = prover::prepare_verifying_key(&vk);
    let ok = duel_circuit::verifier::verify(&pvk, &payload.proof, &payload.public_inputs)
        .context("running the verifier")?;
    println!("{}", if ok { "valid" } else { "invalid" });
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}
