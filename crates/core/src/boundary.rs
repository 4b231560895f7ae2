//! Interfaces for the external collaborators named in spec §4.6.
//!
//! The lobby/relay and the wallet/RPC layer are explicitly out of scope
//! (spec §1): this module only fixes the shape the core expects of them, so
//! `duel-prover` and tests can stand in a fake without pulling in a real
//! network stack. Nothing in `duel-core` or `duel-circuit` calls these
//! traits — they exist for callers that wire the core into a live client.

use ark_bn254::Fr;

/// A best-effort single-room broker that introduces two clients and hands
/// back a shared session id.
pub trait LobbyClient {
    type Error;

    fn find_opponent(&mut self) -> Result<u32, Self::Error>;
}

/// Per-session message kinds the relay broadcasts for UI synchrony (spec
/// §4.6). The chain remains authoritative regardless of relay liveness.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayMessage {
    Draw { position: u8 },
    NextRound { round_index: u8 },
    StateSnapshot { state_commitment: [u8; 32] },
}

/// A best-effort broadcast channel for one session. Implementations are
/// expected to rate-limit to roughly 10 messages/second and cap their event
/// log around 100 entries (spec §5) — this trait does not enforce either,
/// since enforcement is a property of the concrete relay, not of callers.
pub trait RelayClient {
    type Error;

    fn send(&mut self, session_id: u32, message: RelayMessage) -> Result<(), Self::Error>;

    /// Non-blocking poll for the next message, if any has arrived.
    fn poll(&mut self, session_id: u32) -> Result<Option<RelayMessage>, Self::Error>;
}

/// Minimal surface the core needs from the chain to decide what to do next:
/// read the current session snapshot and submit a settlement. Real wallet
/// signing and RPC retry policy live entirely outside the core.
pub trait ChainClient {
    type Error;
    type Snapshot;

    fn get_session(&self, session_id: u32) -> Result<Self::Snapshot, Self::Error>;

    fn submit_settlement(
        &mut self,
        session_id: u32,
        proof: &[u8],
        public_inputs: [Fr; 6],
    ) -> Result<(), Self::Error>;
}
