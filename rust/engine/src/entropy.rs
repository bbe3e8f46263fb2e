use std::fmt::Write as _;

use rand::rngs::OsRng;
use rand::{SeedableRng, TryRngCore};
use rand_chacha::ChaCha20Rng;

use crate::errors::EngineError;

/// Bytes of raw entropy behind each token.
const ENTROPY_BYTES: usize = 32;

fn fresh_hex() -> Result<String, EngineError> {
    let mut bytes = [0u8; ENTROPY_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| EngineError::EntropyUnavailable(e.to_string()))?;
    let mut out = String::with_capacity(ENTROPY_BYTES * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    Ok(out)
}

/// Fresh server-side entropy token from the OS CSPRNG.
///
/// Each call draws independently; there is no shared state that could
/// correlate outputs across concurrent callers.
///
/// # Errors
///
/// Returns [`EngineError::EntropyUnavailable`] if the OS entropy source
/// cannot be read.
pub fn server_entropy() -> Result<String, EngineError> {
    fresh_hex()
}

/// Fresh client-side entropy token, same generator as [`server_entropy`]
/// but always a separate, independent draw.
///
/// # Errors
///
/// Returns [`EngineError::EntropyUnavailable`] if the OS entropy source
/// cannot be read.
pub fn client_entropy() -> Result<String, EngineError> {
    fresh_hex()
}

/// Commitment hash over an entropy token. Published before generation so
/// the raw value can be revealed and re-verified afterwards.
pub fn commitment(entropy: &str) -> String {
    blake3::hash(entropy.as_bytes()).to_hex().to_string()
}

/// Checks a revealed entropy value against its published commitment.
pub fn verify_commitment(commitment_hex: &str, revealed: &str) -> bool {
    commitment(revealed) == commitment_hex
}

/// Deterministic draw RNG from the combined revealed entropy values.
///
/// Server and client tokens are mixed through blake3 into a ChaCha20 seed,
/// so any party holding both revealed values can re-derive the exact RNG
/// and re-check the draw. The draw itself lives upstream.
pub fn fair_rng(server: &str, client: &str) -> ChaCha20Rng {
    let mixed = blake3::hash(format!("{}:{}", server, client).as_bytes());
    ChaCha20Rng::from_seed(*mixed.as_bytes())
}
