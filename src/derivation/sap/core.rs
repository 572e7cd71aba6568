use std::str::Utf8Error;

use log::debug;
use thiserror::Error;

use super::HashedPassword;
use super::params::SapParams;
use super::reference::sap_hash_naive;
use super::scratch::{HeapScratch, PooledScratch, ScratchBuffer, StackScratch};
use crate::hash::{ChainDigest, MAX_DIGEST_LEN, UnsupportedAlgorithm};

/// Number of rounds executed per iteration of the unrolled schedule.
const UNROLL: u32 = 4;

/// Errors that can occur while computing a SAP hash chain.
#[derive(Debug, Error)]
pub enum SapError {
    /// The round count was zero.
    #[error("round count must be at least 1, got {0}")]
    InvalidRounds(u32),
    /// A digest width or name did not resolve to a supported algorithm.
    #[error(transparent)]
    UnsupportedAlgorithm(#[from] UnsupportedAlgorithm),
    /// The password bytes are not valid UTF-8.
    #[error("password is not valid UTF-8: {0}")]
    EncodingError(#[from] Utf8Error),
}

/// Execution strategy for a chain computation.
///
/// Every strategy produces identical output; they differ only in where the
/// scratch region lives and how the round loop is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Strategy {
    /// Re-concatenates and allocates a fresh input every round.
    Naive,
    /// Heap scratch region, sequential rounds.
    #[default]
    Heap,
    /// Pool-rented scratch region, sequential rounds.
    Pooled,
    /// Inline stack scratch region, sequential rounds.
    Stack,
    /// Heap scratch region, rounds unrolled by four.
    Unrolled,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Naive,
        Strategy::Heap,
        Strategy::Pooled,
        Strategy::Stack,
        Strategy::Unrolled,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Heap => "heap",
            Strategy::Pooled => "pooled",
            Strategy::Stack => "stack",
            Strategy::Unrolled => "unrolled",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schedule {
    Sequential,
    Unrolled,
}

/// Computes the SAP hash chain of a password.
///
/// # Arguments
///
/// * `password` - The clear-text password, hashed as its UTF-8 bytes
/// * `salt` - The salt mixed into the first round (may be empty)
/// * `params` - Digest algorithm and round count
///
/// # Returns
///
/// The final digest together with the salt and round count, or
/// [`SapError::InvalidRounds`] if `params.rounds` is zero.
///
/// # Example
///
/// ```rust
/// use saphash::derivation::{SapParams, sap_hash};
/// use saphash::hash::HashAlgorithm;
///
/// let salt = [0x0fu8, 0x8e, 0x11, 0x3e];
/// let params = SapParams::new(HashAlgorithm::Sha256, 1000);
///
/// let hashed = sap_hash("secret", &salt, &params).unwrap();
/// assert_eq!(hashed.password_hash().len(), 32);
/// ```
pub fn sap_hash(
    password: &str,
    salt: &[u8],
    params: &SapParams,
) -> Result<HashedPassword, SapError> {
    #[cfg(not(feature = "speed"))]
    let schedule = Schedule::Sequential;

    #[cfg(feature = "speed")]
    let schedule = Schedule::Unrolled;

    hash_with::<HeapScratch>(password, salt, params, schedule)
}

/// Like [`sap_hash`], but accepts the password as raw bytes.
///
/// Fails with [`SapError::EncodingError`] if `password` is not UTF-8.
pub fn sap_hash_bytes(
    password: &[u8],
    salt: &[u8],
    params: &SapParams,
) -> Result<HashedPassword, SapError> {
    let password = std::str::from_utf8(password)?;
    sap_hash(password, salt, params)
}

/// Computes the chain with the scratch region backed by `S`.
pub fn sap_hash_with<S: ScratchBuffer>(
    password: &str,
    salt: &[u8],
    params: &SapParams,
) -> Result<HashedPassword, SapError> {
    hash_with::<S>(password, salt, params, Schedule::Sequential)
}

/// Computes the chain with the scratch region backed by `S`, running the
/// rounds four at a time.
pub fn sap_hash_unrolled_with<S: ScratchBuffer>(
    password: &str,
    salt: &[u8],
    params: &SapParams,
) -> Result<HashedPassword, SapError> {
    hash_with::<S>(password, salt, params, Schedule::Unrolled)
}

/// Computes the chain using a strategy chosen at runtime.
pub fn sap_hash_strategy(
    password: &str,
    salt: &[u8],
    params: &SapParams,
    strategy: Strategy,
) -> Result<HashedPassword, SapError> {
    match strategy {
        Strategy::Naive => sap_hash_naive(password, salt, params),
        Strategy::Heap => sap_hash_with::<HeapScratch>(password, salt, params),
        Strategy::Pooled => sap_hash_with::<PooledScratch>(password, salt, params),
        Strategy::Stack => sap_hash_with::<StackScratch>(password, salt, params),
        Strategy::Unrolled => sap_hash_unrolled_with::<HeapScratch>(password, salt, params),
    }
}

fn hash_with<S: ScratchBuffer>(
    password: &str,
    salt: &[u8],
    params: &SapParams,
    schedule: Schedule,
) -> Result<HashedPassword, SapError> {
    params.validate()?;

    debug!(
        "sap hash: algorithm={}, rounds={}, schedule={:?}",
        params.algorithm, params.rounds, schedule
    );

    let mut out = vec![0u8; params.algorithm.digest_len()];
    run_chain::<_, S>(
        password.as_bytes(),
        salt,
        &params.algorithm,
        params.rounds,
        &mut out,
        schedule,
    )?;

    Ok(HashedPassword::new(out, salt.to_vec(), *params))
}

/// Runs the hash chain over an arbitrary digest function.
///
/// The final digest is written to `out`, which must be exactly
/// `digest.output_len()` bytes. The input scratch region is acquired from
/// `S` once and released before returning.
///
/// # Panics
///
/// Panics if `out.len() != digest.output_len()` or if the digest is longer
/// than [`MAX_DIGEST_LEN`].
pub fn chain_into<D: ChainDigest, S: ScratchBuffer>(
    password: &[u8],
    salt: &[u8],
    digest: &D,
    rounds: u32,
    out: &mut [u8],
) -> Result<(), SapError> {
    run_chain::<D, S>(password, salt, digest, rounds, out, Schedule::Sequential)
}

fn run_chain<D: ChainDigest, S: ScratchBuffer>(
    password: &[u8],
    salt: &[u8],
    digest: &D,
    rounds: u32,
    out: &mut [u8],
    schedule: Schedule,
) -> Result<(), SapError> {
    if rounds < 1 {
        return Err(SapError::InvalidRounds(rounds));
    }

    let pw_len = password.len();
    let digest_len = digest.output_len();
    assert!(digest_len <= MAX_DIGEST_LEN, "digest longer than MAX_DIGEST_LEN");
    assert_eq!(out.len(), digest_len, "output buffer must match digest length");

    let mut scratch = S::acquire(pw_len + salt.len().max(digest_len));
    let input = scratch.as_mut_slice();

    let mut state_buf = [0u8; MAX_DIGEST_LEN];
    let state = &mut state_buf[..digest_len];

    // Round 1: H(P || salt)
    let first_len = pw_len + salt.len();
    input[..pw_len].copy_from_slice(password);
    input[pw_len..first_len].copy_from_slice(salt);
    digest.digest_into(&input[..first_len], state);

    // Rounds 2..=n: H(P || previous)
    let round_len = pw_len + digest_len;
    let mut remaining = rounds - 1;

    if schedule == Schedule::Unrolled {
        while remaining >= UNROLL {
            round(digest, input, pw_len, round_len, state);
            round(digest, input, pw_len, round_len, state);
            round(digest, input, pw_len, round_len, state);
            round(digest, input, pw_len, round_len, state);
            remaining -= UNROLL;
        }
    }

    for _ in 0..remaining {
        round(digest, input, pw_len, round_len, state);
    }

    out.copy_from_slice(state);
    state_buf.fill(0);

    Ok(())
}

#[inline(always)]
fn round<D: ChainDigest>(
    digest: &D,
    input: &mut [u8],
    pw_len: usize,
    round_len: usize,
    state: &mut [u8],
) {
    input[pw_len..round_len].copy_from_slice(state);
    digest.digest_into(&input[..round_len], state);
}
