//! Hash algorithms accepted by the password chain.
//!
//! The digest primitives themselves come from the RustCrypto `sha1` and
//! `sha2` crates. This module only describes the closed set of variants the
//! chain supports, resolves their output sizes, and dispatches a one-shot
//! digest into a caller-provided buffer.

use std::fmt;
use std::str::FromStr;

use digest::{Digest, Output};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use thiserror::Error;

/// Largest digest produced by any [`HashAlgorithm`] (SHA-512).
pub const MAX_DIGEST_LEN: usize = 64;

/// A digest function the chain engine can drive.
///
/// The engine needs nothing beyond the output length and a way to hash a
/// byte slice into a buffer of exactly that length.
pub trait ChainDigest {
    /// Output length in bytes. Must not exceed [`MAX_DIGEST_LEN`].
    fn output_len(&self) -> usize;

    /// Hashes `input` into `out`, where `out.len() == self.output_len()`.
    fn digest_into(&self, input: &[u8], out: &mut [u8]);
}

/// Returned when a digest width or name does not map to a [`HashAlgorithm`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported hash algorithm: {0}")]
pub struct UnsupportedAlgorithm(pub String);

/// The closed set of hash functions usable in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashAlgorithm {
    /// SHA-1, 160-bit digest.
    #[default]
    Sha1,
    /// SHA-256, 256-bit digest.
    Sha256,
    /// SHA-384, 384-bit digest.
    Sha384,
    /// SHA-512, 512-bit digest.
    Sha512,
}

impl HashAlgorithm {
    /// Every supported variant, smallest digest first.
    pub const ALL: [HashAlgorithm; 4] = [
        HashAlgorithm::Sha1,
        HashAlgorithm::Sha256,
        HashAlgorithm::Sha384,
        HashAlgorithm::Sha512,
    ];

    /// Digest length in bytes.
    #[inline]
    pub const fn digest_len(self) -> usize {
        match self {
            HashAlgorithm::Sha1 => 20,
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Digest length in bits.
    #[inline]
    pub const fn bits(self) -> u32 {
        (self.digest_len() * 8) as u32
    }

    /// Canonical lowercase name, e.g. `"sha256"`.
    pub const fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Sha1 => "sha1",
            HashAlgorithm::Sha256 => "sha256",
            HashAlgorithm::Sha384 => "sha384",
            HashAlgorithm::Sha512 => "sha512",
        }
    }

    /// Computes the digest of `input` into `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out.len()` differs from [`HashAlgorithm::digest_len`].
    /// The chain engine always sizes the buffer from the same algorithm.
    #[inline]
    pub fn digest_into(self, input: &[u8], out: &mut [u8]) {
        match self {
            HashAlgorithm::Sha1 => one_shot::<Sha1>(input, out),
            HashAlgorithm::Sha256 => one_shot::<Sha256>(input, out),
            HashAlgorithm::Sha384 => one_shot::<Sha384>(input, out),
            HashAlgorithm::Sha512 => one_shot::<Sha512>(input, out),
        }
    }

    /// Computes the digest of `input` into a fresh vector.
    pub fn digest(self, input: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; self.digest_len()];
        self.digest_into(input, &mut out);
        out
    }
}

#[inline(always)]
fn one_shot<D: Digest>(input: &[u8], out: &mut [u8]) {
    let mut hasher = D::new();
    hasher.update(input);
    hasher.finalize_into(Output::<D>::from_mut_slice(out));
}

impl ChainDigest for HashAlgorithm {
    #[inline]
    fn output_len(&self) -> usize {
        self.digest_len()
    }

    #[inline]
    fn digest_into(&self, input: &[u8], out: &mut [u8]) {
        HashAlgorithm::digest_into(*self, input, out)
    }
}

impl TryFrom<u32> for HashAlgorithm {
    type Error = UnsupportedAlgorithm;

    /// Resolves a digest width in bits.
    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            160 => Ok(HashAlgorithm::Sha1),
            256 => Ok(HashAlgorithm::Sha256),
            384 => Ok(HashAlgorithm::Sha384),
            512 => Ok(HashAlgorithm::Sha512),
            other => Err(UnsupportedAlgorithm(format!("{other}-bit digest"))),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = UnsupportedAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha1" | "sha-1" => Ok(HashAlgorithm::Sha1),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            "sha384" | "sha-384" => Ok(HashAlgorithm::Sha384),
            "sha512" | "sha-512" => Ok(HashAlgorithm::Sha512),
            _ => Err(UnsupportedAlgorithm(s.to_owned())),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
