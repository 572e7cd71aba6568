use std::fmt;

use super::core::{SapError, sap_hash};
use super::params::SapParams;
use crate::hash::HashAlgorithm;

/// The result of a SAP hash chain computation.
///
/// Holds the final digest together with everything needed to recompute
/// it: the salt exactly as supplied, the algorithm and the round count.
/// The digest length always equals `algorithm().digest_len()`.
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    password_hash: Vec<u8>,
    salt: Vec<u8>,
    params: SapParams,
}

impl HashedPassword {
    pub(crate) fn new(password_hash: Vec<u8>, salt: Vec<u8>, params: SapParams) -> Self {
        debug_assert_eq!(password_hash.len(), params.algorithm.digest_len());
        Self {
            password_hash,
            salt,
            params,
        }
    }

    /// The final digest.
    pub fn password_hash(&self) -> &[u8] {
        &self.password_hash
    }

    /// The salt used in the first round.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn rounds(&self) -> u32 {
        self.params.rounds
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.params.algorithm
    }

    pub fn params(&self) -> SapParams {
        self.params
    }

    /// Lowercase hexadecimal encoding of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.password_hash)
    }

    /// Recomputes the chain for `password` with this hash's salt and
    /// parameters and reports whether the digests match.
    ///
    /// The comparison is not constant-time.
    pub fn verify(&self, password: &str) -> Result<bool, SapError> {
        let candidate = sap_hash(password, &self.salt, &self.params)?;
        Ok(candidate.password_hash == self.password_hash)
    }

    /// Splits the result into `(password_hash, salt, rounds)`.
    pub fn into_parts(self) -> (Vec<u8>, Vec<u8>, u32) {
        (self.password_hash, self.salt, self.params.rounds)
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("password_hash", &self.to_hex())
            .field("salt", &hex::encode(&self.salt))
            .field("algorithm", &self.params.algorithm)
            .field("rounds", &self.params.rounds)
            .finish()
    }
}
