//! Parameter definitions and validation for the SAP hash chain.

use super::core::SapError;
use crate::hash::HashAlgorithm;

/// Round count used when none is given.
pub const DEFAULT_ROUNDS: u32 = 1000;

/// Configuration for one SAP hash chain computation.
///
/// The pair fully determines the output for a given password and salt, so
/// it must be stored alongside any hash that needs to be verified later.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SapParams {
    /// Digest function applied in every round.
    pub algorithm: HashAlgorithm,
    /// Number of digest applications (minimum 1).
    pub rounds: u32,
}

impl SapParams {
    /// Creates parameters for `algorithm` with `rounds` iterations.
    pub const fn new(algorithm: HashAlgorithm, rounds: u32) -> Self {
        Self { algorithm, rounds }
    }

    pub const fn with_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub const fn with_rounds(mut self, rounds: u32) -> Self {
        self.rounds = rounds;
        self
    }

    pub(crate) fn validate(&self) -> Result<(), SapError> {
        if self.rounds < 1 {
            return Err(SapError::InvalidRounds(self.rounds));
        }

        Ok(())
    }
}

impl Default for SapParams {
    /// Default parameters: SHA-1, 1000 rounds.
    fn default() -> Self {
        Self {
            algorithm: HashAlgorithm::Sha1,
            rounds: DEFAULT_ROUNDS,
        }
    }
}
