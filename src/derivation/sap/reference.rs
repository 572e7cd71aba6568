//! Allocation-heavy reference form of the SAP hash chain.
//!
//! Builds a fresh `password || tail` vector and a fresh digest every round,
//! exactly as the construction is written down. It is slow on purpose and
//! serves as the baseline the scratch-buffer engine is checked and
//! benchmarked against.

use super::HashedPassword;
use super::core::SapError;
use super::params::SapParams;

/// Computes the SAP hash chain by re-concatenating the input every round.
pub fn sap_hash_naive(
    password: &str,
    salt: &[u8],
    params: &SapParams,
) -> Result<HashedPassword, SapError> {
    params.validate()?;

    let password = password.as_bytes();
    let algorithm = params.algorithm;

    let mut hash = algorithm.digest(&[password, salt].concat());

    for _ in 1..params.rounds {
        hash = algorithm.digest(&[password, &hash[..]].concat());
    }

    Ok(HashedPassword::new(hash, salt.to_vec(), *params))
}
