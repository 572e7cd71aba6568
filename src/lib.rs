//! SAP-style iterated password hashing
//!
//! This crate reproduces the legacy SAP password digest: a salted hash
//! chain in which every round hashes the password concatenated with the
//! previous digest. It is meant for reading and checking existing hashes,
//! not as a recommendation for new password storage.
//!
//! The focus is on **bit-exact output and predictable memory use**. The
//! chain runs thousands of rounds against a single scratch region sized once
//! per call, without allocating inside the round loop.
//!
//! # Module overview
//!
//! - `hash`
//!   The closed set of supported digest functions (SHA-1, SHA-256,
//!   SHA-384, SHA-512), their output sizes, and one-shot digest dispatch
//!   into caller-provided buffers. The digest primitives come from the
//!   RustCrypto `sha1` and `sha2` crates.
//!
//! - `derivation`
//!   The SAP hash chain itself: parameters, the result type, the
//!   scratch-region strategies (heap, pooled, stack) and the round loop.
//!   A naive re-concatenating form is kept as the reference every other
//!   strategy must match.
//!
//! # Example
//!
//! ```rust
//! use saphash::derivation::{SapParams, sap_hash};
//! use saphash::hash::HashAlgorithm;
//!
//! let salt = hex::decode("0f8e113ec6398b9315ff4af3ac5cd625").unwrap();
//! let params = SapParams::new(HashAlgorithm::Sha1, 5000);
//!
//! let hashed = sap_hash("Klartext-Kennwort", &salt, &params).unwrap();
//! assert_eq!(hashed.to_hex(), "ca9c3dedfc17a8bd76346b1780e0f284db57572a");
//! ```
//!
//! # Design goals
//!
//! - No heap allocations inside the round loop
//! - One round loop shared by every scratch strategy
//! - Closed algorithm set, resolved at compile time
//! - Identical output regardless of strategy
//!
//! This crate performs no constant-time comparison and defines no storage
//! format for hashes.

pub mod derivation;
pub mod hash;
