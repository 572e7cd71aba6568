//! SAP-style iterated password hash.
//!
//! This is the legacy chained digest used for SAP password hashes. It is
//! not a modern password hashing function: there is no memory hardness and
//! the only cost knob is the round count. It exists to reproduce existing
//! hashes bit-for-bit.
//!
//! # Algorithm
//!
//! With `P` the UTF-8 bytes of the password:
//!
//! ```text
//! D1 = H(P || salt)
//! Di = H(P || D(i-1))     for 2 <= i <= rounds
//! ```
//!
//! The result is `D(rounds)`. The concatenation order (password first) is
//! fixed by the format.
//!
//! # Memory Organization
//!
//! One input buffer of `|P| + max(|salt|, digest_len)` bytes is acquired per
//! call. `P` is copied into its head once; each round rewrites only the
//! tail and hashes the correctly sized prefix into a digest buffer on the
//! stack. Nothing is allocated inside the round loop.
//!
//! Where that input buffer lives is a [`ScratchBuffer`](scratch::ScratchBuffer)
//! strategy:
//! - **Heap**: a plain `Vec<u8>` per call.
//! - **Pooled**: a buffer rented from a process-wide pool and returned on drop.
//! - **Stack**: inline storage, spilling to the heap for very long passwords.
//!
//! All strategies, and both the sequential and unrolled round schedules,
//! produce identical output.

pub mod core;
mod hashed;
pub mod params;
pub mod reference;
pub mod scratch;

pub use self::core::Strategy;
pub use hashed::HashedPassword;
