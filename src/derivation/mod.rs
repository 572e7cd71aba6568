//! Password derivation schemes.
//!
//! Currently provides the legacy SAP password hash chain.

pub mod sap;

pub use sap::core::{
    SapError, chain_into, sap_hash, sap_hash_bytes, sap_hash_strategy, sap_hash_unrolled_with,
    sap_hash_with,
};
pub use sap::params::SapParams;
pub use sap::reference::sap_hash_naive;
pub use sap::scratch::{HeapScratch, PooledScratch, ScratchBuffer, StackScratch};
pub use sap::{HashedPassword, Strategy};
