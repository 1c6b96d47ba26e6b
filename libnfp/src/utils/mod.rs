// libnfp/src/utils/mod.rs

//! Small helpers shared across the crate: hex rendering for logs and the
//! random filler written into scrubbed tag fields.

pub mod hex;
pub mod random;

pub use hex::*;
pub use random::*;
