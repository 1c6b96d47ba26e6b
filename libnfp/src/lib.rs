// libnfp/src/lib.rs

//! libnfp
//!
//! Emulated NFP (amiibo) reader slots: the NTAG215 image codec, the
//! per-device tag state machine and the registry that hosts expose to
//! guest applications.
#![warn(missing_docs)]

/// Controller side: input events, signals and the persist hook.
pub mod bridge;
pub mod config;
pub mod constants;
/// Amiibo cipher capability.
pub mod crypto;
pub mod device;
pub mod error;
/// Common re-exports for hosts.
pub mod prelude;
pub mod services;
pub mod tag;
pub mod test_support;
/// Typed values shared across the crate.
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are reachable without a module path.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
