// libnfp/src/crypto/mod.rs

/// Test double for the cipher.
pub mod mock;
/// Cipher trait and its error type.
pub mod traits;

pub use mock::MockCrypto;
pub use traits::{AmiiboCrypto, CryptoError, NoKeys};
