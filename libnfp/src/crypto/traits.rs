// libnfp/src/crypto/traits.rs

use thiserror::Error;

use crate::tag::{EncryptedTagRecord, TagRecord};

/// Failure reported by an amiibo cipher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// No key material loaded
    #[error("amiibo keys are not available")]
    KeysUnavailable,

    /// HMAC check failed
    #[error("tag signature mismatch")]
    SignatureMismatch,

    /// Any other cipher failure
    #[error("cipher failure: {0}")]
    Cipher(String),
}

/// The amiibo cipher, consumed as an opaque capability.
///
/// Implementations must be stateless from the device's point of view; a
/// single instance is shared by every device in a registry.
pub trait AmiiboCrypto: Send + Sync {
    /// Cipher and sign a plain record into its on-tag form.
    fn encode(&self, plain: &TagRecord) -> Result<EncryptedTagRecord, CryptoError>;

    /// Verify and decipher an on-tag image.
    fn decode(&self, encrypted: &EncryptedTagRecord) -> Result<TagRecord, CryptoError>;

    /// Whether the image looks like an amiibo. The default checks the
    /// cleartext layout only.
    fn is_valid(&self, encrypted: &EncryptedTagRecord) -> bool {
        encrypted.is_layout_valid()
    }

    /// Whether key material is loaded. Without keys tags mount read-only.
    fn keys_available(&self) -> bool;
}

/// Cipher used when no key material was supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKeys;

impl AmiiboCrypto for NoKeys {
    fn encode(&self, _plain: &TagRecord) -> Result<EncryptedTagRecord, CryptoError> {
        Err(CryptoError::KeysUnavailable)
    }

    fn decode(&self, _encrypted: &EncryptedTagRecord) -> Result<TagRecord, CryptoError> {
        Err(CryptoError::KeysUnavailable)
    }

    fn keys_available(&self) -> bool {
        false
    }
}
