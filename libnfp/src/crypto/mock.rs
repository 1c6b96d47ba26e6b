// libnfp/src/crypto/mock.rs

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::crypto::traits::{AmiiboCrypto, CryptoError};
use crate::tag::{EncryptedTagRecord, TagRecord};

/// Mock cipher for tests. "Encryption" is the layout reorder alone, so
/// images stay readable in assertions. Counters record calls; the flags are
/// failure hooks that can be flipped while the mock is shared.
#[derive(Debug)]
pub struct MockCrypto {
    keys: AtomicBool,
    /// Testing hook: `decode` fails with `SignatureMismatch`
    fail_decode: AtomicBool,
    /// Testing hook: `encode` fails with `Cipher`
    fail_encode: AtomicBool,
    /// Number of `encode` calls
    pub encode_calls: AtomicUsize,
    /// Number of `decode` calls
    pub decode_calls: AtomicUsize,
}

impl MockCrypto {
    /// Mock with keys loaded and no failures armed.
    pub fn new() -> Self {
        Self {
            keys: AtomicBool::new(true),
            fail_decode: AtomicBool::new(false),
            fail_encode: AtomicBool::new(false),
            encode_calls: AtomicUsize::new(0),
            decode_calls: AtomicUsize::new(0),
        }
    }

    /// Mock behaving like a host without key material.
    pub fn without_keys() -> Self {
        let m = Self::new();
        m.set_keys_available(false);
        m
    }

    /// Toggle key availability.
    pub fn set_keys_available(&self, on: bool) {
        self.keys.store(on, Ordering::SeqCst);
    }

    /// Make `decode` fail.
    pub fn set_fail_decode(&self, on: bool) {
        self.fail_decode.store(on, Ordering::SeqCst);
    }

    /// Make `encode` fail.
    pub fn set_fail_encode(&self, on: bool) {
        self.fail_encode.store(on, Ordering::SeqCst);
    }

    /// How many times `encode` was called.
    pub fn encode_count(&self) -> usize {
        self.encode_calls.load(Ordering::SeqCst)
    }

    /// How many times `decode` was called.
    pub fn decode_count(&self) -> usize {
        self.decode_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCrypto {
    fn default() -> Self {
        Self::new()
    }
}

impl AmiiboCrypto for MockCrypto {
    fn encode(&self, plain: &TagRecord) -> Result<EncryptedTagRecord, CryptoError> {
        self.encode_calls.fetch_add(1, Ordering::SeqCst);
        if !self.keys_available() {
            return Err(CryptoError::KeysUnavailable);
        }
        if self.fail_encode.load(Ordering::SeqCst) {
            return Err(CryptoError::Cipher("mock encode failure".into()));
        }
        Ok(EncryptedTagRecord::from_plain(plain))
    }

    fn decode(&self, encrypted: &EncryptedTagRecord) -> Result<TagRecord, CryptoError> {
        self.decode_calls.fetch_add(1, Ordering::SeqCst);
        if !self.keys_available() {
            return Err(CryptoError::KeysUnavailable);
        }
        if self.fail_decode.load(Ordering::SeqCst) {
            return Err(CryptoError::SignatureMismatch);
        }
        TagRecord::decode(&encrypted.to_plain_layout())
            .map_err(|e| CryptoError::Cipher(e.to_string()))
    }

    fn keys_available(&self) -> bool {
        self.keys.load(Ordering::SeqCst)
    }
}
