// libnfp/src/bridge/mock.rs

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use parking_lot::Mutex;

use crate::bridge::traits::{BridgeError, ControllerBridge};
use crate::types::TagProtocol;

/// Mock controller for tests. It records persisted images and polling
/// changes; the flags are failure hooks.
#[derive(Debug)]
pub struct MockBridge {
    nfc_capable: AtomicBool,
    /// Testing hook: `arm_polling` fails with `NotSupported`
    refuse_arm: AtomicBool,
    /// Testing hook: `persist` fails with an io error
    fail_persist: AtomicBool,
    persisted: Mutex<Vec<Vec<u8>>>,
    arm_calls: Mutex<Vec<TagProtocol>>,
    disarm_calls: AtomicUsize,
}

impl MockBridge {
    /// NFC-capable controller with no failures armed.
    pub fn new() -> Self {
        Self {
            nfc_capable: AtomicBool::new(true),
            refuse_arm: AtomicBool::new(false),
            fail_persist: AtomicBool::new(false),
            persisted: Mutex::new(Vec::new()),
            arm_calls: Mutex::new(Vec::new()),
            disarm_calls: AtomicUsize::new(0),
        }
    }

    /// A controller without an NFC reader.
    pub fn without_nfc() -> Self {
        let m = Self::new();
        m.set_nfc_capable(false);
        m
    }

    /// Toggle NFC hardware presence.
    pub fn set_nfc_capable(&self, on: bool) {
        self.nfc_capable.store(on, Ordering::SeqCst);
    }

    /// Make `arm_polling` fail.
    pub fn set_refuse_arm(&self, on: bool) {
        self.refuse_arm.store(on, Ordering::SeqCst);
    }

    /// Make `persist` fail.
    pub fn set_fail_persist(&self, on: bool) {
        self.fail_persist.store(on, Ordering::SeqCst);
    }

    /// Every image written so far, oldest first.
    pub fn persisted(&self) -> Vec<Vec<u8>> {
        self.persisted.lock().clone()
    }

    /// Number of images written.
    pub fn persist_count(&self) -> usize {
        self.persisted.lock().len()
    }

    /// Newest image written, if any.
    pub fn last_persisted(&self) -> Option<Vec<u8>> {
        self.persisted.lock().last().cloned()
    }

    /// Protocols passed to `arm_polling`, in order.
    pub fn arm_calls(&self) -> Vec<TagProtocol> {
        self.arm_calls.lock().clone()
    }

    /// Number of `disarm_polling` calls.
    pub fn disarm_count(&self) -> usize {
        self.disarm_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ControllerBridge for MockBridge {
    fn has_nfc(&self) -> bool {
        self.nfc_capable.load(Ordering::SeqCst)
    }

    fn arm_polling(&self, protocol: TagProtocol) -> Result<(), BridgeError> {
        if self.refuse_arm.load(Ordering::SeqCst) {
            return Err(BridgeError::NotSupported);
        }
        self.arm_calls.lock().push(protocol);
        Ok(())
    }

    fn disarm_polling(&self) {
        self.disarm_calls.fetch_add(1, Ordering::SeqCst);
    }

    fn persist(&self, image: &[u8]) -> Result<(), BridgeError> {
        if self.fail_persist.load(Ordering::SeqCst) {
            return Err(BridgeError::Io(std::io::Error::other("mock persist failure")));
        }
        self.persisted.lock().push(image.to_vec());
        Ok(())
    }
}
