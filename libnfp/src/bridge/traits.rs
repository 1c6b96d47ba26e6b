// libnfp/src/bridge/traits.rs

use thiserror::Error;

use crate::types::TagProtocol;

/// Failure reported by the controller input layer.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Controller cannot switch to NFC polling
    #[error("nfc polling not supported by the controller")]
    NotSupported,

    /// Backing store write failed
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Controller input bridge: the physical (or emulated) controller a tag is
/// presented to. Tag arrival and removal flow the other way, as
/// [`TagEvent`](crate::bridge::TagEvent)s.
pub trait ControllerBridge: Send + Sync {
    /// Whether the controller has an NFC reader at all
    fn has_nfc(&self) -> bool;

    /// Switch the controller into NFC polling mode
    fn arm_polling(&self, protocol: TagProtocol) -> Result<(), BridgeError>;

    /// Switch the controller back to its normal polling mode
    fn disarm_polling(&self);

    /// Write a full tag image back to wherever the tag came from
    fn persist(&self, image: &[u8]) -> Result<(), BridgeError>;
}
