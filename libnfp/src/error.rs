// libnfp/src/error.rs

//! Error type shared by every module.

use thiserror::Error;

use crate::types::TagProtocol;

/// Crate-wide error type. Each unit variant maps onto one result code a
/// guest application can observe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No device behind the handle, or no bridge to build one from
    #[error("device not found")]
    DeviceNotFound,

    /// Input shorter than the record being decoded
    #[error("invalid tag length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Bytes required
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },

    /// Caller passed a value the operation cannot take
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Operation not valid in the current device state
    #[error("wrong device state")]
    WrongDeviceState,

    /// The tag left the reader
    #[error("tag removed")]
    TagRemoved,

    /// NFC service not initialized or polling refused
    #[error("nfc disabled")]
    NfcDisabled,

    /// The cipher could not decode the tag
    #[error("corrupted tag data")]
    CorruptedData,

    /// The image failed the layout check
    #[error("not an amiibo")]
    NotAnAmiibo,

    /// Encoding or persisting the image failed
    #[error("failed to write amiibo")]
    WriteAmiiboFailed,

    /// Detection was armed for a protocol excluding this tag
    #[error("tag protocol {0} not allowed by the current detection")]
    ProtocolNotAllowed(TagProtocol),

    /// The figure has no registered owner
    #[error("registration is not initialized")]
    RegistrationIsNotInitialized,

    /// The figure holds no application area
    #[error("application area is not initialized")]
    ApplicationAreaIsNotInitialized,

    /// Create called on a figure that already has an area
    #[error("application area already exists")]
    ApplicationAreaExist,

    /// Access id does not match the area on the figure
    #[error("wrong application area id")]
    WrongApplicationAreaId,

    /// Area data larger than the figure can hold
    #[error("wrong application area size")]
    WrongApplicationAreaSize,

    /// Catch-all result code
    #[error("unknown error")]
    Unknown,
}

impl Error {
    /// True for errors caused by calling an operation in the wrong device
    /// state rather than by tag contents or collaborators.
    pub fn is_state_error(&self) -> bool {
        matches!(self, Error::WrongDeviceState | Error::TagRemoved)
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
