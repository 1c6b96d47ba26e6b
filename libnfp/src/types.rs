// libnfp/src/types.rs

use crate::Error;
use crate::constants::{
    APPLICATION_AREA_SIZE, MII_EXTENSION_SIZE, MII_SIZE, UID_CASCADE_TAG, UID_INTERNAL_BYTE,
    UID_LEN,
};
use derive_more::Display;
use std::convert::TryFrom;

/// Typed device handle. The numeric value matches the controller slot the
/// device is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[display(fmt = "device#{:#x}", _0)]
pub struct DeviceId(u64);

impl DeviceId {
    /// Wrap a slot handle.
    pub const fn new(handle: u64) -> Self {
        Self(handle)
    }

    /// Raw slot handle.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

/// Reader lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceState {
    /// Initialized, not polling
    #[display(fmt = "Initialized")]
    Initialized,
    /// Polling for a tag
    #[display(fmt = "SearchingForTag")]
    SearchingForTag,
    /// A tag sits on the reader
    #[display(fmt = "TagFound")]
    TagFound,
    /// The tag was taken away
    #[display(fmt = "TagRemoved")]
    TagRemoved,
    /// The tag is mounted
    #[display(fmt = "TagMounted")]
    TagMounted,
    /// Not initialized or no NFC hardware
    #[display(fmt = "Unavailable")]
    Unavailable,
}

/// Protocol filter passed to `start_detection` and reported in tag info.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagProtocol {
    /// No filter
    #[display(fmt = "None")]
    None,
    /// ISO14443-A
    #[display(fmt = "TypeA")]
    TypeA,
    /// ISO14443-B
    #[display(fmt = "TypeB")]
    TypeB,
    /// FeliCa
    #[display(fmt = "TypeF")]
    TypeF,
    /// Any protocol
    #[display(fmt = "All")]
    All,
}

impl TagProtocol {
    /// Whether a detection started with this filter may pick up an
    /// ISO14443-A tag. `None` means "no filter".
    pub fn accepts_type_a(&self) -> bool {
        matches!(self, TagProtocol::None | TagProtocol::TypeA | TagProtocol::All)
    }
}

/// NFC forum tag type. Amiibo are NTAG215, i.e. Type 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TagType {
    /// NFC forum type 1
    Type1,
    /// NFC forum type 2 (NTAG)
    Type2,
    /// NFC forum type 3
    Type3,
    /// NFC forum type 4
    Type4,
}

/// Access requested at mount time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MountTarget {
    /// Nothing mounted
    #[display(fmt = "None")]
    None,
    /// Read only
    #[display(fmt = "Rom")]
    Rom,
    /// Read and write
    #[display(fmt = "Ram")]
    Ram,
    /// Read and write, private data included
    #[display(fmt = "All")]
    All,
}

impl MountTarget {
    /// Whether writes are allowed under this target.
    pub fn is_writable(&self) -> bool {
        matches!(self, MountTarget::Ram | MountTarget::All)
    }
}

/// Break mode for `break_tag`. Only `Normal` is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum BreakType {
    /// Plain write back
    #[display(fmt = "Normal")]
    Normal,
    /// Unsupported
    #[display(fmt = "Unknown1")]
    Unknown1,
    /// Unsupported
    #[display(fmt = "Unknown2")]
    Unknown2,
}

/// Console family that created the application area, stored in the
/// version nibble of the application id.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AppAreaVersion {
    /// 3DS
    Nintendo3DS = 0,
    /// Wii U
    NintendoWiiU = 1,
    /// New 3DS
    Nintendo3DSv2 = 2,
    /// Switch
    NintendoSwitch = 3,
    /// No application area
    NotSet = 0xFF,
}

impl AppAreaVersion {
    /// Decode the version nibble; unknown values map to `NotSet`.
    pub fn from_nibble(nibble: u8) -> Self {
        match nibble & 0x0F {
            0 => Self::Nintendo3DS,
            1 => Self::NintendoWiiU,
            2 => Self::Nintendo3DSv2,
            3 => Self::NintendoSwitch,
            _ => Self::NotSet,
        }
    }
}

/// Calendar day as reported by the console clock and exposed in info
/// records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalendarDate {
    /// Full year, e.g. 2024
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
}

impl CalendarDate {
    /// Build a date without range checks.
    pub const fn new(year: u16, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

impl Default for CalendarDate {
    fn default() -> Self {
        Self::new(2000, 1, 1)
    }
}

/// 7-byte tag serial as reported to applications (UID without check bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Uuid([u8; 7]);

impl Uuid {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; 7]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 7] {
        &self.0
    }

    /// Lowercase hex, no separators.
    pub fn to_hex(&self) -> String {
        crate::utils::bytes_to_hex(self.as_bytes())
    }

    /// Seven random bytes with byte 3 fixed up as a valid BCC0.
    pub fn random() -> Self {
        let mut bytes = [0u8; 7];
        crate::utils::fill_random(&mut bytes);
        bytes[3] = UID_CASCADE_TAG ^ bytes[0] ^ bytes[1] ^ bytes[2];
        Self(bytes)
    }

    /// Byte 3 is the BCC0 of bytes 0..3.
    pub fn has_valid_bcc0(&self) -> bool {
        self.0[3] == UID_CASCADE_TAG ^ self.0[0] ^ self.0[1] ^ self.0[2]
    }
}

impl TryFrom<&[u8]> for Uuid {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != 7 {
            return Err(Error::InvalidLength {
                expected: 7,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; 7];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// The ten UID bytes at the head of an NTAG215 in wire order:
/// `UID0 UID1 UID2 BCC0 UID3 UID4 UID5 UID6 BCC1 internal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagUid([u8; UID_LEN]);

impl TagUid {
    /// Wrap wire bytes as read from the tag.
    pub fn from_bytes(bytes: [u8; UID_LEN]) -> Self {
        Self(bytes)
    }

    /// Build the wire UID for a serial, computing both check bytes.
    pub fn from_serial(serial: Uuid) -> Self {
        let s = serial.as_bytes();
        let bcc0 = UID_CASCADE_TAG ^ s[0] ^ s[1] ^ s[2];
        let bcc1 = s[3] ^ s[4] ^ s[5] ^ s[6];
        Self([
            s[0],
            s[1],
            s[2],
            bcc0,
            s[3],
            s[4],
            s[5],
            s[6],
            bcc1,
            UID_INTERNAL_BYTE,
        ])
    }

    /// Wire bytes.
    pub fn as_bytes(&self) -> &[u8; UID_LEN] {
        &self.0
    }

    /// First seven wire bytes, BCC0 included. This is the id reported to
    /// applications.
    pub fn uuid(&self) -> Uuid {
        let mut head = [0u8; 7];
        head.copy_from_slice(&self.0[..7]);
        Uuid(head)
    }

    /// Serial with BCC0 skipped (BCC1 and the internal byte sit past it).
    pub fn serial(&self) -> Uuid {
        let b = &self.0;
        Uuid([b[0], b[1], b[2], b[4], b[5], b[6], b[7]])
    }

    /// First check byte.
    pub fn bcc0(&self) -> u8 {
        self.0[3]
    }

    /// Second check byte.
    pub fn bcc1(&self) -> u8 {
        self.0[8]
    }

    /// Both check bytes match the serial.
    pub fn check_bytes_valid(&self) -> bool {
        let b = &self.0;
        b[3] == UID_CASCADE_TAG ^ b[0] ^ b[1] ^ b[2] && b[8] == b[4] ^ b[5] ^ b[6] ^ b[7]
    }
}

/// Opaque 96-byte V3 Mii store record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiiRecord([u8; MII_SIZE]);

impl MiiRecord {
    /// Wrap raw store data.
    pub fn from_bytes(bytes: [u8; MII_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw store data.
    pub fn as_bytes(&self) -> &[u8; MII_SIZE] {
        &self.0
    }

    /// Mutable store data.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; MII_SIZE] {
        &mut self.0
    }
}

impl Default for MiiRecord {
    fn default() -> Self {
        Self([0u8; MII_SIZE])
    }
}

impl TryFrom<&[u8]> for MiiRecord {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != MII_SIZE {
            return Err(Error::InvalidLength {
                expected: MII_SIZE,
                actual: bytes.len(),
            });
        }
        let mut arr = [0u8; MII_SIZE];
        arr.copy_from_slice(bytes);
        Ok(Self(arr))
    }
}

/// 8-byte Mii extension stored next to the owner record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MiiExtension([u8; MII_EXTENSION_SIZE]);

impl MiiExtension {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; MII_EXTENSION_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; MII_EXTENSION_SIZE] {
        &self.0
    }
}

/// Fixed-size per-title data blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApplicationArea([u8; APPLICATION_AREA_SIZE]);

impl ApplicationArea {
    /// Wrap raw bytes.
    pub fn from_bytes(bytes: [u8; APPLICATION_AREA_SIZE]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; APPLICATION_AREA_SIZE] {
        &self.0
    }

    /// Mutable bytes.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; APPLICATION_AREA_SIZE] {
        &mut self.0
    }
}

impl Default for ApplicationArea {
    fn default() -> Self {
        Self([0u8; APPLICATION_AREA_SIZE])
    }
}
