// libnfp/src/device/info.rs

//! Records returned by the device query operations.

use crate::constants::{AMIIBO_NAME_LENGTH, UNKNOWN2_SIZE};
use crate::tag::AmiiboModelInfo;
use crate::types::{
    AppAreaVersion, ApplicationArea, CalendarDate, MiiExtension, MiiRecord, TagProtocol, TagType,
    Uuid,
};

/// Identity of the tag in the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TagInfo {
    /// First seven image bytes, or random ones when so configured
    pub uuid: Uuid,
    /// Always Type A
    pub protocol: TagProtocol,
    /// Always Type 2
    pub tag_type: TagType,
}

/// Fields every application may read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommonInfo {
    /// Date of the last write
    pub last_write_date: CalendarDate,
    /// Tag write counter
    pub write_counter: u16,
    /// Format version
    pub version: u8,
    /// Size of the application area
    pub application_area_size: u32,
}

/// Figure identity, mirrored from the model info block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelInfo {
    /// Character id
    pub character_id: u16,
    /// Costume or variant
    pub character_variant: u8,
    /// Figure, card or yarn
    pub figure_type: u8,
    /// Model number
    pub model_number: u16,
    /// Series id
    pub series: u8,
}

impl From<AmiiboModelInfo> for ModelInfo {
    fn from(m: AmiiboModelInfo) -> Self {
        Self {
            character_id: m.character_id,
            character_variant: m.character_variant,
            figure_type: m.figure_type,
            model_number: m.model_number,
            series: m.series,
        }
    }
}

/// Owner registration as applications see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInfo {
    /// Owner Mii
    pub mii: MiiRecord,
    /// Registration date
    pub creation_date: CalendarDate,
    /// Decoded nickname
    pub amiibo_name: String,
    /// Font region of the nickname
    pub font_region: u8,
}

/// Registration view for system applets: raw Mii store data included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInfoPrivate {
    /// Owner Mii
    pub mii: MiiRecord,
    /// Mii extension data
    pub mii_extension: MiiExtension,
    /// Registration date
    pub creation_date: CalendarDate,
    /// Decoded nickname
    pub amiibo_name: String,
    /// Font region of the nickname
    pub font_region: u8,
}

/// Ownership details for system applets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AdminInfo {
    /// Title that owns the application area
    pub application_id: u64,
    /// Access id of the application area
    pub application_area_id: u32,
    /// Settings CRC counter
    pub crc_change_counter: u16,
    /// Settings flag byte
    pub flags: u8,
    /// Always Type 2
    pub tag_type: TagType,
    /// Console family that created the area
    pub app_area_version: AppAreaVersion,
}

/// Debug dump of the whole decrypted record, as used by `get_all` /
/// `set_all`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfpData {
    /// Always 0xA5
    pub magic: u8,
    /// Tag write counter
    pub write_counter: u16,
    /// Settings checksum
    pub settings_crc: u32,
    /// Common info snapshot
    pub common_info: CommonInfo,
    /// Owner Mii
    pub mii: MiiRecord,
    /// Mii extension data
    pub mii_extension: MiiExtension,
    /// Registration date
    pub creation_date: CalendarDate,
    /// Raw nickname units
    pub amiibo_name: [u16; AMIIBO_NAME_LENGTH],
    /// Raw settings flag byte
    pub flags: u8,
    /// Unknown byte
    pub unknown1: u8,
    /// CRC over the register info
    pub register_info_crc: u32,
    /// Unknown, zero on fresh tags
    pub unknown2: [u8; UNKNOWN2_SIZE],
    /// Title that owns the application area
    pub application_id: u64,
    /// Access id of the application area
    pub access_id: u32,
    /// Settings CRC counter
    pub settings_crc_counter: u16,
    /// Font region of the nickname
    pub font_region: u8,
    /// Always Type 2
    pub tag_type: TagType,
    /// Console family byte
    pub console_type: AppAreaVersion,
    /// Console byte of the title id
    pub application_id_byte: u8,
    /// Application area contents
    pub application_area: ApplicationArea,
}
