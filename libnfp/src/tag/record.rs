// libnfp/src/tag/record.rs

use crate::constants::{
    APPLICATION_ID_VERSION_OFFSET, HASH_SIZE, MODEL_INFO_SIZE, PASSWORD_SIZE,
    REGISTER_INFO_CRC_INPUT_LEN, SETTINGS_SIZE, TAG_SIZE, UID_LEN, UNKNOWN2_SIZE,
};
use crate::tag::checksum::crc32;
use crate::tag::layout::plain;
use crate::tag::model::AmiiboModelInfo;
use crate::tag::parser::{
    array_at, be_u16_at, be_u32_at, be_u64_at, byte_at, ensure_len, le_u16_at, le_u32_at, put,
    slice_at,
};
use crate::tag::settings::AmiiboSettings;
use crate::types::{ApplicationArea, MiiExtension, MiiRecord, TagUid};
use crate::Result;

/// Decrypted tag contents.
///
/// Every byte of the plain image has a home here, so `decode` followed by
/// `encode` reproduces the input exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Full UID with both check bytes
    pub uid: TagUid,
    /// Static lock bytes
    pub static_lock: u16,
    /// NDEF capability container
    pub capability_container: u32,
    /// HMAC over the data section
    pub hmac_data: [u8; HASH_SIZE],
    /// Always 0xA5
    pub constant_value: u8,
    /// Tag write counter
    pub write_counter: u16,
    /// Format version, 0 on every retail tag
    pub amiibo_version: u8,
    /// Settings block
    pub settings: AmiiboSettings,
    /// Mii of the registered owner
    pub owner_mii: MiiRecord,
    /// Title that owns the application area
    pub application_id: u64,
    /// Writes to the application area
    pub application_write_counter: u16,
    /// Access id of the application area
    pub application_area_id: u32,
    /// Console nibble of the application id, kept out of band
    pub application_id_byte: u8,
    /// Unknown
    pub unknown: u8,
    /// Mii extension data
    pub mii_extension: MiiExtension,
    /// Unknown, zero on fresh tags
    pub unknown2: [u8; UNKNOWN2_SIZE],
    /// CRC over the register info
    pub register_info_crc: u32,
    /// Application area contents
    pub application_area: ApplicationArea,
    /// HMAC over the tag section
    pub hmac_tag: [u8; HASH_SIZE],
    /// Model info
    pub model_info: AmiiboModelInfo,
    /// Salt fed to key derivation
    pub keygen_salt: [u8; HASH_SIZE],
    /// Dynamic lock bytes
    pub dynamic_lock: u32,
    /// NTAG CFG0 page
    pub cfg0: u32,
    /// NTAG CFG1 page
    pub cfg1: u32,
    /// PWD and PACK
    pub password: [u8; PASSWORD_SIZE],
}

impl TagRecord {
    /// Parse a plain-layout image. Bytes past `TAG_SIZE` are ignored.
    pub fn decode(data: &[u8]) -> Result<Self> {
        ensure_len(data, TAG_SIZE)?;

        let mut uid = [0u8; UID_LEN];
        uid[..8].copy_from_slice(slice_at(data, plain::UID_HEAD, 8)?);
        uid[8..].copy_from_slice(slice_at(data, plain::UID_TAIL, 2)?);

        Ok(Self {
            uid: TagUid::from_bytes(uid),
            static_lock: le_u16_at(data, plain::STATIC_LOCK)?,
            capability_container: le_u32_at(data, plain::CAPABILITY_CONTAINER)?,
            hmac_data: array_at(data, plain::HMAC_DATA)?,
            constant_value: byte_at(data, plain::CONSTANT)?,
            write_counter: be_u16_at(data, plain::WRITE_COUNTER)?,
            amiibo_version: byte_at(data, plain::VERSION)?,
            settings: AmiiboSettings::decode(slice_at(data, plain::SETTINGS, SETTINGS_SIZE)?)?,
            owner_mii: MiiRecord::from_bytes(array_at(data, plain::OWNER_MII)?),
            application_id: be_u64_at(data, plain::APPLICATION_ID)?,
            application_write_counter: be_u16_at(data, plain::APPLICATION_WRITE_COUNTER)?,
            application_area_id: be_u32_at(data, plain::APPLICATION_AREA_ID)?,
            application_id_byte: byte_at(data, plain::APPLICATION_ID_BYTE)?,
            unknown: byte_at(data, plain::UNKNOWN)?,
            mii_extension: MiiExtension::from_bytes(array_at(data, plain::MII_EXTENSION)?),
            unknown2: array_at(data, plain::UNKNOWN2)?,
            register_info_crc: be_u32_at(data, plain::REGISTER_INFO_CRC)?,
            application_area: ApplicationArea::from_bytes(array_at(
                data,
                plain::APPLICATION_AREA,
            )?),
            hmac_tag: array_at(data, plain::HMAC_TAG)?,
            model_info: AmiiboModelInfo::decode(slice_at(
                data,
                plain::MODEL_INFO,
                MODEL_INFO_SIZE,
            )?)?,
            keygen_salt: array_at(data, plain::KEYGEN_SALT)?,
            dynamic_lock: le_u32_at(data, plain::DYNAMIC_LOCK)?,
            cfg0: le_u32_at(data, plain::CFG0)?,
            cfg1: le_u32_at(data, plain::CFG1)?,
            password: array_at(data, plain::PASSWORD)?,
        })
    }

    /// Serialize into the plain layout.
    pub fn encode(&self) -> [u8; TAG_SIZE] {
        let mut out = [0u8; TAG_SIZE];
        let uid = self.uid.as_bytes();
        put(&mut out, plain::UID_HEAD, &uid[..8]);
        put(&mut out, plain::UID_TAIL, &uid[8..]);
        put(&mut out, plain::STATIC_LOCK, &self.static_lock.to_le_bytes());
        put(
            &mut out,
            plain::CAPABILITY_CONTAINER,
            &self.capability_container.to_le_bytes(),
        );
        put(&mut out, plain::HMAC_DATA, &self.hmac_data);
        out[plain::CONSTANT] = self.constant_value;
        put(&mut out, plain::WRITE_COUNTER, &self.write_counter.to_be_bytes());
        out[plain::VERSION] = self.amiibo_version;
        put(&mut out, plain::SETTINGS, &self.settings.encode());
        put(&mut out, plain::OWNER_MII, self.owner_mii.as_bytes());
        put(&mut out, plain::APPLICATION_ID, &self.application_id.to_be_bytes());
        put(
            &mut out,
            plain::APPLICATION_WRITE_COUNTER,
            &self.application_write_counter.to_be_bytes(),
        );
        put(
            &mut out,
            plain::APPLICATION_AREA_ID,
            &self.application_area_id.to_be_bytes(),
        );
        out[plain::APPLICATION_ID_BYTE] = self.application_id_byte;
        out[plain::UNKNOWN] = self.unknown;
        put(&mut out, plain::MII_EXTENSION, self.mii_extension.as_bytes());
        put(&mut out, plain::UNKNOWN2, &self.unknown2);
        put(
            &mut out,
            plain::REGISTER_INFO_CRC,
            &self.register_info_crc.to_be_bytes(),
        );
        put(&mut out, plain::APPLICATION_AREA, self.application_area.as_bytes());
        put(&mut out, plain::HMAC_TAG, &self.hmac_tag);
        put(&mut out, plain::MODEL_INFO, &self.model_info.encode());
        put(&mut out, plain::KEYGEN_SALT, &self.keygen_salt);
        put(&mut out, plain::DYNAMIC_LOCK, &self.dynamic_lock.to_le_bytes());
        put(&mut out, plain::CFG0, &self.cfg0.to_le_bytes());
        put(&mut out, plain::CFG1, &self.cfg1.to_le_bytes());
        put(&mut out, plain::PASSWORD, &self.password);
        out
    }

    /// The 0x7E bytes covered by `register_info_crc`: owner Mii, id byte,
    /// unknown, Mii extension and unknown2, packed.
    pub fn register_info_crc_input(&self) -> [u8; REGISTER_INFO_CRC_INPUT_LEN] {
        let mut out = [0u8; REGISTER_INFO_CRC_INPUT_LEN];
        put(&mut out, 0x00, self.owner_mii.as_bytes());
        out[0x60] = self.application_id_byte;
        out[0x61] = self.unknown;
        put(&mut out, 0x62, self.mii_extension.as_bytes());
        put(&mut out, 0x6A, &self.unknown2);
        out
    }

    /// CRC the register info block would carry now.
    pub fn compute_register_info_crc(&self) -> u32 {
        crc32(&self.register_info_crc_input())
    }

    /// Refresh `register_info_crc` from the current fields.
    pub fn update_register_info_crc(&mut self) {
        self.register_info_crc = self.compute_register_info_crc();
    }

    /// Console version nibble currently folded into `application_id`.
    pub fn application_id_version(&self) -> u8 {
        ((self.application_id >> APPLICATION_ID_VERSION_OFFSET) & 0xF) as u8
    }
}

/// Clear the version nibble of an application id.
pub fn remove_version_nibble(application_id: u64) -> u64 {
    application_id & !(0xFu64 << APPLICATION_ID_VERSION_OFFSET)
}
