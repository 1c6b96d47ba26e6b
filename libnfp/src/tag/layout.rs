// libnfp/src/tag/layout.rs

//! Byte geometry of the two tag representations.
//!
//! The on-tag ("encrypted") image and the decrypted ("plain") image hold
//! the same 540 bytes; the plain image groups the fields the cipher covers
//! into one contiguous run. [`SEGMENTS`] maps one onto the other.

use crate::constants::TAG_SIZE;

/// Offsets inside the on-tag image.
pub mod encrypted {
    /// UID0..UID6 with both check bytes
    pub const UID: usize = 0x000;
    /// Static lock bits
    pub const STATIC_LOCK: usize = 0x00A;
    /// NDEF capability container
    pub const CAPABILITY_CONTAINER: usize = 0x00C;
    /// Always 0xA5
    pub const CONSTANT: usize = 0x010;
    /// Big-endian write counter
    pub const WRITE_COUNTER: usize = 0x011;
    /// amiibo format version
    pub const VERSION: usize = 0x013;
    /// Settings block
    pub const SETTINGS: usize = 0x014;
    /// Tag HMAC
    pub const HMAC_TAG: usize = 0x034;
    /// Model info block
    pub const MODEL_INFO: usize = 0x054;
    /// Key derivation salt
    pub const KEYGEN_SALT: usize = 0x060;
    /// Data HMAC
    pub const HMAC_DATA: usize = 0x080;
    /// Owner Mii
    pub const OWNER_MII: usize = 0x0A0;
    /// Title id of the area owner
    pub const APPLICATION_ID: usize = 0x100;
    /// Application area write counter
    pub const APPLICATION_WRITE_COUNTER: usize = 0x108;
    /// Access id of the application area
    pub const APPLICATION_AREA_ID: usize = 0x10A;
    /// Console byte split from the title id
    pub const APPLICATION_ID_BYTE: usize = 0x10E;
    /// Unknown
    pub const UNKNOWN: usize = 0x10F;
    /// Mii extension
    pub const MII_EXTENSION: usize = 0x110;
    /// Unknown, zero on fresh tags
    pub const UNKNOWN2: usize = 0x118;
    /// CRC over the register info
    pub const REGISTER_INFO_CRC: usize = 0x12C;
    /// Application area
    pub const APPLICATION_AREA: usize = 0x130;
    /// Dynamic lock bits
    pub const DYNAMIC_LOCK: usize = 0x208;
    /// NTAG CFG0
    pub const CFG0: usize = 0x20C;
    /// NTAG CFG1
    pub const CFG1: usize = 0x210;
    /// PWD and PACK
    pub const PASSWORD: usize = 0x214;
}

/// Offsets inside the decrypted image.
pub mod plain {
    /// BCC1 and the internal byte
    pub const UID_TAIL: usize = 0x000;
    /// Static lock bits
    pub const STATIC_LOCK: usize = 0x002;
    /// NDEF capability container
    pub const CAPABILITY_CONTAINER: usize = 0x004;
    /// Data HMAC
    pub const HMAC_DATA: usize = 0x008;
    /// Always 0xA5
    pub const CONSTANT: usize = 0x028;
    /// Big-endian write counter
    pub const WRITE_COUNTER: usize = 0x029;
    /// amiibo format version
    pub const VERSION: usize = 0x02B;
    /// Settings block
    pub const SETTINGS: usize = 0x02C;
    /// Owner Mii
    pub const OWNER_MII: usize = 0x04C;
    /// Title id of the area owner
    pub const APPLICATION_ID: usize = 0x0AC;
    /// Application area write counter
    pub const APPLICATION_WRITE_COUNTER: usize = 0x0B4;
    /// Access id of the application area
    pub const APPLICATION_AREA_ID: usize = 0x0B6;
    /// Console byte split from the title id
    pub const APPLICATION_ID_BYTE: usize = 0x0BA;
    /// Unknown
    pub const UNKNOWN: usize = 0x0BB;
    /// Mii extension
    pub const MII_EXTENSION: usize = 0x0BC;
    /// Unknown, zero on fresh tags
    pub const UNKNOWN2: usize = 0x0C4;
    /// CRC over the register info
    pub const REGISTER_INFO_CRC: usize = 0x0D8;
    /// Application area
    pub const APPLICATION_AREA: usize = 0x0DC;
    /// Tag HMAC
    pub const HMAC_TAG: usize = 0x1B4;
    /// UID0..UID6 with BCC0
    pub const UID_HEAD: usize = 0x1D4;
    /// Model info block
    pub const MODEL_INFO: usize = 0x1DC;
    /// Key derivation salt
    pub const KEYGEN_SALT: usize = 0x1E8;
    /// Dynamic lock bits
    pub const DYNAMIC_LOCK: usize = 0x208;
    /// NTAG CFG0
    pub const CFG0: usize = 0x20C;
    /// NTAG CFG1
    pub const CFG1: usize = 0x210;
    /// PWD and PACK
    pub const PASSWORD: usize = 0x214;
}

/// A run of bytes that moves as a unit between the two layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Offset in the on-tag image
    pub encrypted: usize,
    /// Offset in the decrypted image
    pub plain: usize,
    /// Length in bytes
    pub len: usize,
}

const fn seg(encrypted: usize, plain: usize, len: usize) -> Segment {
    Segment {
        encrypted,
        plain,
        len,
    }
}

/// Every byte of the image is covered by exactly one segment.
pub const SEGMENTS: [Segment; 11] = [
    seg(0x000, 0x1D4, 0x08),
    seg(0x008, 0x000, 0x02),
    seg(0x00A, 0x002, 0x02),
    seg(0x00C, 0x004, 0x04),
    seg(0x010, 0x028, 0x24),
    seg(0x034, 0x1B4, 0x20),
    seg(0x054, 0x1DC, 0x0C),
    seg(0x060, 0x1E8, 0x20),
    seg(0x080, 0x008, 0x20),
    seg(0x0A0, 0x04C, 0x168),
    seg(0x208, 0x208, 0x14),
];

/// Reorder an on-tag image into the plain layout.
pub fn encrypted_to_plain(encrypted: &[u8; TAG_SIZE]) -> [u8; TAG_SIZE] {
    let mut out = [0u8; TAG_SIZE];
    for s in SEGMENTS.iter() {
        out[s.plain..s.plain + s.len].copy_from_slice(&encrypted[s.encrypted..s.encrypted + s.len]);
    }
    out
}

/// Reorder a plain image into the on-tag layout.
pub fn plain_to_encrypted(plain: &[u8; TAG_SIZE]) -> [u8; TAG_SIZE] {
    let mut out = [0u8; TAG_SIZE];
    for s in SEGMENTS.iter() {
        out[s.encrypted..s.encrypted + s.len].copy_from_slice(&plain[s.plain..s.plain + s.len]);
    }
    out
}
