// libnfp/src/constants.rs
//! Tag geometry and magic values shared by the codec and the device.

/// Size of a full NTAG215 image in bytes
pub const TAG_SIZE: usize = 0x21C;

/// Size of the per-title application area
pub const APPLICATION_AREA_SIZE: usize = 0xD8;

/// Saturation limit for every tag counter
pub const COUNTER_LIMIT: u16 = 0xFFFF;

/// Bit offset of the console version nibble inside an application id
pub const APPLICATION_ID_VERSION_OFFSET: u32 = 0x1C;

/// Amiibo nickname length in UTF-16 code units
pub const AMIIBO_NAME_LENGTH: usize = 10;

/// Owner Mii record size
pub const MII_SIZE: usize = 0x60;
/// Mii extension block size
pub const MII_EXTENSION_SIZE: usize = 8;
/// Reserved block hashed into the register info CRC
pub const UNKNOWN2_SIZE: usize = 0x14;
/// HMAC and keygen salt size
pub const HASH_SIZE: usize = 0x20;
/// Settings block size
pub const SETTINGS_SIZE: usize = 0x20;
/// Model info block size
pub const MODEL_INFO_SIZE: usize = 0xC;
/// Tag password size
pub const PASSWORD_SIZE: usize = 8;

/// UID bytes at the head of the tag, check bytes and internal byte included
pub const UID_LEN: usize = 10;

/// ISO14443-3 cascade tag folded into BCC0
pub const UID_CASCADE_TAG: u8 = 0x88;

/// Internal byte NTAG215 tags carry after BCC1
pub const UID_INTERNAL_BYTE: u8 = 0x48;

/// Length of the register info CRC preimage
pub const REGISTER_INFO_CRC_INPUT_LEN: usize = 0x7E;

/// Length of the settings CRC preimage
pub const SETTINGS_CRC_INPUT_LEN: usize = 8;

/// Expected static lock bytes (little endian)
pub const STATIC_LOCK: u16 = 0xE00F;

/// Expected capability container (little endian)
pub const CAPABILITY_CONTAINER: u32 = 0xEEFF_10F1;

/// First byte of the user memory
pub const TAG_CONSTANT: u8 = 0xA5;

/// Constant byte inside the model info block
pub const MODEL_INFO_CONSTANT: u8 = 0x02;

/// Expected CFG0 word (little endian)
pub const CFG0: u32 = 0x0400_0000;
/// Expected CFG1 word (little endian)
pub const CFG1: u32 = 0x0000_005F;

/// Number of controller slots a console exposes
pub const DEVICE_SLOT_COUNT: usize = 10;

/// Controller slot handles: eight players, "other" and handheld
pub const DEVICE_SLOT_HANDLES: [u64; DEVICE_SLOT_COUNT] =
    [0, 1, 2, 3, 4, 5, 6, 7, 0x10, 0x20];
