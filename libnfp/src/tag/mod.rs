// libnfp/src/tag/mod.rs

//! NTAG215 amiibo image codec: plain and on-tag layouts, sub-records and
//! checksums. Pure data; no device state lives here.

/// CRC-32 and the settings checksum seam.
pub mod checksum;
/// Packed tag dates.
pub mod date;
/// On-tag (ciphered) image.
pub mod encrypted;
pub mod layout;
/// Figure model info block.
pub mod model;
/// Bounds-checked byte readers.
pub mod parser;
/// Decrypted record.
pub mod record;
/// Settings block: flags, nickname, dates.
pub mod settings;

pub use checksum::{SettingsChecksum, ZeroPreimage, crc32};
pub use date::AmiiboDate;
pub use encrypted::EncryptedTagRecord;
pub use model::AmiiboModelInfo;
pub use record::{TagRecord, remove_version_nibble};
pub use settings::{AmiiboName, AmiiboSettings, SettingsFlags};
