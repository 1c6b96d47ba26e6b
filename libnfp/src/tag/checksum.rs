// libnfp/src/tag/checksum.rs

use crate::constants::SETTINGS_CRC_INPUT_LEN;
use crate::tag::settings::AmiiboSettings;

/// CRC-32 (IEEE, reflected, as zlib) over `data`.
pub fn crc32(data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Source of the 8-byte input hashed into `AmiiboSettings::crc`.
///
/// What genuine firmware feeds here is not known; the default hashes
/// zeros. Hosts that learn the real input can plug it in.
pub trait SettingsChecksum: Send + Sync {
    /// The 8 bytes to hash for `settings`.
    fn preimage(&self, settings: &AmiiboSettings) -> [u8; SETTINGS_CRC_INPUT_LEN];
}

/// All-zero preimage.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroPreimage;

impl SettingsChecksum for ZeroPreimage {
    fn preimage(&self, _settings: &AmiiboSettings) -> [u8; SETTINGS_CRC_INPUT_LEN] {
        [0u8; SETTINGS_CRC_INPUT_LEN]
    }
}

/// CRC of the preimage `checksum` yields for `settings`.
pub fn settings_crc(checksum: &dyn SettingsChecksum, settings: &AmiiboSettings) -> u32 {
    crc32(&checksum.preimage(settings))
}
