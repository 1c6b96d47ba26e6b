// libnfp/src/tag/settings.rs

use crate::constants::{AMIIBO_NAME_LENGTH, COUNTER_LIMIT, SETTINGS_SIZE};
use crate::tag::checksum::{SettingsChecksum, settings_crc};
use crate::tag::date::AmiiboDate;
use crate::tag::parser::{array_at, be_u16_at, be_u32_at, byte_at, ensure_len, put};
use crate::{Error, Result};

const FONT_REGION_MASK: u8 = 0x0F;
const AMIIBO_INITIALIZED: u8 = 1 << 4;
const APPDATA_INITIALIZED: u8 = 1 << 5;

/// Flag byte at the head of the settings block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SettingsFlags(u8);

impl SettingsFlags {
    /// Wrap a raw flag byte.
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Raw flag byte.
    pub fn raw(&self) -> u8 {
        self.0
    }

    /// Low nibble: font region of the nickname.
    pub fn font_region(&self) -> u8 {
        self.0 & FONT_REGION_MASK
    }

    /// Replace the font region, keeping the other bits.
    pub fn set_font_region(&mut self, region: u8) {
        self.0 = (self.0 & !FONT_REGION_MASK) | (region & FONT_REGION_MASK);
    }

    /// Owner and nickname have been registered.
    pub fn amiibo_initialized(&self) -> bool {
        self.0 & AMIIBO_INITIALIZED != 0
    }

    /// Set or clear the registered bit.
    pub fn set_amiibo_initialized(&mut self, on: bool) {
        self.set(AMIIBO_INITIALIZED, on);
    }

    /// An application area has been created.
    pub fn appdata_initialized(&self) -> bool {
        self.0 & APPDATA_INITIALIZED != 0
    }

    /// Set or clear the application area bit.
    pub fn set_appdata_initialized(&mut self, on: bool) {
        self.set(APPDATA_INITIALIZED, on);
    }

    fn set(&mut self, bit: u8, on: bool) {
        if on {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }
}

/// Amiibo nickname: ten UTF-16 code units, stored big endian.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AmiiboName([u16; AMIIBO_NAME_LENGTH]);

impl AmiiboName {
    /// Wrap raw code units.
    pub fn from_units(units: [u16; AMIIBO_NAME_LENGTH]) -> Self {
        Self(units)
    }

    /// Raw code units, NUL padded.
    pub fn units(&self) -> &[u16; AMIIBO_NAME_LENGTH] {
        &self.0
    }

    /// Encode a nickname. Unused units are zero.
    pub fn new(name: &str) -> Result<Self> {
        let encoded: Vec<u16> = name.encode_utf16().collect();
        if encoded.len() > AMIIBO_NAME_LENGTH {
            return Err(Error::InvalidArgument(format!(
                "amiibo name is {} UTF-16 units, at most {} fit",
                encoded.len(),
                AMIIBO_NAME_LENGTH
            )));
        }
        let mut units = [0u16; AMIIBO_NAME_LENGTH];
        units[..encoded.len()].copy_from_slice(&encoded);
        Ok(Self(units))
    }

    /// Decode up to the first NUL, replacing unpaired surrogates.
    pub fn to_string_lossy(&self) -> String {
        let end = self.0.iter().position(|&u| u == 0).unwrap_or(self.0.len());
        String::from_utf16_lossy(&self.0[..end])
    }
}

/// The 0x20-byte settings block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AmiiboSettings {
    /// Flag byte
    pub flags: SettingsFlags,
    /// Console region
    pub country_code_id: u8,
    /// Bumped every time `crc` is recomputed
    pub crc_counter: u16,
    /// Registration date
    pub init_date: AmiiboDate,
    /// Last write date
    pub write_date: AmiiboDate,
    /// Settings checksum
    pub crc: u32,
    /// Nickname
    pub amiibo_name: AmiiboName,
}

impl AmiiboSettings {
    /// Parse the 0x20-byte block.
    pub fn decode(data: &[u8]) -> Result<Self> {
        ensure_len(data, SETTINGS_SIZE)?;
        let mut units = [0u16; AMIIBO_NAME_LENGTH];
        for (i, unit) in units.iter_mut().enumerate() {
            *unit = be_u16_at(data, 0x0C + i * 2)?;
        }
        Ok(Self {
            flags: SettingsFlags::from_raw(byte_at(data, 0x00)?),
            country_code_id: byte_at(data, 0x01)?,
            crc_counter: be_u16_at(data, 0x02)?,
            init_date: AmiiboDate::from_be_bytes(array_at(data, 0x04)?),
            write_date: AmiiboDate::from_be_bytes(array_at(data, 0x06)?),
            crc: be_u32_at(data, 0x08)?,
            amiibo_name: AmiiboName::from_units(units),
        })
    }

    /// Serialize the block.
    pub fn encode(&self) -> [u8; SETTINGS_SIZE] {
        let mut out = [0u8; SETTINGS_SIZE];
        out[0x00] = self.flags.raw();
        out[0x01] = self.country_code_id;
        put(&mut out, 0x02, &self.crc_counter.to_be_bytes());
        put(&mut out, 0x04, &self.init_date.to_be_bytes());
        put(&mut out, 0x06, &self.write_date.to_be_bytes());
        put(&mut out, 0x08, &self.crc.to_be_bytes());
        for (i, unit) in self.amiibo_name.units().iter().enumerate() {
            put(&mut out, 0x0C + i * 2, &unit.to_be_bytes());
        }
        out
    }

    /// Recompute `crc` and bump `crc_counter`, saturating.
    pub fn refresh_crc(&mut self, checksum: &dyn SettingsChecksum) {
        if self.crc_counter != COUNTER_LIMIT {
            self.crc_counter += 1;
        }
        self.crc = settings_crc(checksum, self);
    }
}
