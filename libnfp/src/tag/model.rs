// libnfp/src/tag/model.rs

use crate::constants::{MODEL_INFO_CONSTANT, MODEL_INFO_SIZE};
use crate::tag::parser::{array_at, be_u16_at, byte_at, ensure_len, le_u16_at, put};
use crate::Result;

/// Figure provenance block. Lives in the cleartext part of the tag, so it
/// can be read without the cipher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AmiiboModelInfo {
    /// Character id (little endian)
    pub character_id: u16,
    /// Costume or variant
    pub character_variant: u8,
    /// Figure, card or yarn
    pub figure_type: u8,
    /// Model number (big endian)
    pub model_number: u16,
    /// Series id
    pub series: u8,
    /// Must be 0x02 on a genuine tag
    pub constant_value: u8,
    /// Unused, kept for round-trips
    pub reserved: [u8; 4],
}

impl AmiiboModelInfo {
    /// Parse the 0xC-byte block.
    pub fn decode(data: &[u8]) -> Result<Self> {
        ensure_len(data, MODEL_INFO_SIZE)?;
        Ok(Self {
            character_id: le_u16_at(data, 0)?,
            character_variant: byte_at(data, 2)?,
            figure_type: byte_at(data, 3)?,
            model_number: be_u16_at(data, 4)?,
            series: byte_at(data, 6)?,
            constant_value: byte_at(data, 7)?,
            reserved: array_at(data, 8)?,
        })
    }

    /// Serialize the block.
    pub fn encode(&self) -> [u8; MODEL_INFO_SIZE] {
        let mut out = [0u8; MODEL_INFO_SIZE];
        put(&mut out, 0, &self.character_id.to_le_bytes());
        out[2] = self.character_variant;
        out[3] = self.figure_type;
        put(&mut out, 4, &self.model_number.to_be_bytes());
        out[6] = self.series;
        out[7] = self.constant_value;
        put(&mut out, 8, &self.reserved);
        out
    }

    /// Whether the constant byte holds the expected value.
    pub fn has_valid_constant(&self) -> bool {
        self.constant_value == MODEL_INFO_CONSTANT
    }
}
