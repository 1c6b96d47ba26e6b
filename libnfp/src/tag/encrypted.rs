// libnfp/src/tag/encrypted.rs

use crate::constants::{
    CAPABILITY_CONTAINER, CFG0, CFG1, MODEL_INFO_SIZE, STATIC_LOCK, TAG_CONSTANT, TAG_SIZE,
    UID_LEN,
};
use crate::tag::layout::{self, encrypted};
use crate::tag::model::AmiiboModelInfo;
use crate::tag::parser::{array_at, ensure_len, le_u16_at, le_u32_at, slice_at};
use crate::tag::record::TagRecord;
use crate::types::TagUid;
use crate::Result;

/// On-tag image as read from the figure.
///
/// The user memory is ciphertext and stays opaque; only the cleartext
/// header, model info and config pages are interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedTagRecord([u8; TAG_SIZE]);

impl EncryptedTagRecord {
    /// Wrap a full image.
    pub fn from_bytes(bytes: [u8; TAG_SIZE]) -> Self {
        Self(bytes)
    }

    /// Copy the first `TAG_SIZE` bytes of a dump. Longer dumps (NTAG215
    /// readers often append extra pages) are truncated.
    pub fn from_slice(data: &[u8]) -> Result<Self> {
        ensure_len(data, TAG_SIZE)?;
        Ok(Self(array_at(data, 0)?))
    }

    /// Lay a plain record out as it sits on the tag, without ciphering.
    pub fn from_plain(record: &TagRecord) -> Self {
        Self(layout::plain_to_encrypted(&record.encode()))
    }

    /// Raw image.
    pub fn as_bytes(&self) -> &[u8; TAG_SIZE] {
        &self.0
    }

    /// Owned copy of the image.
    pub fn to_vec(&self) -> Vec<u8> {
        self.0.to_vec()
    }

    /// Reorder into the plain layout, without deciphering.
    pub fn to_plain_layout(&self) -> [u8; TAG_SIZE] {
        layout::encrypted_to_plain(&self.0)
    }

    /// UID from the cleartext header.
    pub fn uid(&self) -> TagUid {
        let mut uid = [0u8; UID_LEN];
        uid.copy_from_slice(&self.0[encrypted::UID..encrypted::UID + UID_LEN]);
        TagUid::from_bytes(uid)
    }

    /// Model info, which sits outside the ciphertext.
    pub fn model_info(&self) -> Result<AmiiboModelInfo> {
        AmiiboModelInfo::decode(slice_at(&self.0, encrypted::MODEL_INFO, MODEL_INFO_SIZE)?)
    }

    /// Structural check on the cleartext fields: UID check bytes, lock
    /// bytes, capability container, user memory constant, model info
    /// constant and the config pages.
    pub fn is_layout_valid(&self) -> bool {
        self.check_layout().unwrap_or(false)
    }

    fn check_layout(&self) -> Result<bool> {
        let d = &self.0[..];
        Ok(self.uid().check_bytes_valid()
            && le_u16_at(d, encrypted::STATIC_LOCK)? == STATIC_LOCK
            && le_u32_at(d, encrypted::CAPABILITY_CONTAINER)? == CAPABILITY_CONTAINER
            && d[encrypted::CONSTANT] == TAG_CONSTANT
            && self.model_info()?.has_valid_constant()
            && le_u32_at(d, encrypted::CFG0)? == CFG0
            && le_u32_at(d, encrypted::CFG1)? == CFG1)
    }
}
