// libnfp/src/services/identity.rs

use crate::constants::MII_SIZE;
use crate::types::{MiiExtension, MiiRecord};

/// Builds the owner Mii written on registration.
pub trait IdentityProvider: Send + Sync {
    /// Default V3 store record for profile slot `index`.
    fn build_default_identity(&self, index: u32) -> MiiRecord;

    /// Extension block stored next to `mii`.
    fn build_extension(&self, _mii: &MiiRecord) -> MiiExtension {
        MiiExtension::default()
    }
}

/// Blank V3 record: version byte 3, slot index at byte 1, the rest zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultIdentity;

impl IdentityProvider for DefaultIdentity {
    fn build_default_identity(&self, index: u32) -> MiiRecord {
        let mut bytes = [0u8; MII_SIZE];
        bytes[0] = 0x03;
        bytes[1] = (index & 0xFF) as u8;
        MiiRecord::from_bytes(bytes)
    }
}
