// libnfp/src/prelude.rs

pub use crate::bridge::{ControllerBridge, DeviceEvent, EventSink, TagEvent};
pub use crate::config::{DeviceConfig, RegistryConfig};
pub use crate::crypto::AmiiboCrypto;
pub use crate::device::{DeviceRegistry, TagDevice, TagDeviceBuilder};
pub use crate::services::{Calendar, IdentityProvider};
pub use crate::tag::{EncryptedTagRecord, TagRecord};
pub use crate::{
    AppAreaVersion, BreakType, CalendarDate, DeviceId, DeviceState, Error, MountTarget, Result,
    TagProtocol, TagType, Uuid,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced};
