// libnfp/src/config.rs
//! Device and registry configuration

use crate::constants::DEVICE_SLOT_HANDLES;
use crate::types::DeviceId;

/// Program id reported until the host sets the running title's id
pub const DEFAULT_PROGRAM_ID: u64 = 0;

/// Whether `get_tag_info` hands out a fresh random serial by default
pub const DEFAULT_RANDOM_AMIIBO_ID: bool = false;

/// Per-device settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeviceConfig {
    /// Report a random serial on every `get_tag_info`, so titles that
    /// limit scans per figure accept the same dump repeatedly
    pub random_amiibo_id: bool,
    /// Program id of the running title, used to stamp new application
    /// areas
    pub program_id: u64,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            random_amiibo_id: DEFAULT_RANDOM_AMIIBO_ID,
            program_id: DEFAULT_PROGRAM_ID,
        }
    }
}

/// Registry settings: which slots exist and how each device is set up.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegistryConfig {
    /// Handles of the slots the registry creates
    pub slots: Vec<DeviceId>,
    /// Config applied to every device
    pub device: DeviceConfig,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            slots: DEVICE_SLOT_HANDLES.iter().copied().map(DeviceId::new).collect(),
            device: DeviceConfig::default(),
        }
    }
}
