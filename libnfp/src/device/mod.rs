// libnfp/src/device/mod.rs

//! Emulated reader slots: the per-device state machine, the operations on
//! a mounted tag and the registry that owns the slots.

/// Device assembly from collaborators.
pub mod builder;
/// The public device handle.
pub mod handle;
pub mod info;
mod operations;
#[cfg(feature = "async")]
pub mod pump;
pub mod registry;
mod state;

pub use builder::TagDeviceBuilder;
pub use handle::TagDevice;
pub use info::{
    AdminInfo, CommonInfo, ModelInfo, NfpData, RegisterInfo, RegisterInfoPrivate, TagInfo,
};
#[cfg(feature = "async")]
pub use pump::{ChannelSink, run_event_pump, spawn_event_pump};
pub use registry::{DeviceRegistry, DeviceRegistryBuilder};
