// libnfp/src/bridge/mod.rs

/// Controller events and device signals.
pub mod event;
/// Test double for the controller.
pub mod mock;
/// Controller trait and its error type.
pub mod traits;

pub use event::{DeviceEvent, EventSink, NullSink, RecordingSink, TagEvent};
pub use mock::MockBridge;
pub use traits::{BridgeError, ControllerBridge};
