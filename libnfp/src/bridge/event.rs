// libnfp/src/bridge/event.rs

use parking_lot::Mutex;

use crate::types::DeviceId;

/// Input raised by the controller side for one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagEvent {
    /// A tag image was presented to the reader
    TagPresented(Vec<u8>),
    /// The tag left the reader
    TagWithdrawn,
    /// The controller came online
    ControllerConnected,
    /// The controller went away
    ControllerDisconnected,
}

/// Signals a device raises towards the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DeviceEvent {
    /// A tag was loaded
    Activated,
    /// The resident tag was removed
    Deactivated,
    /// The controller was connected or disconnected
    AvailabilityChanged,
}

/// Receiver for [`DeviceEvent`]s. Called after the device lock is released.
pub trait EventSink: Send + Sync {
    /// Deliver `event` raised by `device`.
    fn signal(&self, device: DeviceId, event: DeviceEvent);
}

/// Sink that drops every signal.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn signal(&self, _device: DeviceId, _event: DeviceEvent) {}
}

/// Sink that keeps every signal for later inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<(DeviceId, DeviceEvent)>>,
}

impl RecordingSink {
    /// Empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every recorded signal, in order.
    pub fn events(&self) -> Vec<(DeviceId, DeviceEvent)> {
        self.events.lock().clone()
    }

    /// Events raised for one device, in order.
    pub fn events_for(&self, device: DeviceId) -> Vec<DeviceEvent> {
        self.events
            .lock()
            .iter()
            .filter(|(id, _)| *id == device)
            .map(|(_, e)| *e)
            .collect()
    }

    /// Forget recorded signals.
    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl EventSink for RecordingSink {
    fn signal(&self, device: DeviceId, event: DeviceEvent) {
        self.events.lock().push((device, event));
    }
}
