// libnfp/src/device/handle.rs

use log::{debug, warn};
use parking_lot::Mutex;

use crate::bridge::TagEvent;
use crate::config::DeviceConfig;
use crate::device::state::{DeviceInner, Effects, PendingWrite};
use crate::services::Services;
use crate::types::{DeviceId, DeviceState, MountTarget, TagProtocol};
use crate::{Error, Result};

/// One emulated NFC reader slot.
///
/// Every operation locks the device for a single transition. Persisting
/// the tag image and raising signals happen after the lock is released, so
/// a slow backing store never blocks the input thread.
pub struct TagDevice {
    id: DeviceId,
    inner: Mutex<DeviceInner>,
    /// Generation of the newest image handed to the bridge
    persisted: Mutex<u64>,
    services: Services,
}

impl TagDevice {
    /// Device in slot `id`, not yet initialized.
    pub fn new(id: DeviceId, services: Services, config: DeviceConfig) -> Self {
        Self {
            id,
            inner: Mutex::new(DeviceInner::new(id, config)),
            persisted: Mutex::new(0),
            services,
        }
    }

    /// Slot this device serves.
    pub fn id(&self) -> DeviceId {
        self.id
    }

    /// Numeric handle applications use to address this device.
    pub fn handle(&self) -> u64 {
        self.id.as_u64()
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DeviceState {
        self.inner.lock().state
    }

    /// Whether `initialize` ran and `finalize` has not.
    pub fn is_initialized(&self) -> bool {
        self.inner.lock().initialized
    }

    /// Access level of the current mount.
    pub fn mount_target(&self) -> MountTarget {
        self.inner.lock().mount_target
    }

    /// Snapshot of the device configuration.
    pub fn config(&self) -> DeviceConfig {
        self.inner.lock().config
    }

    /// Program id of the running title; stamped into new application areas.
    pub fn set_program_id(&self, program_id: u64) {
        self.inner.lock().config.program_id = program_id;
    }

    /// Report a random uuid from `get_tag_info` instead of the tag's own.
    pub fn set_random_amiibo_id(&self, on: bool) {
        self.inner.lock().config.random_amiibo_id = on;
    }

    /// Run one operation under the device lock, then apply its effects.
    pub(crate) fn run<T>(
        &self,
        op: impl FnOnce(&mut DeviceInner, &Services) -> Result<T>,
    ) -> Result<T> {
        let (result, effects) = {
            let mut inner = self.inner.lock();
            let result = op(&mut inner, &self.services);
            (result, std::mem::take(&mut inner.effects))
        };
        self.apply(result, effects)
    }

    fn apply<T>(&self, result: Result<T>, effects: Effects) -> Result<T> {
        let mut result = result;
        if let Some(write) = effects.write {
            let required = write.required;
            if let Err(e) = self.persist(write) {
                if required && result.is_ok() {
                    warn!("{}: failed to persist tag image: {}", self.id, e);
                    result = Err(Error::WriteAmiiboFailed);
                } else {
                    warn!("{}: failed to persist tag image (ignored): {}", self.id, e);
                }
            }
        }
        for event in effects.events {
            self.services.sink.signal(self.id, event);
        }
        result
    }

    /// Hand an image to the bridge unless a newer one already went out.
    fn persist(&self, write: PendingWrite) -> std::result::Result<(), crate::bridge::BridgeError> {
        let mut last = self.persisted.lock();
        if write.generation <= *last {
            debug!(
                "{}: skipping stale image (generation {} <= {})",
                self.id, write.generation, *last
            );
            return Ok(());
        }
        *last = write.generation;
        debug!("{}: persisting {} bytes", self.id, write.image.len());
        self.services.bridge.persist(&write.image)
    }

    // ---- lifecycle ----------------------------------------------------

    /// Move to `Initialized`, or `Unavailable` without an NFC controller.
    pub fn initialize(&self) {
        let _ = self.run(|inner, services| {
            inner.initialize(services);
            Ok(())
        });
    }

    /// Unmount, stop detection and drop the resident tag.
    pub fn finalize(&self) {
        let _ = self.run(|inner, services| {
            inner.finalize(services);
            Ok(())
        });
    }

    /// Arm the reader for tags matching `protocol`.
    pub fn start_detection(&self, protocol: TagProtocol) -> Result<()> {
        self.run(|inner, services| inner.start_detection(services, protocol))
    }

    /// Disarm the reader and drop any resident tag.
    pub fn stop_detection(&self) -> Result<()> {
        self.run(|inner, services| inner.stop_detection(services))
    }

    /// Present a raw tag image, as the input thread does when a dump is
    /// placed on the reader.
    pub fn load_tag(&self, data: &[u8]) -> Result<()> {
        self.run(|inner, services| inner.load_tag(services, data))
    }

    /// The tag was taken off the reader.
    pub fn withdraw(&self) {
        let _ = self.run(|inner, services| {
            inner.withdraw(services);
            Ok(())
        });
    }

    /// Apply a controller-side event.
    pub fn handle_event(&self, event: TagEvent) -> Result<()> {
        self.run(|inner, services| inner.handle_event(services, event))
    }

    /// Mount the resident tag with `target` access.
    pub fn mount(&self, target: MountTarget) -> Result<()> {
        self.run(|inner, services| inner.mount(services, target))
    }

    /// Unmount, flushing pending changes first.
    pub fn unmount(&self) -> Result<()> {
        self.run(|inner, services| inner.unmount(services))
    }
}

impl std::fmt::Debug for TagDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TagDevice")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
