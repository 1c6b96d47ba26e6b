// libnfp/src/device/registry.rs

//! Fixed set of reader slots addressed by [`DeviceId`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{error, info};

use crate::bridge::{ControllerBridge, EventSink, TagEvent};
use crate::config::RegistryConfig;
use crate::crypto::AmiiboCrypto;
use crate::device::builder::TagDeviceBuilder;
use crate::device::handle::TagDevice;
use crate::services::{Calendar, IdentityProvider};
use crate::tag::SettingsChecksum;
use crate::types::{DeviceId, DeviceState};
use crate::{Error, Result};

/// Devices are independent: each has its own lock, so work on one slot
/// never waits on another.
pub struct DeviceRegistry {
    devices: BTreeMap<DeviceId, Arc<TagDevice>>,
    initialized: AtomicBool,
}

impl DeviceRegistry {
    /// Start assembling a registry.
    pub fn builder() -> DeviceRegistryBuilder {
        DeviceRegistryBuilder::new()
    }

    /// Initialize every device. Lookups succeed from here on.
    pub fn initialize(&self) {
        for device in self.devices.values() {
            device.initialize();
        }
        self.initialized.store(true, Ordering::SeqCst);
        info!("registry initialized with {} devices", self.devices.len());
    }

    /// Finalize every device. Lookups fail `NfcDisabled` afterwards.
    pub fn finalize(&self) {
        self.initialized.store(false, Ordering::SeqCst);
        for device in self.devices.values() {
            device.finalize();
        }
        info!("registry finalized");
    }

    /// Whether `initialize` ran and `finalize` has not.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::SeqCst)
    }

    fn ensure_initialized(&self) -> Result<()> {
        if !self.is_initialized() {
            error!("nfc service is not initialized");
            return Err(Error::NfcDisabled);
        }
        Ok(())
    }

    /// Device behind `id`. Fails `NfcDisabled` before `initialize`.
    pub fn lookup(&self, id: DeviceId) -> Result<Arc<TagDevice>> {
        self.ensure_initialized()?;
        self.devices.get(&id).cloned().ok_or(Error::DeviceNotFound)
    }

    /// Handles of devices that are not `Unavailable`, in slot order.
    pub fn list_available(&self) -> Result<Vec<DeviceId>> {
        self.ensure_initialized()?;
        let available: Vec<DeviceId> = self
            .devices
            .values()
            .filter(|d| d.state() != DeviceState::Unavailable)
            .map(|d| d.id())
            .collect();
        if available.is_empty() {
            return Err(Error::DeviceNotFound);
        }
        Ok(available)
    }

    /// Route a controller-side event to its device.
    pub fn dispatch(&self, id: DeviceId, event: TagEvent) -> Result<()> {
        let device = self.devices.get(&id).ok_or(Error::DeviceNotFound)?;
        device.handle_event(event)
    }

    /// Stamp the running title's program id on every device.
    pub fn set_program_id(&self, program_id: u64) {
        for device in self.devices.values() {
            device.set_program_id(program_id);
        }
    }

    /// Every device, in slot order.
    pub fn devices(&self) -> impl Iterator<Item = &Arc<TagDevice>> {
        self.devices.values()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    /// True when no slot was configured.
    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// Collaborators shared by every slot plus one bridge per slot.
#[derive(Default)]
pub struct DeviceRegistryBuilder {
    bridges: Vec<(DeviceId, Arc<dyn ControllerBridge>)>,
    crypto: Option<Arc<dyn AmiiboCrypto>>,
    calendar: Option<Arc<dyn Calendar>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    settings_checksum: Option<Arc<dyn SettingsChecksum>>,
    sink: Option<Arc<dyn EventSink>>,
    config: RegistryConfig,
}

impl DeviceRegistryBuilder {
    /// Empty builder with the default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot list and per-device defaults.
    pub fn with_config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Add one slot backed by `bridge`.
    pub fn with_device(mut self, id: DeviceId, bridge: Arc<dyn ControllerBridge>) -> Self {
        self.bridges.push((id, bridge));
        self
    }

    /// Add one device per configured slot, asking `bridge_for` for each
    /// slot's controller.
    pub fn with_default_slots<F>(mut self, mut bridge_for: F) -> Self
    where
        F: FnMut(DeviceId) -> Arc<dyn ControllerBridge>,
    {
        for id in self.config.slots.clone() {
            let bridge = bridge_for(id);
            self.bridges.push((id, bridge));
        }
        self
    }

    /// Cipher shared by every device.
    pub fn with_crypto(mut self, crypto: Arc<dyn AmiiboCrypto>) -> Self {
        self.crypto = Some(crypto);
        self
    }

    /// Clock shared by every device.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Mii source shared by every device.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Settings CRC input shared by every device.
    pub fn with_settings_checksum(mut self, checksum: Arc<dyn SettingsChecksum>) -> Self {
        self.settings_checksum = Some(checksum);
        self
    }

    /// Where device signals go.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Fails `DeviceNotFound` when no device was added and
    /// `InvalidArgument` on a duplicate id.
    pub fn build(self) -> Result<DeviceRegistry> {
        if self.bridges.is_empty() {
            return Err(Error::DeviceNotFound);
        }
        let mut devices = BTreeMap::new();
        for (id, bridge) in self.bridges {
            let mut builder = TagDeviceBuilder::new(id)
                .with_bridge(bridge)
                .with_config(self.config.device);
            if let Some(crypto) = &self.crypto {
                builder = builder.with_crypto(crypto.clone());
            }
            if let Some(calendar) = &self.calendar {
                builder = builder.with_calendar(calendar.clone());
            }
            if let Some(identity) = &self.identity {
                builder = builder.with_identity(identity.clone());
            }
            if let Some(checksum) = &self.settings_checksum {
                builder = builder.with_settings_checksum(checksum.clone());
            }
            if let Some(sink) = &self.sink {
                builder = builder.with_event_sink(sink.clone());
            }
            if devices.insert(id, Arc::new(builder.build()?)).is_some() {
                return Err(Error::InvalidArgument(format!("duplicate {}", id)));
            }
        }
        Ok(DeviceRegistry {
            devices,
            initialized: AtomicBool::new(false),
        })
    }
}
