// libnfp/src/device/builder.rs

use std::sync::Arc;

use crate::bridge::{ControllerBridge, EventSink};
use crate::config::DeviceConfig;
use crate::crypto::AmiiboCrypto;
use crate::device::handle::TagDevice;
use crate::services::{Calendar, IdentityProvider, Services};
use crate::tag::SettingsChecksum;
use crate::types::DeviceId;
use crate::{Error, Result};

/// Helper to assemble a [`TagDevice`] from its collaborators.
pub struct TagDeviceBuilder {
    id: DeviceId,
    bridge: Option<Arc<dyn ControllerBridge>>,
    crypto: Option<Arc<dyn AmiiboCrypto>>,
    calendar: Option<Arc<dyn Calendar>>,
    identity: Option<Arc<dyn IdentityProvider>>,
    settings_checksum: Option<Arc<dyn SettingsChecksum>>,
    sink: Option<Arc<dyn EventSink>>,
    config: DeviceConfig,
}

impl TagDeviceBuilder {
    /// Builder for the device in slot `id`.
    pub fn new(id: DeviceId) -> Self {
        Self {
            id,
            bridge: None,
            crypto: None,
            calendar: None,
            identity: None,
            settings_checksum: None,
            sink: None,
            config: DeviceConfig::default(),
        }
    }

    /// Controller the device reads tags from. Mandatory.
    pub fn with_bridge(mut self, bridge: Arc<dyn ControllerBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Tag cipher. Defaults to the mock cipher.
    pub fn with_crypto(mut self, crypto: Arc<dyn AmiiboCrypto>) -> Self {
        self.crypto = Some(crypto);
        self
    }

    /// Clock used for tag dates.
    pub fn with_calendar(mut self, calendar: Arc<dyn Calendar>) -> Self {
        self.calendar = Some(calendar);
        self
    }

    /// Source of the console user's Mii.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Input to the settings CRC.
    pub fn with_settings_checksum(mut self, checksum: Arc<dyn SettingsChecksum>) -> Self {
        self.settings_checksum = Some(checksum);
        self
    }

    /// Where device signals go.
    pub fn with_event_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Per-device configuration.
    pub fn with_config(mut self, config: DeviceConfig) -> Self {
        self.config = config;
        self
    }

    /// Consume the builder. Collaborators left unset fall back to the
    /// defaults of [`Services::with_bridge`]; a missing bridge is
    /// `DeviceNotFound`.
    pub fn build(self) -> Result<TagDevice> {
        let bridge = self.bridge.ok_or(Error::DeviceNotFound)?;
        let mut services = Services::with_bridge(bridge);
        if let Some(crypto) = self.crypto {
            services.crypto = crypto;
        }
        if let Some(calendar) = self.calendar {
            services.calendar = calendar;
        }
        if let Some(identity) = self.identity {
            services.identity = identity;
        }
        if let Some(checksum) = self.settings_checksum {
            services.settings_checksum = checksum;
        }
        if let Some(sink) = self.sink {
            services.sink = sink;
        }
        Ok(TagDevice::new(self.id, services, self.config))
    }
}
