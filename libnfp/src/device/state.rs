// libnfp/src/device/state.rs

//! Mutable per-device state and the lifecycle transitions.
//!
//! Everything here runs with the device lock held. Side effects that talk
//! to collaborators outside the lock (persisting an image, raising a
//! signal) are queued in [`Effects`] and applied by the handle once the
//! lock is released.

use log::{debug, error, info, warn};

use crate::bridge::{DeviceEvent, TagEvent};
use crate::config::DeviceConfig;
use crate::constants::TAG_SIZE;
use crate::services::Services;
use crate::tag::{EncryptedTagRecord, TagRecord};
use crate::types::{DeviceId, DeviceState, MountTarget, TagProtocol};
use crate::{Error, Result};

/// The tag currently sitting on the reader.
#[derive(Debug, Clone)]
pub(crate) struct ResidentTag {
    /// Image in encrypted layout. For plain dumps this is the plain record
    /// reordered, kept in step with `plain` on every flush.
    pub encrypted: EncryptedTagRecord,
    /// Decoded record. Present for plain dumps from load time and for
    /// encrypted tags once mounted with keys.
    pub plain: Option<TagRecord>,
    /// Loaded from an unencrypted dump; written back unencrypted.
    pub is_plain: bool,
}

/// An image waiting to go to the backing store.
#[derive(Debug, Clone)]
pub(crate) struct PendingWrite {
    pub image: Vec<u8>,
    /// A failed persist turns a successful operation into
    /// `WriteAmiiboFailed`. Implicit flushes queue non-required writes.
    pub required: bool,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub(crate) struct Effects {
    pub write: Option<PendingWrite>,
    pub events: Vec<DeviceEvent>,
}

pub(crate) struct DeviceInner {
    pub id: DeviceId,
    pub state: DeviceState,
    pub initialized: bool,
    pub allowed_protocol: TagProtocol,
    pub mount_target: MountTarget,
    pub tag: Option<ResidentTag>,
    pub app_area_open: bool,
    /// Application area changed since the last flush
    pub dirty: bool,
    pub config: DeviceConfig,
    write_generation: u64,
    pub effects: Effects,
}

impl DeviceInner {
    pub fn new(id: DeviceId, config: DeviceConfig) -> Self {
        Self {
            id,
            state: DeviceState::Unavailable,
            initialized: false,
            allowed_protocol: TagProtocol::None,
            mount_target: MountTarget::None,
            tag: None,
            app_area_open: false,
            dirty: false,
            config,
            write_generation: 0,
            effects: Effects::default(),
        }
    }

    // ---- guards -------------------------------------------------------

    /// Fail unless the device is in one of `allowed`. A removed tag is
    /// reported as such rather than as a generic state error.
    pub fn expect_state(&self, allowed: &[DeviceState]) -> Result<()> {
        if allowed.contains(&self.state) {
            return Ok(());
        }
        error!("{}: wrong device state {}", self.id, self.state);
        if self.state == DeviceState::TagRemoved {
            return Err(Error::TagRemoved);
        }
        Err(Error::WrongDeviceState)
    }

    pub fn expect_mounted(&self) -> Result<()> {
        self.expect_state(&[DeviceState::TagMounted])
    }

    pub fn expect_writable(&self) -> Result<()> {
        self.expect_mounted()?;
        if !self.mount_target.is_writable() {
            error!("{}: amiibo is read only", self.id);
            return Err(Error::WrongDeviceState);
        }
        Ok(())
    }

    pub fn resident(&self) -> Result<&ResidentTag> {
        self.tag.as_ref().ok_or(Error::WrongDeviceState)
    }

    /// Decoded record of the mounted tag.
    pub fn record(&self) -> Result<&TagRecord> {
        self.resident()?.plain.as_ref().ok_or(Error::WrongDeviceState)
    }

    pub fn record_mut(&mut self) -> Result<&mut TagRecord> {
        self.tag
            .as_mut()
            .and_then(|t| t.plain.as_mut())
            .ok_or(Error::WrongDeviceState)
    }

    // ---- effects ------------------------------------------------------

    pub fn queue_write(&mut self, image: Vec<u8>, required: bool) {
        self.write_generation += 1;
        let required = required || self.effects.write.as_ref().is_some_and(|w| w.required);
        self.effects.write = Some(PendingWrite {
            image,
            required,
            generation: self.write_generation,
        });
    }

    pub fn signal(&mut self, event: DeviceEvent) {
        self.effects.events.push(event);
    }

    fn clear_tag(&mut self) {
        self.tag = None;
        self.mount_target = MountTarget::None;
        self.app_area_open = false;
        self.dirty = false;
    }

    // ---- lifecycle ----------------------------------------------------

    pub fn initialize(&mut self, services: &Services) {
        self.state = if services.bridge.has_nfc() {
            DeviceState::Initialized
        } else {
            DeviceState::Unavailable
        };
        self.clear_tag();
        self.initialized = true;
        info!("{}: initialized, state {}", self.id, self.state);
    }

    pub fn finalize(&mut self, services: &Services) {
        if self.state == DeviceState::TagMounted {
            let _ = self.unmount(services);
        }
        if matches!(
            self.state,
            DeviceState::SearchingForTag | DeviceState::TagRemoved
        ) {
            let _ = self.stop_detection(services);
        }
        self.clear_tag();
        self.state = DeviceState::Unavailable;
        self.initialized = false;
        info!("{}: finalized", self.id);
    }

    pub fn start_detection(&mut self, services: &Services, protocol: TagProtocol) -> Result<()> {
        self.expect_state(&[DeviceState::Initialized, DeviceState::TagRemoved])?;
        if let Err(e) = services.bridge.arm_polling(protocol) {
            error!("{}: nfc polling not available: {}", self.id, e);
            return Err(Error::NfcDisabled);
        }
        self.allowed_protocol = protocol;
        self.state = DeviceState::SearchingForTag;
        info!("{}: searching for tag ({})", self.id, protocol);
        Ok(())
    }

    pub fn stop_detection(&mut self, services: &Services) -> Result<()> {
        services.bridge.disarm_polling();
        match self.state {
            DeviceState::Initialized => Ok(()),
            DeviceState::TagFound | DeviceState::TagMounted => {
                self.close_tag(services);
                self.state = DeviceState::Initialized;
                Ok(())
            }
            DeviceState::SearchingForTag | DeviceState::TagRemoved => {
                self.state = DeviceState::Initialized;
                Ok(())
            }
            DeviceState::Unavailable => {
                error!("{}: wrong device state {}", self.id, self.state);
                Err(Error::WrongDeviceState)
            }
        }
    }

    /// Accept a tag image presented to the reader. Only the first
    /// `TAG_SIZE` bytes are used; shorter input is rejected.
    pub fn load_tag(&mut self, services: &Services, data: &[u8]) -> Result<()> {
        self.expect_state(&[DeviceState::SearchingForTag])?;
        if !self.allowed_protocol.accepts_type_a() {
            warn!(
                "{}: tag ignored, detection filter is {}",
                self.id, self.allowed_protocol
            );
            return Err(Error::ProtocolNotAllowed(TagProtocol::TypeA));
        }
        if data.len() < TAG_SIZE {
            error!("{}: not an amiibo, size={}", self.id, data.len());
            return Err(Error::InvalidLength {
                expected: TAG_SIZE,
                actual: data.len(),
            });
        }
        let head = &data[..TAG_SIZE];

        #[cfg(feature = "diagnostics")]
        for row in crate::utils::hex_dump_rows(head) {
            log::trace!("{}: {}", self.id, row);
        }

        // A dump that validates once reordered is a plain image.
        let as_plain = TagRecord::decode(head)?;
        let reordered = EncryptedTagRecord::from_plain(&as_plain);
        let resident = if services.crypto.is_valid(&reordered) {
            info!("{}: using plain amiibo", self.id);
            ResidentTag {
                encrypted: reordered,
                plain: Some(as_plain),
                is_plain: true,
            }
        } else {
            let encrypted = EncryptedTagRecord::from_slice(head)?;
            if !services.crypto.is_valid(&encrypted) {
                error!("{}: not an amiibo", self.id);
                return Err(Error::NotAnAmiibo);
            }
            ResidentTag {
                encrypted,
                plain: None,
                is_plain: false,
            }
        };
        debug!(
            "{}: tag uuid {}",
            self.id,
            resident.encrypted.uid().uuid().to_hex()
        );

        self.clear_tag();
        self.tag = Some(resident);
        self.state = DeviceState::TagFound;
        self.signal(DeviceEvent::Activated);
        info!("{}: tag found", self.id);
        Ok(())
    }

    /// Drop the resident tag, unmounting first.
    fn close_tag(&mut self, services: &Services) {
        info!("{}: remove nfc tag", self.id);
        if self.state == DeviceState::TagMounted {
            let _ = self.unmount(services);
        }
        self.clear_tag();
        self.state = DeviceState::TagRemoved;
        self.signal(DeviceEvent::Deactivated);
    }

    /// The tag left the reader. No-op when no tag is resident.
    pub fn withdraw(&mut self, services: &Services) {
        match self.state {
            DeviceState::TagFound | DeviceState::TagMounted => self.close_tag(services),
            _ => debug!("{}: withdraw ignored in state {}", self.id, self.state),
        }
    }

    pub fn mount(&mut self, services: &Services, target: MountTarget) -> Result<()> {
        self.expect_state(&[DeviceState::TagFound])?;
        let id = self.id;
        let tag = self.tag.as_mut().ok_or(Error::WrongDeviceState)?;

        if tag.is_plain {
            self.state = DeviceState::TagMounted;
            self.mount_target = target;
            info!("{}: mounted plain amiibo ({})", id, target);
            return Ok(());
        }

        if !services.crypto.is_valid(&tag.encrypted) {
            error!("{}: not an amiibo", id);
            return Err(Error::NotAnAmiibo);
        }

        if !services.crypto.keys_available() {
            info!("{}: no keys detected, mounted read only", id);
            self.state = DeviceState::TagMounted;
            self.mount_target = MountTarget::Rom;
            return Ok(());
        }

        match services.crypto.decode(&tag.encrypted) {
            Ok(record) => tag.plain = Some(record),
            Err(e) => {
                error!("{}: can't decode amiibo: {}", id, e);
                return Err(Error::CorruptedData);
            }
        }

        self.state = DeviceState::TagMounted;
        self.mount_target = target;
        info!("{}: mounted ({})", id, target);
        Ok(())
    }

    /// Leave the mounted state, flushing pending application area changes.
    /// A failed flush is logged and does not fail the unmount.
    pub fn unmount(&mut self, services: &Services) -> Result<()> {
        self.expect_mounted()?;
        if self.dirty {
            if let Err(e) = self.flush_with(services, false) {
                warn!("{}: flush on unmount failed: {}", self.id, e);
            }
        }
        self.state = DeviceState::TagFound;
        self.mount_target = MountTarget::None;
        self.app_area_open = false;
        info!("{}: unmounted", self.id);
        Ok(())
    }

    /// React to a controller-side event. Ignored until the device has been
    /// initialized.
    pub fn handle_event(&mut self, services: &Services, event: TagEvent) -> Result<()> {
        if !self.initialized {
            debug!("{}: event ignored, device not initialized", self.id);
            return Ok(());
        }
        match event {
            TagEvent::ControllerConnected => {
                self.initialize(services);
                self.signal(DeviceEvent::AvailabilityChanged);
                Ok(())
            }
            TagEvent::ControllerDisconnected => {
                info!("{}: controller disconnected", self.id);
                self.clear_tag();
                self.state = DeviceState::Unavailable;
                self.signal(DeviceEvent::AvailabilityChanged);
                Ok(())
            }
            TagEvent::TagPresented(data) => self.load_tag(services, &data),
            TagEvent::TagWithdrawn => {
                self.withdraw(services);
                Ok(())
            }
        }
    }
}
