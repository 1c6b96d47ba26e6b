// libnfp/src/device/operations/application_area.rs

//! The per-title application area.

use log::{error, info, warn};

use crate::constants::{APPLICATION_AREA_SIZE, APPLICATION_ID_VERSION_OFFSET};
use crate::device::handle::TagDevice;
use crate::device::state::DeviceInner;
use crate::services::Services;
use crate::tag::{remove_version_nibble, TagRecord};
use crate::types::AppAreaVersion;
use crate::utils::{fill_random, random_u32, random_u64, random_u8};
use crate::{Error, Result};

/// Copy `data` to the head of the area and pad the rest with random bytes.
fn write_area(record: &mut TagRecord, data: &[u8]) {
    let area = record.application_area.as_mut_bytes();
    area[..data.len()].copy_from_slice(data);
    fill_random(&mut area[data.len()..]);
}

impl DeviceInner {
    pub(crate) fn open_application_area(&mut self, access_id: u32) -> Result<()> {
        self.expect_writable()?;
        let record = self.record()?;
        if !record.settings.flags.appdata_initialized() {
            warn!("{}: application area is not initialized", self.id);
            return Err(Error::ApplicationAreaIsNotInitialized);
        }
        if record.application_area_id != access_id {
            warn!(
                "{}: wrong application area id {:#010x}",
                self.id, access_id
            );
            return Err(Error::WrongApplicationAreaId);
        }
        self.app_area_open = true;
        Ok(())
    }

    pub(crate) fn application_area_id(&self) -> Result<u32> {
        self.expect_writable()?;
        let record = self.record()?;
        if !record.settings.flags.appdata_initialized() {
            warn!("{}: application area is not initialized", self.id);
            return Err(Error::ApplicationAreaIsNotInitialized);
        }
        Ok(record.application_area_id)
    }

    pub(crate) fn read_application_area(&self, out: &mut [u8]) -> Result<usize> {
        self.expect_writable()?;
        if !self.app_area_open {
            error!("{}: application area is not open", self.id);
            return Err(Error::WrongDeviceState);
        }
        let record = self.record()?;
        if !record.settings.flags.appdata_initialized() {
            error!("{}: application area is not initialized", self.id);
            return Err(Error::ApplicationAreaIsNotInitialized);
        }
        let n = out.len().min(APPLICATION_AREA_SIZE);
        out[..n].copy_from_slice(&record.application_area.as_bytes()[..n]);
        Ok(n)
    }

    /// Replace the open area. Held in memory until the next flush.
    pub(crate) fn set_application_area(&mut self, data: &[u8]) -> Result<()> {
        self.expect_writable()?;
        if !self.app_area_open {
            error!("{}: application area is not open", self.id);
            return Err(Error::WrongDeviceState);
        }
        if !self.record()?.settings.flags.appdata_initialized() {
            error!("{}: application area is not initialized", self.id);
            return Err(Error::ApplicationAreaIsNotInitialized);
        }
        if data.len() > APPLICATION_AREA_SIZE {
            error!("{}: wrong data size {}", self.id, data.len());
            return Err(Error::Unknown);
        }
        let record = self.record_mut()?;
        write_area(record, data);
        record.application_write_counter = record.application_write_counter.saturating_add(1);
        self.dirty = true;
        Ok(())
    }

    pub(crate) fn create_application_area(
        &mut self,
        services: &Services,
        access_id: u32,
        data: &[u8],
    ) -> Result<()> {
        self.expect_mounted()?;
        if self.record()?.settings.flags.appdata_initialized() {
            error!("{}: application area already exists", self.id);
            return Err(Error::ApplicationAreaExist);
        }
        self.recreate_application_area(services, access_id, data)
    }

    /// Initialize the area for the running title and flush.
    pub(crate) fn recreate_application_area(
        &mut self,
        services: &Services,
        access_id: u32,
        data: &[u8],
    ) -> Result<()> {
        self.expect_mounted()?;
        if self.app_area_open {
            error!("{}: application area is open", self.id);
            return Err(Error::WrongDeviceState);
        }
        self.expect_writable()?;
        if data.len() > APPLICATION_AREA_SIZE {
            error!("{}: wrong data size {}", self.id, data.len());
            return Err(Error::WrongApplicationAreaSize);
        }

        let program_id = self.config.program_id;
        let record = self.record_mut()?;
        write_area(record, data);
        record.application_write_counter = record.application_write_counter.saturating_add(1);
        record.application_id_byte = ((program_id >> APPLICATION_ID_VERSION_OFFSET) & 0xF) as u8;
        record.application_id = remove_version_nibble(program_id)
            | ((AppAreaVersion::NintendoSwitch as u64) << APPLICATION_ID_VERSION_OFFSET);
        record.settings.flags.set_appdata_initialized(true);
        record.application_area_id = access_id;
        record.unknown = 0;
        record.unknown2 = Default::default();
        record.update_register_info_crc();
        info!(
            "{}: application area {:#010x} created for {:#018x}",
            self.id, access_id, program_id
        );

        self.flush(services)
    }

    /// Drop the area. Its bytes and ids are overwritten with random data.
    pub(crate) fn delete_application_area(&mut self, services: &Services) -> Result<()> {
        self.expect_writable()?;
        if !self.record()?.settings.flags.appdata_initialized() {
            warn!("{}: application area is not initialized", self.id);
            return Err(Error::ApplicationAreaIsNotInitialized);
        }

        let record = self.record_mut()?;
        record.application_write_counter = record.application_write_counter.saturating_add(1);
        fill_random(record.application_area.as_mut_bytes());
        record.application_id = random_u64();
        record.application_area_id = random_u32();
        record.application_id_byte = random_u8();
        record.settings.flags.set_appdata_initialized(false);
        record.unknown = 0;
        record.unknown2 = Default::default();
        record.update_register_info_crc();
        self.app_area_open = false;

        self.flush(services)
    }

    pub(crate) fn exists_application_area(&self) -> Result<bool> {
        self.expect_writable()?;
        Ok(self.record()?.settings.flags.appdata_initialized())
    }
}

impl TagDevice {
    /// Open the application area owned by `access_id` for reading and
    /// writing.
    pub fn open_application_area(&self, access_id: u32) -> Result<()> {
        self.run(|inner, _| inner.open_application_area(access_id))
    }

    /// Access id of the open area.
    pub fn get_application_area_id(&self) -> Result<u32> {
        self.run(|inner, _| inner.application_area_id())
    }

    /// Copy the open area into `out`, returning how many bytes were written
    /// (at most `APPLICATION_AREA_SIZE`).
    pub fn get_application_area(&self, out: &mut [u8]) -> Result<usize> {
        self.run(|inner, _| inner.read_application_area(out))
    }

    /// The whole open area.
    pub fn read_application_area(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; APPLICATION_AREA_SIZE];
        let n = self.get_application_area(&mut buf)?;
        buf.truncate(n);
        Ok(buf)
    }

    /// Overwrite the open area in memory. Nothing reaches the tag until `flush`.
    pub fn set_application_area(&self, data: &[u8]) -> Result<()> {
        self.run(|inner, _| inner.set_application_area(data))
    }

    /// Create an area owned by `access_id` and flush. Fails if one exists.
    pub fn create_application_area(&self, access_id: u32, data: &[u8]) -> Result<()> {
        self.run(|inner, services| inner.create_application_area(services, access_id, data))
    }

    /// Replace whatever area exists with one owned by `access_id`.
    pub fn recreate_application_area(&self, access_id: u32, data: &[u8]) -> Result<()> {
        self.run(|inner, services| inner.recreate_application_area(services, access_id, data))
    }

    /// Drop the area and flush.
    pub fn delete_application_area(&self) -> Result<()> {
        self.run(|inner, services| inner.delete_application_area(services))
    }

    /// Whether the tag carries an application area.
    pub fn exists_application_area(&self) -> Result<bool> {
        self.run(|inner, _| inner.exists_application_area())
    }

    /// Fixed size of every application area.
    pub fn application_area_size(&self) -> u32 {
        APPLICATION_AREA_SIZE as u32
    }
}
