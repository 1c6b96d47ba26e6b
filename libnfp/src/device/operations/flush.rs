// libnfp/src/device/operations/flush.rs

use log::{error, info};

use crate::device::handle::TagDevice;
use crate::device::state::DeviceInner;
use crate::services::Services;
use crate::tag::{AmiiboDate, EncryptedTagRecord};
use crate::types::BreakType;
use crate::{Error, Result};

impl DeviceInner {
    pub(crate) fn flush(&mut self, services: &Services) -> Result<()> {
        self.flush_with(services, true)
    }

    /// Stamp today's date, bump the write counter and queue the new image.
    /// The settings CRC only changes when the write date does.
    pub(crate) fn flush_with(&mut self, services: &Services, required: bool) -> Result<()> {
        self.expect_writable()?;
        let today = AmiiboDate::from_calendar(services.calendar.today());
        let record = self.record_mut()?;
        if record.settings.write_date != today {
            record.settings.write_date = today;
            record
                .settings
                .refresh_crc(services.settings_checksum.as_ref());
        }
        record.write_counter = record.write_counter.saturating_add(1);
        self.write_back(services, BreakType::Normal, required)?;
        self.dirty = false;
        Ok(())
    }

    /// Flush without touching the write date.
    pub(crate) fn flush_debug(&mut self, services: &Services) -> Result<()> {
        self.expect_writable()?;
        let record = self.record_mut()?;
        record.write_counter = record.write_counter.saturating_add(1);
        self.write_back(services, BreakType::Normal, true)?;
        self.dirty = false;
        Ok(())
    }

    /// Re-encode the resident record and queue it for persisting.
    fn write_back(
        &mut self,
        services: &Services,
        break_type: BreakType,
        required: bool,
    ) -> Result<()> {
        if break_type != BreakType::Normal {
            error!("{}: break type not implemented {}", self.id, break_type);
            return Err(Error::WrongDeviceState);
        }

        let id = self.id;
        let image = {
            let tag = self.tag.as_mut().ok_or(Error::WrongDeviceState)?;
            let record = tag.plain.as_ref().ok_or(Error::WrongDeviceState)?;
            if tag.is_plain {
                tag.encrypted = EncryptedTagRecord::from_plain(record);
                record.encode().to_vec()
            } else {
                let encrypted = services.crypto.encode(record).map_err(|e| {
                    error!("{}: failed to encode data: {}", id, e);
                    Error::WriteAmiiboFailed
                })?;
                let image = encrypted.to_vec();
                tag.encrypted = encrypted;
                image
            }
        };
        self.queue_write(image, required);
        Ok(())
    }

    pub(crate) fn break_tag(&mut self, services: &Services, break_type: BreakType) -> Result<()> {
        self.expect_writable()?;
        self.write_back(services, break_type, true)
    }

    pub(crate) fn restore_amiibo(&mut self) -> Result<()> {
        self.expect_writable()?;
        info!("{}: restore amiibo not implemented", self.id);
        Ok(())
    }
}

impl TagDevice {
    /// Write the mounted record back to the tag, stamping today's date.
    pub fn flush(&self) -> Result<()> {
        self.run(|inner, services| inner.flush(services))
    }

    /// Like [`flush`](Self::flush) but leaves the write date alone.
    pub fn flush_debug(&self) -> Result<()> {
        self.run(|inner, services| inner.flush_debug(services))
    }

    /// Write the record back with the given break mode. Only
    /// `BreakType::Normal` is supported.
    pub fn break_tag(&self, break_type: BreakType) -> Result<()> {
        self.run(|inner, services| inner.break_tag(services, break_type))
    }

    /// Accepted on writable mounts; the backup store is not emulated.
    pub fn restore_amiibo(&self) -> Result<()> {
        self.run(|inner, _| inner.restore_amiibo())
    }
}
