// libnfp/src/device/operations/register.rs

//! Owner registration: the Mii, nickname and dates in the settings block.

use log::{debug, warn};

use crate::constants::AMIIBO_NAME_LENGTH;
use crate::device::handle::TagDevice;
use crate::device::info::{RegisterInfo, RegisterInfoPrivate};
use crate::device::state::DeviceInner;
use crate::services::Services;
use crate::tag::{AmiiboDate, AmiiboName, TagRecord};
use crate::utils::{fill_random, random_u16, random_u8};
use crate::{Error, Result};

fn registered_record(inner: &DeviceInner) -> Result<&TagRecord> {
    inner.expect_writable()?;
    let record = inner.record()?;
    if !record.settings.flags.amiibo_initialized() {
        warn!("{}: registration is not initialized", inner.id);
        return Err(Error::RegistrationIsNotInitialized);
    }
    Ok(record)
}

impl DeviceInner {
    pub(crate) fn register_info(&self) -> Result<RegisterInfo> {
        let record = registered_record(self)?;
        let settings = &record.settings;
        Ok(RegisterInfo {
            mii: record.owner_mii,
            creation_date: settings.init_date.to_calendar(),
            amiibo_name: settings.amiibo_name.to_string_lossy(),
            font_region: settings.flags.font_region(),
        })
    }

    pub(crate) fn register_info_private(&self) -> Result<RegisterInfoPrivate> {
        let record = registered_record(self)?;
        let settings = &record.settings;
        Ok(RegisterInfoPrivate {
            mii: record.owner_mii,
            mii_extension: record.mii_extension,
            creation_date: settings.init_date.to_calendar(),
            amiibo_name: settings.amiibo_name.to_string_lossy(),
            font_region: settings.flags.font_region(),
        })
    }

    /// Register an owner under `name`. The creation date is only set on
    /// first registration.
    pub(crate) fn set_register_info_private(
        &mut self,
        services: &Services,
        name: &str,
    ) -> Result<()> {
        self.expect_writable()?;
        let name = AmiiboName::new(name)?;
        let today = AmiiboDate::from_calendar(services.calendar.today());
        let mii = services.identity.build_default_identity(0);
        let extension = services.identity.build_extension(&mii);

        let record = self.record_mut()?;
        let settings = &mut record.settings;
        if !settings.flags.amiibo_initialized() {
            settings.init_date = today;
            settings.write_date = AmiiboDate::from_raw(0);
        }
        settings.amiibo_name = name;
        settings.country_code_id = 0;
        settings.flags.set_font_region(0);
        settings.flags.set_amiibo_initialized(true);

        record.owner_mii = mii;
        record.mii_extension = extension;
        record.unknown = 0;
        record.unknown2 = Default::default();
        record.update_register_info_crc();

        self.flush(services)
    }

    /// Unregister the owner. Owner fields are overwritten with random
    /// bytes, not zeroed.
    pub(crate) fn delete_register_info(&mut self, services: &Services) -> Result<()> {
        registered_record(self)?;
        let id = self.id;
        let record = self.record_mut()?;

        fill_random(record.owner_mii.as_mut_bytes());
        let mut units = [0u16; AMIIBO_NAME_LENGTH];
        for unit in units.iter_mut() {
            *unit = random_u16();
        }
        record.settings.amiibo_name = AmiiboName::from_units(units);
        record.unknown = random_u8();
        fill_random(&mut record.unknown2[..8]);
        record.settings.init_date = AmiiboDate::from_raw(random_u16());
        record.settings.write_date = AmiiboDate::from_raw(random_u16());
        record.settings.flags.set_font_region(0);
        record.settings.flags.set_amiibo_initialized(false);
        record.update_register_info_crc();
        debug!("{}: registration scrubbed", id);

        self.flush(services)
    }
}

impl TagDevice {
    /// Owner registration. Fails `RegistrationIsNotInitialized` on a blank tag.
    pub fn get_register_info(&self) -> Result<RegisterInfo> {
        self.run(|inner, _| inner.register_info())
    }

    /// Registration with the raw Mii extension.
    pub fn get_register_info_private(&self) -> Result<RegisterInfoPrivate> {
        self.run(|inner, _| inner.register_info_private())
    }

    /// Register the tag to the default profile with nickname `name` (at
    /// most ten UTF-16 units) and flush.
    pub fn set_register_info_private(&self, name: &str) -> Result<()> {
        self.run(|inner, services| inner.set_register_info_private(services, name))
    }

    /// Scramble the owner fields, clear the registered bit and flush.
    pub fn delete_register_info(&self) -> Result<()> {
        self.run(|inner, services| inner.delete_register_info(services))
    }
}
