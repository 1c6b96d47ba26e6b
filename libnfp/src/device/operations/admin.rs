// libnfp/src/device/operations/admin.rs

//! Read-mostly queries plus the whole-record debug dump and format.

use log::debug;

use crate::constants::{APPLICATION_AREA_SIZE, APPLICATION_ID_VERSION_OFFSET};
use crate::device::handle::TagDevice;
use crate::device::info::{AdminInfo, CommonInfo, ModelInfo, NfpData, TagInfo};
use crate::device::state::DeviceInner;
use crate::services::Services;
use crate::tag::{remove_version_nibble, AmiiboDate, AmiiboName, SettingsFlags, TagRecord};
use crate::types::{AppAreaVersion, DeviceState, TagProtocol, TagType, Uuid};
use crate::Result;

fn common_info(record: &TagRecord) -> CommonInfo {
    CommonInfo {
        last_write_date: record.settings.write_date.to_calendar(),
        write_counter: record.write_counter,
        version: record.amiibo_version,
        application_area_size: APPLICATION_AREA_SIZE as u32,
    }
}

impl DeviceInner {
    pub(crate) fn tag_info(&self) -> Result<TagInfo> {
        self.expect_state(&[DeviceState::TagFound, DeviceState::TagMounted])?;
        let uuid = if self.config.random_amiibo_id {
            Uuid::random()
        } else {
            self.resident()?.encrypted.uid().uuid()
        };
        Ok(TagInfo {
            uuid,
            protocol: TagProtocol::TypeA,
            tag_type: TagType::Type2,
        })
    }

    pub(crate) fn common_info(&self) -> Result<CommonInfo> {
        self.expect_writable()?;
        Ok(common_info(self.record()?))
    }

    /// Read from the cleartext part of the tag image, so read-only mounts
    /// answer too.
    pub(crate) fn model_info(&self) -> Result<ModelInfo> {
        self.expect_mounted()?;
        Ok(self.resident()?.encrypted.model_info()?.into())
    }

    pub(crate) fn admin_info(&self) -> Result<AdminInfo> {
        self.expect_writable()?;
        let record = self.record()?;
        let settings = &record.settings;

        let mut flags = settings.flags.raw() >> 4;
        if !settings.flags.amiibo_initialized() {
            flags &= 0xFE;
        }

        let mut application_id = 0;
        let mut application_area_id = 0;
        let mut app_area_version = AppAreaVersion::NotSet;
        if settings.flags.appdata_initialized() {
            application_id = record.application_id;
            app_area_version = AppAreaVersion::from_nibble(record.application_id_version());
            // Put the title's own nibble back in place of the console marker
            if application_id >> 0x38 != 0 {
                let nibble = u64::from(record.application_id_byte & 0xF);
                application_id = remove_version_nibble(application_id)
                    | (nibble << APPLICATION_ID_VERSION_OFFSET);
            }
            application_area_id = record.application_area_id;
        }

        Ok(AdminInfo {
            application_id,
            application_area_id,
            crc_change_counter: settings.crc_counter,
            flags,
            tag_type: TagType::Type2,
            app_area_version,
        })
    }

    /// Delete the application area and the registration, then flush. The
    /// first failure stops the sequence.
    pub(crate) fn format(&mut self, services: &Services) -> Result<()> {
        self.delete_application_area(services)?;
        self.delete_register_info(services)?;
        self.flush(services)
    }

    pub(crate) fn get_all(&self) -> Result<NfpData> {
        self.expect_writable()?;
        let record = self.record()?;
        let settings = &record.settings;
        Ok(NfpData {
            magic: record.constant_value,
            write_counter: record.write_counter,
            settings_crc: settings.crc,
            common_info: common_info(record),
            mii: record.owner_mii,
            mii_extension: record.mii_extension,
            creation_date: settings.init_date.to_calendar(),
            amiibo_name: *settings.amiibo_name.units(),
            flags: settings.flags.raw(),
            unknown1: record.unknown,
            register_info_crc: record.register_info_crc,
            unknown2: record.unknown2,
            application_id: record.application_id,
            access_id: record.application_area_id,
            settings_crc_counter: settings.crc_counter,
            font_region: settings.flags.font_region(),
            tag_type: TagType::Type2,
            console_type: AppAreaVersion::from_nibble(record.application_id_version()),
            application_id_byte: record.application_id_byte,
            application_area: record.application_area,
        })
    }

    /// Overwrite the record from a debug dump. Nothing is recomputed; the
    /// change is written on the next flush or unmount.
    pub(crate) fn set_all(&mut self, data: &NfpData) -> Result<()> {
        self.expect_writable()?;
        let id = self.id;
        let record = self.record_mut()?;

        record.constant_value = data.magic;
        record.settings.crc = data.settings_crc;
        record.settings.write_date = AmiiboDate::from_calendar(data.common_info.last_write_date);
        record.write_counter = data.common_info.write_counter;
        record.amiibo_version = data.common_info.version;
        record.owner_mii = data.mii;
        record.mii_extension = data.mii_extension;
        record.settings.init_date = AmiiboDate::from_calendar(data.creation_date);
        record.settings.amiibo_name = AmiiboName::from_units(data.amiibo_name);
        record.settings.flags = SettingsFlags::from_raw(data.flags);
        record.unknown = data.unknown1;
        record.register_info_crc = data.register_info_crc;
        record.unknown2 = data.unknown2;
        record.application_id = data.application_id;
        record.application_area_id = data.access_id;
        record.settings.crc_counter = data.settings_crc_counter;
        record.settings.flags.set_font_region(data.font_region);
        record.application_id_byte = data.application_id_byte;
        record.application_area = data.application_area;
        debug!("{}: record replaced from dump", id);

        self.dirty = true;
        Ok(())
    }
}

impl TagDevice {
    /// Identity of the tag on the reader.
    pub fn get_tag_info(&self) -> Result<TagInfo> {
        self.run(|inner, _| inner.tag_info())
    }

    /// Write date, counters and area size.
    pub fn get_common_info(&self) -> Result<CommonInfo> {
        self.run(|inner, _| inner.common_info())
    }

    /// Figure identity.
    pub fn get_model_info(&self) -> Result<ModelInfo> {
        self.run(|inner, _| inner.model_info())
    }

    /// Ownership details. Needs a full mount.
    pub fn get_admin_info(&self) -> Result<AdminInfo> {
        self.run(|inner, _| inner.admin_info())
    }

    /// Wipe the application area and the registration.
    pub fn format(&self) -> Result<()> {
        self.run(|inner, services| inner.format(services))
    }

    /// Dump the whole decrypted record.
    pub fn get_all(&self) -> Result<NfpData> {
        self.run(|inner, _| inner.get_all())
    }

    /// Overwrite the decrypted record from a dump, written on the next flush.
    pub fn set_all(&self, data: &NfpData) -> Result<()> {
        self.run(|inner, _| inner.set_all(data))
    }
}
