// libnfp/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize sample tag images and mock wiring so tests
//! across the crate and the tests/ directory build devices the same way.
#![allow(dead_code)]

use std::sync::Arc;

use crate::bridge::{MockBridge, RecordingSink};
use crate::config::DeviceConfig;
use crate::constants::{
    CAPABILITY_CONTAINER, CFG0, CFG1, HASH_SIZE, MODEL_INFO_CONSTANT, PASSWORD_SIZE, STATIC_LOCK,
    TAG_CONSTANT, UNKNOWN2_SIZE,
};
use crate::crypto::MockCrypto;
use crate::device::{TagDevice, TagDeviceBuilder};
use crate::services::FixedCalendar;
use crate::tag::{AmiiboModelInfo, AmiiboSettings, EncryptedTagRecord, TagRecord};
use crate::types::{
    ApplicationArea, CalendarDate, DeviceId, MiiExtension, MiiRecord, MountTarget, TagProtocol,
    TagUid, Uuid,
};
use crate::Result;

/// Serial of the sample figure.
pub const SAMPLE_SERIAL: [u8; 7] = [0x04, 0x6A, 0x1B, 0x22, 0x5C, 0x9D, 0x80];

/// Day the rig's calendar starts on.
pub const SAMPLE_TODAY: CalendarDate = CalendarDate::new(2024, 5, 17);

/// A factory-fresh figure: valid structure, never registered, no
/// application area.
#[doc(hidden)]
pub fn sample_record() -> TagRecord {
    TagRecord {
        uid: TagUid::from_serial(Uuid::from_bytes(SAMPLE_SERIAL)),
        static_lock: STATIC_LOCK,
        capability_container: CAPABILITY_CONTAINER,
        hmac_data: [0; HASH_SIZE],
        constant_value: TAG_CONSTANT,
        write_counter: 0,
        amiibo_version: 0x02,
        settings: AmiiboSettings::default(),
        owner_mii: MiiRecord::default(),
        application_id: 0,
        application_write_counter: 0,
        application_area_id: 0,
        application_id_byte: 0,
        unknown: 0,
        mii_extension: MiiExtension::default(),
        unknown2: [0; UNKNOWN2_SIZE],
        register_info_crc: 0,
        application_area: ApplicationArea::default(),
        hmac_tag: [0; HASH_SIZE],
        model_info: AmiiboModelInfo {
            character_id: 0x0001,
            character_variant: 0x00,
            figure_type: 0x00,
            model_number: 0x0000,
            series: 0x00,
            constant_value: MODEL_INFO_CONSTANT,
            reserved: [0; 4],
        },
        keygen_salt: [0; HASH_SIZE],
        dynamic_lock: 0,
        cfg0: CFG0,
        cfg1: CFG1,
        password: [0; PASSWORD_SIZE],
    }
}

/// The sample figure as it sits on the tag (mock cipher layout).
#[doc(hidden)]
pub fn sample_encrypted_image() -> Vec<u8> {
    EncryptedTagRecord::from_plain(&sample_record()).to_vec()
}

/// The sample figure as an unencrypted dump.
#[doc(hidden)]
pub fn sample_plain_image() -> Vec<u8> {
    sample_record().encode().to_vec()
}

/// A device wired to mocks, with handles on every mock for assertions.
#[doc(hidden)]
pub struct MockRig {
    /// Device under test
    pub device: Arc<TagDevice>,
    /// Controller mock; holds persisted images
    pub bridge: Arc<MockBridge>,
    /// Cipher mock
    pub crypto: Arc<MockCrypto>,
    /// Calendar the device stamps dates from
    pub calendar: Arc<FixedCalendar>,
    /// Every signal the device raised
    pub sink: Arc<RecordingSink>,
}

impl MockRig {
    /// Rig with the default config.
    pub fn new() -> Result<Self> {
        Self::with_config(DeviceConfig::default())
    }

    /// Rig with `config`.
    pub fn with_config(config: DeviceConfig) -> Result<Self> {
        Self::with_parts(Arc::new(MockBridge::new()), Arc::new(MockCrypto::new()), config)
    }

    /// Rig around caller-supplied mocks.
    pub fn with_parts(
        bridge: Arc<MockBridge>,
        crypto: Arc<MockCrypto>,
        config: DeviceConfig,
    ) -> Result<Self> {
        let calendar = Arc::new(FixedCalendar::new(SAMPLE_TODAY));
        let sink = Arc::new(RecordingSink::new());
        let device = TagDeviceBuilder::new(DeviceId::new(0))
            .with_bridge(bridge.clone())
            .with_crypto(crypto.clone())
            .with_calendar(calendar.clone())
            .with_event_sink(sink.clone())
            .with_config(config)
            .build()?;
        Ok(Self {
            device: Arc::new(device),
            bridge,
            crypto,
            calendar,
            sink,
        })
    }

    /// Initialize and start detection for any protocol.
    pub fn searching(self) -> Result<Self> {
        self.device.initialize();
        self.device.start_detection(TagProtocol::All)?;
        Ok(self)
    }

    /// Put `image` on the reader.
    pub fn with_tag(self, image: &[u8]) -> Result<Self> {
        let rig = self.searching()?;
        rig.device.load_tag(image)?;
        Ok(rig)
    }

    /// Load the sample figure and mount it.
    pub fn mounted(self, target: MountTarget) -> Result<Self> {
        let rig = self.with_tag(&sample_encrypted_image())?;
        rig.device.mount(target)?;
        Ok(rig)
    }

    /// Last image handed to the bridge, decoded.
    pub fn last_persisted_record(&self) -> Option<TagRecord> {
        let image = self.bridge.last_persisted()?;
        let encrypted = EncryptedTagRecord::from_slice(&image).ok()?;
        TagRecord::decode(&encrypted.to_plain_layout()).ok()
    }
}
