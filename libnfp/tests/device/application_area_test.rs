#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{ACCESS_ID, PROGRAM_ID, game_data};
use libnfp::constants::APPLICATION_AREA_SIZE;
use libnfp::tag::crc32;
use libnfp::types::{AppAreaVersion, DeviceState};
use libnfp::Error;

#[test]
fn application_area_lifecycle() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    let dev = &rig.device;
    rig.device.set_register_info_private("Link")?;
    assert!(!dev.exists_application_area()?);

    dev.create_application_area(ACCESS_ID, &game_data(0x40))?;
    assert!(dev.exists_application_area()?);
    assert_eq!(dev.get_application_area_id()?, ACCESS_ID);

    dev.open_application_area(ACCESS_ID)?;
    let area = dev.read_application_area()?;
    assert_eq!(area.len(), APPLICATION_AREA_SIZE);
    assert_eq!(&area[..0x40], &game_data(0x40)[..]);

    let before = rig.bridge.persist_count();
    dev.set_application_area(&game_data(0x80))?;
    // held in memory until flush
    assert_eq!(rig.bridge.persist_count(), before);
    dev.flush()?;
    assert_eq!(rig.bridge.persist_count(), before + 1);

    let record = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(
        &record.application_area.as_bytes()[..0x80],
        &game_data(0x80)[..]
    );
    assert_eq!(record.application_area_id, ACCESS_ID);
    assert!(record.settings.flags.appdata_initialized());

    dev.unmount()?;
    assert_eq!(dev.state(), DeviceState::TagFound);
    Ok(())
}

#[test]
fn create_stamps_program_id_and_console_marker() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    let record = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());

    assert_eq!(record.application_id_version(), 3);
    assert_eq!(
        record.application_id_byte,
        ((PROGRAM_ID >> 0x1C) & 0xF) as u8
    );
    assert_eq!(
        record.register_info_crc,
        crc32(&record.register_info_crc_input())
    );

    let admin = rig.device.get_admin_info()?;
    assert_eq!(admin.application_area_id, ACCESS_ID);
    assert_eq!(admin.app_area_version, AppAreaVersion::NintendoSwitch);
    // the title's own nibble is spliced back
    assert_eq!(admin.application_id, PROGRAM_ID);
    Ok(())
}

#[test]
fn admin_info_is_zeroed_without_application_area() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    let admin = rig.device.get_admin_info()?;
    assert_eq!(admin.application_id, 0);
    assert_eq!(admin.application_area_id, 0);
    assert_eq!(admin.app_area_version, AppAreaVersion::NotSet);
    Ok(())
}

#[test]
fn create_twice_fails() {
    let rig = common::with_application_area();
    match rig.device.create_application_area(ACCESS_ID, &[]) {
        Err(Error::ApplicationAreaExist) => {}
        other => panic!("expected ApplicationAreaExist, got {:?}", other),
    }
}

#[test]
fn open_checks_initialization_and_id() {
    let rig = common::mounted_rw();
    match rig.device.open_application_area(ACCESS_ID) {
        Err(Error::ApplicationAreaIsNotInitialized) => {}
        other => panic!("expected ApplicationAreaIsNotInitialized, got {:?}", other),
    }

    let rig = common::with_application_area();
    match rig.device.open_application_area(ACCESS_ID + 1) {
        Err(Error::WrongApplicationAreaId) => {}
        other => panic!("expected WrongApplicationAreaId, got {:?}", other),
    }
}

#[test]
fn access_requires_open_area() {
    let rig = common::with_application_area();
    let mut buf = [0u8; 8];
    match rig.device.get_application_area(&mut buf) {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
    match rig.device.set_application_area(&[1, 2, 3]) {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
}

#[test]
fn get_copies_at_most_the_buffer() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;

    let mut small = [0u8; 0x10];
    assert_eq!(rig.device.get_application_area(&mut small)?, 0x10);
    assert_eq!(&small[..], &game_data(0x10)[..]);

    let mut large = vec![0u8; 0x200];
    assert_eq!(
        rig.device.get_application_area(&mut large)?,
        APPLICATION_AREA_SIZE
    );
    Ok(())
}

#[test]
fn set_size_limit() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;

    rig.device.set_application_area(&game_data(APPLICATION_AREA_SIZE))?;
    match rig.device.set_application_area(&game_data(APPLICATION_AREA_SIZE + 1)) {
        Err(Error::Unknown) => {}
        other => panic!("expected Unknown, got {:?}", other),
    }
    Ok(())
}

#[test]
fn recreate_size_limit_and_open_check() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    match rig
        .device
        .recreate_application_area(ACCESS_ID, &game_data(APPLICATION_AREA_SIZE + 1))
    {
        Err(Error::WrongApplicationAreaSize) => {}
        other => panic!("expected WrongApplicationAreaSize, got {:?}", other),
    }

    rig.device.open_application_area(ACCESS_ID)?;
    match rig.device.recreate_application_area(ACCESS_ID, &[]) {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
    Ok(())
}

#[test]
fn recreate_replaces_area() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device
        .recreate_application_area(0xAABB_CCDD, &[0x11; 4])?;
    assert_eq!(rig.device.get_application_area_id()?, 0xAABB_CCDD);
    rig.device.open_application_area(0xAABB_CCDD)?;
    assert_eq!(&rig.device.read_application_area()?[..4], &[0x11; 4]);
    Ok(())
}

#[test]
fn application_write_counter_bumps_on_every_change() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    let first = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap())
        .application_write_counter;

    rig.device.open_application_area(ACCESS_ID)?;
    rig.device.set_application_area(&[1])?;
    rig.device.flush()?;
    let second = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap())
        .application_write_counter;
    assert_eq!(second, first + 1);

    rig.device.delete_application_area()?;
    let third = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap())
        .application_write_counter;
    assert_eq!(third, second + 1);
    Ok(())
}

#[test]
fn delete_application_area_clears_flag_and_open() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;
    rig.device.delete_application_area()?;

    assert!(!rig.device.exists_application_area()?);
    match rig.device.read_application_area() {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
    match rig.device.delete_application_area() {
        Err(Error::ApplicationAreaIsNotInitialized) => {}
        other => panic!("expected ApplicationAreaIsNotInitialized, got {:?}", other),
    }

    let record = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert!(!record.settings.flags.appdata_initialized());
    assert_eq!(
        record.register_info_crc,
        crc32(&record.register_info_crc_input())
    );
    Ok(())
}

#[test]
fn format_wipes_area_and_registration() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    let before = rig.device.get_common_info()?.write_counter;

    rig.device.format()?;
    assert!(!rig.device.exists_application_area()?);
    match rig.device.get_register_info() {
        Err(Error::RegistrationIsNotInitialized) => {}
        other => panic!("expected RegistrationIsNotInitialized, got {:?}", other),
    }
    // one flush per delete plus the closing flush
    assert_eq!(rig.device.get_common_info()?.write_counter, before + 3);
    Ok(())
}

#[test]
fn format_stops_at_first_failure() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.set_register_info_private("Link")?;
    let persisted = rig.bridge.persist_count();

    match rig.device.format() {
        Err(Error::ApplicationAreaIsNotInitialized) => {}
        other => panic!("expected ApplicationAreaIsNotInitialized, got {:?}", other),
    }
    // registration untouched
    assert_eq!(rig.device.get_register_info()?.amiibo_name, "Link");
    assert_eq!(rig.bridge.persist_count(), persisted);
    Ok(())
}
