#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{ACCESS_ID, decode_encrypted};
use libnfp::tag::AmiiboDate;
use libnfp::Error;

#[test]
fn flush_stamps_date_once_per_day() -> anyhow::Result<()> {
    let rig = common::mounted_rw();

    rig.device.flush()?;
    let first = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(
        first.settings.write_date,
        AmiiboDate::from_calendar(common::fixtures::today())
    );
    assert_eq!(first.settings.crc_counter, 1);
    assert_eq!(first.write_counter, 1);

    // same day: crc untouched
    rig.device.flush()?;
    let second = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(second.settings.crc_counter, 1);
    assert_eq!(second.write_counter, 2);

    rig.calendar.set(common::fixtures::tomorrow());
    rig.device.flush()?;
    let third = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(third.settings.crc_counter, 2);
    assert_eq!(third.write_counter, 3);
    assert_eq!(third.settings.write_date.to_calendar(), common::fixtures::tomorrow());
    Ok(())
}

#[test]
fn flush_debug_leaves_the_date_alone() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.flush_debug()?;
    let record = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(record.settings.write_date.raw(), 0);
    assert_eq!(record.settings.crc_counter, 0);
    assert_eq!(record.write_counter, 1);
    Ok(())
}

#[test]
fn failed_persist_keeps_counters() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.bridge.set_fail_persist(true);
    match rig.device.flush() {
        Err(Error::WriteAmiiboFailed) => {}
        other => panic!("expected WriteAmiiboFailed, got {:?}", other),
    }
    // no rollback
    assert_eq!(rig.device.get_common_info()?.write_counter, 1);

    rig.bridge.set_fail_persist(false);
    rig.device.flush()?;
    let record = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(record.write_counter, 2);
    Ok(())
}

#[test]
fn encode_failure_is_write_failure() {
    let rig = common::mounted_rw();
    rig.crypto.set_fail_encode(true);
    match rig.device.flush() {
        Err(Error::WriteAmiiboFailed) => {}
        other => panic!("expected WriteAmiiboFailed, got {:?}", other),
    }
    assert_eq!(rig.bridge.persist_count(), 0);
}

#[test]
fn write_counter_saturates() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    let mut data = rig.device.get_all()?;
    data.common_info.write_counter = 0xFFFF;
    rig.device.set_all(&data)?;

    rig.device.flush()?;
    rig.device.flush()?;
    assert_eq!(rig.device.get_common_info()?.write_counter, 0xFFFF);
    Ok(())
}

#[test]
fn unmount_flushes_pending_changes() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;
    rig.device.set_application_area(&[0xAB; 16])?;
    let before = rig.bridge.persist_count();

    rig.device.unmount()?;
    assert_eq!(rig.bridge.persist_count(), before + 1);
    let record = decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(&record.application_area.as_bytes()[..16], &[0xAB; 16]);
    Ok(())
}

#[test]
fn unmount_succeeds_when_implicit_flush_fails() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;
    rig.device.set_application_area(&[0xCD; 16])?;
    rig.bridge.set_fail_persist(true);

    rig.device.unmount()?;
    assert_eq!(rig.device.state(), libnfp::DeviceState::TagFound);
    Ok(())
}

#[test]
fn withdraw_flushes_pending_changes() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID)?;
    rig.device.set_application_area(&[0x77; 8])?;
    let before = rig.bridge.persist_count();

    rig.device.withdraw();
    assert_eq!(rig.bridge.persist_count(), before + 1);
    Ok(())
}

#[test]
fn get_all_set_all_roundtrip() -> anyhow::Result<()> {
    let rig = common::with_application_area();
    let mut data = rig.device.get_all()?;
    assert_eq!(data.magic, 0xA5);
    assert_eq!(data.access_id, ACCESS_ID);

    data.amiibo_name[0] = u16::from(b'M');
    rig.device.set_all(&data)?;
    assert_eq!(rig.device.get_all()?, data);

    // written on unmount
    let before = rig.bridge.persist_count();
    rig.device.unmount()?;
    assert_eq!(rig.bridge.persist_count(), before + 1);
    Ok(())
}
