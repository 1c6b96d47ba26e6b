#[path = "../common/mod.rs"]
mod common;

use libnfp::tag::crc32;
use libnfp::Error;

#[test]
fn fresh_figure_is_unregistered() {
    let rig = common::mounted_rw();
    match rig.device.get_register_info() {
        Err(Error::RegistrationIsNotInitialized) => {}
        other => panic!("expected RegistrationIsNotInitialized, got {:?}", other),
    }
    match rig.device.delete_register_info() {
        Err(Error::RegistrationIsNotInitialized) => {}
        other => panic!("expected RegistrationIsNotInitialized, got {:?}", other),
    }
}

#[test]
fn register_sets_name_and_creation_date() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.set_register_info_private("Link")?;

    let info = rig.device.get_register_info()?;
    assert_eq!(info.amiibo_name, "Link");
    assert_eq!(info.creation_date, common::fixtures::today());
    assert_eq!(info.font_region, 0);
    assert_eq!(info.mii.as_bytes()[0], 0x03);

    let private = rig.device.get_register_info_private()?;
    assert_eq!(private.amiibo_name, "Link");
    assert_eq!(private.mii, info.mii);

    let admin = rig.device.get_admin_info()?;
    assert_eq!(admin.flags & 0x01, 0x01);
    Ok(())
}

#[test]
fn re_registering_keeps_the_creation_date() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.set_register_info_private("Link")?;
    rig.calendar.set(common::fixtures::tomorrow());
    rig.device.set_register_info_private("Toon Link")?;

    let info = rig.device.get_register_info()?;
    assert_eq!(info.amiibo_name, "Toon Link");
    assert_eq!(info.creation_date, common::fixtures::today());
    Ok(())
}

#[test]
fn oversized_name_is_rejected_before_any_change() {
    let rig = common::mounted_rw();
    match rig.device.set_register_info_private("Ganondorf the Great") {
        Err(Error::InvalidArgument(_)) => {}
        other => panic!("expected InvalidArgument, got {:?}", other),
    }
    assert_eq!(rig.bridge.persist_count(), 0);
}

#[test]
fn register_recomputes_register_info_crc() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.set_register_info_private("Link")?;

    let record = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert!(record.settings.flags.amiibo_initialized());
    assert_eq!(
        record.register_info_crc,
        crc32(&record.register_info_crc_input())
    );
    assert_ne!(record.register_info_crc, 0);
    Ok(())
}

#[test]
fn delete_register_info_scrubs_owner() -> anyhow::Result<()> {
    let rig = common::mounted_rw();
    rig.device.set_register_info_private("Link")?;
    let registered = rig.device.get_register_info()?;

    rig.device.delete_register_info()?;
    match rig.device.get_register_info() {
        Err(Error::RegistrationIsNotInitialized) => {}
        other => panic!("expected RegistrationIsNotInitialized, got {:?}", other),
    }

    let record = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert!(!record.settings.flags.amiibo_initialized());
    assert_eq!(record.settings.flags.font_region(), 0);
    assert_ne!(record.owner_mii, registered.mii);
    assert_eq!(
        record.register_info_crc,
        crc32(&record.register_info_crc_input())
    );

    let admin = rig.device.get_admin_info()?;
    assert_eq!(admin.flags & 0x01, 0);
    Ok(())
}
