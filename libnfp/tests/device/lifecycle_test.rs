#[path = "../common/mod.rs"]
mod common;

use libnfp::bridge::{DeviceEvent, TagEvent};
use libnfp::constants::TAG_SIZE;
use libnfp::types::{DeviceState, MountTarget, TagProtocol};
use libnfp::Error;

#[test]
fn detection_cycle_walks_the_state_machine() {
    let rig = common::rig();
    let dev = &rig.device;

    assert_eq!(dev.state(), DeviceState::Unavailable);
    dev.initialize();
    assert_eq!(dev.state(), DeviceState::Initialized);

    dev.start_detection(TagProtocol::TypeA).unwrap();
    assert_eq!(dev.state(), DeviceState::SearchingForTag);
    assert_eq!(rig.bridge.arm_calls(), vec![TagProtocol::TypeA]);

    dev.load_tag(&common::fixtures::encrypted_image()).unwrap();
    assert_eq!(dev.state(), DeviceState::TagFound);

    dev.mount(MountTarget::All).unwrap();
    assert_eq!(dev.state(), DeviceState::TagMounted);

    dev.unmount().unwrap();
    assert_eq!(dev.state(), DeviceState::TagFound);

    dev.withdraw();
    assert_eq!(dev.state(), DeviceState::TagRemoved);

    // a removed tag allows a fresh detection
    dev.start_detection(TagProtocol::All).unwrap();
    dev.stop_detection().unwrap();
    assert_eq!(dev.state(), DeviceState::Initialized);
    assert_eq!(
        rig.sink.events_for(dev.id()),
        vec![DeviceEvent::Activated, DeviceEvent::Deactivated]
    );
}

#[test]
fn stop_detection_from_mounted_closes_the_tag() {
    let rig = common::mounted_rw();
    rig.device.stop_detection().unwrap();
    assert_eq!(rig.device.state(), DeviceState::Initialized);
    assert_eq!(rig.device.mount_target(), MountTarget::None);
    assert!(rig.bridge.disarm_count() >= 1);
    assert_eq!(
        rig.sink.events_for(rig.device.id()).last(),
        Some(&DeviceEvent::Deactivated)
    );
}

#[test]
fn stop_detection_when_idle_is_a_noop() {
    let rig = common::rig();
    rig.device.initialize();
    rig.device.stop_detection().unwrap();
    assert_eq!(rig.device.state(), DeviceState::Initialized);
}

#[test]
fn stop_detection_before_initialize_fails() {
    let rig = common::rig();
    match rig.device.stop_detection() {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
}

#[test]
fn start_detection_refused_by_bridge() {
    let rig = common::rig();
    rig.device.initialize();
    rig.bridge.set_refuse_arm(true);
    match rig.device.start_detection(TagProtocol::All) {
        Err(Error::NfcDisabled) => {}
        other => panic!("expected NfcDisabled, got {:?}", other),
    }
    assert_eq!(rig.device.state(), DeviceState::Initialized);
}

#[test]
fn start_detection_twice_is_a_state_error() {
    let rig = common::rig().searching().unwrap();
    match rig.device.start_detection(TagProtocol::All) {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
}

#[test]
fn short_image_rejected_without_state_change() {
    let rig = common::rig().searching().unwrap();
    let image = common::fixtures::encrypted_image();
    match rig.device.load_tag(&image[..TAG_SIZE - 1]) {
        Err(Error::InvalidLength { expected, actual }) => {
            assert_eq!(expected, TAG_SIZE);
            assert_eq!(actual, TAG_SIZE - 1);
        }
        other => panic!("expected InvalidLength, got {:?}", other),
    }
    assert_eq!(rig.device.state(), DeviceState::SearchingForTag);
}

#[test]
fn long_image_is_truncated() {
    let rig = common::rig().searching().unwrap();
    let mut image = common::fixtures::encrypted_image();
    image.extend_from_slice(&[0xEE; 32]);
    rig.device.load_tag(&image).unwrap();
    assert_eq!(rig.device.state(), DeviceState::TagFound);
}

#[test]
fn garbage_is_not_an_amiibo() {
    let rig = common::rig().searching().unwrap();
    match rig.device.load_tag(&[0x5A; TAG_SIZE]) {
        Err(Error::NotAnAmiibo) => {}
        other => panic!("expected NotAnAmiibo, got {:?}", other),
    }
    assert_eq!(rig.device.state(), DeviceState::SearchingForTag);
    assert!(rig.sink.events().is_empty());
}

#[test]
fn protocol_filter_rejects_type_a_tags() {
    let rig = common::rig();
    rig.device.initialize();
    rig.device.start_detection(TagProtocol::TypeF).unwrap();
    match rig.device.load_tag(&common::fixtures::encrypted_image()) {
        Err(Error::ProtocolNotAllowed(TagProtocol::TypeA)) => {}
        other => panic!("expected ProtocolNotAllowed, got {:?}", other),
    }
    assert_eq!(rig.device.state(), DeviceState::SearchingForTag);
}

#[test]
fn load_outside_detection_fails() {
    let rig = common::rig();
    rig.device.initialize();
    match rig.device.load_tag(&common::fixtures::encrypted_image()) {
        Err(Error::WrongDeviceState) => {}
        other => panic!("expected WrongDeviceState, got {:?}", other),
    }
}

#[test]
fn removed_tag_takes_precedence_over_wrong_state() {
    let rig = common::mounted_rw();
    rig.device.withdraw();
    match rig.device.get_common_info() {
        Err(Error::TagRemoved) => {}
        other => panic!("expected TagRemoved, got {:?}", other),
    }
    match rig.device.mount(MountTarget::Rom) {
        Err(Error::TagRemoved) => {}
        other => panic!("expected TagRemoved, got {:?}", other),
    }
    match rig.device.get_tag_info() {
        Err(Error::TagRemoved) => {}
        other => panic!("expected TagRemoved, got {:?}", other),
    }
}

#[test]
fn withdraw_is_ignored_without_a_tag() {
    let rig = common::rig().searching().unwrap();
    rig.device.withdraw();
    assert_eq!(rig.device.state(), DeviceState::SearchingForTag);
    assert!(rig.sink.events().is_empty());
}

#[test]
fn finalize_unmounts_and_goes_unavailable() {
    let rig = common::mounted_rw();
    rig.device.finalize();
    assert_eq!(rig.device.state(), DeviceState::Unavailable);
    assert!(!rig.device.is_initialized());
}

#[test]
fn controller_events_follow_initialization() {
    let rig = common::rig();
    let dev = &rig.device;

    // ignored until initialize
    dev.handle_event(TagEvent::ControllerConnected).unwrap();
    assert_eq!(dev.state(), DeviceState::Unavailable);
    assert!(rig.sink.events().is_empty());

    dev.initialize();
    dev.start_detection(TagProtocol::All).unwrap();
    dev.handle_event(TagEvent::TagPresented(common::fixtures::encrypted_image()))
        .unwrap();
    assert_eq!(dev.state(), DeviceState::TagFound);

    dev.handle_event(TagEvent::ControllerDisconnected).unwrap();
    assert_eq!(dev.state(), DeviceState::Unavailable);

    dev.handle_event(TagEvent::ControllerConnected).unwrap();
    assert_eq!(dev.state(), DeviceState::Initialized);
    assert_eq!(
        rig.sink.events_for(dev.id()),
        vec![
            DeviceEvent::Activated,
            DeviceEvent::AvailabilityChanged,
            DeviceEvent::AvailabilityChanged,
        ]
    );
}

#[test]
fn tag_info_reports_the_first_seven_image_bytes() {
    let image = common::fixtures::encrypted_image();
    let rig = common::rig().with_tag(&image).unwrap();
    let info = rig.device.get_tag_info().unwrap();
    assert_eq!(info.uuid, common::fixtures::sample_uuid());
    assert_eq!(&info.uuid.as_bytes()[..], &image[..7]);
    assert_eq!(info.protocol, TagProtocol::TypeA);
    assert_eq!(info.tag_type, libnfp::TagType::Type2);
}

#[test]
fn random_amiibo_id_changes_the_uuid_and_keeps_bcc0() {
    let rig = common::rig()
        .with_tag(&common::fixtures::encrypted_image())
        .unwrap();
    rig.device.set_random_amiibo_id(true);
    let a = rig.device.get_tag_info().unwrap().uuid;
    let b = rig.device.get_tag_info().unwrap().uuid;
    // two equal random ids in a row would be a 2^-48 event
    assert_ne!(a, b);

    for _ in 0..32 {
        let uuid = rig.device.get_tag_info().unwrap().uuid;
        let u = uuid.as_bytes();
        assert_eq!(u[3], 0x88 ^ u[0] ^ u[1] ^ u[2], "bad BCC0 in {}", uuid.to_hex());
    }
}
