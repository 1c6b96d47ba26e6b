#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use common::fixtures::ACCESS_ID;
use libnfp::types::DeviceState;
use serial_test::serial;

#[test]
#[serial]
fn withdraw_racing_load_ends_in_a_known_state() {
    for _ in 0..64 {
        let rig = common::rig().searching().unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let loader = {
            let dev = rig.device.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let _ = dev.load_tag(&common::fixtures::encrypted_image());
            })
        };
        let remover = {
            let dev = rig.device.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                dev.withdraw();
            })
        };
        loader.join().unwrap();
        remover.join().unwrap();

        let state = rig.device.state();
        assert!(
            matches!(
                state,
                DeviceState::SearchingForTag | DeviceState::TagFound | DeviceState::TagRemoved
            ),
            "unexpected state {}",
            state
        );
    }
}

#[test]
#[serial]
fn stop_detection_racing_load_settles_initialized() {
    for _ in 0..64 {
        let rig = common::rig().searching().unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let loader = {
            let dev = rig.device.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                let _ = dev.load_tag(&common::fixtures::encrypted_image());
            })
        };
        let stopper = {
            let dev = rig.device.clone();
            let barrier = barrier.clone();
            thread::spawn(move || {
                barrier.wait();
                dev.stop_detection().unwrap();
            })
        };
        loader.join().unwrap();
        stopper.join().unwrap();

        assert_eq!(rig.device.state(), DeviceState::Initialized);
    }
}

#[test]
#[serial]
fn concurrent_flushes_persist_the_newest_image_last() {
    let rig = common::with_application_area();
    rig.device.open_application_area(ACCESS_ID).unwrap();
    let start = rig.device.get_common_info().unwrap().write_counter;

    let workers: Vec<_> = (0..4)
        .map(|_| {
            let dev = rig.device.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    dev.flush().unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    let end = rig.device.get_common_info().unwrap().write_counter;
    assert_eq!(end, start + 100);

    // stale images are skipped, never written over newer ones
    let last = common::fixtures::decode_encrypted(&rig.bridge.last_persisted().unwrap());
    assert_eq!(last.write_counter, end);
    let counters: Vec<u16> = rig
        .bridge
        .persisted()
        .iter()
        .map(|img| common::fixtures::decode_encrypted(img).write_counter)
        .collect();
    assert!(counters.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn devices_are_independent() {
    let a = common::mounted_rw();
    let b = common::mounted_rw();
    let ta = {
        let dev = a.device.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                dev.flush().unwrap();
            }
        })
    };
    let tb = {
        let dev = b.device.clone();
        thread::spawn(move || {
            for _ in 0..50 {
                dev.flush_debug().unwrap();
            }
        })
    };
    ta.join().unwrap();
    tb.join().unwrap();
    assert_eq!(a.device.get_common_info().unwrap().write_counter, 50);
    assert_eq!(b.device.get_common_info().unwrap().write_counter, 50);
}
