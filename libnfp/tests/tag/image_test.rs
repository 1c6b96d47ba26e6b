#[path = "../common/mod.rs"]
mod common;

use libnfp::constants::TAG_SIZE;
use libnfp::crypto::{AmiiboCrypto, MockCrypto, NoKeys};
use libnfp::tag::{EncryptedTagRecord, TagRecord};
use libnfp::Error;

#[test]
fn sample_images_are_valid_amiibo() {
    let encrypted = EncryptedTagRecord::from_slice(&common::fixtures::encrypted_image()).unwrap();
    assert!(encrypted.is_layout_valid());
    assert!(NoKeys.is_valid(&encrypted));
    assert_eq!(encrypted.uid().serial(), common::fixtures::sample_serial());
    assert_eq!(encrypted.uid().uuid(), common::fixtures::sample_uuid());
    assert_eq!(encrypted.as_bytes()[0x10], 0xA5);

    // the plain dump is not a valid on-tag image as-is
    let plain_as_tag = EncryptedTagRecord::from_slice(&common::fixtures::plain_image()).unwrap();
    assert!(!plain_as_tag.is_layout_valid());
}

#[test]
fn on_tag_fields_sit_at_documented_offsets() {
    let image = common::fixtures::encrypted_image();
    assert_eq!(
        hex::encode(&image[..3]),
        &common::fixtures::SAMPLE_SERIAL_HEX[..6]
    );
    assert_eq!(hex::encode(&image[0x0A..0x0C]), "0fe0");
    assert_eq!(hex::encode(&image[0x0C..0x10]), "f110ffee");
    assert_eq!(image[0x054 + 7], 0x02);
    assert_eq!(hex::encode(&image[0x20C..0x210]), "00000004");
    assert_eq!(hex::encode(&image[0x210..0x214]), "5f000000");
}

#[test]
fn plain_dump_holds_uid_head_late() {
    let image = common::fixtures::plain_image();
    assert_eq!(
        hex::encode(&image[0x1D4..0x1D7]),
        &common::fixtures::SAMPLE_SERIAL_HEX[..6]
    );
    let record = TagRecord::decode(&image).unwrap();
    assert_eq!(record.uid.serial(), common::fixtures::sample_serial());
}

#[test]
fn mock_cipher_roundtrips_the_record() {
    let crypto = MockCrypto::new();
    let encrypted = EncryptedTagRecord::from_slice(&common::fixtures::encrypted_image()).unwrap();
    let record = crypto.decode(&encrypted).unwrap();
    assert_eq!(record, libnfp::test_support::sample_record());
    assert_eq!(crypto.encode(&record).unwrap(), encrypted);
}

#[test]
fn short_images_are_rejected() {
    match TagRecord::decode(&[0u8; TAG_SIZE - 4]) {
        Err(Error::InvalidLength { expected, actual }) => {
            assert_eq!(expected, TAG_SIZE);
            assert_eq!(actual, TAG_SIZE - 4);
        }
        other => panic!("expected InvalidLength, got {:?}", other),
    }
    assert!(EncryptedTagRecord::from_slice(&[]).is_err());
}
