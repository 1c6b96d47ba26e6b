#[path = "../common/mod.rs"]
mod common;

use libnfp::constants::TAG_SIZE;
use libnfp::crypto::{AmiiboCrypto, NoKeys};
use libnfp::tag::{EncryptedTagRecord, TagRecord};
use proptest::prelude::*;

proptest! {
    #[test]
    fn validity_check_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..TAG_SIZE * 2)) {
        if let Ok(encrypted) = EncryptedTagRecord::from_slice(&bytes) {
            let _ = NoKeys.is_valid(&encrypted);
            let _ = encrypted.model_info();
        }
    }

    #[test]
    fn reorder_preserves_every_byte(bytes in prop::collection::vec(any::<u8>(), TAG_SIZE)) {
        let record = TagRecord::decode(&bytes).unwrap();
        let encrypted = EncryptedTagRecord::from_plain(&record);
        prop_assert_eq!(encrypted.to_plain_layout().to_vec(), bytes);
    }
}
