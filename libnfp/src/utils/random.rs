// libnfp/src/utils/random.rs

//! Scrub and padding bytes. Tags get random filler wherever firmware
//! writes unpredictable data, so dumps from different sessions differ.

use rand::Rng;

/// Fill `buf` from the thread-local RNG.
pub fn fill_random(buf: &mut [u8]) {
    rand::rng().fill(buf);
}

/// Random byte.
pub fn random_u8() -> u8 {
    rand::rng().random()
}

/// Random `u16`.
pub fn random_u16() -> u16 {
    rand::rng().random()
}

/// Random `u32`.
pub fn random_u32() -> u32 {
    rand::rng().random()
}

/// Random `u64`.
pub fn random_u64() -> u64 {
    rand::rng().random()
}
