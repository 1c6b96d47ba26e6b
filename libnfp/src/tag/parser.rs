// libnfp/src/tag/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Copy `N` bytes at `idx` into a fixed array.
pub fn array_at<const N: usize>(data: &[u8], idx: usize) -> Result<[u8; N]> {
    let s = slice_at(data, idx, N)?;
    let mut arr = [0u8; N];
    arr.copy_from_slice(s);
    Ok(arr)
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Little-endian `u16` at `idx`.
pub fn le_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    Ok(u16::from_le_bytes(array_at(data, idx)?))
}

/// Big-endian `u16` at `idx`.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    Ok(u16::from_be_bytes(array_at(data, idx)?))
}

/// Little-endian `u32` at `idx`.
pub fn le_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    Ok(u32::from_le_bytes(array_at(data, idx)?))
}

/// Big-endian `u32` at `idx`.
pub fn be_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    Ok(u32::from_be_bytes(array_at(data, idx)?))
}

/// Big-endian `u64` at `idx`.
pub fn be_u64_at(data: &[u8], idx: usize) -> Result<u64> {
    Ok(u64::from_be_bytes(array_at(data, idx)?))
}

/// Copy `src` into `dst` at `idx`. Callers write into fixed-size images
/// whose offsets are compile-time constants, so an overrun is a bug.
pub(crate) fn put(dst: &mut [u8], idx: usize, src: &[u8]) {
    dst[idx..idx + src.len()].copy_from_slice(src);
}
