// libnfp/src/utils/hex.rs

//! Hex rendering for log output: tag serials and image dumps.

use std::fmt::Write;

const DUMP_ROW: usize = 16;

/// Lowercase hex without separators: `&[0xde, 0xad]` -> `"dead"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        // writing to a String cannot fail
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Lowercase hex, one space between bytes: `&[0xde, 0xad]` -> `"de ad"`.
pub fn bytes_to_hex_spaced(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 3);
    for (i, b) in bytes.iter().enumerate() {
        if i != 0 {
            s.push(' ');
        }
        let _ = write!(&mut s, "{:02x}", b);
    }
    s
}

/// Sixteen bytes per row, each prefixed with its offset:
/// `"0x010: a5 00 01 ..."`.
pub fn hex_dump_rows(bytes: &[u8]) -> Vec<String> {
    bytes
        .chunks(DUMP_ROW)
        .enumerate()
        .map(|(i, row)| format!("{:#05x}: {}", i * DUMP_ROW, bytes_to_hex_spaced(row)))
        .collect()
}
