//! Byte helpers for channel and contract payloads.

use std::fmt::Write as _;

/// Length the node expects for attached channel-state data.
pub const STATE_DATA_LEN: usize = 32;

/// Zero-extend `data` to `len` bytes. Inputs already at least `len` long are
/// returned unchanged.
pub fn pad_to(data: &[u8], len: usize) -> Vec<u8> {
    let mut padded = data.to_vec();
    if padded.len() < len {
        padded.resize(len, 0);
    }
    padded
}

/// Lower-case hex rendering.
pub fn to_hex(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() * 2);
    for byte in data {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
