//! Base-128 varint primitive.
//!
//! Unsigned 64-bit integers only; signed values must be pre-converted by
//! the schema layer's designated signed-encoding rule before they reach
//! this module.

use protopack_buffers::TailWriter;

use crate::error::WireError;

/// Longest possible encoding of a `u64`: ten 7-bit groups.
pub const MAX_LEN: usize = 10;

/// Encoded byte length of `value`, without emitting anything. Minimum 1.
pub fn size(value: u64) -> usize {
    ((64 - (value | 1).leading_zeros()) as usize + 6) / 7
}

/// Writes `value` into the tail writer, least-significant group first,
/// continuation bit set on all but the final byte.
///
/// The bytes are laid down forward inside a reserved span so they come out
/// in correct wire order even though the buffer fills backward.
pub fn write(w: &mut TailWriter<'_>, mut value: u64) {
    let n = size(value);
    let start = w.x - n;
    for i in 0..n - 1 {
        w.uint8[start + i] = (value as u8 & 0x7f) | 0x80;
        value >>= 7;
    }
    w.uint8[start + n - 1] = value as u8;
    w.x = start;
}

/// Reads a varint from `buf` at `offset`, returning the value and the
/// offset just past it.
///
/// Fails with [`WireError::MalformedVarint`] when more than [`MAX_LEN`]
/// bytes carry a continuation bit (exceeds the 64-bit range) or the input
/// is exhausted mid-sequence.
pub fn read(buf: &[u8], offset: usize) -> Result<(u64, usize), WireError> {
    let mut value = 0u64;
    for i in 0..MAX_LEN {
        let pos = offset + i;
        let byte = *buf
            .get(pos)
            .ok_or(WireError::MalformedVarint { offset })?;
        value |= u64::from(byte & 0x7f) << (7 * i as u32);
        if byte & 0x80 == 0 {
            return Ok((value, pos + 1));
        }
    }
    Err(WireError::MalformedVarint { offset })
}
