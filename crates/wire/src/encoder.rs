//! Backward-fill encoder: the second half of the size-then-emit pass.
//!
//! The destination buffer is filled from the end toward the start. Fields
//! are taken in descending field-number order, each written as payload,
//! then length varint (for length-delimited payloads), then tag; writing
//! backward reverses emission order, so declared-ascending fields appear
//! ascending on the wire. The exact size is known from the sizing pass, so
//! every write lands at its final wire position in one traversal with no
//! reallocation and no second pass.

use protopack_buffers::TailWriter;

use crate::error::WireError;
use crate::field::{Field, Payload};
use crate::message::Message;
use crate::sizer::size_of;
use crate::{tag, varint};

/// Encodes `message` into a freshly allocated, exactly-sized buffer.
pub fn encode(message: &dyn Message) -> Result<Vec<u8>, WireError> {
    let size = size_of(message)?;
    let mut buf = vec![0u8; size];
    encode_into(message, &mut buf)?;
    Ok(buf)
}

/// Encodes `message` into `buf`, which must be exactly `size_of` bytes.
///
/// Returns the number of bytes written (always the full buffer length).
/// Fails with [`WireError::BufferSizeMismatch`] when the buffer length
/// differs from the precomputed size in either direction; on any error the
/// buffer's contents are unspecified.
pub fn encode_into(message: &dyn Message, buf: &mut [u8]) -> Result<usize, WireError> {
    let expected = size_of(message)?;
    if buf.len() != expected {
        return Err(WireError::BufferSizeMismatch {
            expected,
            actual: buf.len(),
        });
    }
    let mut w = TailWriter::new(buf);
    let written = encode_fields_tail(message, &mut w)?;
    debug_assert_eq!(written, expected);
    Ok(written)
}

/// Writes a message's unknown bytes and present fields at the writer's
/// tail; returns the bytes written. Shared by the top-level entry point
/// and the generic nested fallback.
fn encode_fields_tail(message: &dyn Message, w: &mut TailWriter<'_>) -> Result<usize, WireError> {
    let before = w.written();
    // Unknown bytes trail the known fields on the wire, so in the
    // backward fill they go in first.
    w.bytes(message.unknown_bytes());
    let fields = message.present_fields();
    for field in fields.iter().rev() {
        write_field(field, w)?;
    }
    Ok(w.written() - before)
}

fn write_field(field: &Field<'_>, w: &mut TailWriter<'_>) -> Result<(), WireError> {
    match &field.payload {
        Payload::Varint(v) => varint::write(w, *v),
        Payload::Fixed32(v) => w.u32_le(*v),
        Payload::Fixed64(v) => w.u64_le(*v),
        Payload::Bytes(b) => {
            w.bytes(b);
            varint::write(w, b.len() as u64);
        }
        Payload::Message(m) => {
            let len = write_nested(*m, w).map_err(|e| WireError::NestedEncode {
                field: field.number,
                source: Box::new(e),
            })?;
            varint::write(w, len as u64);
        }
    }
    varint::write(w, tag::pack(field.number, field.payload.wire_type())?);
    Ok(())
}

/// Two-tier nested dispatch: a message exposing the native sized-encode
/// contract fills the tail itself; anything else goes through the generic
/// field walk. Both paths are byte-identical.
fn write_nested(message: &dyn Message, w: &mut TailWriter<'_>) -> Result<usize, WireError> {
    match message.as_sized_encode() {
        Some(native) => {
            let n = native.encode_to_tail(w.remaining_mut())?;
            w.advance(n);
            Ok(n)
        }
        None => encode_fields_tail(message, w),
    }
}
