//! Exact-size computation: the first half of the size-then-emit pass.

use crate::error::WireError;
use crate::field::{Field, Payload};
use crate::message::Message;
use crate::{tag, varint};

/// Computes the exact number of bytes `message`'s encoding will occupy.
///
/// The sum over all present fields of tag size plus payload size (plus a
/// length varint for length-delimited payloads), plus the raw length of
/// the unknown-byte-range. Pure with respect to the record; must be paired
/// with [`crate::encode_into`] against an unchanged record.
pub fn size_of(message: &dyn Message) -> Result<usize, WireError> {
    let mut n = 0;
    for field in message.present_fields() {
        n += field_size(&field)?;
    }
    Ok(n + message.unknown_bytes().len())
}

pub(crate) fn field_size(field: &Field<'_>) -> Result<usize, WireError> {
    let tag_len = varint::size(tag::pack(field.number, field.payload.wire_type())?);
    let payload_len = match &field.payload {
        Payload::Varint(v) => varint::size(*v),
        Payload::Fixed32(_) => 4,
        Payload::Fixed64(_) => 8,
        Payload::Bytes(b) => varint::size(b.len() as u64) + b.len(),
        Payload::Message(m) => {
            // An empty nested message still costs its zero length byte.
            let l = nested_size(*m)?;
            varint::size(l as u64) + l
        }
    };
    Ok(tag_len + payload_len)
}

/// Sizes a nested message through the capability query: native sized
/// encoder when the type offers one, recursive generic sizing otherwise.
pub(crate) fn nested_size(message: &dyn Message) -> Result<usize, WireError> {
    match message.as_sized_encode() {
        Some(native) => Ok(native.encoded_size()),
        None => size_of(message),
    }
}
