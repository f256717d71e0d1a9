//! Wire-to-record decoder.
//!
//! Reads tag varints, validates wire types, and stores known fields on a
//! [`DynamicRecord`]; any tag the schema does not declare (or declares
//! with a different framing) is captured verbatim — tag and payload — into
//! the record's unknown-byte-range so re-encoding reproduces it exactly.

use std::sync::Arc;

use protopack_buffers::Reader;

use crate::error::WireError;
use crate::field::Presence;
use crate::record::{DynamicRecord, MessageSchema, RecordValue};
use crate::tag::{self, WireType, MAX_FIELD_NUMBER};
use crate::varint;

/// Decodes `buf` into a record described by `schema`.
///
/// Length-delimited payloads are stored as raw bytes; sub-message
/// structure is not reconstructed, which keeps decoding schema-local while
/// still re-encoding byte-identically.
pub fn decode(buf: &[u8], schema: &Arc<MessageSchema>) -> Result<DynamicRecord, WireError> {
    let mut record = DynamicRecord::new(Arc::clone(schema));
    let mut offset = 0;
    while offset < buf.len() {
        let (tag_value, after_tag) = varint::read(buf, offset)?;
        let (raw_number, raw_type) = tag::unpack(tag_value);
        if raw_number == 0 || raw_number > u64::from(MAX_FIELD_NUMBER) {
            return Err(WireError::InvalidFieldNumber(raw_number));
        }
        let wire_type = WireType::from_u8(raw_type)?;
        let number = raw_number as u32;

        let (value, end) = read_payload(buf, after_tag, wire_type)?;
        if declared_with(schema, number, wire_type) {
            store(&mut record, number, value)?;
        } else {
            record.unknown_mut().extend_from_slice(&buf[offset..end]);
        }
        offset = end;
    }
    Ok(record)
}

/// Whether the schema declares `number` with exactly this framing. A
/// known number carrying an unexpected wire type is treated as unknown
/// data rather than rejected, matching forward-compatible readers.
fn declared_with(schema: &MessageSchema, number: u32, wire_type: WireType) -> bool {
    if let Some(descriptor) = schema.field(number) {
        return descriptor.wire_type == wire_type;
    }
    if let Some(group_index) = schema.oneof_containing(number) {
        if let Some(member) = schema.oneofs()[group_index].member(number) {
            return member.wire_type == wire_type;
        }
    }
    false
}

fn read_payload(
    buf: &[u8],
    offset: usize,
    wire_type: WireType,
) -> Result<(RecordValue, usize), WireError> {
    match wire_type {
        WireType::Varint => {
            let (v, end) = varint::read(buf, offset)?;
            Ok((RecordValue::Varint(v), end))
        }
        WireType::Fixed32 => {
            let mut r = Reader::from_slice(buf, offset, buf.len());
            let v = r.u32_le()?;
            Ok((RecordValue::Fixed32(v), r.x))
        }
        WireType::Fixed64 => {
            let mut r = Reader::from_slice(buf, offset, buf.len());
            let v = r.u64_le()?;
            Ok((RecordValue::Fixed64(v), r.x))
        }
        WireType::LengthDelimited => {
            let (len, after_len) = varint::read(buf, offset)?;
            let len = usize::try_from(len).map_err(|_| WireError::UnexpectedEof)?;
            let mut r = Reader::from_slice(buf, after_len, buf.len());
            let bytes = r.buf(len)?;
            Ok((RecordValue::Bytes(bytes.to_vec()), r.x))
        }
    }
}

fn store(record: &mut DynamicRecord, number: u32, value: RecordValue) -> Result<(), WireError> {
    let schema = Arc::clone(record.schema());
    if schema.oneof_containing(number).is_some() {
        return record.set_oneof(number, value);
    }
    match schema.field(number).map(|d| d.presence) {
        Some(Presence::Repeated) => record.push(number, value),
        // Singular fields are last-wins when a tag repeats on the wire.
        _ => record.set(number, value),
    }
}
