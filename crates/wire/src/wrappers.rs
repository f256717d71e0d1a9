//! Wrapper messages for presence-carrying scalars.
//!
//! A wrapped scalar is a single-field message (field 1) distinguishing
//! "unset" from "set to zero": the container holds an `Option` of the
//! wrapper, and a present wrapper around a zero value still encodes as tag
//! plus zero length. Inside the wrapper the scalar follows implicit
//! presence, so the zero value yields an empty payload.
//!
//! Every wrapper implements both [`Message`] and the native [`SizedEncode`]
//! contract, so nested encoding of wrappers takes the fast path while the
//! generic fallback must agree byte-for-byte.

use protopack_buffers::TailWriter;

use crate::error::WireError;
use crate::field::{Field, Payload};
use crate::message::{Message, SizedEncode};
use crate::tag::{tag, WireType};
use crate::varint;

const VALUE_FIELD: u32 = 1;

/// Wrapped UTF-8 string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringValue {
    pub value: String,
}

impl StringValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Message for StringValue {
    fn present_fields(&self) -> Vec<Field<'_>> {
        if self.value.is_empty() {
            return Vec::new();
        }
        vec![Field {
            number: VALUE_FIELD,
            payload: Payload::Bytes(self.value.as_bytes()),
        }]
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for StringValue {
    fn encoded_size(&self) -> usize {
        let l = self.value.len();
        if l == 0 {
            return 0;
        }
        1 + varint::size(l as u64) + l
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        if !self.value.is_empty() {
            w.bytes(self.value.as_bytes());
            varint::write(&mut w, self.value.len() as u64);
            varint::write(&mut w, tag(VALUE_FIELD, WireType::LengthDelimited));
        }
        Ok(w.written())
    }
}

/// Wrapped byte string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BytesValue {
    pub value: Vec<u8>,
}

impl BytesValue {
    pub fn new(value: impl Into<Vec<u8>>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Message for BytesValue {
    fn present_fields(&self) -> Vec<Field<'_>> {
        if self.value.is_empty() {
            return Vec::new();
        }
        vec![Field {
            number: VALUE_FIELD,
            payload: Payload::Bytes(&self.value),
        }]
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for BytesValue {
    fn encoded_size(&self) -> usize {
        let l = self.value.len();
        if l == 0 {
            return 0;
        }
        1 + varint::size(l as u64) + l
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        if !self.value.is_empty() {
            w.bytes(&self.value);
            varint::write(&mut w, self.value.len() as u64);
            varint::write(&mut w, tag(VALUE_FIELD, WireType::LengthDelimited));
        }
        Ok(w.written())
    }
}

/// Wrapped boolean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoolValue {
    pub value: bool,
}

impl BoolValue {
    pub fn new(value: bool) -> Self {
        Self { value }
    }
}

impl Message for BoolValue {
    fn present_fields(&self) -> Vec<Field<'_>> {
        if !self.value {
            return Vec::new();
        }
        vec![Field {
            number: VALUE_FIELD,
            payload: Payload::Varint(1),
        }]
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for BoolValue {
    fn encoded_size(&self) -> usize {
        if self.value {
            2
        } else {
            0
        }
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        if self.value {
            w.u8(1);
            varint::write(&mut w, tag(VALUE_FIELD, WireType::Varint));
        }
        Ok(w.written())
    }
}

/// Wrapped unsigned 64-bit integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UInt64Value {
    pub value: u64,
}

impl UInt64Value {
    pub fn new(value: u64) -> Self {
        Self { value }
    }
}

impl Message for UInt64Value {
    fn present_fields(&self) -> Vec<Field<'_>> {
        if self.value == 0 {
            return Vec::new();
        }
        vec![Field {
            number: VALUE_FIELD,
            payload: Payload::Varint(self.value),
        }]
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for UInt64Value {
    fn encoded_size(&self) -> usize {
        if self.value == 0 {
            return 0;
        }
        1 + varint::size(self.value)
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        if self.value != 0 {
            varint::write(&mut w, self.value);
            varint::write(&mut w, tag(VALUE_FIELD, WireType::Varint));
        }
        Ok(w.written())
    }
}

/// Wrapped double-precision float, framed as fixed64.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoubleValue {
    pub value: f64,
}

impl DoubleValue {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Message for DoubleValue {
    fn present_fields(&self) -> Vec<Field<'_>> {
        if self.value == 0.0 {
            return Vec::new();
        }
        vec![Field {
            number: VALUE_FIELD,
            payload: Payload::Fixed64(self.value.to_bits()),
        }]
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for DoubleValue {
    fn encoded_size(&self) -> usize {
        if self.value == 0.0 {
            return 0;
        }
        9
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        if self.value != 0.0 {
            w.u64_le(self.value.to_bits());
            varint::write(&mut w, tag(VALUE_FIELD, WireType::Fixed64));
        }
        Ok(w.written())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode;

    #[test]
    fn wrapped_zero_payloads_are_empty() {
        assert_eq!(StringValue::default().encoded_size(), 0);
        assert_eq!(BoolValue::default().encoded_size(), 0);
        assert_eq!(UInt64Value::default().encoded_size(), 0);
        assert_eq!(DoubleValue::default().encoded_size(), 0);
        assert_eq!(encode(&StringValue::default()).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn string_wrapper_payload_layout() {
        let w = StringValue::new("hi");
        assert_eq!(w.encoded_size(), 4);
        assert_eq!(encode(&w).unwrap(), [0x0a, 0x02, b'h', b'i']);
    }

    #[test]
    fn bool_wrapper_payload_layout() {
        let w = BoolValue::new(true);
        assert_eq!(w.encoded_size(), 2);
        assert_eq!(encode(&w).unwrap(), [0x08, 0x01]);
    }

    #[test]
    fn double_wrapper_payload_layout() {
        let w = DoubleValue::new(1.5);
        let bytes = encode(&w).unwrap();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0x09);
        assert_eq!(&bytes[1..], 1.5f64.to_le_bytes());
    }
}
