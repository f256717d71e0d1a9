//! The fast native path and the generic fallback path must agree
//! byte-for-byte on every nested message, and nested failures must be
//! wrapped with the failing field number.

use protopack_buffers::TailWriter;
use protopack_wire::{
    encode, size_of, tag, varint, Field, Message, Payload, SizedEncode, StringValue,
    UnknownFields, WireError, WireType,
};

/// A typed per-route config carrying its own generated-style sized
/// encoder: name(1), qualifier(2), fire_and_forget(3), wrapped
/// empty_body(4), plus captured unknown bytes.
#[derive(Default)]
struct FunctionRoute {
    name: String,
    qualifier: String,
    fire_and_forget: bool,
    empty_body: Option<StringValue>,
    unknown: UnknownFields,
}

impl Message for FunctionRoute {
    fn present_fields(&self) -> Vec<Field<'_>> {
        let mut out = Vec::new();
        if !self.name.is_empty() {
            out.push(Field {
                number: 1,
                payload: Payload::Bytes(self.name.as_bytes()),
            });
        }
        if !self.qualifier.is_empty() {
            out.push(Field {
                number: 2,
                payload: Payload::Bytes(self.qualifier.as_bytes()),
            });
        }
        if self.fire_and_forget {
            out.push(Field {
                number: 3,
                payload: Payload::Varint(1),
            });
        }
        if let Some(wrapper) = &self.empty_body {
            out.push(Field {
                number: 4,
                payload: Payload::Message(wrapper),
            });
        }
        out
    }

    fn unknown_bytes(&self) -> &[u8] {
        self.unknown.as_slice()
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for FunctionRoute {
    fn encoded_size(&self) -> usize {
        let mut n = 0;
        let l = self.name.len();
        if l > 0 {
            n += 1 + varint::size(l as u64) + l;
        }
        let l = self.qualifier.len();
        if l > 0 {
            n += 1 + varint::size(l as u64) + l;
        }
        if self.fire_and_forget {
            n += 2;
        }
        if let Some(wrapper) = &self.empty_body {
            let l = wrapper.encoded_size();
            n += 1 + varint::size(l as u64) + l;
        }
        n + self.unknown.len()
    }

    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError> {
        let mut w = TailWriter::new(buf);
        w.bytes(self.unknown.as_slice());
        if let Some(wrapper) = &self.empty_body {
            let n = wrapper.encode_to_tail(w.remaining_mut())?;
            w.advance(n);
            varint::write(&mut w, n as u64);
            varint::write(&mut w, tag::tag(4, WireType::LengthDelimited));
        }
        if self.fire_and_forget {
            w.u8(1);
            varint::write(&mut w, tag::tag(3, WireType::Varint));
        }
        if !self.qualifier.is_empty() {
            w.bytes(self.qualifier.as_bytes());
            varint::write(&mut w, self.qualifier.len() as u64);
            varint::write(&mut w, tag::tag(2, WireType::LengthDelimited));
        }
        if !self.name.is_empty() {
            w.bytes(self.name.as_bytes());
            varint::write(&mut w, self.name.len() as u64);
            varint::write(&mut w, tag::tag(1, WireType::LengthDelimited));
        }
        Ok(w.written())
    }
}

/// Hides a message's native encoder so nesting it exercises the generic
/// fallback walk.
struct ForceFallback<'a, M: Message>(&'a M);

impl<M: Message> Message for ForceFallback<'_, M> {
    fn present_fields(&self) -> Vec<Field<'_>> {
        self.0.present_fields()
    }

    fn unknown_bytes(&self) -> &[u8] {
        self.0.unknown_bytes()
    }
}

/// Minimal container holding one nested message at field 1.
struct Holder<'a> {
    nested: &'a dyn Message,
}

impl Message for Holder<'_> {
    fn present_fields(&self) -> Vec<Field<'_>> {
        vec![Field {
            number: 1,
            payload: Payload::Message(self.nested),
        }]
    }
}

fn sample_route() -> FunctionRoute {
    let mut unknown = UnknownFields::new();
    unknown.extend_from_slice(&[0x4a, 0x02, 0xbe, 0xef]);
    FunctionRoute {
        name: "ingest".into(),
        qualifier: "order-svc".into(),
        fire_and_forget: true,
        empty_body: Some(StringValue::new("")),
        unknown,
    }
}

// ---------------------------------------------------------------------------
// Equivalence
// ---------------------------------------------------------------------------

#[test]
fn native_tail_encode_matches_generic_engine() {
    let route = sample_route();
    let mut buf = vec![0u8; route.encoded_size()];
    let n = route.encode_to_tail(&mut buf).unwrap();
    assert_eq!(n, buf.len());
    assert_eq!(buf, encode(&route).unwrap());
}

#[test]
fn nested_fast_and_fallback_paths_are_byte_identical() {
    let route = sample_route();
    let fast = encode(&Holder { nested: &route }).unwrap();
    let fallback = encode(&Holder {
        nested: &ForceFallback(&route),
    })
    .unwrap();
    assert_eq!(fast, fallback);
    assert_eq!(fast.len(), size_of(&Holder { nested: &route }).unwrap());
}

#[test]
fn both_paths_agree_for_an_empty_nested_message() {
    let route = FunctionRoute::default();
    let fast = encode(&Holder { nested: &route }).unwrap();
    let fallback = encode(&Holder {
        nested: &ForceFallback(&route),
    })
    .unwrap();
    // Empty nested message still costs a tag byte and a zero length byte.
    assert_eq!(fast, [0x0a, 0x00]);
    assert_eq!(fast, fallback);
}

#[test]
fn wrapper_dual_path_agrees() {
    let wrapper = StringValue::new("payload");
    let fast = encode(&Holder { nested: &wrapper }).unwrap();
    let fallback = encode(&Holder {
        nested: &ForceFallback(&wrapper),
    })
    .unwrap();
    assert_eq!(fast, fallback);
}

// ---------------------------------------------------------------------------
// Nested failure propagation
// ---------------------------------------------------------------------------

/// Sizes fine, refuses to encode.
struct Poisoned;

impl Message for Poisoned {
    fn present_fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        Some(self)
    }
}

impl SizedEncode for Poisoned {
    fn encoded_size(&self) -> usize {
        1
    }

    fn encode_to_tail(&self, _buf: &mut [u8]) -> Result<usize, WireError> {
        Err(WireError::InvalidFieldNumber(0))
    }
}

static POISONED: Poisoned = Poisoned;

struct PoisonHolder;

impl Message for PoisonHolder {
    fn present_fields(&self) -> Vec<Field<'_>> {
        vec![Field {
            number: 7,
            payload: Payload::Message(&POISONED),
        }]
    }
}

#[test]
fn nested_failure_names_the_failing_field() {
    assert_eq!(
        encode(&PoisonHolder).unwrap_err(),
        WireError::NestedEncode {
            field: 7,
            source: Box::new(WireError::InvalidFieldNumber(0)),
        }
    );
}
