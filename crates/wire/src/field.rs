//! Field descriptors and the per-call field view the engine walks.

use crate::error::WireError;
use crate::message::Message;
use crate::tag::{WireType, MAX_FIELD_NUMBER};

/// How a field's presence is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Scalar with a zero default: equal-to-zero means omitted from the
    /// wire entirely. The standard proto3 scalar rule.
    Implicit,
    /// Emitted whenever set, even when the value equals zero. Wrapped
    /// scalars, nested messages, and oneof members behave this way.
    Explicit,
    /// Every occurrence is emitted, unpacked, in insertion order.
    Repeated,
}

/// Static description of one field of a message type.
///
/// Field numbers are immutable once a schema is published; wire
/// compatibility depends on number-and-wire-type stability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub number: u32,
    pub wire_type: WireType,
    pub presence: Presence,
}

impl FieldDescriptor {
    /// Builds a descriptor, rejecting field numbers outside the wire
    /// format's legal range.
    pub fn new(number: u32, wire_type: WireType, presence: Presence) -> Result<Self, WireError> {
        if number == 0 || number > MAX_FIELD_NUMBER {
            return Err(WireError::InvalidFieldNumber(u64::from(number)));
        }
        Ok(Self {
            number,
            wire_type,
            presence,
        })
    }
}

/// A present field's payload, borrowed from the record for the duration of
/// one sizing or encoding pass.
pub enum Payload<'a> {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    Bytes(&'a [u8]),
    Message(&'a dyn Message),
}

impl Payload<'_> {
    /// The wire type this payload is framed with.
    pub fn wire_type(&self) -> WireType {
        match self {
            Payload::Varint(_) => WireType::Varint,
            Payload::Fixed32(_) => WireType::Fixed32,
            Payload::Fixed64(_) => WireType::Fixed64,
            Payload::Bytes(_) | Payload::Message(_) => WireType::LengthDelimited,
        }
    }
}

/// One present field: number plus payload. Produced by
/// [`Message::present_fields`] in ascending field-number order.
pub struct Field<'a> {
    pub number: u32,
    pub payload: Payload<'a>,
}
