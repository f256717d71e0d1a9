//! Generic record: the reflection-style representation the fallback
//! encoding path walks.
//!
//! One engine parameterized over a schema's field-descriptor list replaces
//! the per-message-type sizer/encoder pairs that schema compilers usually
//! generate.

use std::sync::Arc;

use crate::error::WireError;
use crate::field::{Field, FieldDescriptor, Payload, Presence};
use crate::message::Message;
use crate::oneof::OneofDescriptor;
use crate::tag::WireType;
use crate::unknown::UnknownFields;

/// The ordered field and oneof layout of one message type.
///
/// Shared between records via `Arc`: schemas are immutable once built, so
/// independent records can size and encode in parallel freely.
#[derive(Debug, PartialEq, Eq)]
pub struct MessageSchema {
    fields: Vec<FieldDescriptor>,
    oneofs: Vec<OneofDescriptor>,
}

impl MessageSchema {
    /// Builds a schema, rejecting duplicate field numbers across plain
    /// fields and oneof members.
    pub fn new(
        fields: Vec<FieldDescriptor>,
        oneofs: Vec<OneofDescriptor>,
    ) -> Result<Self, WireError> {
        let mut seen: Vec<u32> = Vec::new();
        let plain = fields.iter().map(|f| f.number);
        let members = oneofs.iter().flat_map(|g| g.members().iter().map(|m| m.number));
        for number in plain.chain(members) {
            if seen.contains(&number) {
                return Err(WireError::InvalidFieldNumber(u64::from(number)));
            }
            seen.push(number);
        }
        Ok(Self { fields, oneofs })
    }

    /// Looks up a plain (non-oneof) field descriptor.
    pub fn field(&self, number: u32) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.number == number)
    }

    /// The index of the oneof group containing `number`, if any.
    pub fn oneof_containing(&self, number: u32) -> Option<usize> {
        self.oneofs.iter().position(|g| g.contains(number))
    }

    pub fn oneofs(&self) -> &[OneofDescriptor] {
        &self.oneofs
    }

    /// Whether `number` is declared anywhere in this schema.
    pub fn declares(&self, number: u32) -> bool {
        self.field(number).is_some() || self.oneof_containing(number).is_some()
    }
}

/// A value stored in a [`DynamicRecord`] field.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    Varint(u64),
    Fixed32(u32),
    Fixed64(u64),
    Bytes(Vec<u8>),
    Str(String),
    Message(DynamicRecord),
}

impl RecordValue {
    /// The framing this value encodes with.
    pub fn wire_type(&self) -> WireType {
        match self {
            RecordValue::Varint(_) => WireType::Varint,
            RecordValue::Fixed32(_) => WireType::Fixed32,
            RecordValue::Fixed64(_) => WireType::Fixed64,
            RecordValue::Bytes(_) | RecordValue::Str(_) | RecordValue::Message(_) => {
                WireType::LengthDelimited
            }
        }
    }

    /// Whether this value equals its type's zero value. Nested messages
    /// are never zero: an empty sub-message is still present.
    fn is_zero(&self) -> bool {
        match self {
            RecordValue::Varint(v) => *v == 0,
            RecordValue::Fixed32(v) => *v == 0,
            RecordValue::Fixed64(v) => *v == 0,
            RecordValue::Bytes(b) => b.is_empty(),
            RecordValue::Str(s) => s.is_empty(),
            RecordValue::Message(_) => false,
        }
    }

    fn payload(&self) -> Payload<'_> {
        match self {
            RecordValue::Varint(v) => Payload::Varint(*v),
            RecordValue::Fixed32(v) => Payload::Fixed32(*v),
            RecordValue::Fixed64(v) => Payload::Fixed64(*v),
            RecordValue::Bytes(b) => Payload::Bytes(b),
            RecordValue::Str(s) => Payload::Bytes(s.as_bytes()),
            RecordValue::Message(m) => Payload::Message(m),
        }
    }
}

/// A schema-described record held as data rather than as a generated type.
///
/// Constructed empty or by [`crate::decode`], mutated field-by-field, and
/// serialized on demand; the codec itself never mutates a record.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicRecord {
    schema: Arc<MessageSchema>,
    /// Stored occurrences of plain fields, in insertion order.
    fields: Vec<(u32, RecordValue)>,
    /// Active member per oneof group, parallel to `schema.oneofs()`.
    oneofs: Vec<Option<(u32, RecordValue)>>,
    unknown: UnknownFields,
}

impl DynamicRecord {
    /// Creates an empty record for the given schema.
    pub fn new(schema: Arc<MessageSchema>) -> Self {
        let oneofs = vec![None; schema.oneofs().len()];
        Self {
            schema,
            fields: Vec::new(),
            oneofs,
            unknown: UnknownFields::new(),
        }
    }

    pub fn schema(&self) -> &Arc<MessageSchema> {
        &self.schema
    }

    /// Sets a singular field, replacing any existing occurrences. Oneof
    /// member numbers are routed to [`DynamicRecord::set_oneof`].
    pub fn set(&mut self, number: u32, value: RecordValue) -> Result<(), WireError> {
        if self.schema.oneof_containing(number).is_some() {
            return self.set_oneof(number, value);
        }
        let descriptor = self
            .schema
            .field(number)
            .ok_or(WireError::UnknownField(number))?;
        if value.wire_type() != descriptor.wire_type {
            return Err(WireError::ValueKindMismatch(number));
        }
        self.fields.retain(|(n, _)| *n != number);
        self.fields.push((number, value));
        Ok(())
    }

    /// Appends an occurrence of a repeated field.
    ///
    /// Pushing to a singular field number is last-wins: the call behaves
    /// like [`DynamicRecord::set`] and replaces any stored value, which is
    /// what a decoder needs when a singular tag repeats on the wire.
    pub fn push(&mut self, number: u32, value: RecordValue) -> Result<(), WireError> {
        let descriptor = self
            .schema
            .field(number)
            .ok_or(WireError::UnknownField(number))?;
        if descriptor.presence != Presence::Repeated {
            return self.set(number, value);
        }
        if value.wire_type() != descriptor.wire_type {
            return Err(WireError::ValueKindMismatch(number));
        }
        self.fields.push((number, value));
        Ok(())
    }

    /// Removes all occurrences of a plain field.
    pub fn clear(&mut self, number: u32) {
        self.fields.retain(|(n, _)| *n != number);
    }

    /// The first stored occurrence of a plain field.
    pub fn get(&self, number: u32) -> Option<&RecordValue> {
        self.fields
            .iter()
            .find(|(n, _)| *n == number)
            .map(|(_, v)| v)
    }

    /// All stored occurrences of a field, in insertion order.
    pub fn occurrences(&self, number: u32) -> impl Iterator<Item = &RecordValue> {
        self.fields
            .iter()
            .filter(move |(n, _)| *n == number)
            .map(|(_, v)| v)
    }

    /// Activates a oneof member, clearing any previously set sibling.
    pub fn set_oneof(&mut self, number: u32, value: RecordValue) -> Result<(), WireError> {
        let group_index = self
            .schema
            .oneof_containing(number)
            .ok_or(WireError::UnknownField(number))?;
        let member = self.schema.oneofs()[group_index]
            .member(number)
            .ok_or(WireError::UnknownField(number))?;
        if value.wire_type() != member.wire_type {
            return Err(WireError::ValueKindMismatch(number));
        }
        self.oneofs[group_index] = Some((number, value));
        Ok(())
    }

    /// Returns a oneof group to its unset state. `number` may be any
    /// member of the group.
    pub fn clear_oneof(&mut self, number: u32) -> Result<(), WireError> {
        let group_index = self
            .schema
            .oneof_containing(number)
            .ok_or(WireError::UnknownField(number))?;
        self.oneofs[group_index] = None;
        Ok(())
    }

    /// The active member of the oneof group at `group_index`, if any.
    pub fn oneof_active(&self, group_index: usize) -> Option<(u32, &RecordValue)> {
        self.oneofs
            .get(group_index)
            .and_then(|s| s.as_ref())
            .map(|(n, v)| (*n, v))
    }

    pub fn unknown(&self) -> &UnknownFields {
        &self.unknown
    }

    pub fn unknown_mut(&mut self) -> &mut UnknownFields {
        &mut self.unknown
    }
}

impl Message for DynamicRecord {
    fn present_fields(&self) -> Vec<Field<'_>> {
        let mut out: Vec<Field<'_>> = Vec::new();
        for (number, value) in &self.fields {
            if let Some(descriptor) = self.schema.field(*number) {
                if descriptor.presence == Presence::Implicit && value.is_zero() {
                    continue;
                }
            }
            out.push(Field {
                number: *number,
                payload: value.payload(),
            });
        }
        for (group, state) in self.schema.oneofs().iter().zip(&self.oneofs) {
            out.push(group.dispatch(state.as_ref().map(|(n, v)| (*n, v.payload()))));
        }
        // Stable sort: repeated occurrences keep their insertion order.
        out.sort_by_key(|f| f.number);
        out
    }

    fn unknown_bytes(&self) -> &[u8] {
        self.unknown.as_slice()
    }
}
