//! Oneof groups and the always-present dispatch.
//!
//! A oneof group's wire contract here is stricter than plain protobuf
//! optionality: the group is always represented by exactly one tag, even
//! when no member is set — the designated default member is then emitted
//! with its zero payload. Receivers can therefore tell "group present with
//! default" from "field omitted entirely", and that asymmetry must not be
//! normalized away.

use crate::error::WireError;
use crate::field::{Field, FieldDescriptor, Payload};
use crate::tag::WireType;

/// A set of mutually exclusive field descriptors with one designated
/// default member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneofDescriptor {
    members: Vec<FieldDescriptor>,
    default_index: usize,
}

impl OneofDescriptor {
    /// Builds a group; `default_member` must name one of `members`.
    pub fn new(members: Vec<FieldDescriptor>, default_member: u32) -> Result<Self, WireError> {
        let default_index = members
            .iter()
            .position(|m| m.number == default_member)
            .ok_or(WireError::UnknownField(default_member))?;
        Ok(Self {
            members,
            default_index,
        })
    }

    /// The group's member descriptors.
    pub fn members(&self) -> &[FieldDescriptor] {
        &self.members
    }

    /// The member emitted with a zero payload when no member is set.
    pub fn default_member(&self) -> &FieldDescriptor {
        &self.members[self.default_index]
    }

    /// Looks up a member by field number.
    pub fn member(&self, number: u32) -> Option<&FieldDescriptor> {
        self.members.iter().find(|m| m.number == number)
    }

    /// Whether `number` belongs to this group.
    pub fn contains(&self, number: u32) -> bool {
        self.member(number).is_some()
    }

    /// Resolves the group to the single field it contributes to the wire:
    /// the active member with its payload, or the default member with a
    /// zero payload when no member is set.
    pub fn dispatch<'a>(&'a self, active: Option<(u32, Payload<'a>)>) -> Field<'a> {
        match active {
            Some((number, payload)) => Field { number, payload },
            None => {
                let member = self.default_member();
                Field {
                    number: member.number,
                    payload: zero_payload(member.wire_type),
                }
            }
        }
    }
}

/// The zero payload for a given framing: an empty length-delimited body,
/// or a zero scalar.
fn zero_payload(wire_type: WireType) -> Payload<'static> {
    match wire_type {
        WireType::Varint => Payload::Varint(0),
        WireType::Fixed32 => Payload::Fixed32(0),
        WireType::Fixed64 => Payload::Fixed64(0),
        WireType::LengthDelimited => Payload::Bytes(&[]),
    }
}
