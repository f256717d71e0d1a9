//! Tag codec: field number and wire type packed into a single varint.

use crate::error::WireError;

/// Highest field number the wire format admits (the upper range is
/// reserved by the format itself).
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// How a field's payload is framed on the wire.
///
/// Wire types 3 and 4 (groups) are a retired protobuf feature and are
/// rejected on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    /// Parses the low three bits of a tag.
    pub fn from_u8(value: u8) -> Result<Self, WireError> {
        match value {
            0 => Ok(WireType::Varint),
            1 => Ok(WireType::Fixed64),
            2 => Ok(WireType::LengthDelimited),
            5 => Ok(WireType::Fixed32),
            other => Err(WireError::InvalidWireType(other)),
        }
    }
}

/// Packs a schema-constant tag without validation.
///
/// For field numbers that are literals in generated-style code; dynamic
/// paths go through [`pack`].
pub const fn tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | wire_type as u64
}

/// Packs a field number and wire type, validating the number's range.
pub fn pack(field_number: u32, wire_type: WireType) -> Result<u64, WireError> {
    if field_number == 0 || field_number > MAX_FIELD_NUMBER {
        return Err(WireError::InvalidFieldNumber(u64::from(field_number)));
    }
    Ok(tag(field_number, wire_type))
}

/// Splits a tag into its raw field number and wire-type bits.
///
/// Every bit pattern is syntactically valid; semantic validation (range,
/// known wire type) is the caller's job.
pub const fn unpack(tag: u64) -> (u64, u8) {
    (tag >> 3, (tag & 0x7) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_matrix() {
        assert_eq!(pack(1, WireType::Varint).unwrap(), 0x08);
        assert_eq!(pack(1, WireType::LengthDelimited).unwrap(), 0x0a);
        assert_eq!(pack(2, WireType::LengthDelimited).unwrap(), 0x12);
        assert_eq!(pack(3, WireType::Varint).unwrap(), 0x18);
        assert_eq!(pack(5, WireType::Fixed32).unwrap(), 0x2d);
        assert_eq!(unpack(0x2d), (5, 5));
        assert_eq!(unpack(0x12), (2, 2));
        assert_eq!(
            unpack(tag(MAX_FIELD_NUMBER, WireType::Fixed64)),
            (MAX_FIELD_NUMBER as u64, 1)
        );
    }

    #[test]
    fn pack_rejects_out_of_range_numbers() {
        assert_eq!(
            pack(0, WireType::Varint),
            Err(WireError::InvalidFieldNumber(0))
        );
        assert_eq!(
            pack(MAX_FIELD_NUMBER + 1, WireType::Varint),
            Err(WireError::InvalidFieldNumber(u64::from(MAX_FIELD_NUMBER) + 1))
        );
        assert!(pack(MAX_FIELD_NUMBER, WireType::Varint).is_ok());
    }

    #[test]
    fn wire_type_parse() {
        assert_eq!(WireType::from_u8(0).unwrap(), WireType::Varint);
        assert_eq!(WireType::from_u8(5).unwrap(), WireType::Fixed32);
        assert_eq!(WireType::from_u8(3), Err(WireError::InvalidWireType(3)));
        assert_eq!(WireType::from_u8(4), Err(WireError::InvalidWireType(4)));
        assert_eq!(WireType::from_u8(7), Err(WireError::InvalidWireType(7)));
    }
}
