//! Wire codec error type.

use protopack_buffers::BufferError;
use thiserror::Error;

/// Errors produced by the sizing, encoding, and decoding entry points.
///
/// Every variant indicates either a schema-definition bug or a
/// caller-discipline bug, never a transient condition; no retry logic
/// applies. On encode failure the destination buffer's contents are
/// unspecified and must be discarded.
#[derive(Debug, Error, PartialEq)]
pub enum WireError {
    /// A varint ran past ten bytes or the input ended mid-sequence.
    #[error("malformed varint at offset {offset}")]
    MalformedVarint { offset: usize },

    /// A field number outside `1..=536870911` was supplied.
    #[error("invalid field number {0}")]
    InvalidFieldNumber(u64),

    /// A tag carried a wire type this codec does not speak (3, 4, 6, 7).
    #[error("invalid wire type {0}")]
    InvalidWireType(u8),

    /// Input ended before a field's payload was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// The destination buffer does not match the precomputed size exactly.
    #[error("destination buffer is {actual} bytes, expected exactly {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// A nested or fallback encoder failed; the failing field is named.
    #[error("nested encode failed in field {field}: {source}")]
    NestedEncode {
        field: u32,
        source: Box<WireError>,
    },

    /// A record mutation named a field number its schema does not declare.
    #[error("field {0} is not declared by the schema")]
    UnknownField(u32),

    /// A record value's kind does not match the field's declared wire type.
    #[error("value kind does not match the wire type declared for field {0}")]
    ValueKindMismatch(u32),
}

impl From<BufferError> for WireError {
    fn from(_: BufferError) -> Self {
        WireError::UnexpectedEof
    }
}
