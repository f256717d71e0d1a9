//! The schema collaborator traits the engine is generic over.

use crate::error::WireError;
use crate::field::Field;

/// The native fast-path contract: a type that knows its own exact encoded
/// size and can fill the tail of a sized buffer itself.
///
/// `encode_to_tail` writes the message's full encoding at the *end* of
/// `buf` and returns the number of bytes written, which must equal
/// `encoded_size()`. The two methods are always paired by the engine: it
/// sizes first, then hands the encoder a region with exactly enough room.
pub trait SizedEncode {
    /// Exact encoded byte length of this message's payload.
    fn encoded_size(&self) -> usize;

    /// Writes the encoding at the end of `buf`; returns bytes written.
    fn encode_to_tail(&self, buf: &mut [u8]) -> Result<usize, WireError>;
}

/// A typed record the generic engine can size and encode.
///
/// Implementations supply their present fields per call (presence is
/// value-dependent, so the list is recomputed every time) in ascending
/// field-number order, with presence policy already applied: implicit
/// scalars equal to zero are left out, oneof groups contribute exactly one
/// entry, repeated fields contribute one entry per occurrence.
pub trait Message {
    /// The record's present fields, ascending by field number.
    fn present_fields(&self) -> Vec<Field<'_>>;

    /// Opaque bytes captured from unrecognized tags during decode,
    /// re-emitted verbatim after all known fields.
    fn unknown_bytes(&self) -> &[u8] {
        &[]
    }

    /// Capability query for the nested-encoder dispatch: a message that
    /// carries its own sized encoder returns it here and nested encoding
    /// takes the fast path; returning `None` routes the value through the
    /// generic field-walking fallback. Both paths produce identical bytes.
    fn as_sized_encode(&self) -> Option<&dyn SizedEncode> {
        None
    }
}
