//! Opaque passthrough for unrecognized wire data.

/// Bytes captured from tags a record's schema revision did not recognize.
///
/// Populated by decode, counted by the sizer, copied verbatim by the
/// encoder after all known fields. Never interpreted — this is what lets a
/// message survive a read-modify-write cycle through a codec version that
/// predates newly added field numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnknownFields {
    bytes: Vec<u8>,
}

impl UnknownFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Appends a raw tag-plus-payload range exactly as read off the wire.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl From<Vec<u8>> for UnknownFields {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
