//! Checked binary buffer reader with cursor tracking.

use crate::BufferError;

/// A binary buffer reader that reads data from a byte slice.
///
/// The reader maintains a cursor position and provides bounds-checked
/// methods for reading bytes, little-endian fixed-width integers, and
/// sub-slices. Reading past the end returns [`BufferError::EndOfBuffer`]
/// and leaves the cursor untouched.
///
/// # Example
///
/// ```
/// use protopack_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05];
/// let mut reader = Reader::new(&data);
///
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u32_le().unwrap(), 0x05040302);
/// assert!(reader.u8().is_err());
/// ```
pub struct Reader<'a> {
    /// The underlying byte slice.
    pub uint8: &'a [u8],
    /// Current cursor position.
    pub x: usize,
    /// End position (exclusive).
    pub end: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader for the given byte slice.
    pub fn new(uint8: &'a [u8]) -> Self {
        let end = uint8.len();
        Self { uint8, x: 0, end }
    }

    /// Creates a reader from a slice with custom start and end positions.
    pub fn from_slice(uint8: &'a [u8], x: usize, end: usize) -> Self {
        Self { uint8, x, end }
    }

    /// Returns the number of remaining bytes.
    pub fn size(&self) -> usize {
        self.end - self.x
    }

    /// Returns `true` when the cursor has reached the end.
    pub fn is_empty(&self) -> bool {
        self.x >= self.end
    }

    /// Peeks at the current byte without advancing the cursor.
    pub fn peek(&self) -> Result<u8, BufferError> {
        if self.x >= self.end {
            return Err(BufferError::EndOfBuffer);
        }
        Ok(self.uint8[self.x])
    }

    /// Advances the cursor by the given number of bytes.
    pub fn skip(&mut self, length: usize) -> Result<(), BufferError> {
        if self.size() < length {
            return Err(BufferError::EndOfBuffer);
        }
        self.x += length;
        Ok(())
    }

    /// Returns a sub-slice of the given size and advances the cursor.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        if self.size() < size {
            return Err(BufferError::EndOfBuffer);
        }
        let x = self.x;
        let end = x + size;
        self.x = end;
        Ok(&self.uint8[x..end])
    }

    /// Returns all remaining bytes and advances the cursor to the end.
    pub fn rest(&mut self) -> &'a [u8] {
        let x = self.x;
        self.x = self.end;
        &self.uint8[x..self.end]
    }

    /// Reads a single byte.
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        if self.x >= self.end {
            return Err(BufferError::EndOfBuffer);
        }
        let b = self.uint8[self.x];
        self.x += 1;
        Ok(b)
    }

    /// Reads a little-endian `u32` (the fixed32 wire representation).
    pub fn u32_le(&mut self) -> Result<u32, BufferError> {
        let bytes = self.buf(4)?;
        let mut arr = [0u8; 4];
        arr.copy_from_slice(bytes);
        Ok(u32::from_le_bytes(arr))
    }

    /// Reads a little-endian `u64` (the fixed64 wire representation).
    pub fn u64_le(&mut self) -> Result<u64, BufferError> {
        let bytes = self.buf(8)?;
        let mut arr = [0u8; 8];
        arr.copy_from_slice(bytes);
        Ok(u64::from_le_bytes(arr))
    }
}
