//! Backward-filling writer over a pre-sized buffer.

/// Fills a caller-provided buffer from the end toward the start.
///
/// The write cursor starts at `uint8.len()` and every write decrements it;
/// the region `[x..len)` is finished wire output and `[0..x)` is still
/// unwritten. The caller is expected to have sized the buffer exactly (the
/// wire codec pairs every encode with a sizing pass), so running out of
/// head room is a programmer error and panics via slice indexing.
///
/// # Example
///
/// ```
/// use protopack_buffers::TailWriter;
///
/// let mut buf = [0u8; 3];
/// let mut w = TailWriter::new(&mut buf);
/// w.bytes(b"hi");
/// w.u8(0x0a);
/// assert_eq!(w.written(), 3);
/// assert_eq!(&buf, b"\x0ahi");
/// ```
pub struct TailWriter<'a> {
    /// The destination buffer.
    pub uint8: &'a mut [u8],
    /// Write cursor; bytes at `[x..len)` have been written.
    pub x: usize,
}

impl<'a> TailWriter<'a> {
    /// Creates a writer positioned at the end of the buffer.
    pub fn new(uint8: &'a mut [u8]) -> Self {
        let x = uint8.len();
        Self { uint8, x }
    }

    /// Number of bytes written so far.
    pub fn written(&self) -> usize {
        self.uint8.len() - self.x
    }

    /// Number of unwritten bytes remaining at the head.
    pub fn remaining(&self) -> usize {
        self.x
    }

    /// The unwritten head region, for encoders that fill their own tail.
    ///
    /// A nested encoder writes `n` bytes at the end of this slice; the
    /// caller then accounts for them with [`TailWriter::advance`].
    pub fn remaining_mut(&mut self) -> &mut [u8] {
        &mut self.uint8[..self.x]
    }

    /// Moves the cursor back over `n` bytes written through
    /// [`TailWriter::remaining_mut`].
    pub fn advance(&mut self, n: usize) {
        self.x -= n;
    }

    /// Writes a single byte.
    pub fn u8(&mut self, value: u8) {
        self.x -= 1;
        self.uint8[self.x] = value;
    }

    /// Writes a byte slice.
    pub fn bytes(&mut self, bytes: &[u8]) {
        let end = self.x;
        self.x = end - bytes.len();
        self.uint8[self.x..end].copy_from_slice(bytes);
    }

    /// Writes a little-endian `u32` (the fixed32 wire representation).
    pub fn u32_le(&mut self, value: u32) {
        self.bytes(&value.to_le_bytes());
    }

    /// Writes a little-endian `u64` (the fixed64 wire representation).
    pub fn u64_le(&mut self, value: u64) {
        self.bytes(&value.to_le_bytes());
    }
}
