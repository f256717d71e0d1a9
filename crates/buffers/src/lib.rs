//! Binary buffer utilities for protopack.
//!
//! This crate provides the two cursor primitives the wire codec is built
//! on: a checked forward reader for decoding and a backward-filling writer
//! for the size-then-emit encoding strategy.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking;
//!   every read is bounds-checked so truncated input surfaces as an error
//!   instead of a panic.
//! - [`TailWriter`] - Fills a pre-sized buffer from the end toward the
//!   start, so fields written in descending declaration order come out in
//!   ascending wire order with a single pass and zero reallocation.
//!
//! # Example
//!
//! ```
//! use protopack_buffers::{Reader, TailWriter};
//!
//! // Fill a 4-byte buffer back to front.
//! let mut buf = [0u8; 4];
//! let mut w = TailWriter::new(&mut buf);
//! w.bytes(&[0x02, 0x03, 0x04]);
//! w.u8(0x01);
//! assert_eq!(w.written(), 4);
//! assert_eq!(buf, [0x01, 0x02, 0x03, 0x04]);
//!
//! // Read it back.
//! let mut r = Reader::new(&buf);
//! assert_eq!(r.u8().unwrap(), 0x01);
//! assert_eq!(r.buf(3).unwrap(), &[0x02, 0x03, 0x04]);
//! ```

mod reader;
mod tail_writer;

pub use reader::Reader;
pub use tail_writer::TailWriter;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
        }
    }
}

impl std::error::Error for BufferError {}
