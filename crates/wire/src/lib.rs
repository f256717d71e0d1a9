//! Schema-agnostic Protocol-Buffers-compatible wire codec.
//!
//! A single generic engine, parameterized over each message type's field
//! descriptors, replaces the per-type sizer/encoder pairs schema compilers
//! generate. Encoding is two-pass: [`size_of`] computes the exact byte
//! length, then [`encode_into`] fills a buffer of exactly that size from
//! the end toward the start. Output is byte-exact standard protobuf:
//! varint tags, length-delimited submessages, fixed 32/64-bit payloads,
//! zero-value omission for scalars.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use protopack_wire::{
//!     decode, encode, FieldDescriptor, MessageSchema, Presence, RecordValue,
//!     DynamicRecord, WireType,
//! };
//!
//! let schema = Arc::new(
//!     MessageSchema::new(
//!         vec![
//!             FieldDescriptor::new(1, WireType::LengthDelimited, Presence::Implicit).unwrap(),
//!             FieldDescriptor::new(2, WireType::Varint, Presence::Implicit).unwrap(),
//!         ],
//!         vec![],
//!     )
//!     .unwrap(),
//! );
//!
//! let mut record = DynamicRecord::new(Arc::clone(&schema));
//! record.set(1, RecordValue::Str("svc".into())).unwrap();
//! record.set(2, RecordValue::Varint(1)).unwrap();
//!
//! let bytes = encode(&record).unwrap();
//! assert_eq!(bytes, [0x0a, 0x03, b's', b'v', b'c', 0x10, 0x01]);
//!
//! let back = decode(&bytes, &schema).unwrap();
//! assert_eq!(back.get(2), Some(&RecordValue::Varint(1)));
//! ```

mod decoder;
mod encoder;
mod error;
mod field;
mod message;
mod oneof;
mod record;
mod sizer;
mod unknown;
mod wrappers;

pub mod tag;
pub mod varint;

pub use decoder::decode;
pub use encoder::{encode, encode_into};
pub use error::WireError;
pub use field::{Field, FieldDescriptor, Payload, Presence};
pub use message::{Message, SizedEncode};
pub use oneof::OneofDescriptor;
pub use record::{DynamicRecord, MessageSchema, RecordValue};
pub use sizer::size_of;
pub use tag::WireType;
pub use unknown::UnknownFields;
pub use wrappers::{BoolValue, BytesValue, DoubleValue, StringValue, UInt64Value};
