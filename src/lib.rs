//! storable-pack writes Rust values in Perl's Storable binary format, so that Perl code can
//! `Storable::thaw` them.
//!
//! Any type implementing [`serde::Serialize`] can be encoded. A stream is a two-byte header
//! followed by exactly one value:
//!
//! ```text
//! Stream      := Header Value
//! Header      := magic:u8 version:u8
//! Value       := RefVal | HashVal | ArrayVal | ScalarVal
//! RefVal      := TAG_REF Value
//! HashVal     := TAG_HASH count:u32 Entry*
//! Entry       := Value keylen:u32 key:bytes[keylen]
//! ArrayVal    := TAG_ARRAY count:u32 Value*
//! ScalarVal   := TAG_SCALAR len:u8 text:bytes[len]
//! ```
//!
//! All multi-byte integers are big-endian. Every scalar, numbers included, is written as text,
//! which caps it at 255 bytes. Hash entries put the value before the key.
//!
//! - Structs become hashes. Mark a length-bearing field with
//!   `#[serde(skip_serializing_if = "storable_pack::omit_empty")]` to leave it out when empty.
//! - Sequences, tuples and byte strings become arrays.
//! - [`Ref`] (or the [`reference::serialize`] helper) puts a reference tag in front of a value.
//!   Nested structs should usually be references: Perl only reads a hash held directly inside
//!   another hash correctly when it sits behind a reference.
//! - Maps, `None` and units have no encoding and fail with [`Error::UnsupportedShape`], unless
//!   [`Unsupported::Skip`] is selected.
//!
//! ```
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Person {
//!     #[serde(rename = "Name")]
//!     name: String,
//! }
//!
//! let enc = storable_pack::to_vec(&Person { name: "Kevin".into() }).unwrap();
//! assert_eq!(
//!     enc,
//!     b"\x05\x07\x03\x00\x00\x00\x01\x0a\x05Kevin\x00\x00\x00\x04Name"
//! );
//! ```

use std::io;

use log::trace;
use serde::Serialize;

mod depth_tracking;
mod element;
mod encoder;
mod error;
mod marker;
mod omit;
mod options;
mod scalar;
mod ser;

pub mod reference;

pub use self::encoder::Encoder;
pub use self::error::{Error, Result};
pub use self::marker::Tag;
pub use self::omit::{omit_empty, OmitEmpty};
pub use self::options::{EncodeOptions, Unsupported, DEFAULT_MAX_DEPTH};
pub use self::reference::Ref;

/// First byte of every stream.
pub const MAGIC: u8 = 0x05;
/// Second byte of every stream.
pub const VERSION: u8 = 0x07;
/// Longest text a scalar can hold, limited by its one-byte length field.
pub const MAX_SCALAR_LEN: usize = u8::MAX as usize;

/// Encode a value, returning the complete stream.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    to_vec_with(value, &EncodeOptions::default())
}

/// Encode a value with the given options, returning the complete stream.
pub fn to_vec_with<T: Serialize + ?Sized>(value: &T, options: &EncodeOptions) -> Result<Vec<u8>> {
    trace!("Encoding Storable stream");
    let buf = ser::encode_into(Vec::new(), value, options)?;
    trace!("Encoded Storable stream of {} bytes", buf.len());
    Ok(buf)
}

/// Encode a value and write the stream to `writer`.
///
/// The stream is built in memory first, so nothing is written if encoding fails.
pub fn to_writer<W: io::Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    to_writer_with(writer, value, &EncodeOptions::default())
}

/// Encode a value with the given options and write the stream to `writer`.
pub fn to_writer_with<W: io::Write, T: Serialize + ?Sized>(
    mut writer: W,
    value: &T,
    options: &EncodeOptions,
) -> Result<()> {
    let buf = to_vec_with(value, options)?;
    writer.write_all(&buf)?;
    Ok(())
}
