//! Serialization.
//!
//! Every serde value becomes exactly one Storable value:
//!
//! - bool, integers, floats, chars and strings - a scalar holding the value's text
//! - bytes, sequences, tuples and tuple structs - an array
//! - structs - a hash, each entry written as the value followed by the field name
//! - newtype structs and `Some` - the inner value, unless the newtype is a [`Ref`], which gets
//!   a reference tag in front
//!
//! Enum variants, when encoded, are:
//! - Unit - Just the variant name as a scalar
//! - Newtype - Hash with one entry. Key is variant name, value is the content
//! - Tuple - Hash with one entry. Key is variant name, value is the tuple as an array
//! - Struct - Hash with one entry. Key is variant name, value is the struct as a hash
//!
//! Maps, units, unit structs and `None` have no encoding; see [`Unsupported`].
//!
//! [`Ref`]: crate::Ref

use log::debug;
use serde::ser::*;
use std::mem;

use crate::depth_tracking::DepthTracker;
use crate::element::*;
use crate::error::{Error, Result};
use crate::options::{EncodeOptions, Unsupported};
use crate::reference::REF_TOKEN;
use crate::scalar;
use crate::{MAGIC, VERSION};

/// Write the header and one value into `buf`, which is cleared first.
pub(crate) fn encode_into<T: Serialize + ?Sized>(
    mut buf: Vec<u8>,
    value: &T,
    options: &EncodeOptions,
) -> Result<Vec<u8>> {
    buf.clear();
    buf.push(MAGIC);
    buf.push(VERSION);
    let mut se = StorableSerializer::with_options(options, buf);
    value.serialize(&mut se)?;
    debug_assert_eq!(se.depth_tracking.depth(), 0, "every opened level should be closed");
    Ok(se.buf)
}

struct StorableSerializer {
    unsupported: Unsupported,
    depth_tracking: DepthTracker,
    buf: Vec<u8>,
}

impl StorableSerializer {
    fn with_options(options: &EncodeOptions, buf: Vec<u8>) -> Self {
        StorableSerializer {
            unsupported: options.unsupported,
            depth_tracking: DepthTracker::new(options.max_depth),
            buf,
        }
    }

    fn encode_element(&mut self, elem: Element) -> Result<()> {
        self.depth_tracking.update_elem(&elem)?;
        serialize_elem(&mut self.buf, elem)
    }

    fn encode_scalar(&mut self, text: &str) -> Result<()> {
        self.encode_element(Element::Scalar(text.as_bytes()))
    }

    fn end_level(&mut self) {
        self.depth_tracking.end();
    }

    fn unsupported(&self, shape: &'static str) -> Result<()> {
        match self.unsupported {
            Unsupported::Error => Err(Error::UnsupportedShape(shape)),
            Unsupported::Skip => {
                debug!("Skipping {} value, it has no Storable encoding", shape);
                Ok(())
            }
        }
    }
}

impl<'a> Serializer for &'a mut StorableSerializer {
    type Ok = ();
    type Error = crate::error::Error;
    type SerializeSeq = SeqSerializer<'a>;
    type SerializeTuple = TupleSerializer<'a>;
    type SerializeTupleStruct = TupleSerializer<'a>;
    type SerializeTupleVariant = TupleSerializer<'a>;
    type SerializeMap = Discard;
    type SerializeStruct = StructSerializer<'a>;
    type SerializeStructVariant = StructSerializer<'a>;

    // Scalars are text on the wire, so types with a readable form should use it.
    fn is_human_readable(&self) -> bool {
        true
    }

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.encode_scalar(scalar::bool_text(v))
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.encode_scalar(&v.to_string())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.encode_scalar(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.encode_scalar(&v.to_string())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.encode_scalar(&v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.encode_scalar(&scalar::f32_text(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        self.encode_scalar(&scalar::f64_text(v))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut b = [0u8; 4];
        self.encode_scalar(v.encode_utf8(&mut b))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.encode_scalar(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        // A byte slice is a list of small integers, same as any other slice.
        self.encode_element(Element::Array(v.len()))?;
        for byte in v {
            self.encode_scalar(&byte.to_string())?;
        }
        self.end_level();
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        self.unsupported("None")
    }

    fn serialize_some<T: Serialize + ?Sized>(self, v: &T) -> Result<()> {
        v.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.unsupported("unit")
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.unsupported("unit struct")
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: Serialize + ?Sized>(
        self,
        name: &'static str,
        v: &T,
    ) -> Result<()> {
        if name == REF_TOKEN {
            self.encode_element(Element::Ref)?;
            v.serialize(&mut *self)?;
            self.end_level();
            Ok(())
        } else {
            v.serialize(self)
        }
    }

    fn serialize_newtype_variant<T: Serialize + ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()> {
        self.encode_element(Element::Hash(1))?;
        value.serialize(&mut *self)?;
        self.encode_element(Element::Key(variant))?;
        self.end_level();
        Ok(())
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        SeqSerializer::new(self, len)
    }

    fn serialize_tuple(self, len: usize) -> Result<TupleSerializer<'a>> {
        self.encode_element(Element::Array(len))?;
        Ok(TupleSerializer::new(self, None))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<TupleSerializer<'a>> {
        // Tuple structs usually just discard the name
        self.encode_element(Element::Array(len))?;
        Ok(TupleSerializer::new(self, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.encode_element(Element::Hash(1))?;
        self.encode_element(Element::Array(len))?;
        Ok(TupleSerializer::new(self, Some(variant)))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.unsupported("map")?;
        Ok(Discard)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        StructSerializer::new(self, None)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.encode_element(Element::Hash(1))?;
        StructSerializer::new(self, Some(variant))
    }
}

/// Encode a sequence of possibly unknown length.
///
/// If the length is known, the array header goes out first and the elements follow. Otherwise
/// the elements are encoded into a swapped-in temporary buffer while counting them, and the
/// header is written once the count is final.
struct SeqSerializer<'a> {
    se: &'a mut StorableSerializer,
    unknown_len: Option<(usize, Vec<u8>)>,
}

impl<'a> SeqSerializer<'a> {
    fn new(se: &'a mut StorableSerializer, len: Option<usize>) -> Result<Self> {
        if let Some(len) = len {
            se.encode_element(Element::Array(len))?;
            Ok(Self {
                se,
                unknown_len: None,
            })
        } else {
            se.depth_tracking.update_elem(&Element::Array(0))?;
            let enc = mem::take(&mut se.buf);
            Ok(Self {
                se,
                unknown_len: Some((0, enc)),
            })
        }
    }
}

impl<'a> SerializeSeq for SeqSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        if let Some((ref mut len, _)) = self.unknown_len {
            *len += 1;
        }
        value.serialize(&mut *self.se)
    }

    fn end(self) -> Result<()> {
        if let Some((len, enc)) = self.unknown_len {
            let enc = mem::replace(&mut self.se.buf, enc);
            serialize_elem(&mut self.se.buf, Element::Array(len))?;
            self.se.buf.extend_from_slice(&enc);
        }
        self.se.end_level();
        Ok(())
    }
}

/// Encodes tuples as arrays. When built for a tuple variant, the enclosing one-entry hash is
/// already open and gets its key once the tuple is done.
struct TupleSerializer<'a> {
    se: &'a mut StorableSerializer,
    variant: Option<&'static str>,
}

impl<'a> TupleSerializer<'a> {
    fn new(se: &'a mut StorableSerializer, variant: Option<&'static str>) -> Self {
        Self { se, variant }
    }

    fn end_inner(self) -> Result<()> {
        self.se.end_level();
        if let Some(variant) = self.variant {
            self.se.encode_element(Element::Key(variant))?;
            self.se.end_level();
        }
        Ok(())
    }
}

impl<'a> SerializeTuple for TupleSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut *self.se)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

impl<'a> SerializeTupleStruct for TupleSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut *self.se)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

impl<'a> SerializeTupleVariant for TupleSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<()> {
        value.serialize(&mut *self.se)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

/// Encodes a struct as a hash.
///
/// Fields skipped through `skip_serializing_if` never reach the serializer, so the entry count
/// is only known at the end. Entries go into a swapped-in buffer while counting, and the hash
/// header is written in front of them once the struct is finished. When built for a struct
/// variant, the enclosing one-entry hash is already open and gets its key afterwards.
struct StructSerializer<'a> {
    se: &'a mut StorableSerializer,
    len: usize,
    outer: Vec<u8>,
    variant: Option<&'static str>,
}

impl<'a> StructSerializer<'a> {
    fn new(se: &'a mut StorableSerializer, variant: Option<&'static str>) -> Result<Self> {
        se.depth_tracking.update_elem(&Element::Hash(0))?;
        let outer = mem::take(&mut se.buf);
        Ok(StructSerializer {
            se,
            len: 0,
            outer,
            variant,
        })
    }

    fn serialize_field_inner<T: Serialize + ?Sized>(
        &mut self,
        field: &'static str,
        value: &T,
    ) -> Result<()> {
        // Value first, then key
        value.serialize(&mut *self.se)?;
        self.se.encode_element(Element::Key(field))?;
        self.len += 1;
        Ok(())
    }

    fn end_inner(self) -> Result<()> {
        let entries = mem::replace(&mut self.se.buf, self.outer);
        serialize_elem(&mut self.se.buf, Element::Hash(self.len))?;
        self.se.buf.extend_from_slice(&entries);
        self.se.end_level();
        if let Some(variant) = self.variant {
            self.se.encode_element(Element::Key(variant))?;
            self.se.end_level();
        }
        Ok(())
    }
}

impl<'a> SerializeStruct for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        field: &'static str,
        value: &T,
    ) -> Result<()> {
        self.serialize_field_inner(field, value)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

impl<'a> SerializeStructVariant for StructSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: Serialize + ?Sized>(
        &mut self,
        field: &'static str,
        value: &T,
    ) -> Result<()> {
        self.serialize_field_inner(field, value)
    }

    fn end(self) -> Result<()> {
        self.end_inner()
    }
}

/// Stands in for a map when unsupported shapes are being skipped. Nothing inside is visited.
struct Discard;

impl SerializeMap for Discard {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: Serialize + ?Sized>(&mut self, _key: &T) -> Result<()> {
        Ok(())
    }

    fn serialize_value<T: Serialize + ?Sized>(&mut self, _value: &T) -> Result<()> {
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
