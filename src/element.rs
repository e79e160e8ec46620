use std::convert::TryFrom;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::{Error, Result};
use crate::marker::Tag;
use crate::MAX_SCALAR_LEN;

/// One piece of the Storable wire format. Aggregates only carry their count; their contents
/// follow as further elements.
#[derive(Clone, Debug, PartialEq)]
pub enum Element<'a> {
    /// Prefix marking that the next value was reached through a reference.
    Ref,
    /// Hash header with its entry count. Each entry is a value followed by a `Key`.
    Hash(usize),
    /// Array header with its element count.
    Array(usize),
    /// Scalar text payload.
    Scalar(&'a [u8]),
    /// Hash key, written after the entry's value.
    Key(&'a str),
}

fn u32_len(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::LengthTooLong {
        max: u32::MAX as usize,
        actual: len,
    })
}

/// Serialize an element onto a byte vector. Doesn't check if Hash & Array structures make
/// sense, just writes elements out. Fails only if a length doesn't fit its field.
pub fn serialize_elem(buf: &mut Vec<u8>, elem: Element) -> Result<()> {
    use self::Element::*;
    match elem {
        Ref => buf.push(Tag::Ref.into()),
        Hash(len) => {
            let len = u32_len(len)?;
            buf.push(Tag::Hash.into());
            buf.write_u32::<BigEndian>(len)?;
        }
        Array(len) => {
            let len = u32_len(len)?;
            buf.push(Tag::Array.into());
            buf.write_u32::<BigEndian>(len)?;
        }
        Scalar(v) => {
            if v.len() > MAX_SCALAR_LEN {
                return Err(Error::ScalarTooLong { len: v.len() });
            }
            buf.push(Tag::Scalar.into());
            buf.push(v.len() as u8);
            buf.extend_from_slice(v);
        }
        Key(v) => {
            let len = u32_len(v.len())?;
            buf.write_u32::<BigEndian>(len)?;
            buf.extend_from_slice(v.as_bytes());
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn enc(elem: Element) -> Vec<u8> {
        let mut enc = Vec::new();
        serialize_elem(&mut enc, elem).unwrap();
        enc
    }

    #[test]
    fn reference() {
        assert_eq!(enc(Element::Ref), &[0x04]);
    }

    #[test]
    fn hash() {
        assert_eq!(enc(Element::Hash(0)), &[0x03, 0, 0, 0, 0]);
        assert_eq!(enc(Element::Hash(1)), &[0x03, 0, 0, 0, 1]);
        assert_eq!(enc(Element::Hash(0x0102_0304)), &[0x03, 1, 2, 3, 4]);
    }

    #[test]
    fn array() {
        assert_eq!(enc(Element::Array(2)), &[0x02, 0, 0, 0, 2]);
        assert_eq!(enc(Element::Array(300)), &[0x02, 0, 0, 0x01, 0x2c]);
    }

    mod scalar {
        use super::*;

        #[test]
        fn text_payload() {
            assert_eq!(
                enc(Element::Scalar(b"Kevin")),
                &[0x0a, 5, b'K', b'e', b'v', b'i', b'n']
            );
            assert_eq!(enc(Element::Scalar(b"")), &[0x0a, 0]);
        }

        #[test]
        fn longest() {
            let data = vec![b'x'; MAX_SCALAR_LEN];
            let out = enc(Element::Scalar(&data));
            assert_eq!(out.len(), MAX_SCALAR_LEN + 2);
            assert_eq!(out[1], 255);
        }

        #[test]
        fn too_long() {
            let data = vec![b'x'; MAX_SCALAR_LEN + 1];
            let mut out = Vec::new();
            match serialize_elem(&mut out, Element::Scalar(&data)) {
                Err(Error::ScalarTooLong { len }) => assert_eq!(len, 256),
                other => panic!("Expected ScalarTooLong, got {:?}", other),
            }
            assert!(out.is_empty(), "Nothing should be written on failure");
        }
    }

    #[test]
    fn key() {
        assert_eq!(
            enc(Element::Key("Name")),
            &[0, 0, 0, 4, b'N', b'a', b'm', b'e']
        );
        assert_eq!(enc(Element::Key("")), &[0, 0, 0, 0]);
    }
}
