//! Streams checked byte-for-byte against what Perl's `Storable::thaw` reads back as the value
//! noted on each test.

use serde::Serialize;
use storable_pack::{to_vec, to_writer, Encoder, Error, Ref, Tag, MAGIC, VERSION};

fn stream(parts: &[&[u8]]) -> Vec<u8> {
    let mut v = vec![MAGIC, VERSION];
    for p in parts {
        v.extend_from_slice(p);
    }
    v
}

#[derive(Serialize)]
struct Nested {
    #[serde(rename = "Name")]
    name: String,
}

// {'Name' => 'Kevin'}
#[test]
fn single_field_struct() {
    let enc = to_vec(&Nested {
        name: "Kevin".into(),
    })
    .unwrap();
    assert_eq!(
        enc,
        stream(&[
            &[Tag::Hash.into_u8(), 0, 0, 0, 1],
            &[Tag::Scalar.into_u8(), 5],
            b"Kevin",
            &[0, 0, 0, 4],
            b"Name",
        ])
    );
}

// {'Name' => 'Kevin'}
#[test]
fn omitted_field() {
    #[derive(Serialize)]
    struct WithOmit {
        #[serde(rename = "Name")]
        name: String,
        #[serde(rename = "Omit", skip_serializing_if = "storable_pack::omit_empty")]
        omit: String,
    }

    let omitted = to_vec(&WithOmit {
        name: "Kevin".into(),
        omit: String::new(),
    })
    .unwrap();
    let plain = to_vec(&Nested {
        name: "Kevin".into(),
    })
    .unwrap();
    assert_eq!(omitted, plain);
}

// {'nested' => {'Name' => 'Kevin'}}
#[test]
fn referenced_struct() {
    #[derive(Serialize)]
    struct Outer {
        nested: Ref<Nested>,
    }

    let enc = to_vec(&Outer {
        nested: Ref(Nested {
            name: "Kevin".into(),
        }),
    })
    .unwrap();
    assert_eq!(
        enc,
        stream(&[
            &[0x03, 0, 0, 0, 1],
            &[0x04],
            &[0x03, 0, 0, 0, 1],
            &[0x0a, 5],
            b"Kevin",
            &[0, 0, 0, 4],
            b"Name",
            &[0, 0, 0, 6],
            b"nested",
        ])
    );
}

// \'Kevin'
#[test]
fn bare_string() {
    assert_eq!(to_vec("Kevin").unwrap(), stream(&[&[0x0a, 5], b"Kevin"]));
}

// \'1234'
#[test]
fn integer() {
    assert_eq!(to_vec(&1234).unwrap(), stream(&[&[0x0a, 4], b"1234"]));
}

// \'5.55'
#[test]
fn float() {
    assert_eq!(to_vec(&5.55).unwrap(), stream(&[&[0x0a, 4], b"5.55"]));
}

// \'0'
#[test]
fn boolean() {
    assert_eq!(to_vec(&false).unwrap(), stream(&[&[0x0a, 1], b"0"]));
}

// ['hey','there']
#[test]
fn string_list() {
    assert_eq!(
        to_vec(&["hey", "there"][..]).unwrap(),
        stream(&[&[0x02, 0, 0, 0, 2], &[0x0a, 3], b"hey", &[0x0a, 5], b"there"])
    );
}

#[test]
fn writer_matches_vec() {
    let value = vec![Ref(1u32), Ref(2u32)];
    let mut out = Vec::new();
    to_writer(&mut out, &value).unwrap();
    assert_eq!(out, to_vec(&value).unwrap());

    let mut enc = Encoder::new(Vec::new());
    enc.encode(&value).unwrap();
    assert_eq!(enc.into_inner(), out);
}

#[test]
fn failed_encode_leaves_writer_untouched() {
    let mut out = Vec::new();
    let res = to_writer(&mut out, &vec![Some("a"), None]);
    assert!(matches!(res, Err(Error::UnsupportedShape(_))));
    assert!(out.is_empty());
}

#[test]
fn error_messages() {
    let err = to_vec(&"x".repeat(300)).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Scalar too long: was 300 bytes, maximum allowed is 255"
    );
    let err = to_vec(&()).unwrap_err();
    assert_eq!(err.to_string(), "Storable has no encoding for a unit value");
}
