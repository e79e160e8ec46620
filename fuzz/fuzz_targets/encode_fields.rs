#![no_main]
use libfuzzer_sys::fuzz_target;
use serde::Serialize;
use storable_pack::{to_vec, Error, Ref};

#[derive(Serialize)]
struct Record<'a> {
    #[serde(skip_serializing_if = "storable_pack::omit_empty")]
    text: &'a str,
    words: Vec<&'a str>,
    lens: Vec<Ref<usize>>,
}

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let words: Vec<&str> = text.split(' ').collect();
    let lens = words.iter().map(|w| Ref(w.len())).collect();
    let record = Record {
        text: &text,
        words,
        lens,
    };
    match to_vec(&record) {
        Ok(enc) => assert_eq!(&enc[..2], &[5, 7]),
        Err(Error::ScalarTooLong { len }) => assert!(len > 255),
        Err(e) => panic!("unexpected failure: {}", e),
    }
});
