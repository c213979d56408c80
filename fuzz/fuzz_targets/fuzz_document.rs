#![no_main]

use arbitrary::{Arbitrary, Unstructured};
use jsonfrag::{Document, DocumentOptions, Ingest, NewValue};
use libfuzzer_sys::fuzz_target;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde_json::{Map, Value as Json};

const KEYS: [&str; 4] = ["a", "b", "cc", "d"];

#[derive(Debug, Arbitrary)]
enum Input {
    /// Arbitrary bytes fed through chunked ingestion, then queried.
    Ingest {
        capacity: u8,
        seed: u64,
        bytes: Vec<u8>,
        queries: Vec<(u8, Vec<u8>)>,
    },
    /// A sequence of upserts checked against a `serde_json` model.
    Upserts { capacity: u16, ops: Vec<Op> },
}

#[derive(Debug, Arbitrary)]
struct Op {
    path: Vec<u8>,
    key: u8,
    value: FuzzValue,
}

#[derive(Debug, Arbitrary)]
enum FuzzValue {
    String(u8),
    Integer(i32),
    Array(Vec<i8>),
    Object(u8, i8),
    Literal(Option<bool>),
}

impl FuzzValue {
    fn text(&self) -> String {
        match self {
            Self::String(n) => format!("s{n}"),
            Self::Integer(n) => n.to_string(),
            Self::Array(items) => {
                let items: Vec<_> = items.iter().map(ToString::to_string).collect();
                format!("[{}]", items.join(","))
            }
            Self::Object(k, v) => format!("{{\"{}\":{v}}}", pick(*k)),
            Self::Literal(Some(b)) => b.to_string(),
            Self::Literal(None) => "null".into(),
        }
    }

    fn new_value<'a>(&self, text: &'a str) -> NewValue<'a> {
        match self {
            Self::String(_) => NewValue::String(text),
            Self::Integer(_) => NewValue::Integer(text),
            _ => NewValue::Raw(text),
        }
    }

    fn written(&self) -> String {
        match self {
            Self::String(_) => format!("\"{}\"", self.text()),
            _ => self.text(),
        }
    }
}

fn pick(n: u8) -> &'static str {
    KEYS[usize::from(n) % KEYS.len()]
}

fn ingest(capacity: u8, seed: u64, bytes: &[u8], queries: &[(u8, Vec<u8>)]) {
    let mut doc = Document::new(DocumentOptions {
        capacity: usize::from(capacity),
        ..Default::default()
    });
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut cursor = Ingest::new();
    let mut rest = bytes;
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(rng.random_range(1..=rest.len()));
        if doc.ingest(&mut cursor, chunk).is_err() {
            assert_eq!(doc.len(), doc.capacity());
            break;
        }
        rest = tail;
    }
    assert!(doc.len() <= doc.capacity());
    assert!(doc.as_bytes().iter().all(|&b| b > b' '));

    // Lookups on arbitrary text must stay inside the buffer and never panic.
    for (key, path) in queries {
        let path: Vec<&str> = path.iter().map(|&n| pick(n)).collect();
        for value in [
            doc.locate(pick(*key)),
            doc.locate_deep(pick(*key)),
            doc.resolve(pick(*key), path.as_slice()),
        ] {
            if let Ok(text) = doc.raw_text(&value) {
                assert!(value.raw_span().end() <= doc.len());
                assert!(!value.is_null() || text.is_empty());
            }
        }
        if let Ok(members) = doc.members(path.as_slice()) {
            for value in members {
                assert!(value.span().end() <= doc.len());
            }
        }
    }
}

fn upserts(capacity: u16, ops: &[Op]) {
    let mut doc = Document::new(DocumentOptions {
        capacity: usize::from(capacity),
        initialize_empty_object: true,
        ..Default::default()
    });
    let mut model = Json::Object(Map::new());

    for op in ops {
        let path: Vec<&str> = op.path.iter().map(|&n| pick(n)).collect();
        let key = pick(op.key);
        let text = op.value.text();
        let before = doc.as_bytes().to_vec();

        match doc.upsert(key, op.value.new_value(&text), path.as_slice()) {
            Ok(()) => {
                let value = doc.resolve(key, path.as_slice());
                let raw = doc.raw_text(&value).expect("fresh view");
                assert_eq!(raw, op.value.written().as_bytes());

                let mut parent = &mut model;
                for segment in &path {
                    parent = parent
                        .get_mut(*segment)
                        .expect("upsert succeeded, so the parent exists");
                }
                let written: Json = serde_json::from_str(&op.value.written())
                    .expect("written text is valid JSON");
                parent
                    .as_object_mut()
                    .expect("upsert succeeded, so the parent is an object")
                    .insert(key.to_string(), written);
            }
            Err(_) => assert_eq!(doc.as_bytes(), before.as_slice()),
        }
        assert!(doc.len() <= doc.capacity());
    }

    let parsed: Json = serde_json::from_slice(doc.as_bytes()).expect("document stays valid JSON");
    assert_eq!(parsed, model);
}

fn run(data: &[u8]) {
    let Ok(input) = Input::arbitrary(&mut Unstructured::new(data)) else {
        return;
    };
    match input {
        Input::Ingest {
            capacity,
            seed,
            bytes,
            queries,
        } => ingest(capacity, seed, &bytes, &queries),
        Input::Upserts { capacity, ops } => upserts(capacity, &ops),
    }
}

fuzz_target!(|data: &[u8]| run(data));
