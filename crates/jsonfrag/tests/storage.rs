#![expect(missing_docs)]

use jsonfrag::{Document, DocumentError, DocumentOptions, Ingest, NewValue, StorageIntent, ValueKind};

#[test]
fn borrowed_region_backs_a_document() {
    let mut region = [0u8; 48];
    {
        let mut doc = Document::with_storage(
            &mut region[..],
            DocumentOptions {
                storage: StorageIntent::Persistent,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(doc.capacity(), 48);
        assert_eq!(doc.storage_intent(), StorageIntent::Persistent);

        let mut cursor = Ingest::new();
        let chunks: [&[u8]; 3] = [b"{\"cfg\":", b" {\"rate\": 9600}", b" }\r\n"];
        for chunk in chunks {
            doc.ingest(&mut cursor, chunk).unwrap();
        }
        doc.upsert_int("rate", 115_200, "cfg").unwrap();
        assert_eq!(doc.int_value(&doc.resolve("rate", "cfg")), 115_200);
    }
    assert_eq!(&region[..23], br#"{"cfg":{"rate":115200}}"#);
}

#[test]
fn array_region_reports_out_of_space() {
    let mut doc = Document::with_storage(
        [0u8; 10],
        DocumentOptions {
            initialize_empty_object: true,
            ..Default::default()
        },
    )
    .unwrap();
    doc.upsert("k", NewValue::String("v"), "").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"k":"v"}"#);
    doc.upsert("k", NewValue::String("vv"), "").unwrap();
    assert_eq!(doc.len(), 10);
    assert_eq!(
        doc.upsert("k", NewValue::String("vvv"), ""),
        Err(DocumentError::OutOfSpace {
            needed: 11,
            capacity: 10
        })
    );
    assert_eq!(doc.as_bytes(), br#"{"k":"vv"}"#);
}

#[test]
fn views_survive_reads_but_not_writes() {
    let mut doc = Document::from_json(DocumentOptions::default(), br#"{"a":[1,2]}"#).unwrap();
    let a = doc.locate("a");
    assert_eq!(a.kind(), ValueKind::Array);
    let _ = doc.byte_at(0).unwrap();
    let _ = doc.locate("b");
    assert_eq!(doc.text(&a).unwrap(), b"[1,2]");

    doc.reset();
    assert_eq!(
        doc.text(&a),
        Err(DocumentError::StaleView {
            view: a.generation(),
            current: doc.generation()
        })
    );
}
