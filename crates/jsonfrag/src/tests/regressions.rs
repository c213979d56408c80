//! Fixed cases that once broke simpler scanners.
use crate::{Document, DocumentOptions, NewValue, ValueKind};

fn doc(text: &[u8]) -> Document {
    Document::from_json(
        DocumentOptions {
            capacity: 128,
            ..Default::default()
        },
        text,
    )
    .unwrap()
}

#[test]
fn same_bracket_nesting_is_balanced() {
    let doc = doc(br#"{"x":{"y":{"z":"1"}}}"#);
    let x = doc.locate("x");
    assert_eq!(x.kind(), ValueKind::Object);
    assert_eq!(doc.text(&x).unwrap(), br#"{"y":{"z":"1"}}"#);

    let doc = self::doc(br#"{"m":[[1,2],[3]],"n":0}"#);
    assert_eq!(doc.text(&doc.locate("m")).unwrap(), b"[[1,2],[3]]");
}

#[test]
fn path_segment_inside_string_value_is_skipped() {
    let mut doc = doc(br#"{"note":"c","c":{"d":"x"}}"#);
    doc.upsert("e", NewValue::String("y"), "c").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"note":"c","c":{"e":"y","d":"x"}}"#);
}

#[test]
fn same_key_at_two_depths_updates_the_right_one() {
    let mut doc = doc(br#"{"c":{"a":"inner"},"a":"outer"}"#);
    doc.upsert("a", NewValue::String("root"), "").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"c":{"a":"inner"},"a":"root"}"#);
    doc.upsert("a", NewValue::String("nested"), "c").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"c":{"a":"nested"},"a":"root"}"#);
}

#[test]
fn update_of_last_member_keeps_closing_braces() {
    let mut doc = doc(br#"{"c":{"d":"x"}}"#);
    doc.upsert("d", NewValue::Raw("[1,2,3]"), "c").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"c":{"d":[1,2,3]}}"#);
    doc.upsert("d", NewValue::Integer("9"), "c").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"c":{"d":9}}"#);
}

#[test]
fn insert_accounts_for_the_whole_pair() {
    let mut doc = Document::new(DocumentOptions {
        capacity: 9,
        initialize_empty_object: true,
        ..Default::default()
    });
    doc.upsert("a", NewValue::String("1"), "").unwrap();
    assert_eq!(doc.as_bytes(), br#"{"a":"1"}"#);
    assert!(doc.upsert("b", NewValue::String(""), "").is_err());
    assert_eq!(doc.as_bytes(), br#"{"a":"1"}"#);
}
