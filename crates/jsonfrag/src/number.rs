use core::fmt::{self, Write};

use crate::{Document, DocumentError, Value, ValueKind};

/// Decimal text of an `i64`, formatted on the stack.
pub(crate) struct IntText {
    buf: [u8; 20],
    len: usize,
}

impl IntText {
    pub(crate) fn new(value: i64) -> Self {
        let mut text = Self {
            buf: [0; 20],
            len: 0,
        };
        // 20 bytes hold every i64, so the write cannot fail.
        let _ = write!(text, "{value}");
        text
    }

    pub(crate) fn as_str(&self) -> &str {
        // Only ASCII digits and '-' are ever written.
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }
}

impl Write for IntText {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        let dst = self.buf.get_mut(self.len..end).ok_or(fmt::Error)?;
        dst.copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> Document<S> {
    /// Decodes an [`ValueKind::Integer`] value as base 10.
    ///
    /// Returns 0 for any other kind, for stale views and for text that does
    /// not fit an `i64` (fractions and exponents included).
    pub fn int_value(&self, value: &Value) -> i64 {
        self.try_int_value(value).unwrap_or(0)
    }

    /// As [`int_value`](Self::int_value), saying why no number came out.
    ///
    /// # Errors
    ///
    /// [`DocumentError::StaleView`] for an old view, and
    /// [`DocumentError::Malformed`] when the value is not an integer.
    pub fn try_int_value(&self, value: &Value) -> Result<i64, DocumentError> {
        let text = self.text(value)?;
        if value.kind != ValueKind::Integer {
            return Err(DocumentError::Malformed("value is not an integer"));
        }
        core::str::from_utf8(text)
            .ok()
            .and_then(|text| text.parse().ok())
            .ok_or(DocumentError::Malformed("integer text does not parse"))
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use quickcheck_macros::quickcheck;
    use rstest::rstest;

    use super::*;
    use crate::DocumentOptions;

    #[rstest]
    #[case(0, "0")]
    #[case(-1, "-1")]
    #[case(i64::MAX, "9223372036854775807")]
    #[case(i64::MIN, "-9223372036854775808")]
    fn formats_on_the_stack(#[case] value: i64, #[case] expected: &str) {
        assert_eq!(IntText::new(value).as_str(), expected);
    }

    #[rstest]
    #[case("n", 42)]
    #[case("neg", -17)]
    #[case("frac", 0)]
    #[case("s", 0)]
    #[case("arr", 0)]
    #[case("missing", 0)]
    fn decodes_integers_only(#[case] key: &str, #[case] expected: i64) {
        let doc = Document::from_json(
            DocumentOptions::default(),
            br#"{"n":42,"neg":-17,"frac":1.5,"s":"7","arr":[1]}"#,
        )
        .unwrap();
        assert_eq!(doc.int_value(&doc.locate(key)), expected);
    }

    #[test]
    fn try_int_value_explains() {
        let doc = Document::from_json(DocumentOptions::default(), br#"{"s":"7","f":1.5}"#).unwrap();
        assert_eq!(
            doc.try_int_value(&doc.locate("s")),
            Err(DocumentError::Malformed("value is not an integer"))
        );
        assert_eq!(
            doc.try_int_value(&doc.locate("f")),
            Err(DocumentError::Malformed("integer text does not parse"))
        );
    }

    #[quickcheck]
    fn stack_text_matches_display(value: i64) -> bool {
        IntText::new(value).as_str() == value.to_string()
    }

    #[quickcheck]
    fn upsert_int_reads_back(value: i64) -> bool {
        let mut doc = Document::new(DocumentOptions {
            capacity: 32,
            initialize_empty_object: true,
            ..Default::default()
        });
        doc.upsert_int("n", value, "").is_ok() && doc.int_value(&doc.locate("n")) == value
    }
}
