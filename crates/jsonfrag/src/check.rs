//! Shape checks for text about to be written.
//!
//! Only compact JSON is accepted: the callers have already rejected every
//! byte `<= 0x20`. Nesting is tracked on an explicit stack so that deep
//! input cannot exhaust the call stack.

use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array,
    Object,
}

/// End of the number starting at `start`:
/// `-?(0|[1-9][0-9]*)(\.[0-9]+)?([eE][+-]?[0-9]+)?`.
pub(crate) fn number_end(text: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    if text.get(i) == Some(&b'-') {
        i += 1;
    }
    match text.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i = digits_end(text, i),
        _ => return None,
    }
    if text.get(i) == Some(&b'.') {
        i = some_digits_end(text, i + 1)?;
    }
    if matches!(text.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(text.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        i = some_digits_end(text, i)?;
    }
    Some(i)
}

fn digits_end(text: &[u8], start: usize) -> usize {
    text[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(text.len(), |n| start + n)
}

fn some_digits_end(text: &[u8], start: usize) -> Option<usize> {
    let end = digits_end(text, start);
    (end > start).then_some(end)
}

/// End of the string whose opening quote is at `start`, closing quote
/// included.
fn string_end(text: &[u8], start: usize) -> Option<usize> {
    let mut i = start + 1;
    loop {
        match text.get(i)? {
            b'"' => return Some(i + 1),
            b'\\' => {
                text.get(i + 1)?;
                i += 2;
            }
            _ => i += 1,
        }
    }
}

/// End of the `"key":` starting at `start`.
fn member_key_end(text: &[u8], start: usize) -> Option<usize> {
    if text.get(start) != Some(&b'"') {
        return None;
    }
    let close = string_end(text, start)?;
    (text.get(close) == Some(&b':')).then_some(close + 1)
}

fn literal_end(text: &[u8], start: usize) -> Option<usize> {
    [&b"true"[..], b"false", b"null"]
        .into_iter()
        .find(|literal| text[start..].starts_with(literal))
        .map(|literal| start + literal.len())
}

/// Returns `true` if `text` is exactly one compact JSON value.
pub(crate) fn is_value(text: &[u8]) -> bool {
    value_shape(text).is_some()
}

fn value_shape(text: &[u8]) -> Option<()> {
    let mut stack = Vec::new();
    let mut i = 0;
    loop {
        // A value starts at `i`.
        match *text.get(i)? {
            b'{' if text.get(i + 1) == Some(&b'}') => i += 2,
            b'[' if text.get(i + 1) == Some(&b']') => i += 2,
            b'{' => {
                stack.push(Frame::Object);
                i = member_key_end(text, i + 1)?;
                continue;
            }
            b'[' => {
                stack.push(Frame::Array);
                i += 1;
                continue;
            }
            b'"' => i = string_end(text, i)?,
            b't' | b'f' | b'n' => i = literal_end(text, i)?,
            _ => i = number_end(text, i)?,
        }
        // The value ended: close containers until a separator comes up.
        loop {
            match (stack.last(), text.get(i)) {
                (None, None) => return Some(()),
                (Some(Frame::Array), Some(b',')) => {
                    i += 1;
                    break;
                }
                (Some(Frame::Object), Some(b',')) => {
                    i = member_key_end(text, i + 1)?;
                    break;
                }
                (Some(Frame::Array), Some(b']')) | (Some(Frame::Object), Some(b'}')) => {
                    stack.pop();
                    i += 1;
                }
                _ => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0", true)]
    #[case("-12", true)]
    #[case("1.5e-3", true)]
    #[case("2E+10", true)]
    #[case("-", false)]
    #[case("1-2", false)]
    #[case("01", false)]
    #[case("1.", false)]
    #[case("1e", false)]
    #[case(".5", false)]
    #[case("+1", false)]
    fn numbers(#[case] text: &str, #[case] valid: bool) {
        let text = text.as_bytes();
        assert_eq!(number_end(text, 0) == Some(text.len()), valid);
    }

    #[rstest]
    #[case(r#"{}"#, true)]
    #[case(r#"[]"#, true)]
    #[case(r#"[1,[2,{"a":[]}],"x]"]"#, true)]
    #[case(r#"{"a":{"b":null},"c":[true,false]}"#, true)]
    #[case(r#"{"a\"b":"}"}"#, true)]
    #[case("null", true)]
    #[case(r#"[}"#, false)]
    #[case(r#"{]"#, false)]
    #[case(r#"{"a"}"#, false)]
    #[case(r#"{"a":}"#, false)]
    #[case(r#"{"a":1,}"#, false)]
    #[case(r#"[1,]"#, false)]
    #[case(r#"[1]]"#, false)]
    #[case(r#"[1,2"#, false)]
    #[case(r#"{1:2}"#, false)]
    #[case("nul", false)]
    #[case("truex", false)]
    fn values(#[case] text: &str, #[case] valid: bool) {
        assert_eq!(is_value(text.as_bytes()), valid);
    }
}
