//! Pretty JSON restricted to ASCII output.
//!
//! Indentation and separators are those of [`PrettyFormatter`]. Every
//! character outside printable ASCII is written as a lowercase `\uXXXX`
//! escape, using a surrogate pair above the Basic Multilingual Plane.

use std::io;

use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Serializer;
use serde_json::ser::{Formatter, PrettyFormatter};

/// A [`PrettyFormatter`] that escapes non-ASCII characters.
#[derive(Debug, Default)]
pub struct AsciiPrettyFormatter<'a> {
    inner: PrettyFormatter<'a>,
}

impl AsciiPrettyFormatter<'_> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Formatter for AsciiPrettyFormatter<'_> {
    fn begin_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array(writer)
    }

    fn end_array<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array(writer)
    }

    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_array_value(writer, first)
    }

    fn end_array_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_array_value(writer)
    }

    fn begin_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object(writer)
    }

    fn end_object<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object(writer)
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_key(writer, first)
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.begin_object_value(writer)
    }

    fn end_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.inner.end_object_value(writer)
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() && ch != '\x7f' {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}

/// Serializes `value` as pretty-printed, ASCII-only JSON.
///
/// # Errors
///
/// Returns an error if `value` fails to serialize.
pub fn to_string_pretty_ascii<T>(value: &T) -> serde_json::Result<String>
where
    T: ?Sized + Serialize,
{
    let mut out = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut out, AsciiPrettyFormatter::new());
    value.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(serde_json::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    #[test]
    fn escapes_latin_text() {
        let out = to_string_pretty_ascii(&json!({"title": "Café"})).unwrap();
        assert_eq!(out, "{\n  \"title\": \"Caf\\u00e9\"\n}");
    }

    #[test]
    fn escapes_astral_as_surrogate_pair() {
        let out = to_string_pretty_ascii(&json!(["🎷"])).unwrap();
        assert_eq!(out, "[\n  \"\\ud83c\\udfb7\"\n]");
    }

    #[test]
    fn escapes_keys_and_delete() {
        let out = to_string_pretty_ascii(&json!({"ñ": "a\u{7f}b"})).unwrap();
        assert_eq!(out, "{\n  \"\\u00f1\": \"a\\u007fb\"\n}");
    }

    #[test]
    fn keeps_standard_escapes_and_layout() {
        let value = json!({"events": [], "note": "line\n\"quoted\"", "n": 1, "ok": true});
        let out = to_string_pretty_ascii(&value).unwrap();
        assert_eq!(out, serde_json::to_string_pretty(&value).unwrap());
    }

    #[test]
    fn parses_back_to_same_value() {
        let value = json!({"venue": "Plaza Mayor ☀", "tags": ["música"]});
        let out = to_string_pretty_ascii(&value).unwrap();
        assert!(out.is_ascii());
        assert_eq!(serde_json::from_str::<Value>(&out).unwrap(), value);
    }
}
