//! Dot-delimited field paths into raw event records.
//!
//! Raw events are kept as [`serde_json::Value`] trees (built with
//! `preserve_order`, so object keys keep their document order). A
//! [`FieldPath`] such as `location.title` addresses a node inside such a
//! tree, and [`extract`] resolves it without ever failing: anything that
//! cannot be reached degrades to the empty string.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;

/// A parsed dot-delimited path such as `start.date`.
///
/// The original string is kept verbatim because it doubles as the key of
/// the projected field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a path by splitting on `.`.
    ///
    /// An empty string yields a path with zero segments, which resolves to
    /// the root node.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = if raw.is_empty() {
            Vec::new()
        } else {
            raw.split('.').map(str::to_string).collect()
        };
        Self { raw, segments }
    }

    /// Returns the path exactly as it was given.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the individual path segments.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns true for the zero-segment path.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Resolves `path` against `record`.
///
/// Walking stops with an empty string as soon as the current node is not
/// an object or the next key is absent. A resolved `null` also becomes the
/// empty string; every other leaf is returned as-is.
pub fn extract(record: &Value, path: &FieldPath) -> Value {
    match resolve(record, path.segments()) {
        Some(Value::Null) | None => empty(),
        Some(value) => value.clone(),
    }
}

/// Short JSON type name for diagnostics.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn resolve<'a>(node: &'a Value, segments: &[String]) -> Option<&'a Value> {
    let Some((head, rest)) = segments.split_first() else {
        return Some(node);
    };

    match node {
        Value::Object(map) => map.get(head).and_then(|child| resolve(child, rest)),
        _ => None,
    }
}

fn empty() -> Value {
    Value::String(String::new())
}

/// Renders a projected value as display text.
///
/// Strings are returned verbatim, numbers in their JSON form, booleans as
/// `True`/`False` and `null` as the empty string. Arrays and objects are
/// written as literals such as `['music', 'outdoor']` or `{'k': 1}`, with
/// single-quoted strings and `None` for nested nulls.
pub fn display_value(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("True"),
        Value::Bool(false) => Cow::Borrowed("False"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => {
            let mut out = String::new();
            write_literal(&mut out, value);
            Cow::Owned(out)
        }
    }
}

fn write_literal(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::String(s) => write_quoted(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_literal(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            out.push('{');
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_quoted(out, key);
                out.push_str(": ");
                write_literal(out, item);
            }
            out.push('}');
        }
    }
}

/// Single quotes unless the text holds a single quote and no double quote.
fn write_quoted(out: &mut String, s: &str) {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    out.push(quote);
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_ascii_control() => out.push_str(&format!("\\x{:02x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push(quote);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "title": "Jazz Band",
            "location": {"title": "Brownwood Paddock Square", "id": 42},
            "start": {"date": "2025-01-01T18:00:00"},
            "allDay": false,
            "otherInfo": null,
            "subcategories": ["music", "outdoor"]
        })
    }

    #[test]
    fn parse_splits_segments() {
        let path = FieldPath::parse("address.streetAddress");
        assert_eq!(path.segments(), &["address", "streetAddress"]);
        assert_eq!(path.as_str(), "address.streetAddress");
        assert!(!path.is_root());
    }

    #[test]
    fn parse_empty_is_root() {
        let path = FieldPath::parse("");
        assert!(path.is_root());
        assert!(path.segments().is_empty());
    }

    #[test]
    fn extract_top_level() {
        assert_eq!(extract(&sample(), &"title".into()), json!("Jazz Band"));
    }

    #[test]
    fn extract_nested() {
        let event = sample();
        assert_eq!(
            extract(&event, &"location.title".into()),
            json!("Brownwood Paddock Square")
        );
        assert_eq!(extract(&event, &"location.id".into()), json!(42));
    }

    #[test]
    fn extract_missing_first_segment_is_empty() {
        assert_eq!(extract(&sample(), &"address.locality".into()), json!(""));
        assert_eq!(extract(&json!({}), &"title".into()), json!(""));
    }

    #[test]
    fn extract_through_scalar_is_empty() {
        // `title` is a string, so there is nothing to descend into.
        assert_eq!(extract(&sample(), &"title.length".into()), json!(""));
    }

    #[test]
    fn extract_through_array_is_empty() {
        assert_eq!(extract(&sample(), &"subcategories.0".into()), json!(""));
    }

    #[test]
    fn extract_null_leaf_is_empty() {
        assert_eq!(extract(&sample(), &"otherInfo".into()), json!(""));
    }

    #[test]
    fn extract_keeps_non_string_leaves() {
        let event = sample();
        assert_eq!(extract(&event, &"allDay".into()), json!(false));
        assert_eq!(
            extract(&event, &"subcategories".into()),
            json!(["music", "outdoor"])
        );
    }

    #[test]
    fn extract_root_path_returns_record() {
        let event = json!({"title": "x"});
        assert_eq!(extract(&event, &FieldPath::parse("")), event);
    }

    #[test]
    fn extract_on_non_object_record() {
        assert_eq!(extract(&json!("just a string"), &"title".into()), json!(""));
        assert_eq!(extract(&json!(null), &"title".into()), json!(""));
    }

    #[test]
    fn display_value_forms() {
        assert_eq!(display_value(&json!("a,b")), "a,b");
        assert_eq!(display_value(&json!(null)), "");
        assert_eq!(display_value(&json!(true)), "True");
        assert_eq!(display_value(&json!(false)), "False");
        assert_eq!(display_value(&json!(12)), "12");
        assert_eq!(display_value(&json!(1.5)), "1.5");
        assert_eq!(display_value(&json!(["a", "b"])), "['a', 'b']");
        assert_eq!(display_value(&json!({"k": 1})), "{'k': 1}");
    }

    #[test]
    fn display_value_nested_literals() {
        assert_eq!(
            display_value(&json!(["music", "outdoor"])),
            "['music', 'outdoor']"
        );
        assert_eq!(
            display_value(&json!({"open": true, "price": null, "tags": [1, 2.5]})),
            "{'open': True, 'price': None, 'tags': [1, 2.5]}"
        );
        assert_eq!(display_value(&json!([])), "[]");
        assert_eq!(display_value(&json!({})), "{}");
    }

    #[test]
    fn display_value_quotes_strings_in_containers() {
        assert_eq!(display_value(&json!(["it's"])), r#"["it's"]"#);
        assert_eq!(display_value(&json!(["say \"hi\""])), r#"['say "hi"']"#);
        assert_eq!(display_value(&json!(["both ' and \""])), r#"['both \' and "']"#);
        assert_eq!(display_value(&json!(["a\\b\nc"])), r"['a\\b\nc']");
        assert_eq!(display_value(&json!(["bell\u{7}"])), r"['bell\x07']");
        assert_eq!(display_value(&json!(["Café"])), "['Café']");
    }

    #[test]
    fn type_names() {
        assert_eq!(type_name(&json!(null)), "null");
        assert_eq!(type_name(&json!([1])), "array");
        assert_eq!(type_name(&json!({"a": 1})), "object");
        assert_eq!(type_name(&json!(1.5)), "number");
    }
}
