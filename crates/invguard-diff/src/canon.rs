//! Canonical value form and set-like normalization.
//!
//! Two independently parsed trees are compared value by value through
//! [`canon`], which renders compact JSON with mapping keys sorted. Equal
//! values always render to byte-identical strings.

use std::borrow::Cow;
use std::collections::BTreeSet;

use invguard_types::Value;

use crate::patterns::KeyPatterns;

/// Render a value in canonical form.
///
/// The output is compact JSON (no whitespace, non-ASCII kept verbatim) with
/// mapping keys in sorted order. Non-finite floats have no JSON encoding and
/// render as `NaN`, `Infinity`, or `-Infinity`.
pub fn canon(value: &Value) -> String {
    let mut out = String::new();
    write_canon(value, &mut out);
    out
}

fn write_canon(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Integer(i) => out.push_str(&i.to_string()),
        Value::Unsigned(u) => out.push_str(&u.to_string()),
        Value::Float(f) => write_float(*f, out),
        Value::String(s) => write_str(s, out),
        Value::Sequence(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canon(item, out);
            }
            out.push(']');
        }
        Value::Mapping(m) => {
            let mut entries: Vec<_> = m.iter().collect();
            entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
            out.push('{');
            for (i, (k, v)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_str(k, out);
                out.push(':');
                write_canon(v, out);
            }
            out.push('}');
        }
    }
}

fn write_float(f: f64, out: &mut String) {
    // -0.0 == 0.0, so both must render the same.
    let f = if f == 0.0 { 0.0 } else { f };
    match serde_json::Number::from_f64(f) {
        Some(n) => out.push_str(&n.to_string()),
        None if f.is_nan() => out.push_str("NaN"),
        None if f.is_sign_negative() => out.push_str("-Infinity"),
        None => out.push_str("Infinity"),
    }
}

fn write_str(s: &str, out: &mut String) {
    out.push_str(&serde_json::Value::from(s).to_string());
}

/// Prepare a variable's value for comparison.
///
/// When `key` matches a set-like pattern and `value` is a sequence of
/// scalars, the sequence is treated as an unordered set: the result is the
/// sorted, de-duplicated list of the elements' canonical forms. Any other
/// value is returned unchanged.
pub fn normalize<'a>(key: &str, value: &'a Value, set_like: &KeyPatterns) -> Cow<'a, Value> {
    match value {
        Value::Sequence(items) if items.iter().all(Value::is_scalar) && set_like.matches(key) => {
            let set: BTreeSet<String> = items.iter().map(canon).collect();
            Cow::Owned(Value::Sequence(set.into_iter().map(Value::String).collect()))
        }
        _ => Cow::Borrowed(value),
    }
}
