//! Deterministic JSON text encoding for world state records
//!
//! Every replica that executes a transaction must write byte-identical
//! values, so records are serialized through an explicit canonical form:
//! object keys sorted bytewise at every nesting level, compact output, no
//! locale-dependent formatting. Decoding is plain serde and accepts any
//! field order.

use super::error::LedgerError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt::Write;

/// Encode a value as canonical JSON text.
///
/// Two field-wise equal values encode to the same bytes no matter how they
/// were built.
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String, LedgerError> {
    let tree = serde_json::to_value(value)?;
    let mut out = String::new();
    write_canonical(&mut out, &tree);
    Ok(out)
}

/// Encode a value and hand back the bytes to store.
pub fn to_canonical_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, LedgerError> {
    Ok(to_canonical_json(value)?.into_bytes())
}

/// Decode a stored record. Field order in the input is irrelevant.
pub fn from_canonical_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, LedgerError> {
    Ok(serde_json::from_slice(bytes)?)
}

fn write_canonical(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        // serde_json renders integers without sign/zero padding and floats
        // via the shortest-roundtrip algorithm, both pure functions of the
        // numeric value.
        Value::Number(n) => {
            let _ = write!(out, "{n}");
        }
        Value::String(s) => write_escaped(out, s),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(out, item);
            }
            out.push(']');
        }
        Value::Object(map) => {
            // Sort keys explicitly rather than relying on the map's own
            // iteration order, which depends on serde_json feature flags.
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.as_bytes().cmp(b.0.as_bytes()));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_escaped(out, key);
                out.push(':');
                write_canonical(out, item);
            }
            out.push('}');
        }
    }
}

fn write_escaped(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
