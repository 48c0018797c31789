//! Native MARLEY dialect writer.
//!
//! Output uses bare keys, two-space indentation, and a trailing comma after
//! every member. Small objects whose members are all scalars, and arrays of
//! scalars, stay on one line. Floats are written in shortest round-trip form,
//! so reading the output back gives bit-identical values.

use serde_json::{Number, Value};

use super::json::to_json;
use crate::model::RunConfig;

const INDENT: &str = "  ";
/// Scalar-only objects up to this many members are written inline.
const INLINE_OBJECT_MEMBERS: usize = 3;

/// Serializes a configuration to the MARLEY dialect.
#[must_use]
pub fn to_marley(config: &RunConfig) -> String {
    let mut out = String::with_capacity(512);
    write_value(&to_json(config), 0, &mut out);
    out.push('\n');
    out
}

fn write_value(value: &Value, depth: usize, out: &mut String) {
    match value {
        Value::Object(map) if inline_object(value) => {
            out.push_str("{ ");
            let members: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let mut s = format!("{}: ", key(k));
                    write_value(v, depth, &mut s);
                    s
                })
                .collect();
            out.push_str(&members.join(", "));
            out.push_str(" }");
        }
        Value::Object(map) => {
            out.push_str("{\n");
            for (k, v) in map {
                push_indent(depth + 1, out);
                out.push_str(&key(k));
                out.push_str(": ");
                write_value(v, depth + 1, out);
                out.push_str(",\n");
            }
            push_indent(depth, out);
            out.push('}');
        }
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Array(items) if items.iter().all(is_scalar) => {
            out.push_str("[ ");
            let parts: Vec<String> = items
                .iter()
                .map(|v| {
                    let mut s = String::new();
                    write_value(v, depth, &mut s);
                    s
                })
                .collect();
            out.push_str(&parts.join(", "));
            out.push_str(" ]");
        }
        Value::Array(items) => {
            out.push_str("[\n");
            for v in items {
                push_indent(depth + 1, out);
                write_value(v, depth + 1, out);
                out.push_str(",\n");
            }
            push_indent(depth, out);
            out.push(']');
        }
        Value::Number(n) => out.push_str(&number(n)),
        Value::String(s) => out.push_str(&Value::String(s.clone()).to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Null => out.push_str("null"),
    }
}

fn inline_object(value: &Value) -> bool {
    value.as_object().is_some_and(|map| {
        map.len() <= INLINE_OBJECT_MEMBERS && map.values().all(is_scalar) && !map.is_empty()
    })
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => format!("{f:?}"),
        _ => n.to_string(),
    }
}

/// Bare identifier when possible, quoted otherwise.
fn key(k: &str) -> String {
    let mut chars = k.chars();
    let bare = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
        && !matches!(k, "true" | "false" | "null");
    if bare {
        k.to_owned()
    } else {
        Value::String(k.to_owned()).to_string()
    }
}

fn push_indent(depth: usize, out: &mut String) {
    for _ in 0..depth {
        out.push_str(INDENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUPERNOVA: &str = include_str!("../../data/supernova_ve40ar.js");

    #[test]
    fn writes_native_layout() {
        let config: RunConfig = SUPERNOVA.parse().unwrap();
        let text = to_marley(&config);
        let expected = "\
{
  seed: 123456,
  target: {
    nuclides: [ 1000180400 ],
    atom_fractions: [ 1.0 ],
  },
  reactions: [ \"ve40ArCC_Bhattacharya2009.react\" ],
  source: {
    type: \"fermi-dirac\",
    neutrino: \"ve\",
    Emin: 0.0,
    Emax: 60.0,
    temperature: 3.5,
    eta: 0.0,
  },
  direction: { x: 0.0, y: 0.0, z: 1.0 },
}
";
        assert_eq!(text, expected);
    }

    #[test]
    fn output_reads_back_identically() {
        let config: RunConfig = SUPERNOVA.parse().unwrap();
        let again: RunConfig = to_marley(&config).parse().unwrap();
        assert_eq!(config, again);
    }

    #[test]
    fn quotes_keys_that_are_not_identifiers() {
        assert_eq!(key("Emin"), "Emin");
        assert_eq!(key("E min"), "\"E min\"");
        assert_eq!(key("null"), "\"null\"");
        assert_eq!(key("1a"), "\"1a\"");
    }

    #[test]
    fn floats_use_round_trip_form() {
        assert_eq!(number(&Number::from_f64(0.1).unwrap()), "0.1");
        assert_eq!(number(&Number::from_f64(1e-12).unwrap()), "1e-12");
        assert_eq!(number(&Number::from(42_u64)), "42");
    }
}
