//! Agent reply normalization.
//!
//! The remote assistant answers with arbitrary JSON in one of a few shapes:
//! the value itself, the value wrapped as `{ "response": <value> }`, or a
//! wrapped one-element sequence of `{ "output": <value> }`. [`normalize`]
//! collapses all of them to the inner value so the rest of the client never
//! branches on the wire shape.

use serde_json::{Value, json};

/// Normalizes a raw agent reply to its displayable value.
///
/// Two unwrap steps, applied in order:
/// 1. an object with a `response` field is replaced by that field;
/// 2. an array whose first element carries an `output` field is replaced by
///    that field.
///
/// The function is pure and total, and re-applying it to an already
/// normalized value is a no-op, so pre-unwrapped replies pass through
/// unchanged.
pub fn normalize(raw: Value) -> Value {
    let unwrapped = match raw {
        Value::Object(mut map) => match map.remove("response") {
            Some(inner) => inner,
            None => Value::Object(map),
        },
        other => other,
    };

    match unwrapped {
        Value::Array(mut items)
            if items
                .first()
                .is_some_and(|first| first.get("output").is_some()) =>
        {
            match items.swap_remove(0) {
                Value::Object(mut first) => first.remove("output").unwrap_or(Value::Null),
                // Unreachable: the guard established an object with "output".
                other => other,
            }
        }
        other => other,
    }
}

/// Builds the uniform `{ "error": string }` reply used for every local
/// failure.
///
/// Transport failures and agent-reported errors share this shape on
/// purpose; the presentation layer renders both the same way.
pub fn error_reply(message: impl Into<String>) -> Value {
    json!({ "error": message.into() })
}

/// Returns true when a normalized reply carries the error shape.
pub fn is_error_reply(reply: &Value) -> bool {
    reply.get("error").is_some_and(Value::is_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwraps_response_object() {
        let raw = json!({ "response": { "a": 1 } });
        assert_eq!(normalize(raw), json!({ "a": 1 }));
    }

    #[test]
    fn test_unwraps_response_sequence_output() {
        let raw = json!({ "response": [ { "output": "hello" } ] });
        assert_eq!(normalize(raw), json!("hello"));
    }

    #[test]
    fn test_unwraps_bare_sequence_output() {
        let raw = json!([ { "output": { "total": 42 } } ]);
        assert_eq!(normalize(raw), json!({ "total": 42 }));
    }

    #[test]
    fn test_idempotent_on_unwrapped_object() {
        let value = json!({ "a": 1 });
        assert_eq!(normalize(value.clone()), value);
        assert_eq!(normalize(normalize(value.clone())), value);
    }

    #[test]
    fn test_idempotent_on_scalar() {
        assert_eq!(normalize(json!("hello")), json!("hello"));
        assert_eq!(normalize(json!(3.5)), json!(3.5));
        assert_eq!(normalize(Value::Null), Value::Null);
    }

    #[test]
    fn test_array_without_output_passes_through() {
        let raw = json!([ { "total": 1 }, { "total": 2 } ]);
        assert_eq!(normalize(raw.clone()), raw);
    }

    #[test]
    fn test_error_reply_shape() {
        let reply = error_reply("Transport error: connection refused");
        assert_eq!(reply["error"], "Transport error: connection refused");
        assert!(is_error_reply(&reply));
        assert!(!is_error_reply(&json!({ "a": 1 })));
    }

    #[test]
    fn test_error_reply_survives_normalization() {
        let reply = error_reply("agent said no");
        assert_eq!(normalize(reply.clone()), reply);
    }
}
