//! Deterministic content identifiers for log records and violations.
//!
//! Two runs that commit (or reject) the same edit from the same history
//! MUST produce identical ids.
//!
//! Algorithm:
//! 1. Build a canonical key object (schema, kind, payload fields)
//! 2. Serialize via RFC 8785 (JCS): sorted keys, no whitespace
//! 3. id = prefix || base32hex_lower(SHA256(keyBytes))

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// Prefix for execution-log record ids.
pub const RECORD_ID_PREFIX: &str = "r1_";

/// Prefix for contract-violation witness ids.
pub const VIOLATION_ID_PREFIX: &str = "v1_";

/// Compute the chained id of an execution-log record.
///
/// `prev` is the id of the preceding record (`None` for the first entry),
/// so every id commits to the whole history before it.
pub fn compute_record_id(prev: Option<&str>, body: &Map<String, Value>) -> String {
    let mut key = body.clone();
    key.insert("schema".to_string(), Value::Number(1.into()));
    key.insert(
        "prev".to_string(),
        prev.map(|p| Value::String(p.to_string()))
            .unwrap_or(Value::Null),
    );
    digest_id(RECORD_ID_PREFIX, &Value::Object(key))
}

/// Compute the witness id of a rejected operator application.
pub fn compute_violation_id(operator: &str, deltas: &Value) -> String {
    let mut key = Map::new();
    key.insert("schema".to_string(), Value::Number(1.into()));
    key.insert(
        "class".to_string(),
        Value::String("contract_violation".to_string()),
    );
    key.insert("operator".to_string(), Value::String(operator.to_string()));
    key.insert("deltas".to_string(), deltas.clone());
    digest_id(VIOLATION_ID_PREFIX, &Value::Object(key))
}

fn digest_id(prefix: &str, key: &Value) -> String {
    let mut bytes = Vec::new();
    jcs_serialize_value(key, &mut bytes);
    let hash = Sha256::digest(&bytes);
    format!("{prefix}{}", base32hex_lower_no_pad(&hash))
}

/// RFC 8785 serialization: keys sorted lexicographically, no whitespace.
///
/// Payloads here are integers, strings, booleans, null, arrays and small
/// objects, so integer formatting covers the number cases that occur.
fn jcs_serialize_value(value: &Value, buf: &mut Vec<u8>) {
    match value {
        Value::Null => buf.extend_from_slice(b"null"),
        Value::Bool(true) => buf.extend_from_slice(b"true"),
        Value::Bool(false) => buf.extend_from_slice(b"false"),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                buf.extend_from_slice(i.to_string().as_bytes());
            } else if let Some(u) = n.as_u64() {
                buf.extend_from_slice(u.to_string().as_bytes());
            } else {
                buf.extend_from_slice(n.to_string().as_bytes());
            }
        }
        Value::String(s) => push_json_string(s, buf),
        Value::Array(items) => {
            buf.push(b'[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                jcs_serialize_value(item, buf);
            }
            buf.push(b']');
        }
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            buf.push(b'{');
            for (i, key) in keys.iter().enumerate() {
                if i > 0 {
                    buf.push(b',');
                }
                push_json_string(key, buf);
                buf.push(b':');
                jcs_serialize_value(&map[*key], buf);
            }
            buf.push(b'}');
        }
    }
}

fn push_json_string(s: &str, buf: &mut Vec<u8>) {
    // Display on a string Value is its JSON encoding and cannot fail.
    buf.extend_from_slice(Value::String(s.to_string()).to_string().as_bytes());
}

/// RFC 4648 base32hex encoding, lowercase, without padding.
fn base32hex_lower_no_pad(data: &[u8]) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuv";

    let mut result = String::new();
    let mut bits: u64 = 0;
    let mut num_bits: u32 = 0;

    for &byte in data {
        bits = (bits << 8) | u64::from(byte);
        num_bits += 8;

        while num_bits >= 5 {
            num_bits -= 5;
            let idx = ((bits >> num_bits) & 0x1f) as usize;
            result.push(ALPHABET[idx] as char);
        }
    }

    if num_bits > 0 {
        let idx = ((bits << (5 - num_bits)) & 0x1f) as usize;
        result.push(ALPHABET[idx] as char);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn base32hex_known_vector() {
        // RFC 4648 §10: BASE32-HEX("foobar") = "CPNMUOJ1E8======"
        assert_eq!(base32hex_lower_no_pad(b"foobar"), "cpnmuoj1e8");
    }

    #[test]
    fn jcs_sorts_keys_and_drops_whitespace() {
        let mut buf = Vec::new();
        jcs_serialize_value(&json!({"b": [1, true], "a": {"z": null, "y": "β1"}}), &mut buf);
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            r#"{"a":{"y":"β1","z":null},"b":[1,true]}"#
        );
    }

    #[test]
    fn record_id_is_deterministic() {
        let b = body(json!({"operator": "x", "sequence": 0}));
        assert_eq!(compute_record_id(None, &b), compute_record_id(None, &b));
        assert!(compute_record_id(None, &b).starts_with(RECORD_ID_PREFIX));
    }

    #[test]
    fn record_id_commits_to_predecessor() {
        let b = body(json!({"operator": "x", "sequence": 1}));
        assert_ne!(
            compute_record_id(Some("r1_a"), &b),
            compute_record_id(Some("r1_b"), &b)
        );
        assert_ne!(compute_record_id(None, &b), compute_record_id(Some("r1_a"), &b));
    }

    #[test]
    fn violation_id_depends_on_deltas() {
        let a = compute_violation_id("op", &json!({"betti": {"β1": 1}}));
        let b = compute_violation_id("op", &json!({"betti": {"β1": 2}}));
        assert_ne!(a, b);
        assert!(a.starts_with(VIOLATION_ID_PREFIX));
    }
}
