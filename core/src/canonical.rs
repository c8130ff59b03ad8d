//! Canonical encoding of parameter sets and request bodies.
//!
//! The remote server recomputes the signature over its own key-sorted
//! rendering of the request, so both the query string and the JSON body must
//! be produced deterministically: keys in ascending byte order, list values
//! joined with `,`, and forward slashes left unescaped in JSON.

use crate::hash::{hex_sha256, EMPTY_STRING_SHA256};
use crate::{Error, Result};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::Value;
use std::fmt::Write;

/// Encode a parameter map as `key{glue}value` pairs joined by `separator`,
/// with keys in ascending byte order.
///
/// List values are joined with `,` before being emitted. Used with
/// `("=", "&")` for query strings; the same ordering rules apply to the JSON
/// body hashed for signing.
///
/// Returns `ErrorKind::RequestInvalid` when the input is not a map or a
/// value is not a scalar or list of scalars.
pub fn encode(glue: &str, separator: &str, params: &Value) -> Result<String> {
    let map = params
        .as_object()
        .ok_or_else(|| Error::request_invalid("canonical encoding requires a map input"))?;

    let mut entries: Vec<(&String, &Value)> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut s = String::with_capacity(16);
    for (idx, (k, v)) in entries.into_iter().enumerate() {
        if idx != 0 {
            s.push_str(separator);
        }

        s.push_str(k);
        s.push_str(glue);
        match v {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i != 0 {
                        s.push(',');
                    }
                    write_scalar(&mut s, item)?;
                }
            }
            v => write_scalar(&mut s, v)?,
        }
    }

    Ok(s)
}

fn write_scalar(s: &mut String, v: &Value) -> Result<()> {
    match v {
        Value::String(v) => s.push_str(v),
        Value::Number(v) => write!(s, "{v}")?,
        Value::Bool(v) => write!(s, "{v}")?,
        _ => {
            return Err(Error::request_invalid(
                "canonical encoding supports scalar and list values only",
            ))
        }
    }

    Ok(())
}

/// Serialize a body map as compact JSON with keys sorted recursively.
///
/// `serde_json` never escapes forward slashes, matching the escaping the
/// remote verifies against.
///
/// Returns `ErrorKind::RequestInvalid` when the body is not a map.
pub fn canonical_json(body: &Value) -> Result<String> {
    if !body.is_object() {
        return Err(Error::request_invalid("request body must be a map"));
    }

    serde_json::to_string(&Canonical(body))
        .map_err(|e| Error::encoding_failed("failed to serialize request body").with_source(e))
}

/// Hex encoded SHA256 of the canonical JSON body.
///
/// An absent or null body hashes the empty string; the digest is always
/// present in the string to sign.
pub fn body_sha256_hex(body: Option<&Value>) -> Result<String> {
    match body {
        None | Some(Value::Null) => Ok(EMPTY_STRING_SHA256.to_string()),
        Some(v) => Ok(hex_sha256(canonical_json(v)?.as_bytes())),
    }
}

/// Serialize wrapper that emits object keys in ascending byte order at every
/// nesting level, independent of the underlying map representation.
struct Canonical<'a>(&'a Value);

impl Serialize for Canonical<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0 {
            Value::Object(m) => {
                let mut entries: Vec<(&String, &Value)> = m.iter().collect();
                entries.sort_by(|a, b| a.0.cmp(b.0));

                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (k, v) in entries {
                    map.serialize_entry(k, &Canonical(v))?;
                }
                map.end()
            }
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(&Canonical(item))?;
                }
                seq.end()
            }
            v => v.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_encode_sorted() {
        let params = json!({
            "SearchBy": "Distance",
            "Latitude": "-6.1900718",
            "Longitude": "106.797190",
            "Count": "3",
            "Radius": "20",
        });

        assert_eq!(
            encode("=", "&", &params).unwrap(),
            "Count=3&Latitude=-6.1900718&Longitude=106.797190&Radius=20&SearchBy=Distance"
        );
    }

    #[test]
    fn test_encode_list_values_joined_with_comma() {
        let params = json!({
            "Accounts": ["001", "002", "200"],
            "CorporateID": "corp",
        });

        assert_eq!(
            encode("=", "&", &params).unwrap(),
            "Accounts=001,002,200&CorporateID=corp"
        );
    }

    #[test]
    fn test_encode_insertion_order_independent() {
        let a = json!({"b": "2", "a": "1", "c": "3"});
        let b = json!({"c": "3", "a": "1", "b": "2"});

        assert_eq!(encode("=", "&", &a).unwrap(), encode("=", "&", &b).unwrap());
    }

    #[test]
    fn test_encode_rejects_non_map() {
        let err = encode("=", "&", &json!(["not", "a", "map"])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);

        let err = encode("=", "&", &json!("scalar")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    }

    #[test]
    fn test_canonical_json_sorted_and_compact() {
        let body = json!({"b": "2", "a": "1"});
        assert_eq!(canonical_json(&body).unwrap(), r#"{"a":"1","b":"2"}"#);
    }

    #[test]
    fn test_canonical_json_keeps_forward_slashes() {
        let body = json!({"path": "a/b"});
        assert_eq!(canonical_json(&body).unwrap(), r#"{"path":"a/b"}"#);
    }

    #[test]
    fn test_body_hash_empty_sentinel() {
        assert_eq!(
            body_sha256_hex(None).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            body_sha256_hex(Some(&Value::Null)).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_body_hash_order_independent() {
        let a = json!({"b": "2", "a": "1"});
        let b = json!({"a": "1", "b": "2"});

        assert_eq!(
            body_sha256_hex(Some(&a)).unwrap(),
            body_sha256_hex(Some(&b)).unwrap()
        );
        assert_eq!(
            body_sha256_hex(Some(&a)).unwrap(),
            "21f76dfbfe6dfe21f762080ef484112cf2952974cef30741fd1931e1c6d92112"
        );
    }
}
