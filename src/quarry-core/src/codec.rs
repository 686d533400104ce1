//! JSON encoding of request bodies and decoding of response bytes.

use serde::Serialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("response body is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serialize a value to compact JSON text.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string(value)?)
}

/// Decode a fully buffered response body.
///
/// Bytes are read as UTF-8 and parsed as JSON. An empty or whitespace-only
/// body decodes to `Value::Null`.
pub fn decode(bytes: &[u8]) -> Result<Value, CodecError> {
    let text = std::str::from_utf8(bytes)?;
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_is_compact() {
        let value = json!({"query": {"match": {"name": "Fury"}}});
        let text = encode(&value).unwrap();
        assert_eq!(text, r#"{"query":{"match":{"name":"Fury"}}}"#);
    }

    #[test]
    fn test_encode_escapes_newlines() {
        let text = encode(&json!({"body": "line one\nline two"})).unwrap();
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_float_round_trip_is_exact() {
        for score in [1.2938119605291947e-233, 0.1, 1e308, -2.2250738585072014e-308] {
            let value = json!({"score": score});
            let decoded = decode(encode(&value).unwrap().as_bytes()).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_decode_object() {
        let value = decode(br#"{"acknowledged":true}"#).unwrap();
        assert_eq!(value, json!({"acknowledged": true}));
    }

    #[test]
    fn test_decode_empty_body_is_null() {
        assert_eq!(decode(b"").unwrap(), Value::Null);
        assert_eq!(decode(b"  \n").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = decode(&[0x7b, 0xff, 0xfe, 0x7d]).unwrap_err();
        assert!(matches!(err, CodecError::Utf8(_)));
    }

    #[test]
    fn test_decode_malformed_json() {
        let err = decode(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
        assert!(err.to_string().starts_with("JSON error"));
    }
}
