//! Value encoding/decoding for the facade
//!
//! Two wire shapes, selected by the `raw` option:
//!
//! - default: the value is serialized as a compact JSON document, so any
//!   `serde`-capable type round-trips through the backend.
//! - raw: the value's textual representation is stored as plain UTF-8 bytes
//!   with no framing, for interop with readers that expect bare text
//!   (counters, sentinel strings, other clients).

use crate::CodecError;
use bytes::Bytes;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Encode a value for storage.
pub fn encode<T: Serialize>(value: &T, raw: bool) -> Result<Bytes, CodecError> {
    if raw {
        // Strings are stored without JSON quoting; everything else falls
        // back to its compact JSON text.
        let text = match serde_json::to_value(value)
            .map_err(|e| CodecError::Encoding(e.to_string()))?
        {
            Value::String(s) => s,
            other => other.to_string(),
        };
        Ok(Bytes::from(text.into_bytes()))
    } else {
        serde_json::to_vec(value)
            .map(Bytes::from)
            .map_err(|e| CodecError::Encoding(e.to_string()))
    }
}

/// Decode a stored value.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], raw: bool) -> Result<T, CodecError> {
    if raw {
        let text = std::str::from_utf8(bytes).map_err(|_| CodecError::NotUtf8)?;
        serde_json::from_value(Value::String(text.to_owned()))
            .map_err(|e| CodecError::Decoding(e.to_string()))
    } else {
        serde_json::from_slice(bytes).map_err(|e| CodecError::Decoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Profile {
        name: String,
        visits: u64,
    }

    #[test]
    fn test_round_trip_struct() {
        let profile = Profile {
            name: "ada".to_string(),
            visits: 17,
        };
        let encoded = encode(&profile, false).unwrap();
        let decoded: Profile = decode(&encoded, false).unwrap();
        assert_eq!(decoded, profile);
    }

    #[test]
    fn test_round_trip_falsy_values() {
        // Empty string, zero and false must survive unchanged
        let encoded = encode(&String::new(), false).unwrap();
        let decoded: String = decode(&encoded, false).unwrap();
        assert_eq!(decoded, "");

        let encoded = encode(&0u64, false).unwrap();
        let decoded: u64 = decode(&encoded, false).unwrap();
        assert_eq!(decoded, 0);

        let encoded = encode(&false, false).unwrap();
        let decoded: bool = decode(&encoded, false).unwrap();
        assert!(!decoded);
    }

    #[test]
    fn test_raw_string_is_unquoted() {
        let encoded = encode(&"hello".to_string(), true).unwrap();
        assert_eq!(&encoded[..], b"hello");

        let decoded: String = decode(&encoded, true).unwrap();
        assert_eq!(decoded, "hello");
    }

    #[test]
    fn test_raw_number_is_textual() {
        let encoded = encode(&42u64, true).unwrap();
        assert_eq!(&encoded[..], b"42");
    }

    #[test]
    fn test_decode_garbage() {
        let result: Result<Profile, _> = decode(b"not json", false);
        assert!(matches!(result, Err(CodecError::Decoding(_))));
    }

    #[test]
    fn test_decode_raw_invalid_utf8() {
        let result: Result<String, _> = decode(&[0xff, 0xfe], true);
        assert!(matches!(result, Err(CodecError::NotUtf8)));
    }
}
