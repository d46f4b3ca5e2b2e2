//! Unverified token payload decoding.
//!
//! Tokens issued by the API are three dot-delimited segments; the middle one
//! is base64 JSON. The signature is never checked here: the payload is only
//! a source of display data, and the API remains the authority on validity.

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Claims carried in the token's middle segment. Only `name` is required;
/// the rest is passed through untouched and never evaluated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPayload {
    pub sub: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub exp: Option<i64>,
}

/// Decode the payload segment of a token without verifying anything else.
///
/// Accepts both padded standard base64 and unpadded URL-safe base64 for the
/// middle segment; issuers differ on which alphabet they emit.
pub fn decode_payload(token: &str) -> Result<TokenPayload, ModelError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ModelError::Shape(format!(
            "expected 3 segments, got {}",
            parts.len()
        )));
    }
    let bytes = decode_segment(parts[1])?;
    serde_json::from_slice(&bytes).map_err(|e| ModelError::Decode(e.to_string()))
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, ModelError> {
    use base64::Engine;
    base64::engine::general_purpose::STANDARD
        .decode(segment)
        .or_else(|_| base64::engine::general_purpose::URL_SAFE_NO_PAD.decode(segment))
        .map_err(|e| ModelError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_safe_token(json: &str) -> String {
        use base64::Engine;
        let seg = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(json);
        format!("h.{seg}.s")
    }

    #[test]
    fn decodes_padded_standard_payload() {
        let payload = decode_payload("h.eyJuYW1lIjoiQWRhIn0=.s").expect("decode");
        assert_eq!(payload.name, "Ada");
        assert!(payload.sub.is_none());
        assert!(payload.exp.is_none());
    }

    #[test]
    fn decodes_url_safe_unpadded_payload() {
        let token = url_safe_token(
            r#"{"sub":"42","name":"Ada Lovelace","email":"ada@example.com","exp":1735689600}"#,
        );
        let payload = decode_payload(&token).expect("decode");
        assert_eq!(payload.name, "Ada Lovelace");
        assert_eq!(payload.sub.as_deref(), Some("42"));
        assert_eq!(payload.email.as_deref(), Some("ada@example.com"));
        assert_eq!(payload.exp, Some(1735689600));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        let err = decode_payload("only-two.segments").unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
        let err = decode_payload("a.b.c.d").unwrap_err();
        assert!(matches!(err, ModelError::Shape(_)));
    }

    #[test]
    fn rejects_invalid_base64() {
        let err = decode_payload("h.!!not-base64!!.s").unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn rejects_payload_that_is_not_json() {
        let token = url_safe_token("plain text, no braces");
        let err = decode_payload(&token).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }

    #[test]
    fn rejects_payload_missing_name() {
        let token = url_safe_token(r#"{"sub":"42"}"#);
        let err = decode_payload(&token).unwrap_err();
        assert!(matches!(err, ModelError::Decode(_)));
    }
}
