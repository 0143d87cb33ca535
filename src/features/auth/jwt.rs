//! Informational peek into a provider ID token. The payload is decoded
//! without any signature or issuer check, so nothing here may feed an
//! authorization decision; the backend exchange is the trust boundary. The
//! only consumers are display and logging on the callback page.

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use serde_json::Value;

/// Decodes the middle JWT segment as JSON. Returns `None` for anything that
/// is not a three-part token with a base64url JSON payload.
pub fn peek_claims(id_token: &str) -> Option<Value> {
    let mut segments = id_token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return None;
    };

    // Some issuers pad the segment even though JWT segments are unpadded.
    let decoded = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .ok()?;
    serde_json::from_slice(&decoded).ok()
}

/// Best-effort provider account id, forwarded to the exchange for logging.
/// Azure B2C puts the durable id in `oid`; `sub` is the generic fallback.
pub fn peek_subject(id_token: &str) -> Option<String> {
    let claims = peek_claims(id_token)?;
    for key in ["oid", "sub"] {
        if let Some(value) = claims.get(key).and_then(Value::as_str) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Best-effort email claim for greeting the user while the exchange runs.
pub fn peek_email(id_token: &str) -> Option<String> {
    let claims = peek_claims(id_token)?;
    for key in ["email", "preferred_username", "upn"] {
        if let Some(value) = claims.get(key).and_then(Value::as_str) {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    // Azure B2C delivers emails as a collection claim.
    claims
        .get("emails")
        .and_then(Value::as_array)
        .and_then(|emails| emails.first())
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

    use super::{peek_claims, peek_email, peek_subject};

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload);
        format!("{header}.{body}.signature")
    }

    #[test]
    fn email_claim_is_extracted() {
        let token = token_with_payload(r#"{"email":"ada@b.test","sub":"123"}"#);
        assert_eq!(peek_email(&token), Some("ada@b.test".to_string()));
    }

    #[test]
    fn fallback_claims_are_tried_in_order() {
        let token = token_with_payload(r#"{"preferred_username":"grace@b.test"}"#);
        assert_eq!(peek_email(&token), Some("grace@b.test".to_string()));

        let token = token_with_payload(r#"{"emails":["b2c@b.test"]}"#);
        assert_eq!(peek_email(&token), Some("b2c@b.test".to_string()));
    }

    #[test]
    fn subject_prefers_the_azure_object_id() {
        let token = token_with_payload(r#"{"oid":"b2c-314","sub":"ignored"}"#);
        assert_eq!(peek_subject(&token), Some("b2c-314".to_string()));

        let token = token_with_payload(r#"{"sub":"plain-7"}"#);
        assert_eq!(peek_subject(&token), Some("plain-7".to_string()));

        assert_eq!(peek_subject("not-a-jwt"), None);
    }

    #[test]
    fn malformed_tokens_yield_nothing() {
        assert_eq!(peek_claims("not-a-jwt"), None);
        assert_eq!(peek_claims("one.two"), None);
        assert_eq!(peek_claims("a.b.c.d"), None);
        assert_eq!(peek_claims("x.!!!.y"), None);
        assert_eq!(peek_email(&token_with_payload("[1,2]")), None);
    }

    #[test]
    fn padded_payload_segments_still_decode() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let body = base64::engine::general_purpose::URL_SAFE.encode(r#"{"email":"pad@b.test"}"#);
        let token = format!("{header}.{body}.sig");
        assert_eq!(peek_email(&token), Some("pad@b.test".to_string()));
    }
}
