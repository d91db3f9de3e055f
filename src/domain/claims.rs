//! Read-only view of a JWT payload.
//!
//! Signatures are never checked here; the backend owns that. The client only
//! needs the expiry and the identity of whoever signed in.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TokenClaims {
    /// `exp`, in seconds since the Unix epoch.
    pub expires_at: Option<i64>,
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("token is empty")]
    Empty,
    #[error("token must have three dot-separated parts, found {0}")]
    Malformed(usize),
    #[error("token payload is not valid base64url: {0}")]
    Encoding(String),
    #[error("token payload is not a JSON object: {0}")]
    Payload(String),
}

const USER_ID_KEYS: [&str; 4] = ["id", "userId", "user_id", "sub"];

pub fn decode_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(ClaimsError::Empty);
    }

    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(ClaimsError::Malformed(parts.len()));
    }

    let payload = parts[1].trim_end_matches('=');
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|err| ClaimsError::Encoding(err.to_string()))?;
    let value: Value =
        serde_json::from_slice(&bytes).map_err(|err| ClaimsError::Payload(err.to_string()))?;
    let Value::Object(map) = value else {
        return Err(ClaimsError::Payload("expected an object".to_string()));
    };

    let expires_at = map.get("exp").and_then(|exp| match exp {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(|secs| secs as i64)),
        Value::String(text) => text.parse().ok(),
        _ => None,
    });
    let user_id = USER_ID_KEYS
        .iter()
        .find_map(|key| map.get(*key).and_then(scalar_to_string));

    Ok(TokenClaims {
        expires_at,
        user_id,
        email: map.get("email").and_then(scalar_to_string),
        role: map.get("role").and_then(scalar_to_string),
    })
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// A token without `exp` never expires on the client side.
pub fn is_expired(claims: &TokenClaims, now_epoch_secs: i64) -> bool {
    claims
        .expires_at
        .is_some_and(|expires_at| expires_at <= now_epoch_secs)
}

/// Undecodable tokens count as expired.
pub fn token_is_expired(token: &str, now_epoch_secs: i64) -> bool {
    match decode_claims(token) {
        Ok(claims) => is_expired(&claims, now_epoch_secs),
        Err(_) => true,
    }
}

#[cfg(test)]
pub(crate) fn encode_test_token(payload: &str) -> String {
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.c2lnbmF0dXJl",
        URL_SAFE_NO_PAD.encode(payload)
    )
}
